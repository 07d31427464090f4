//! Push-pull hole filling on an image's own alpha channel.
//!
//! A faster, smoother alternative to [`holes`](crate::holes) for large
//! holes. The push phase builds an alpha-weighted mip pyramid in which every
//! level covers more holes than the one below; the pull phase walks back
//! down, replacing holes at each level with the coarser level's value.
//!
//! ```text
//! level 0  (w x h)                 valid pixels kept, holes <- level 1
//! level 1  (ceil(w/2) x ceil(h/2))  2x2 alpha-weighted mean of level 0
//! ...
//! level n  (1 x 1)
//! ```
//!
//! Filled pixels take the coarse level's alpha too, so the output alpha
//! marks how much valid data reached each hole.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//! use imgalgo_ops::pushpull::{count_holes, fill_holes_pushpull, PushPullOptions};
//!
//! let mut img = ImageBuf::filled(8, 8, &[1.0, 0.0, 0.0, 1.0]);
//! img.set_pixel(3, 3, &[0.0, 0.0, 0.0, 0.0]);
//!
//! let opts = PushPullOptions::default();
//! assert_eq!(count_holes(&img, &opts), 1);
//!
//! let filled = fill_holes_pushpull(&img, &opts).unwrap();
//! assert_eq!(count_holes(&filled, &opts), 0);
//! assert!(filled.pixel(3, 3)[0] > 0.99);
//! ```

use imgalgo_core::ImageBuf;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

/// Options for [`fill_holes_pushpull`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushPullOptions {
    /// Alpha channel index. `None` uses the last channel of 2- and
    /// 4-channel images.
    pub alpha_channel: Option<usize>,
    /// Alpha at or below this marks a hole.
    pub alpha_threshold: f32,
    /// Run one dilation pass over holes left after the pull phase.
    pub dilate: bool,
    /// Maximum pyramid levels (0 = down to 1x1).
    pub max_levels: u32,
}

impl Default for PushPullOptions {
    fn default() -> Self {
        Self {
            alpha_channel: None,
            alpha_threshold: 0.001,
            dilate: true,
            max_levels: 0,
        }
    }
}

/// Fills holes in `src` using the push-pull algorithm.
///
/// Images without an alpha channel have no holes and are returned as is.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] for an empty image
/// - [`OpsError::InvalidParameter`] if `alpha_channel` is out of range
pub fn fill_holes_pushpull(src: &ImageBuf, options: &PushPullOptions) -> OpsResult<ImageBuf> {
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions("push-pull on an empty image".into()));
    }
    let Some(alpha) = alpha_channel(src, options)? else {
        return Ok(src.clone());
    };

    // Halving with ceil reaches 1x1 after ceil(log2(max_dim)) steps
    let max_dim = src.width().max(src.height());
    let auto_levels = max_dim.next_power_of_two().trailing_zeros() + 1;
    let levels = match options.max_levels {
        0 => auto_levels,
        n => n.min(auto_levels),
    };
    trace!(width = src.width(), height = src.height(), alpha, levels, "fill_holes_pushpull");

    let threshold = options.alpha_threshold;
    let pyramid = build_pyramid(src, alpha, threshold, levels);
    debug!(levels = pyramid.len(), "push-pull pyramid built");

    let mut result = pull(&pyramid, alpha, threshold);
    if options.dilate {
        result = dilate(&result, alpha, threshold);
    }
    Ok(result)
}

/// Returns `true` if `src` has at least one hole pixel.
pub fn has_holes(src: &ImageBuf, options: &PushPullOptions) -> bool {
    match alpha_channel(src, options) {
        Ok(Some(a)) => src
            .data()
            .chunks_exact(src.channels())
            .any(|px| px[a] <= options.alpha_threshold),
        _ => false,
    }
}

/// Counts hole pixels in `src`.
pub fn count_holes(src: &ImageBuf, options: &PushPullOptions) -> usize {
    match alpha_channel(src, options) {
        Ok(Some(a)) => src
            .data()
            .chunks_exact(src.channels())
            .filter(|px| px[a] <= options.alpha_threshold)
            .count(),
        _ => 0,
    }
}

fn alpha_channel(src: &ImageBuf, options: &PushPullOptions) -> OpsResult<Option<usize>> {
    let channels = src.channels();
    match options.alpha_channel {
        Some(a) if a < channels => Ok(Some(a)),
        Some(a) => Err(OpsError::InvalidParameter(format!(
            "alpha channel {a} out of range for {channels}-channel image"
        ))),
        None => Ok(matches!(channels, 2 | 4).then(|| channels - 1)),
    }
}

fn build_pyramid(src: &ImageBuf, alpha: usize, threshold: f32, levels: u32) -> Vec<ImageBuf> {
    let mut pyramid = vec![src.clone()];
    for _ in 1..levels {
        let Some(prev) = pyramid.last() else { break };
        if prev.width() <= 1 && prev.height() <= 1 {
            break;
        }
        let next = downsample(prev, alpha, threshold);
        pyramid.push(next);
    }
    pyramid
}

/// Halves `src` rounding up, averaging each 2x2 block weighted by alpha.
///
/// An odd last column or row forms a partial block of its own. Blocks with
/// no valid pixel stay zero, i.e. remain holes.
fn downsample(src: &ImageBuf, alpha: usize, threshold: f32) -> ImageBuf {
    let (src_w, src_h) = (src.width(), src.height());
    let channels = src.channels();
    let mut dst = ImageBuf::new(src_w.div_ceil(2), src_h.div_ceil(2), channels);
    let row_len = dst.row_len();

    dst.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(dy, row)| {
            let mut sum = vec![0.0f32; channels];
            for (dx, out) in row.chunks_exact_mut(channels).enumerate() {
                sum.fill(0.0);
                let mut weight_sum = 0.0f32;
                let (x0, y0) = (dx as u32 * 2, dy as u32 * 2);
                for sy in y0..(y0 + 2).min(src_h) {
                    for sx in x0..(x0 + 2).min(src_w) {
                        let px = src.pixel(sx, sy);
                        let a = px[alpha];
                        if a > threshold {
                            for (s, v) in sum.iter_mut().zip(px) {
                                *s += v * a;
                            }
                            weight_sum += a;
                        }
                    }
                }
                if weight_sum > 0.0 {
                    for (o, s) in out.iter_mut().zip(&sum) {
                        *o = s / weight_sum;
                    }
                }
            }
        });
    dst
}

fn pull(pyramid: &[ImageBuf], alpha: usize, threshold: f32) -> ImageBuf {
    let mut levels = pyramid.iter().rev();
    let Some(mut current) = levels.next().cloned() else {
        return ImageBuf::new(0, 0, 0);
    };
    for finer in levels {
        current = upsample_into(&current, finer, alpha, threshold);
    }
    current
}

/// Copy of `fine` with its holes taken from the `coarse` pixel whose 2x2
/// block covers them.
fn upsample_into(coarse: &ImageBuf, fine: &ImageBuf, alpha: usize, threshold: f32) -> ImageBuf {
    let (coarse_w, coarse_h) = (coarse.width(), coarse.height());
    let channels = fine.channels();
    let mut result = fine.clone();
    let row_len = result.row_len();

    result
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(fy, row)| {
            let cy = (fy as u32 / 2).min(coarse_h - 1);
            for (fx, px) in row.chunks_exact_mut(channels).enumerate() {
                if px[alpha] > threshold {
                    continue;
                }
                let cx = (fx as u32 / 2).min(coarse_w - 1);
                px.copy_from_slice(coarse.pixel(cx, cy));
            }
        });
    result
}

/// Fills remaining holes with the mean of their valid 8-neighbors.
fn dilate(img: &ImageBuf, alpha: usize, threshold: f32) -> ImageBuf {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let channels = img.channels();
    let mut result = img.clone();
    let row_len = result.row_len();

    result
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let mut sum = vec![0.0f32; channels];
            for (x, px) in row.chunks_exact_mut(channels).enumerate() {
                if px[alpha] > threshold {
                    continue;
                }
                sum.fill(0.0);
                let mut count = 0u32;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                        if (dx == 0 && dy == 0) || nx < 0 || ny < 0 || nx >= w || ny >= h {
                            continue;
                        }
                        let n = img.pixel(nx as u32, ny as u32);
                        if n[alpha] > threshold {
                            for (s, v) in sum.iter_mut().zip(n) {
                                *s += v;
                            }
                            count += 1;
                        }
                    }
                }
                if count > 0 {
                    for (o, s) in px.iter_mut().zip(&sum) {
                        *o = s / count as f32;
                    }
                }
            }
        });
    result
}
