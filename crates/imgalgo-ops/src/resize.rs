//! Image downscaling with separable resampling filters.
//!
//! Images are reduced by an integer factor: a `w x h` image downscaled by
//! `d` becomes `max(w / d, 1) x max(h / d, 1)`. Resampling is two-pass
//! (horizontal, then vertical) and each pass processes rows in parallel.
//!
//! # Filters
//!
//! | Name(s) | [`Filter`] | Default width |
//! |---------|------------|---------------|
//! | `box` | [`Box`](Filter::Box) | 1 |
//! | `triangle`, `bilinear`, *(empty)* | [`Triangle`](Filter::Triangle) | 2 |
//! | `gaussian` | [`Gaussian`](Filter::Gaussian) | 2 |
//! | `mitchell` | [`Mitchell`](Filter::Mitchell) | 4 |
//! | `catmull-rom`, `bicubic` | [`CatmullRom`](Filter::CatmullRom) | 4 |
//! | `lanczos3` | [`Lanczos3`](Filter::Lanczos3) | 6 |
//!
//! Widths are full filter widths in destination pixels; the support radius
//! is half of it.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//! use imgalgo_ops::resize::{resize_image, Filter, ResizeOptions};
//!
//! let src = ImageBuf::filled(64, 48, &[0.5, 0.25, 1.0]);
//! let opts = ResizeOptions::new(Filter::from_name("lanczos3").unwrap());
//! let half = resize_image(&src, 2, &opts).unwrap();
//! assert_eq!(half.dimensions(), (32, 24));
//! ```

use imgalgo_core::ImageBuf;
use rayon::prelude::*;
use tracing::trace;

use crate::error::check_len;
use crate::{OpsError, OpsResult};

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Box average.
    Box,
    /// Linear (tent) filter.
    #[default]
    Triangle,
    /// Truncated Gaussian.
    Gaussian,
    /// Mitchell-Netravali cubic, B = C = 1/3.
    Mitchell,
    /// Catmull-Rom cubic, B = 0, C = 1/2.
    CatmullRom,
    /// Lanczos windowed sinc, a = 3.
    Lanczos3,
}

const FILTER_NAMES: &[(&str, Filter)] = &[
    ("box", Filter::Box),
    ("triangle", Filter::Triangle),
    ("bilinear", Filter::Triangle),
    ("gaussian", Filter::Gaussian),
    ("mitchell", Filter::Mitchell),
    ("catmull-rom", Filter::CatmullRom),
    ("bicubic", Filter::CatmullRom),
    ("lanczos3", Filter::Lanczos3),
];

impl Filter {
    /// Resolves a filter name, ignoring ASCII case.
    ///
    /// An empty name selects the default ([`Filter::Triangle`]).
    pub fn from_name(name: &str) -> OpsResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Self::default());
        }
        FILTER_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, f)| f)
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown filter: {name}")))
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Box => "box",
            Filter::Triangle => "triangle",
            Filter::Gaussian => "gaussian",
            Filter::Mitchell => "mitchell",
            Filter::CatmullRom => "catmull-rom",
            Filter::Lanczos3 => "lanczos3",
        }
    }

    /// Default support radius, in destination pixels.
    #[inline]
    pub fn support(self) -> f32 {
        match self {
            Filter::Box => 0.5,
            Filter::Triangle | Filter::Gaussian => 1.0,
            Filter::Mitchell | Filter::CatmullRom => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter at `x`, in units of its own default support.
    #[inline]
    pub fn weight(self, x: f32) -> f32 {
        let ax = x.abs();
        match self {
            Filter::Box => {
                if ax <= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Filter::Triangle => (1.0 - ax).max(0.0),
            Filter::Gaussian => {
                if ax < 1.0 {
                    (-8.0 * ax * ax).exp()
                } else {
                    0.0
                }
            }
            Filter::Mitchell => cubic(ax, 1.0 / 3.0, 1.0 / 3.0),
            Filter::CatmullRom => cubic(ax, 0.0, 0.5),
            Filter::Lanczos3 => lanczos(ax, 3.0),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mitchell-Netravali family.
#[inline]
fn cubic(ax: f32, b: f32, c: f32) -> f32 {
    if ax < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * ax * ax * ax + (-18.0 + 12.0 * b + 6.0 * c) * ax * ax + (6.0 - 2.0 * b))
            / 6.0
    } else if ax < 2.0 {
        ((-b - 6.0 * c) * ax * ax * ax
            + (6.0 * b + 30.0 * c) * ax * ax
            + (-12.0 * b - 48.0 * c) * ax
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos(ax: f32, a: f32) -> f32 {
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Options for [`resize_image`] and [`resize_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeOptions {
    /// Resampling filter.
    pub filter: Filter,
    /// Full filter width in destination pixels (0 = filter default).
    pub filter_width: f32,
}

impl ResizeOptions {
    /// Options with `filter` at its default width.
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            filter_width: 0.0,
        }
    }

    /// Resolves a filter by name; see [`Filter::from_name`].
    pub fn named(name: &str, filter_width: f32) -> OpsResult<Self> {
        Ok(Self {
            filter: Filter::from_name(name)?,
            filter_width,
        })
    }

    fn radius(&self) -> f32 {
        if self.filter_width > 0.0 {
            self.filter_width / 2.0
        } else {
            self.filter.support()
        }
    }
}

/// Output size of a downscale: `max(n / downscale, 1)` per axis.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `downscale` is zero.
pub fn downscaled_dimensions(width: u32, height: u32, downscale: u32) -> OpsResult<(u32, u32)> {
    if downscale == 0 {
        return Err(OpsError::InvalidParameter("downscale must be >= 1".into()));
    }
    Ok(((width / downscale).max(1), (height / downscale).max(1)))
}

/// Downscales `src` by an integer factor.
///
/// `downscale == 1` returns a copy.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] for a zero factor or a negative or NaN
///   filter width
/// - [`OpsError::InvalidDimensions`] for an empty source
pub fn resize_image(src: &ImageBuf, downscale: u32, options: &ResizeOptions) -> OpsResult<ImageBuf> {
    let (width, height) = src.dimensions();
    let (dst_w, dst_h) = downscaled_dimensions(width, height, downscale)?;
    let data = resize_buffer(src.data(), width, height, src.channels(), downscale, options)?;
    Ok(ImageBuf::from_data(dst_w, dst_h, src.channels(), data)?)
}

/// Downscales raw interleaved data by an integer factor.
///
/// # Example
///
/// ```rust
/// use imgalgo_ops::resize::{resize_buffer, ResizeOptions};
///
/// let src = vec![0.25f32; 10 * 6];
/// let dst = resize_buffer(&src, 10, 6, 1, 3, &ResizeOptions::default()).unwrap();
/// assert_eq!(dst.len(), 3 * 2);
/// ```
pub fn resize_buffer(
    src: &[f32],
    width: u32,
    height: u32,
    channels: usize,
    downscale: u32,
    options: &ResizeOptions,
) -> OpsResult<Vec<f32>> {
    let (dst_w, dst_h) = downscaled_dimensions(width, height, downscale)?;
    if width == 0 || height == 0 || channels == 0 {
        return Err(OpsError::InvalidDimensions(
            "width, height, and channels must be > 0".into(),
        ));
    }
    check_len(src.len(), width as usize, height as usize, channels)?;
    if options.filter_width.is_nan() || options.filter_width < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "filter width must be >= 0, got {}",
            options.filter_width
        )));
    }
    if downscale == 1 {
        return Ok(src.to_vec());
    }
    trace!(width, height, channels, downscale, filter = %options.filter, "resize_buffer");

    let (w, h, dw, dh) = (width as usize, height as usize, dst_w as usize, dst_h as usize);
    let horizontal = Taps::new(w, dw, options);
    let vertical = Taps::new(h, dh, options);

    // Horizontal pass: h rows of dw pixels
    let mut temp = vec![0.0f32; dw * h * channels];
    temp.par_chunks_mut(dw * channels).enumerate().for_each(|(y, row)| {
        let src_row = &src[y * w * channels..(y + 1) * w * channels];
        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            for (sx, weight) in horizontal.iter(x) {
                let px = &src_row[sx * channels..(sx + 1) * channels];
                for (o, v) in out.iter_mut().zip(px) {
                    *o += v * weight;
                }
            }
        }
    });

    // Vertical pass: dh rows of dw pixels
    let mut dst = vec![0.0f32; dw * dh * channels];
    let row_len = dw * channels;
    dst.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        for (sy, weight) in vertical.iter(y) {
            let src_row = &temp[sy * row_len..(sy + 1) * row_len];
            for (o, v) in row.iter_mut().zip(src_row) {
                *o += v * weight;
            }
        }
    });

    Ok(dst)
}

/// Precomputed normalized filter taps for one axis.
struct Taps {
    /// `(first source index, weights)` per destination index
    spans: Vec<(usize, Vec<f32>)>,
}

impl Taps {
    fn new(src_len: usize, dst_len: usize, options: &ResizeOptions) -> Self {
        let scale = src_len as f32 / dst_len as f32;
        let filter_scale = scale.max(1.0);
        let radius = options.radius() * filter_scale;
        // Maps a source offset into the filter's own units
        let unit = options.filter.support() / (options.radius() * filter_scale);

        let spans = (0..dst_len)
            .map(|i| {
                let center = (i as f32 + 0.5) * scale - 0.5;
                let first = ((center - radius).floor().max(0.0)) as usize;
                let last = ((center + radius).ceil() as usize).min(src_len - 1);
                let mut weights: Vec<f32> = (first..=last)
                    .map(|s| options.filter.weight((s as f32 - center) * unit))
                    .collect();
                let sum: f32 = weights.iter().sum();
                if sum.abs() > 1e-8 {
                    for w in &mut weights {
                        *w /= sum;
                    }
                } else {
                    // Filter too narrow to hit a sample: nearest source pixel
                    let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
                    return (nearest, vec![1.0]);
                }
                (first, weights)
            })
            .collect();
        Self { spans }
    }

    fn iter(&self, i: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let (first, weights) = &self.spans[i];
        weights.iter().enumerate().map(move |(k, &w)| (first + k, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_filter_names() {
        assert_eq!(Filter::from_name("").unwrap(), Filter::Triangle);
        assert_eq!(Filter::from_name("Bilinear").unwrap(), Filter::Triangle);
        assert_eq!(Filter::from_name("bicubic").unwrap(), Filter::CatmullRom);
        assert_eq!(Filter::from_name("LANCZOS3").unwrap(), Filter::Lanczos3);
        assert!(Filter::from_name("blackman-harris").is_err());
        for &(_, f) in FILTER_NAMES {
            assert_eq!(Filter::from_name(f.name()).unwrap(), f);
        }
    }

    #[test]
    fn test_filter_weights() {
        assert_abs_diff_eq!(Filter::Box.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Box.weight(0.6), 0.0);
        assert_abs_diff_eq!(Filter::Triangle.weight(0.5), 0.5);
        assert_abs_diff_eq!(Filter::CatmullRom.weight(0.0), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Filter::CatmullRom.weight(1.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Filter::Lanczos3.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Lanczos3.weight(2.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_downscaled_dimensions() {
        assert_eq!(downscaled_dimensions(1920, 1080, 4).unwrap(), (480, 270));
        assert_eq!(downscaled_dimensions(3, 3, 8).unwrap(), (1, 1));
        assert!(downscaled_dimensions(8, 8, 0).is_err());
    }

    #[test]
    fn test_constant_image_stays_constant() {
        for filter in [Filter::Box, Filter::Triangle, Filter::Gaussian, Filter::Mitchell, Filter::CatmullRom, Filter::Lanczos3] {
            let src = vec![0.5f32; 33 * 17 * 3];
            let dst = resize_buffer(&src, 33, 17, 3, 4, &ResizeOptions::new(filter)).unwrap();
            assert_eq!(dst.len(), 8 * 4 * 3);
            for v in dst {
                assert_abs_diff_eq!(v, 0.5, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_box_downscale_averages_blocks() {
        // 4x1 -> 2x1 with a box: each output is the mean of two inputs
        let src = [0.0f32, 1.0, 2.0, 4.0];
        let dst = resize_buffer(&src, 4, 1, 1, 2, &ResizeOptions::new(Filter::Box)).unwrap();
        assert_abs_diff_eq!(dst[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(dst[1], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_length_checked() {
        let src = vec![0.0f32; 10];
        assert!(resize_buffer(&src, 4, 4, 1, 2, &ResizeOptions::default()).is_err());
    }

    #[test]
    fn test_negative_width_rejected() {
        let src = vec![0.0f32; 16];
        let opts = ResizeOptions {
            filter: Filter::Triangle,
            filter_width: -1.0,
        };
        assert!(resize_buffer(&src, 4, 4, 1, 2, &opts).is_err());
    }
}
