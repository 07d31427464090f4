//! Convolution with named kernels.
//!
//! # Kernels
//!
//! [`make_kernel`] builds a 2D kernel by name. Except for `laplacian`, all
//! kernels are separable products `f(x) * f(y)` normalized to sum to 1:
//!
//! | Name | Profile in `t = 2 * abs(d) / width` |
//! |------|-------------------------------|
//! | `gaussian` | `exp(-2 t^2)` |
//! | `sharp-gaussian` | `exp(-4 t^2)` |
//! | `box` | `1` |
//! | `triangle` | `max(1 - t, 0)` |
//! | `laplacian` | fixed 3x3 `[0 1 0; 1 -4 1; 0 1 0]` |
//!
//! Kernel sizes are `ceil(width) x ceil(height)`, rounded up to odd.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//! use imgalgo_ops::filter::{convolve_image, make_kernel};
//!
//! let img = ImageBuf::filled(16, 16, &[0.5, 0.5, 0.5]);
//! let kernel = make_kernel("gaussian", 5.0, 5.0).unwrap();
//! let blurred = convolve_image(&img, &kernel).unwrap();
//! assert!((blurred.pixel(8, 8)[0] - 0.5).abs() < 1e-6);
//! ```

use imgalgo_core::ImageBuf;
use rayon::prelude::*;
use tracing::trace;

use crate::error::check_len;
use crate::{OpsError, OpsResult};

/// Convolution kernel for image filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// Width and height must be odd.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Weight at kernel position `(kx, ky)`.
    #[inline]
    pub fn at(&self, kx: usize, ky: usize) -> f32 {
        self.data[ky * self.width + kx]
    }

    fn separable(profile: fn(f32) -> f32, width: f32, height: f32) -> Self {
        let (kw, kh) = (odd_size(width), odd_size(height));
        let xs = samples(profile, kw, width);
        let ys = samples(profile, kh, height);
        let mut data: Vec<f32> = ys
            .iter()
            .flat_map(|wy| xs.iter().map(move |wx| wx * wy))
            .collect();
        let sum: f32 = data.iter().sum();
        if sum > 0.0 {
            for w in &mut data {
                *w /= sum;
            }
        }
        Self {
            data,
            width: kw,
            height: kh,
        }
    }
}

fn odd_size(extent: f32) -> usize {
    let n = (extent.ceil() as usize).max(1);
    if n % 2 == 0 { n + 1 } else { n }
}

/// 1D profile sampled at integer offsets from the center.
fn samples(profile: fn(f32) -> f32, size: usize, extent: f32) -> Vec<f32> {
    let half = (size / 2) as f32;
    (0..size)
        .map(|i| {
            let d = (i as f32 - half).abs();
            profile(2.0 * d / extent)
        })
        .collect()
}

fn gaussian(t: f32) -> f32 {
    (-2.0 * t * t).exp()
}

fn sharp_gaussian(t: f32) -> f32 {
    (-4.0 * t * t).exp()
}

fn flat(_: f32) -> f32 {
    1.0
}

fn triangle(t: f32) -> f32 {
    (1.0 - t).max(0.0)
}

/// Builds a kernel by name.
///
/// `width` and `height` are the kernel extents in pixels and are ignored by
/// `laplacian`. Names are matched ignoring ASCII case.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] for an unknown name or a non-positive or
/// non-finite extent.
///
/// # Example
///
/// ```rust
/// use imgalgo_ops::filter::make_kernel;
///
/// let k = make_kernel("box", 3.0, 3.0).unwrap();
/// assert_eq!((k.width, k.height), (3, 3));
/// assert!((k.sum() - 1.0).abs() < 1e-6);
/// ```
pub fn make_kernel(name: &str, width: f32, height: f32) -> OpsResult<Kernel> {
    let name = name.trim().to_ascii_lowercase();
    if name == "laplacian" {
        return Kernel::new(vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0], 3, 3);
    }
    let profile: fn(f32) -> f32 = match name.as_str() {
        "gaussian" => gaussian,
        "sharp-gaussian" => sharp_gaussian,
        "box" => flat,
        "triangle" => triangle,
        _ => return Err(OpsError::InvalidParameter(format!("unknown kernel: {name}"))),
    };
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "kernel extent must be > 0, got {width}x{height}"
        )));
    }
    Ok(Kernel::separable(profile, width, height))
}

/// Convolves raw interleaved data with `kernel`, clamping at the edges.
///
/// Every channel is filtered, alpha included.
///
/// # Example
///
/// ```rust
/// use imgalgo_ops::filter::{convolve_buffer, make_kernel};
///
/// let src = vec![0.5f32; 8 * 8 * 3];
/// let kernel = make_kernel("triangle", 3.0, 3.0).unwrap();
/// let result = convolve_buffer(&src, 8, 8, 3, &kernel).unwrap();
/// assert_eq!(result.len(), 8 * 8 * 3);
/// ```
pub fn convolve_buffer(
    src: &[f32],
    width: u32,
    height: u32,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, kernel_w = kernel.width, kernel_h = kernel.height, "convolve_buffer");

    let (w, h) = (width as usize, height as usize);
    check_len(src.len(), w, h, channels)?;
    let mut dst = vec![0.0f32; src.len()];
    if dst.is_empty() {
        return Ok(dst);
    }
    let (rx, ry) = kernel.radius();

    dst.par_chunks_mut(w * channels).enumerate().for_each(|(y, row)| {
        for (x, out) in row.chunks_exact_mut(channels).enumerate() {
            for ky in 0..kernel.height {
                let sy = (y + ky).saturating_sub(ry).min(h - 1);
                for kx in 0..kernel.width {
                    let kw = kernel.at(kx, ky);
                    if kw == 0.0 {
                        continue;
                    }
                    let sx = (x + kx).saturating_sub(rx).min(w - 1);
                    let idx = (sy * w + sx) * channels;
                    for (o, v) in out.iter_mut().zip(&src[idx..idx + channels]) {
                        *o += v * kw;
                    }
                }
            }
        }
    });

    Ok(dst)
}

/// Convolves an image with `kernel`; see [`convolve_buffer`].
pub fn convolve_image(src: &ImageBuf, kernel: &Kernel) -> OpsResult<ImageBuf> {
    let (width, height) = src.dimensions();
    let data = convolve_buffer(src.data(), width, height, src.channels(), kernel)?;
    Ok(ImageBuf::from_data(width, height, src.channels(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_new_validates() {
        assert!(Kernel::new(vec![1.0; 4], 2, 2).is_err());
        assert!(Kernel::new(vec![1.0; 8], 3, 3).is_err());
        assert!(Kernel::new(vec![1.0; 9], 3, 3).is_ok());
    }

    #[test]
    fn test_kernel_sizes() {
        let k = make_kernel("gaussian", 4.0, 2.5).unwrap();
        assert_eq!((k.width, k.height), (5, 3));
        let k = make_kernel("box", 0.5, 1.0).unwrap();
        assert_eq!((k.width, k.height), (1, 1));
    }

    #[test]
    fn test_kernels_normalized() {
        for name in ["gaussian", "sharp-gaussian", "box", "triangle"] {
            let k = make_kernel(name, 5.0, 7.0).unwrap();
            assert_abs_diff_eq!(k.sum(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_gaussian_peaks_at_center() {
        let k = make_kernel("Gaussian", 5.0, 5.0).unwrap();
        let center = k.at(2, 2);
        assert!(k.data.iter().all(|&w| w <= center));
        assert_abs_diff_eq!(k.at(0, 2), k.at(4, 2));
        let sharp = make_kernel("sharp-gaussian", 5.0, 5.0).unwrap();
        assert!(sharp.at(2, 2) > center);
    }

    #[test]
    fn test_laplacian() {
        let k = make_kernel("laplacian", 9.0, 9.0).unwrap();
        assert_eq!((k.width, k.height), (3, 3));
        assert_abs_diff_eq!(k.sum(), 0.0);
        assert_eq!(k.at(1, 1), -4.0);
    }

    #[test]
    fn test_unknown_and_bad_extent() {
        assert!(make_kernel("blackman", 3.0, 3.0).is_err());
        assert!(make_kernel("box", 0.0, 3.0).is_err());
        assert!(make_kernel("box", f32::NAN, 3.0).is_err());
    }

    #[test]
    fn test_box_blur_point() {
        let mut src = vec![0.0f32; 5 * 5];
        src[12] = 9.0;
        let k = make_kernel("box", 3.0, 3.0).unwrap();
        let dst = convolve_buffer(&src, 5, 5, 1, &k).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..=3).contains(&x) && (1..=3).contains(&y) { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(dst[y * 5 + x], expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_clamp_to_edge_preserves_constant() {
        let src = vec![0.3f32; 7 * 4 * 4];
        let k = make_kernel("gaussian", 5.0, 5.0).unwrap();
        let dst = convolve_buffer(&src, 7, 4, 4, &k).unwrap();
        for v in dst {
            assert_abs_diff_eq!(v, 0.3, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_laplacian_of_ramp_is_zero_inside() {
        let src: Vec<f32> = (0..6 * 6).map(|i| (i % 6) as f32).collect();
        let k = make_kernel("laplacian", 3.0, 3.0).unwrap();
        let dst = convolve_buffer(&src, 6, 6, 1, &k).unwrap();
        for y in 1..5 {
            for x in 1..5 {
                assert_abs_diff_eq!(dst[y * 6 + x], 0.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_length_checked() {
        let k = make_kernel("box", 3.0, 3.0).unwrap();
        assert!(convolve_buffer(&[0.0; 10], 4, 4, 1, &k).is_err());
    }
}
