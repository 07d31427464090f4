//! Whole-image color conversion.
//!
//! The dispatcher resolves a `(from, to)` pair into a [`Conversion`] once,
//! then maps it over every pixel with the row-parallel processor from
//! `imgalgo-core`. Only the first three channels are converted; a fourth
//! (alpha) channel and any beyond it are left as they are.
//!
//! All validation happens before the first pixel is written:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | `from == to` | `Ok`, buffer untouched |
//! | fewer than 3 channels | [`ChannelMismatch`](imgalgo_core::Error::ChannelMismatch) |
//! | unknown space name | [`UnsupportedColorSpace`](imgalgo_core::Error::UnsupportedColorSpace) |
//! | src/dst shape differs | [`DimensionMismatch`](imgalgo_core::Error::DimensionMismatch) |
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::{ColorSpace, ImageBuf};
//! use imgalgo_color::colorconvert;
//!
//! let mut img = ImageBuf::filled(32, 32, &[0.5, 0.5, 0.5, 1.0]);
//! colorconvert(&mut img, ColorSpace::Srgb, ColorSpace::Linear).unwrap();
//! assert!((img.pixel(0, 0)[0] - 0.214).abs() < 1e-3);
//! assert_eq!(img.pixel(0, 0)[3], 1.0);
//! ```

use imgalgo_core::parallel::{process_image_copy_with, process_image_to_with, process_image_with};
use imgalgo_core::{ColorSpace, ImageBuf, ProcessOptions};
use rayon::prelude::*;
use tracing::trace;

use crate::error::{ColorError, ColorResult};
use crate::graph::Conversion;

const MIN_CHANNELS: usize = 3;

/// Converts `image` from `from` to `to`, in place.
pub fn colorconvert(image: &mut ImageBuf, from: ColorSpace, to: ColorSpace) -> ColorResult<()> {
    colorconvert_with(image, from, to, &ProcessOptions::default())
}

/// [`colorconvert`] with explicit scheduling options.
pub fn colorconvert_with(
    image: &mut ImageBuf,
    from: ColorSpace,
    to: ColorSpace,
    options: &ProcessOptions,
) -> ColorResult<()> {
    if from == to {
        return Ok(());
    }
    image.check_min_channels(MIN_CHANNELS)?;
    let conversion = Conversion::resolve(from, to)?;

    trace!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        %from,
        %to,
        "colorconvert"
    );
    process_image_with(image, options, |px| {
        if let Some(rgb) = px.rgb_mut() {
            conversion.apply(rgb);
        }
    });
    Ok(())
}

/// Converts `image` in place, naming the source space by string.
///
/// Names resolve through [`ColorSpace::from_name`], so `"sRGB"`, `"srgb"`
/// and `"srgb_texture"` are all accepted.
///
/// # Errors
///
/// [`UnsupportedColorSpace`](imgalgo_core::Error::UnsupportedColorSpace),
/// the same error `str::parse::<ColorSpace>` gives, for a name outside the
/// table; the buffer is not touched.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::{ColorSpace, ImageBuf};
/// use imgalgo_color::colorconvert_named;
///
/// let mut img = ImageBuf::filled(4, 4, &[0.5, 0.5, 0.5]);
/// let err = colorconvert_named(&mut img, "Rec.2100-PQ", ColorSpace::Linear).unwrap_err();
/// assert!(err.is_color_space_error());
/// assert_eq!(img.pixel(0, 0), &[0.5f32, 0.5, 0.5][..]);
/// ```
pub fn colorconvert_named(image: &mut ImageBuf, from_name: &str, to: ColorSpace) -> ColorResult<()> {
    let from = resolve_name(from_name)?;
    colorconvert(image, from, to)
}

/// Converts `image` in place, naming both spaces by string.
pub fn colorconvert_names(image: &mut ImageBuf, from_name: &str, to_name: &str) -> ColorResult<()> {
    let from = resolve_name(from_name)?;
    let to = resolve_name(to_name)?;
    colorconvert(image, from, to)
}

/// Returns a converted copy of `src`; `src` is untouched.
pub fn colorconvert_into(src: &ImageBuf, from: ColorSpace, to: ColorSpace) -> ColorResult<ImageBuf> {
    if from == to {
        return Ok(src.clone());
    }
    src.check_min_channels(MIN_CHANNELS)?;
    let conversion = Conversion::resolve(from, to)?;

    trace!(width = src.width(), height = src.height(), %from, %to, "colorconvert_into");
    Ok(process_image_copy_with(src, &ProcessOptions::default(), |px| {
        if let Some(rgb) = px.rgb_mut() {
            conversion.apply(rgb);
        }
    }))
}

/// Writes the conversion of `src` into the existing buffer `dst`.
///
/// # Errors
///
/// Shape and channel mismatches between `src` and `dst`, checked before
/// `dst` is written.
pub fn colorconvert_to(
    dst: &mut ImageBuf,
    src: &ImageBuf,
    from: ColorSpace,
    to: ColorSpace,
) -> ColorResult<()> {
    let options = ProcessOptions::default();
    if from == to {
        process_image_to_with(dst, src, &options, |_| {})?;
        return Ok(());
    }
    src.check_min_channels(MIN_CHANNELS)?;
    let conversion = Conversion::resolve(from, to)?;

    trace!(width = src.width(), height = src.height(), %from, %to, "colorconvert_to");
    process_image_to_with(dst, src, &options, |px| {
        if let Some(rgb) = px.rgb_mut() {
            conversion.apply(rgb);
        }
    })?;
    Ok(())
}

/// Converts a slice of RGB triplets in place, in parallel.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::ColorSpace;
/// use imgalgo_color::colorconvert_pixels;
///
/// let mut pixels = vec![[1.0f32, 1.0, 1.0]; 16];
/// colorconvert_pixels(&mut pixels, ColorSpace::Linear, ColorSpace::Lab).unwrap();
/// assert!((pixels[7][0] - 100.0).abs() < 1e-3);
/// ```
pub fn colorconvert_pixels(pixels: &mut [[f32; 3]], from: ColorSpace, to: ColorSpace) -> ColorResult<()> {
    if from == to {
        return Ok(());
    }
    let conversion = Conversion::resolve(from, to)?;
    trace!(pixels = pixels.len(), %from, %to, "colorconvert_pixels");
    pixels.par_iter_mut().for_each(|px| conversion.apply(px));
    Ok(())
}

/// Converts a single RGB triplet.
///
/// Resolves the route on every call; for many pixels resolve a
/// [`Conversion`] once instead.
pub fn convert_pixel(rgb: [f32; 3], from: ColorSpace, to: ColorSpace) -> ColorResult<[f32; 3]> {
    let mut px = rgb;
    Conversion::resolve(from, to)?.apply(&mut px);
    Ok(px)
}

fn resolve_name(name: &str) -> ColorResult<ColorSpace> {
    Ok(name.parse::<ColorSpace>()?)
}
