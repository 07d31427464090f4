//! Image transposition: rows become columns.
//!
//! ```text
//! Input  (w x h):  pixel (x, y) at index y * w + x
//! Output (h x w):  pixel (x, y) at index x * h + y
//! ```
//!
//! Works on any `Copy` element, so grayscale bytes, float planes and RGB
//! triplets all go through the same code.

use imgalgo_core::ImageBuf;
use rayon::prelude::*;
use tracing::trace;

use crate::error::check_len;
use crate::OpsResult;

/// Transposes a `width x height` grid of elements in place.
///
/// After the call `data` describes a `height x width` grid.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`](crate::OpsError::InvalidDimensions) if
/// `data.len() != width * height`; `data` is left untouched.
///
/// # Example
///
/// ```rust
/// use imgalgo_ops::transpose::transpose_image;
///
/// // 3x2 -> 2x3
/// let mut px = vec![1u8, 2, 3, 4, 5, 6];
/// transpose_image(3, 2, &mut px).unwrap();
/// assert_eq!(px, vec![1, 4, 2, 5, 3, 6]);
/// ```
pub fn transpose_image<T>(width: usize, height: usize, data: &mut Vec<T>) -> OpsResult<()>
where
    T: Copy + Send + Sync,
{
    check_len(data.len(), width, height, 1)?;
    if width <= 1 || height <= 1 {
        // Same memory layout either way
        return Ok(());
    }
    trace!(width, height, "transpose_image");

    let src = data.as_slice();
    let mut dst = src.to_vec();
    dst.par_chunks_mut(height).enumerate().for_each(|(x, column)| {
        for (y, out) in column.iter_mut().enumerate() {
            *out = src[y * width + x];
        }
    });
    *data = dst;
    Ok(())
}

/// Returns the transpose of an interleaved buffer.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::ImageBuf;
/// use imgalgo_ops::transpose::transpose_buffer;
///
/// let mut img = ImageBuf::new(4, 2, 3);
/// img.set_pixel(3, 1, &[1.0, 2.0, 3.0]);
/// let t = transpose_buffer(&img);
/// assert_eq!(t.dimensions(), (2, 4));
/// assert_eq!(t.pixel(1, 3), &[1.0f32, 2.0, 3.0][..]);
/// ```
pub fn transpose_buffer(src: &ImageBuf) -> ImageBuf {
    let (width, height) = src.dimensions();
    let mut dst = ImageBuf::new(height, width, src.channels());
    let row_len = dst.row_len();
    if row_len == 0 || src.is_empty() {
        return dst;
    }

    let channels = src.channels();
    dst.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(x, row)| {
            for (y, out) in row.chunks_exact_mut(channels).enumerate() {
                out.copy_from_slice(src.pixel(x as u32, y as u32));
            }
        });
    dst
}
