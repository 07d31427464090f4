//! Float pixel buffer used by every imgalgo operation.
//!
//! [`ImageBuf`] is an owned, row-major, channel-interleaved `f32` buffer:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! For RGBA buffers alpha is interleaved: `[R G B A R G B A ...]`.
//!
//! Width, height and channel count are fixed for the lifetime of a buffer.
//! Operations that need a destination either mutate a buffer in place or
//! allocate a fresh one with [`ImageBuf::new_like`].
//!
//! # Usage
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//!
//! let mut img = ImageBuf::new(1920, 1080, 4);
//! img.set_pixel(100, 100, &[1.0, 0.5, 0.25, 1.0]);
//!
//! let px = img.pixel(100, 100);
//! assert_eq!(px[0], 1.0);
//! ```

use crate::{Error, Result};

/// Owned interleaved `f32` image buffer.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::ImageBuf;
///
/// let img = ImageBuf::filled(8, 4, &[0.5, 0.5, 0.5]);
/// assert_eq!(img.dimensions(), (8, 4));
/// assert_eq!(img.channels(), 3);
/// assert_eq!(img.data().len(), 8 * 4 * 3);
/// ```
#[derive(Clone, PartialEq)]
pub struct ImageBuf {
    data: Vec<f32>,
    width: u32,
    height: u32,
    channels: usize,
}

impl ImageBuf {
    /// Creates a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        let len = width as usize * height as usize * channels;
        Self {
            data: vec![0.0; len],
            width,
            height,
            channels,
        }
    }

    /// Creates a zero-filled buffer with the same shape as `other`.
    pub fn new_like(other: &ImageBuf) -> Self {
        Self::new(other.width, other.height, other.channels)
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// The channel count is `pixel.len()`.
    pub fn filled(width: u32, height: u32, pixel: &[f32]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Self {
            data,
            width,
            height,
            channels: pixel.len(),
        }
    }

    /// Wraps existing interleaved pixel data.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `channels` is zero or the data length
    /// is not `width * height * channels`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgalgo_core::ImageBuf;
    ///
    /// let img = ImageBuf::from_data(2, 2, 3, vec![0.0; 12]).unwrap();
    /// assert_eq!(img.pixel_count(), 4);
    /// assert!(ImageBuf::from_data(2, 2, 3, vec![0.0; 11]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, channels: usize, data: Vec<f32>) -> Result<Self> {
        if channels == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero channels"));
        }
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of `f32` values in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw interleaved data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the buffer, returning its data.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels
    }

    /// Channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let offset = self.pixel_offset(x, y);
        &self.data[offset..offset + self.channels]
    }

    /// Mutable channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let offset = self.pixel_offset(x, y);
        let channels = self.channels;
        &mut self.data[offset..offset + channels]
    }

    /// Channels of the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Overwrites the pixel at (x, y).
    ///
    /// Copies `min(pixel.len(), channels)` values; extra channels in the
    /// buffer keep their value.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[f32]) {
        let dst = self.pixel_mut(x, y);
        let n = dst.len().min(pixel.len());
        dst[..n].copy_from_slice(&pixel[..n]);
    }

    /// Checked variant of [`set_pixel`](Self::set_pixel).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if (x, y) is outside the buffer.
    pub fn try_set_pixel(&mut self, x: u32, y: u32, pixel: &[f32]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        self.set_pixel(x, y, pixel);
        Ok(())
    }

    /// Fills every pixel with `pixel`.
    pub fn fill(&mut self, pixel: &[f32]) {
        let n = self.channels.min(pixel.len());
        for chunk in self.data.chunks_exact_mut(self.channels) {
            chunk[..n].copy_from_slice(&pixel[..n]);
        }
    }

    /// Row `y` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        assert!(y < self.height, "row {y} out of bounds");
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Mutable row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        assert!(y < self.height, "row {y} out of bounds");
        let len = self.row_len();
        let start = y as usize * len;
        &mut self.data[start..start + len]
    }

    /// Iterates over `(x, y, channels)` in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, &[f32])> + '_ {
        let width = self.width.max(1);
        self.data
            .chunks_exact(self.channels.max(1))
            .enumerate()
            .map(move |(i, px)| ((i as u32) % width, (i as u32) / width, px))
    }

    /// Checks that `other` has the same width and height.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] otherwise.
    pub fn check_same_dimensions(&self, other: &ImageBuf) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }

    /// Checks that the buffer has at least `min` channels.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelMismatch`] otherwise.
    pub fn check_min_channels(&self, min: usize) -> Result<()> {
        if self.channels < min {
            return Err(Error::channel_mismatch(min, self.channels));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ImageBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuf")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
