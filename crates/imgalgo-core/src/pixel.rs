//! Per-pixel access handed to pixel functions.

/// A mutable view of one pixel: its coordinates and channel values.
///
/// Pixel functions receive a `PixelMut` for every pixel of a buffer. The
/// view only exposes the pixel's own channels, so a function cannot reach
/// into neighboring pixels.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::PixelMut;
///
/// let mut channels = [0.2f32, 0.4, 0.6, 1.0];
/// let mut px = PixelMut::new(3, 7, &mut channels);
/// assert_eq!((px.x(), px.y()), (3, 7));
///
/// if let Some(rgb) = px.rgb_mut() {
///     rgb[0] = 1.0;
/// }
/// assert_eq!(px.alpha(), Some(1.0));
/// assert_eq!(channels[0], 1.0);
/// ```
#[derive(Debug)]
pub struct PixelMut<'a> {
    x: u32,
    y: u32,
    channels: &'a mut [f32],
}

impl<'a> PixelMut<'a> {
    /// Wraps the channels of the pixel at (x, y).
    #[inline]
    pub fn new(x: u32, y: u32, channels: &'a mut [f32]) -> Self {
        Self { x, y, channels }
    }

    /// Column of this pixel.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Row of this pixel.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Channel values.
    #[inline]
    pub fn channels(&self) -> &[f32] {
        &*self.channels
    }

    /// Mutable channel values.
    #[inline]
    pub fn channels_mut(&mut self) -> &mut [f32] {
        &mut *self.channels
    }

    /// The first three channels as a triplet, if the pixel has them.
    #[inline]
    pub fn rgb(&self) -> Option<[f32; 3]> {
        match *self.channels {
            [r, g, b, ..] => Some([r, g, b]),
            _ => None,
        }
    }

    /// The first three channels as a mutable triplet.
    #[inline]
    pub fn rgb_mut(&mut self) -> Option<&mut [f32; 3]> {
        self.channels
            .get_mut(..3)
            .and_then(|s| <&mut [f32; 3]>::try_from(s).ok())
    }

    /// The fourth channel, if present.
    #[inline]
    pub fn alpha(&self) -> Option<f32> {
        self.channels.get(3).copied()
    }
}
