//! Hole filling by confidence-weighted propagation.
//!
//! Holes are pixels whose validity-mask value is at or below
//! [`FillHolesOptions::alpha_threshold`]. They are filled from the outside
//! in, one ring per pass, and then smoothed:
//!
//! ```text
//! pass 1          pass 2          pass 3
//! # # # # #       # # # # #       # # # # #
//! # . . . #       # 1 1 1 #       # 1 1 1 #
//! # . . . #  -->  # 1 . 1 #  -->  # 1 2 1 #
//! # . . . #       # 1 1 1 #       # 1 1 1 #
//! # # # # #       # # # # #       # # # # #
//! ```
//!
//! # Propagation
//!
//! In every pass each hole that touches a pixel resolved *before* the pass
//! takes the weighted mean of its resolved neighbors:
//!
//! ```text
//! w(n)  = confidence(n) * spatial(n)      spatial = 1 (edge), 1/sqrt(2) (corner)
//! c(p)  = mean(confidence(n)) * confidence_decay
//! ```
//!
//! Valid pixels start with their mask value as confidence. All reads of a
//! pass see the state from the end of the previous pass (Jacobi), so the
//! result does not depend on visiting order.
//!
//! # Relaxation
//!
//! After propagation, up to [`FillHolesOptions::relaxation_passes`] Jacobi
//! sweeps re-average every filled pixel over all its resolved neighbors,
//! smoothing the ring structure. Sweeps stop early once the largest change
//! drops below [`FillHolesOptions::tolerance`].
//!
//! # Unreachable holes
//!
//! Holes with no path to a valid pixel (or beyond the iteration cap) keep
//! their input values and are counted in [`FillStats::unresolved`].
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//! use imgalgo_ops::holes::fill_holes;
//!
//! let mut img = ImageBuf::filled(3, 3, &[0.25, 0.5, 0.75]);
//! img.set_pixel(1, 1, &[0.0, 0.0, 0.0]);
//! let mut mask = vec![1.0; 9];
//! mask[4] = 0.0;
//!
//! let stats = fill_holes(&mut img, &mask).unwrap();
//! assert_eq!(stats.filled, 1);
//! assert!((img.pixel(1, 1)[2] - 0.75).abs() < 1e-6);
//! ```

use std::f32::consts::FRAC_1_SQRT_2;

use imgalgo_core::ImageBuf;
use tracing::{debug, trace, warn};

use crate::error::check_len;
use crate::{OpsError, OpsResult};

// Floor so a resolved pixel always carries some weight.
const MIN_CONFIDENCE: f32 = 1e-12;

const EDGE_NEIGHBORS: [(i64, i64, f32); 4] = [(0, -1, 1.0), (-1, 0, 1.0), (1, 0, 1.0), (0, 1, 1.0)];

const ALL_NEIGHBORS: [(i64, i64, f32); 8] = [
    (-1, -1, FRAC_1_SQRT_2),
    (0, -1, 1.0),
    (1, -1, FRAC_1_SQRT_2),
    (-1, 0, 1.0),
    (1, 0, 1.0),
    (-1, 1, FRAC_1_SQRT_2),
    (0, 1, 1.0),
    (1, 1, FRAC_1_SQRT_2),
];

/// Which neighbors contribute to a hole pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge neighbors only.
    Four,
    /// Edge and corner neighbors.
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64, f32)] {
        match self {
            Connectivity::Four => &EDGE_NEIGHBORS,
            Connectivity::Eight => &ALL_NEIGHBORS,
        }
    }
}

/// Options for [`fill_holes_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillHolesOptions {
    /// Mask values at or below this mark a hole.
    pub alpha_threshold: f32,
    /// Neighborhood used for propagation and relaxation.
    pub connectivity: Connectivity,
    /// Cap on propagation passes (0 = width + height).
    pub max_iterations: usize,
    /// Cap on relaxation sweeps (0 = none).
    pub relaxation_passes: usize,
    /// Relaxation stops once no channel moves by more than this.
    pub tolerance: f32,
    /// Confidence multiplier per filled ring, in (0, 1].
    pub confidence_decay: f32,
}

impl Default for FillHolesOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: 0.0,
            connectivity: Connectivity::Eight,
            max_iterations: 0,
            relaxation_passes: 4,
            tolerance: 1e-5,
            confidence_decay: 0.5,
        }
    }
}

impl FillHolesOptions {
    /// Sets the hole threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    /// Sets the neighborhood.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Sets the propagation pass cap.
    pub fn with_max_iterations(mut self, passes: usize) -> Self {
        self.max_iterations = passes;
        self
    }

    /// Sets the relaxation sweep cap.
    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    /// Sets the relaxation tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the per-ring confidence decay.
    pub fn with_confidence_decay(mut self, decay: f32) -> Self {
        self.confidence_decay = decay;
        self
    }

    fn validate(&self) -> OpsResult<()> {
        if self.confidence_decay.is_nan() || self.confidence_decay <= 0.0 || self.confidence_decay > 1.0 {
            return Err(OpsError::InvalidParameter(format!(
                "confidence_decay must be in (0, 1], got {}",
                self.confidence_decay
            )));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "tolerance must be >= 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Outcome of a hole-filling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Hole pixels found in the mask.
    pub holes: usize,
    /// Holes that received a value.
    pub filled: usize,
    /// Holes left at their input value.
    pub unresolved: usize,
    /// Propagation passes run.
    pub iterations: usize,
    /// Relaxation sweeps run.
    pub relaxation_passes: usize,
}

impl FillStats {
    /// Returns `true` if every hole was filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

/// Fills holes in `image` using default options.
///
/// `alpha` holds one validity value per pixel, in raster order.
pub fn fill_holes(image: &mut ImageBuf, alpha: &[f32]) -> OpsResult<FillStats> {
    fill_holes_with(image, alpha, &FillHolesOptions::default())
}

/// Fills holes in `image`, every channel, with explicit options.
///
/// Pixels with mask values above the threshold are never modified.
///
/// # Errors
///
/// - [`OpsError::DimensionMismatch`] if `alpha.len()` differs from the
///   pixel count
/// - [`OpsError::InvalidParameter`] for out-of-range options
pub fn fill_holes_with(image: &mut ImageBuf, alpha: &[f32], options: &FillHolesOptions) -> OpsResult<FillStats> {
    let (width, height) = image.dimensions();
    let channels = image.channels();
    fill_interleaved(image.data_mut(), width as usize, height as usize, channels, alpha, options)
}

/// Fills holes in a plain array of RGB triplets using default options.
///
/// # Example
///
/// ```rust
/// use imgalgo_ops::holes::fill_holes_rgb;
///
/// let mut rgb = vec![[0.5f32, 0.5, 0.5], [0.0; 3], [0.5; 3]];
/// let stats = fill_holes_rgb(3, 1, &mut rgb, &[1.0, 0.0, 1.0]).unwrap();
/// assert!(stats.is_complete());
/// assert_eq!(rgb[1], [0.5, 0.5, 0.5]);
/// ```
pub fn fill_holes_rgb(width: u32, height: u32, pixels: &mut [[f32; 3]], alpha: &[f32]) -> OpsResult<FillStats> {
    fill_holes_rgb_with(width, height, pixels, alpha, &FillHolesOptions::default())
}

/// [`fill_holes_rgb`] with explicit options.
pub fn fill_holes_rgb_with(
    width: u32,
    height: u32,
    pixels: &mut [[f32; 3]],
    alpha: &[f32],
    options: &FillHolesOptions,
) -> OpsResult<FillStats> {
    check_len(pixels.len(), width as usize, height as usize, 1)?;
    fill_interleaved(pixels.as_flattened_mut(), width as usize, height as usize, 3, alpha, options)
}

struct Grid {
    width: usize,
    height: usize,
    channels: usize,
    offsets: &'static [(i64, i64, f32)],
}

impl Grid {
    fn neighbors(&self, i: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let x = (i % self.width) as i64;
        let y = (i / self.width) as i64;
        let (w, h) = (self.width as i64, self.height as i64);
        self.offsets.iter().filter_map(move |&(dx, dy, spatial)| {
            let (nx, ny) = (x + dx, y + dy);
            (nx >= 0 && ny >= 0 && nx < w && ny < h).then(|| ((ny * w + nx) as usize, spatial))
        })
    }

    #[inline]
    fn pixel<'a>(&self, data: &'a [f32], i: usize) -> &'a [f32] {
        &data[i * self.channels..(i + 1) * self.channels]
    }

    /// Weighted mean of the resolved neighbors of `i` into `out`.
    ///
    /// Returns the mean neighbor confidence, or `None` if no neighbor is
    /// resolved.
    fn blend(&self, data: &[f32], confidence: &[f32], resolved: &[bool], i: usize, out: &mut [f32]) -> Option<f32> {
        out.fill(0.0);
        let mut weight_sum = 0.0f32;
        let mut confidence_sum = 0.0f32;
        let mut count = 0usize;

        for (j, spatial) in self.neighbors(i) {
            if !resolved[j] {
                continue;
            }
            let w = confidence[j] * spatial;
            for (o, v) in out.iter_mut().zip(self.pixel(data, j)) {
                *o += w * v;
            }
            weight_sum += w;
            confidence_sum += confidence[j];
            count += 1;
        }

        if count == 0 || weight_sum <= 0.0 {
            return None;
        }
        for o in out.iter_mut() {
            *o /= weight_sum;
        }
        Some(confidence_sum / count as f32)
    }
}

fn fill_interleaved(
    data: &mut [f32],
    width: usize,
    height: usize,
    channels: usize,
    alpha: &[f32],
    options: &FillHolesOptions,
) -> OpsResult<FillStats> {
    let count = width * height;
    if alpha.len() != count {
        return Err(OpsError::DimensionMismatch(format!(
            "mask has {} values, image is {width}x{height}",
            alpha.len()
        )));
    }
    check_len(data.len(), width, height, channels)?;
    options.validate()?;
    trace!(width, height, channels, "fill_holes");

    let grid = Grid {
        width,
        height,
        channels,
        offsets: options.connectivity.offsets(),
    };
    let threshold = options.alpha_threshold;
    let mut resolved: Vec<bool> = alpha.iter().map(|&a| a > threshold).collect();
    let mut confidence: Vec<f32> = alpha
        .iter()
        .map(|&a| if a > threshold { a.max(MIN_CONFIDENCE) } else { 0.0 })
        .collect();
    let holes: Vec<usize> = (0..count).filter(|&i| !resolved[i]).collect();

    let mut stats = FillStats {
        holes: holes.len(),
        ..FillStats::default()
    };
    if holes.is_empty() {
        return Ok(stats);
    }

    let max_iterations = match options.max_iterations {
        0 => width + height,
        n => n,
    };

    // Propagation. `frontier` holds, in raster order, the holes touching a
    // pixel resolved in the previous pass.
    let mut queued = vec![false; count];
    let mut frontier: Vec<usize> = holes
        .iter()
        .copied()
        .filter(|&i| grid.neighbors(i).any(|(j, _)| resolved[j]))
        .collect();
    for &i in &frontier {
        queued[i] = true;
    }

    let mut scratch = vec![0.0f32; channels];
    let mut values: Vec<f32> = Vec::new();
    let mut updates: Vec<(usize, f32)> = Vec::new();

    while !frontier.is_empty() && stats.iterations < max_iterations {
        values.clear();
        updates.clear();
        for &i in &frontier {
            if let Some(c) = grid.blend(data, &confidence, &resolved, i, &mut scratch) {
                values.extend_from_slice(&scratch);
                updates.push((i, c));
            }
        }
        if updates.is_empty() {
            break;
        }

        for (k, &(i, c)) in updates.iter().enumerate() {
            data[i * channels..(i + 1) * channels].copy_from_slice(&values[k * channels..(k + 1) * channels]);
            confidence[i] = (c * options.confidence_decay).max(MIN_CONFIDENCE);
            resolved[i] = true;
        }
        stats.filled += updates.len();
        stats.iterations += 1;

        let mut next = Vec::new();
        for &(i, _) in &updates {
            for (j, _) in grid.neighbors(i) {
                if !resolved[j] && !queued[j] {
                    queued[j] = true;
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        frontier = next;
    }

    // Relaxation over every filled pixel.
    let filled: Vec<usize> = holes.iter().copied().filter(|&i| resolved[i]).collect();
    if !filled.is_empty() {
        for _ in 0..options.relaxation_passes {
            values.clear();
            for &i in &filled {
                match grid.blend(data, &confidence, &resolved, i, &mut scratch) {
                    Some(_) => values.extend_from_slice(&scratch),
                    None => values.extend_from_slice(grid.pixel(data, i)),
                }
            }

            let mut max_delta = 0.0f32;
            for (k, &i) in filled.iter().enumerate() {
                let dst = &mut data[i * channels..(i + 1) * channels];
                for (d, &v) in dst.iter_mut().zip(&values[k * channels..(k + 1) * channels]) {
                    max_delta = max_delta.max((v - *d).abs());
                    *d = v;
                }
            }
            stats.relaxation_passes += 1;
            if max_delta < options.tolerance {
                break;
            }
        }
    }

    stats.unresolved = stats.holes - stats.filled;
    debug!(
        holes = stats.holes,
        filled = stats.filled,
        iterations = stats.iterations,
        relaxation = stats.relaxation_passes,
        "fill_holes done"
    );
    if stats.unresolved > 0 {
        warn!(
            unresolved = stats.unresolved,
            holes = stats.holes,
            "hole filling left pixels unreachable from valid data"
        );
    }
    Ok(stats)
}
