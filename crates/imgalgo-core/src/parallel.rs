//! Chunked, row-parallel pixel processing.
//!
//! The processor splits a buffer's rows into contiguous, non-overlapping
//! [`Chunk`]s and runs a pixel function over every chunk on the rayon pool.
//! Each worker owns a disjoint `&mut` slice of rows, so workers share no
//! mutable state and the result does not depend on scheduling order.
//!
//! # Chunking
//!
//! ```text
//! rows 0..h  ->  | chunk 0 | chunk 1 | ... | chunk N-1 |
//!
//! N = min(threads, h / min_rows), at least 1
//! min_rows = ceil(min_pixels_per_chunk / width)
//! ```
//!
//! Small images collapse to a single chunk, which runs on the calling
//! thread without touching the pool.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::{ImageBuf, parallel};
//!
//! let src = ImageBuf::filled(256, 256, &[0.5, 0.25, 0.125, 1.0]);
//! let inverted = parallel::process_image_copy(&src, |px| {
//!     if let Some(rgb) = px.rgb_mut() {
//!         for c in rgb.iter_mut() {
//!             *c = 1.0 - *c;
//!         }
//!     }
//! });
//! assert_eq!(inverted.pixel(0, 0), &[0.5f32, 0.75, 0.875, 1.0][..]);
//! ```
//!
//! # Bounding concurrency
//!
//! The processor uses the pool it is called from, so
//! [`rayon::ThreadPool::install`] bounds the worker count. Alternatively
//! [`ProcessOptions::max_threads`] caps the number of chunks.

use std::ops::Range;

use rayon::prelude::*;
use tracing::trace;

use crate::{ImageBuf, PixelMut, Result};

/// Default lower bound on pixels per chunk.
pub const DEFAULT_MIN_PIXELS_PER_CHUNK: usize = 16 * 1024;

/// Scheduling options for the pixel processor.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::ProcessOptions;
///
/// let opts = ProcessOptions::default()
///     .with_max_threads(4)
///     .with_min_pixels_per_chunk(1);
/// assert_eq!(opts.max_threads, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Upper bound on chunks (and therefore busy workers). 0 = pool size.
    pub max_threads: usize,
    /// Chunks smaller than this many pixels are merged.
    pub min_pixels_per_chunk: usize,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            max_threads: 0,
            min_pixels_per_chunk: DEFAULT_MIN_PIXELS_PER_CHUNK,
        }
    }
}

impl ProcessOptions {
    /// Options that always run on the calling thread.
    pub fn sequential() -> Self {
        Self {
            max_threads: 1,
            ..Self::default()
        }
    }

    /// Sets [`max_threads`](Self::max_threads).
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Sets [`min_pixels_per_chunk`](Self::min_pixels_per_chunk).
    pub fn with_min_pixels_per_chunk(mut self, pixels: usize) -> Self {
        self.min_pixels_per_chunk = pixels;
        self
    }

    /// Worker count these options allow on the current pool.
    pub fn effective_threads(&self) -> usize {
        let pool = rayon::current_num_threads().max(1);
        if self.max_threads == 0 {
            pool
        } else {
            pool.min(self.max_threads)
        }
    }
}

/// A contiguous range of rows processed by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the plan.
    pub index: usize,
    /// Rows covered, `start..end`.
    pub rows: Range<u32>,
}

impl Chunk {
    /// Number of rows in this chunk.
    #[inline]
    pub fn row_count(&self) -> u32 {
        self.rows.end - self.rows.start
    }
}

/// Splits `height` rows into at most `threads` chunks.
///
/// The chunks partition `0..height` in order, with no gaps or overlap.
/// Rows are spread as evenly as possible: the first `height % n` chunks get
/// one extra row. A zero-height image yields an empty plan.
///
/// # Example
///
/// ```rust
/// use imgalgo_core::ProcessOptions;
/// use imgalgo_core::parallel::plan_chunks;
///
/// let opts = ProcessOptions::default().with_min_pixels_per_chunk(1);
/// let plan = plan_chunks(16, 10, 4, &opts);
/// let sizes: Vec<u32> = plan.iter().map(|c| c.row_count()).collect();
/// assert_eq!(sizes, vec![3, 3, 2, 2]);
/// ```
pub fn plan_chunks(width: u32, height: u32, threads: usize, options: &ProcessOptions) -> Vec<Chunk> {
    if height == 0 {
        return Vec::new();
    }

    let rows = height as usize;
    let min_rows = options
        .min_pixels_per_chunk
        .div_ceil(width.max(1) as usize)
        .max(1);
    let count = threads.max(1).min(rows / min_rows).max(1);

    let base = rows / count;
    let extra = rows % count;
    let mut start = 0u32;
    (0..count)
        .map(|index| {
            let len = (base + usize::from(index < extra)) as u32;
            let chunk = Chunk {
                index,
                rows: start..start + len,
            };
            start += len;
            chunk
        })
        .collect()
}

/// Applies `pixel_fn` to every pixel of `image`, in place.
///
/// Uses [`ProcessOptions::default`]. Blocks until all chunks finish.
pub fn process_image<F>(image: &mut ImageBuf, pixel_fn: F)
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    process_image_with(image, &ProcessOptions::default(), pixel_fn);
}

/// Applies `pixel_fn` to every pixel of `image` with explicit options.
pub fn process_image_with<F>(image: &mut ImageBuf, options: &ProcessOptions, pixel_fn: F)
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    let (width, height) = image.dimensions();
    let channels = image.channels();
    let chunks = plan_chunks(width, height, options.effective_threads(), options);
    trace!(width, height, channels, chunks = chunks.len(), "process_image");

    let row_len = image.row_len();
    let parts = split_rows(image.data_mut(), row_len, &chunks);
    run_parts(parts, |first_row, rows| {
        apply_rows(rows, width, channels, first_row, &pixel_fn);
    });
}

/// Copies `src` into `dst` and applies `pixel_fn` to every `dst` pixel.
///
/// `src` is left untouched. Copy and transform run together per chunk.
///
/// # Errors
///
/// - [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if the
///   buffers differ in width or height
/// - [`Error::ChannelMismatch`](crate::Error::ChannelMismatch) if their
///   channel counts differ
///
/// Both checks run before `dst` is written.
pub fn process_image_to<F>(dst: &mut ImageBuf, src: &ImageBuf, pixel_fn: F) -> Result<()>
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    process_image_to_with(dst, src, &ProcessOptions::default(), pixel_fn)
}

/// [`process_image_to`] with explicit options.
pub fn process_image_to_with<F>(
    dst: &mut ImageBuf,
    src: &ImageBuf,
    options: &ProcessOptions,
    pixel_fn: F,
) -> Result<()>
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    dst.check_same_dimensions(src)?;
    if dst.channels() != src.channels() {
        return Err(crate::Error::channel_mismatch(src.channels(), dst.channels()));
    }
    copy_transform(dst, src, options, &pixel_fn);
    Ok(())
}

/// Returns a new buffer holding `pixel_fn` applied to a copy of `src`.
pub fn process_image_copy<F>(src: &ImageBuf, pixel_fn: F) -> ImageBuf
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    process_image_copy_with(src, &ProcessOptions::default(), pixel_fn)
}

/// [`process_image_copy`] with explicit options.
pub fn process_image_copy_with<F>(src: &ImageBuf, options: &ProcessOptions, pixel_fn: F) -> ImageBuf
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    let mut dst = ImageBuf::new_like(src);
    copy_transform(&mut dst, src, options, &pixel_fn);
    dst
}

fn copy_transform<F>(dst: &mut ImageBuf, src: &ImageBuf, options: &ProcessOptions, pixel_fn: &F)
where
    F: Fn(&mut PixelMut<'_>) + Sync + Send,
{
    let (width, height) = src.dimensions();
    let channels = src.channels();
    let chunks = plan_chunks(width, height, options.effective_threads(), options);
    trace!(width, height, channels, chunks = chunks.len(), "process_image_copy");

    let row_len = src.row_len();
    let src_data = src.data();
    let parts = split_rows(dst.data_mut(), row_len, &chunks);
    run_parts(parts, |first_row, rows| {
        let start = first_row as usize * row_len;
        rows.copy_from_slice(&src_data[start..start + rows.len()]);
        apply_rows(rows, width, channels, first_row, pixel_fn);
    });
}

/// Cuts `data` into one `(first_row, rows)` slice per chunk.
fn split_rows<'a>(data: &'a mut [f32], row_len: usize, chunks: &[Chunk]) -> Vec<(u32, &'a mut [f32])> {
    let mut parts = Vec::with_capacity(chunks.len());
    let mut rest = data;
    for chunk in chunks {
        let len = chunk.row_count() as usize * row_len;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        parts.push((chunk.rows.start, head));
        rest = tail;
    }
    parts
}

/// Runs `work` over every part; a single part stays on the calling thread.
fn run_parts<W>(parts: Vec<(u32, &mut [f32])>, work: W)
where
    W: Fn(u32, &mut [f32]) + Sync + Send,
{
    if parts.len() <= 1 {
        for (first_row, rows) in parts {
            work(first_row, rows);
        }
        return;
    }
    parts
        .into_par_iter()
        .for_each(|(first_row, rows)| work(first_row, rows));
}

fn apply_rows<F>(rows: &mut [f32], width: u32, channels: usize, first_row: u32, pixel_fn: &F)
where
    F: Fn(&mut PixelMut<'_>),
{
    if width == 0 || channels == 0 {
        return;
    }
    let width = width as usize;
    for (i, channels) in rows.chunks_exact_mut(channels).enumerate() {
        let x = (i % width) as u32;
        let y = first_row + (i / width) as u32;
        pixel_fn(&mut PixelMut::new(x, y, channels));
    }
}
