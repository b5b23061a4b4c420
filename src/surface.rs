use std::sync::Arc;

use image::{ImageBuffer, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::foundation::core::{Color, IRect, TRANSPARENT, narrow16, widen8};
use crate::foundation::error::{VirtImgError, VirtImgResult};

/// Channel depth an image natively produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// 8 bits per channel, widened to 16 bits on query.
    Rgba8,
    /// Full 16 bits per channel.
    Rgba16,
}

/// A pixel-addressable, read-only, lazily evaluated color source.
///
/// Every transform in this crate implements this trait and wraps other implementors, so
/// arbitrary chains can be stacked without materializing intermediate bitmaps.
pub trait VirtualImage: Send + Sync {
    /// The queryable coordinate domain.
    fn bounds(&self) -> IRect;

    /// Color at `(x, y)`.
    ///
    /// Unchecked: coordinates outside [`bounds`](Self::bounds) are answered by whatever the
    /// implementor's geometry produces there. Use [`try_color_at`](Self::try_color_at) for
    /// a checked query.
    fn color_at(&self, x: i32, y: i32) -> Color;

    /// Native channel depth of the colors returned by [`color_at`](Self::color_at).
    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba16
    }

    /// Bounds-checked [`color_at`](Self::color_at).
    fn try_color_at(&self, x: i32, y: i32) -> VirtImgResult<Color> {
        let b = self.bounds();
        if !b.contains(x, y) {
            return Err(VirtImgError::bounds(format!(
                "({x}, {y}) is outside [{}, {}) x [{}, {})",
                b.min.x, b.max.x, b.min.y, b.max.y
            )));
        }
        Ok(self.color_at(x, y))
    }
}

/// 16-bit RGBA buffer from the `image` crate.
pub type Rgba16Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Shared handle to a node in a composition graph.
pub type SharedImage = Arc<dyn VirtualImage>;

impl<T: VirtualImage + ?Sized> VirtualImage for Arc<T> {
    fn bounds(&self) -> IRect {
        (**self).bounds()
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        (**self).color_at(x, y)
    }

    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }
}

fn buffer_index(width: u32, height: u32, x: i32, y: i32) -> Option<(u32, u32)> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    (x < width && y < height).then_some((x, y))
}

// Buffers answer out-of-range queries with transparent black.
impl VirtualImage for Rgba16Buffer {
    fn bounds(&self) -> IRect {
        IRect::from_size(self.width(), self.height())
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        buffer_index(self.width(), self.height(), x, y)
            .map(|(x, y)| *self.get_pixel(x, y))
            .unwrap_or(TRANSPARENT)
    }
}

impl VirtualImage for RgbaImage {
    fn bounds(&self) -> IRect {
        IRect::from_size(self.width(), self.height())
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        buffer_index(self.width(), self.height(), x, y)
            .map(|(x, y)| widen8(*self.get_pixel(x, y)))
            .unwrap_or(TRANSPARENT)
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba8
    }
}

/// Threading controls for materializing a virtual image into a buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterializeOpts {
    /// Evaluate rows in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (`Some(0)` is rejected).
    pub threads: Option<usize>,
}

/// Evaluate every pixel of `img.bounds()` into a 16-bit buffer.
///
/// The buffer's `(0, 0)` corresponds to `img.bounds().min`.
#[tracing::instrument(skip(img), fields(bounds = ?img.bounds()))]
pub fn materialize_rgba16<I>(img: &I, opts: MaterializeOpts) -> VirtImgResult<Rgba16Buffer>
where
    I: VirtualImage + ?Sized,
{
    materialize(img, opts, |c| c)
}

/// Evaluate every pixel of `img.bounds()` into an 8-bit buffer.
#[tracing::instrument(skip(img), fields(bounds = ?img.bounds()))]
pub fn materialize_rgba8<I>(img: &I, opts: MaterializeOpts) -> VirtImgResult<RgbaImage>
where
    I: VirtualImage + ?Sized,
{
    materialize(img, opts, narrow16)
}

fn materialize<I, P, F>(
    img: &I,
    opts: MaterializeOpts,
    convert: F,
) -> VirtImgResult<ImageBuffer<Rgba<P>, Vec<P>>>
where
    I: VirtualImage + ?Sized,
    P: image::Primitive + Send + Sync,
    Rgba<P>: image::Pixel<Subpixel = P>,
    F: Fn(Color) -> Rgba<P> + Sync,
{
    let bounds = img.bounds();
    if bounds.is_empty() {
        return Err(VirtImgError::validation(format!(
            "cannot materialize empty bounds {bounds:?}"
        )));
    }
    let width = bounds.width() as u32;
    let height = bounds.height() as u32;
    let row_len = (width as usize)
        .checked_mul(4)
        .ok_or_else(|| VirtImgError::validation("materialize row size overflow"))?;
    let len = row_len
        .checked_mul(height as usize)
        .ok_or_else(|| VirtImgError::validation("materialize buffer size overflow"))?;
    let mut data = vec![P::DEFAULT_MIN_VALUE; len];

    let fill_row = |(row, out): (usize, &mut [P])| {
        let y = bounds.min.y + row as i32;
        for (col, px) in out.chunks_exact_mut(4).enumerate() {
            let c = convert(img.color_at(bounds.min.x + col as i32, y));
            px.copy_from_slice(&c.0);
        }
    };

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            data.par_chunks_mut(row_len)
                .enumerate()
                .for_each(fill_row);
        });
    } else {
        data.chunks_mut(row_len).enumerate().for_each(fill_row);
    }

    ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| VirtImgError::validation("materialized buffer does not match bounds"))
}

fn build_thread_pool(threads: Option<usize>) -> VirtImgResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(VirtImgError::validation(
            "materialize 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    tracing::debug!(?threads, "building materialize thread pool");
    builder
        .build()
        .map_err(|e| VirtImgError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/surface/surface.rs"]
mod tests;
