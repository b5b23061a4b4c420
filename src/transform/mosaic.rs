use image::Rgba;

use crate::foundation::core::{Color, IRect, widen8};
use crate::foundation::error::{VirtImgError, VirtImgResult};
use crate::surface::{ColorModel, SharedImage, VirtualImage};

/// Pixelates a region of a source into square blocks of averaged color.
///
/// Unlike the other transforms this one is eager: the block averages are computed once at
/// construction and only read afterwards.
#[derive(Clone)]
pub struct Mosaic {
    source: SharedImage,
    region: IRect,
    block: i32,
    columns: usize,
    cells: Vec<Color>,
}

impl Mosaic {
    /// Pixelate `region` of `source` with `block_size`-pixel cells.
    ///
    /// `region` is clipped to the source bounds; cells on the far edges may be smaller.
    /// A block size of 0 or 1 leaves the source unchanged and negative sizes are rejected.
    #[tracing::instrument(level = "debug", skip(source))]
    pub fn new(source: SharedImage, region: IRect, block_size: i32) -> VirtImgResult<Self> {
        if block_size < 0 {
            return Err(VirtImgError::construction(format!(
                "illegal mosaic block size: {block_size} px"
            )));
        }
        let region = region.intersect(source.bounds());
        if block_size <= 1 || region.is_empty() {
            return Ok(Self {
                source,
                region,
                block: 1,
                columns: 0,
                cells: Vec::new(),
            });
        }

        // Blocks wider than the region collapse to a single cell.
        let block = block_size.min(region.width().max(region.height()));
        let columns = ((region.width() - 1) / block + 1) as usize;
        let rows = ((region.height() - 1) / block + 1) as usize;
        let mut cells = Vec::with_capacity(columns * rows);
        for row in 0..rows as i32 {
            let y0 = region.min.y + row * block;
            let y1 = y0.saturating_add(block).min(region.max.y);
            for col in 0..columns as i32 {
                let x0 = region.min.x + col * block;
                let x1 = x0.saturating_add(block).min(region.max.x);
                cells.push(average(source.as_ref(), IRect::new(x0, y0, x1, y1)));
            }
        }
        tracing::debug!(columns, rows, "built mosaic cell cache");

        Ok(Self {
            source,
            region,
            block,
            columns,
            cells,
        })
    }

    /// `true` when this mosaic passes its source through untouched.
    pub fn is_identity(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Mean of the 8-bit channels of every pixel in `cell`, rounded to nearest.
fn average(source: &dyn VirtualImage, cell: IRect) -> Color {
    let mut sum = [0u64; 4];
    let mut count = 0u64;
    for y in cell.min.y..cell.max.y {
        for x in cell.min.x..cell.max.x {
            let c = source.color_at(x, y).0;
            for i in 0..4 {
                sum[i] += u64::from(c[i] >> 8);
            }
            count += 1;
        }
    }
    let avg = sum.map(|s| (s as f64 / count as f64).round() as u8);
    widen8(Rgba(avg))
}

impl std::fmt::Debug for Mosaic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mosaic")
            .field("region", &self.region)
            .field("block", &self.block)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl VirtualImage for Mosaic {
    fn bounds(&self) -> IRect {
        self.source.bounds()
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        if self.cells.is_empty() || !self.region.contains(x, y) {
            return self.source.color_at(x, y);
        }
        let col = ((x - self.region.min.x) / self.block) as usize;
        let row = ((y - self.region.min.y) / self.block) as usize;
        self.cells[row * self.columns + col]
    }

    /// Cells hold 8-bit means, which the source's model always covers; pixels outside the
    /// region keep the source's depth.
    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mosaic.rs"]
mod tests;
