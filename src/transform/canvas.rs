use crate::foundation::core::{Color, IRect};
use crate::surface::{ColorModel, SharedImage, VirtualImage};

/// Re-frames a source onto a new canvas without resampling.
///
/// Pixels inside the source's original bounds come from the source; everything else is
/// `fill`.
#[derive(Clone)]
pub struct CanvasResize {
    source: SharedImage,
    source_bounds: IRect,
    bounds: IRect,
    fill: Color,
}

impl CanvasResize {
    /// Place `source` on a canvas covering `bounds`, padding with `fill`.
    pub fn new(source: SharedImage, bounds: IRect, fill: Color) -> Self {
        let source_bounds = source.bounds();
        Self {
            source,
            source_bounds,
            bounds,
            fill,
        }
    }
}

impl std::fmt::Debug for CanvasResize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasResize")
            .field("source_bounds", &self.source_bounds)
            .field("bounds", &self.bounds)
            .field("fill", &self.fill)
            .finish_non_exhaustive()
    }
}

impl VirtualImage for CanvasResize {
    fn bounds(&self) -> IRect {
        self.bounds
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        if self.source_bounds.contains(x, y) {
            self.source.color_at(x, y)
        } else {
            self.fill
        }
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/canvas.rs"]
mod tests;
