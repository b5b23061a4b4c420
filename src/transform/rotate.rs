use crate::foundation::core::{Color, IRect};
use crate::surface::{ColorModel, SharedImage, VirtualImage};

/// Rotation of a source image by quarter turns.
///
/// Pure coordinate remap per query. Remapping uses the destination bounds' far edges, so
/// images anchored at the origin rotate in place.
#[derive(Clone)]
pub struct Rotate {
    source: SharedImage,
    turns: u8,
    bounds: IRect,
}

impl Rotate {
    /// Rotate `source` clockwise by `turns` quarter turns. Negative values rotate
    /// counter-clockwise.
    pub fn new(source: SharedImage, turns: i32) -> Self {
        let turns = turns.rem_euclid(4) as u8;
        let src_bounds = source.bounds();
        let bounds = if turns % 2 == 1 {
            src_bounds.transposed()
        } else {
            src_bounds
        };
        Self {
            source,
            turns,
            bounds,
        }
    }

    /// Clockwise quarter turns, in `0..4`.
    pub fn turns(&self) -> u8 {
        self.turns
    }
}

impl std::fmt::Debug for Rotate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rotate")
            .field("turns", &self.turns)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl VirtualImage for Rotate {
    fn bounds(&self) -> IRect {
        self.bounds
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        let r = self.bounds;
        match self.turns {
            1 => self.source.color_at(y, r.max.x - x - 1),
            2 => self.source.color_at(r.max.x - x - 1, r.max.y - y - 1),
            3 => self.source.color_at(r.max.y - y - 1, x),
            _ => self.source.color_at(x, y),
        }
    }

    fn color_model(&self) -> ColorModel {
        self.source.color_model()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/rotate.rs"]
mod tests;
