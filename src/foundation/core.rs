use image::Rgba;

/// A query color: four channels in the full 16-bit range.
pub type Color = Rgba<u16>;

/// Integer pixel coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl IPoint {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open integer rectangle `[min, max)`.
///
/// Serialized as `[x0, y0, x1, y1]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct IRect {
    /// Inclusive top-left corner.
    pub min: IPoint,
    /// Exclusive bottom-right corner.
    pub max: IPoint,
}

impl IRect {
    /// Create a rectangle from its corner coordinates.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: IPoint::new(x0, y0),
            max: IPoint::new(x1, y1),
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Horizontal extent (`max.x - min.x`), may be negative for inverted rects.
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Vertical extent (`max.y - min.y`).
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// `true` when `(x, y)` lies inside `[min, max)`.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    /// Largest rectangle contained in both. May be empty.
    pub fn intersect(self, other: IRect) -> IRect {
        IRect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        )
    }

    /// Same rectangle with the x and y axes exchanged.
    pub fn transposed(self) -> IRect {
        IRect::new(self.min.y, self.min.x, self.max.y, self.max.x)
    }
}

impl From<[i32; 4]> for IRect {
    fn from(v: [i32; 4]) -> Self {
        IRect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<IRect> for [i32; 4] {
    fn from(r: IRect) -> Self {
        [r.min.x, r.min.y, r.max.x, r.max.y]
    }
}

/// Expand an 8-bit color into the 16-bit query range (`v * 257`).
pub fn widen8(c: Rgba<u8>) -> Color {
    Rgba(c.0.map(|v| u16::from(v) * 257))
}

/// Reduce a 16-bit color to 8 bits by dropping the low byte.
pub fn narrow16(c: Color) -> Rgba<u8> {
    Rgba(c.0.map(|v| (v >> 8) as u8))
}

/// Fully transparent black.
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
