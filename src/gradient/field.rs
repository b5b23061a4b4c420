use std::f64::consts::PI;

use crate::foundation::core::{Color, IRect};
use crate::foundation::error::{VirtImgError, VirtImgResult};
use crate::gradient::stops::ColorStopTable;
use crate::surface::{ColorModel, VirtualImage};

/// Gradient geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Rings of equal distance from the axis origin.
    Radial,
    /// Ramp along the axis vector.
    Linear,
    /// Sweep around the axis origin, starting in the axis direction.
    Angular,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Geometry {
    Radial { length: f64 },
    Linear { dx: f64, dy: f64, length: f64 },
    Angular { initial_angle: f64 },
}

/// A color field mapping each pixel to a progress value along a gradient axis.
///
/// The axis rectangle is read as a vector from `axis.min` to `axis.max`. Colors are
/// computed on every query; nothing is cached.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    stops: ColorStopTable,
    axis: IRect,
    bounds: IRect,
    geometry: Geometry,
}

impl GradientField {
    /// Build a gradient of the given kind.
    ///
    /// Radial and linear gradients need distinct axis endpoints.
    #[tracing::instrument(level = "debug", skip(stops), fields(stops = stops.len()))]
    pub fn new(
        kind: GradientKind,
        bounds: IRect,
        stops: ColorStopTable,
        axis: IRect,
    ) -> VirtImgResult<Self> {
        let dx = f64::from(axis.width());
        let dy = f64::from(axis.height());
        let length = (dx * dx + dy * dy).sqrt();
        let geometry = match kind {
            GradientKind::Radial | GradientKind::Linear if length == 0.0 => {
                return Err(VirtImgError::construction(format!(
                    "{kind:?} gradient axis {axis:?} has zero length"
                )));
            }
            GradientKind::Radial => Geometry::Radial { length },
            GradientKind::Linear => Geometry::Linear { dx, dy, length },
            GradientKind::Angular => Geometry::Angular {
                initial_angle: dx.atan2(dy),
            },
        };
        Ok(Self {
            stops,
            axis,
            bounds,
            geometry,
        })
    }

    /// Radial ("cervical") gradient centered on `axis.min`, reaching progress 1 at the
    /// axis length.
    pub fn radial(bounds: IRect, stops: ColorStopTable, axis: IRect) -> VirtImgResult<Self> {
        Self::new(GradientKind::Radial, bounds, stops, axis)
    }

    /// Linear gradient along the axis vector.
    pub fn linear(bounds: IRect, stops: ColorStopTable, axis: IRect) -> VirtImgResult<Self> {
        Self::new(GradientKind::Linear, bounds, stops, axis)
    }

    /// Angular ("tapered") gradient sweeping one full turn around `axis.min`.
    pub fn angular(bounds: IRect, stops: ColorStopTable, axis: IRect) -> VirtImgResult<Self> {
        Self::new(GradientKind::Angular, bounds, stops, axis)
    }

    /// Which geometry this field uses.
    pub fn kind(&self) -> GradientKind {
        match self.geometry {
            Geometry::Radial { .. } => GradientKind::Radial,
            Geometry::Linear { .. } => GradientKind::Linear,
            Geometry::Angular { .. } => GradientKind::Angular,
        }
    }

    /// The stop table colors are resolved through.
    pub fn stops(&self) -> &ColorStopTable {
        &self.stops
    }

    /// Scalar progress of `(x, y)` along the gradient.
    ///
    /// Radial progress grows without bound past the axis length. Linear progress is the
    /// projection of the offset onto the axis vector divided by the squared axis length, so
    /// it is not a perpendicular distance. Angular progress lies in `[0, 1)`.
    pub fn progress(&self, x: i32, y: i32) -> f64 {
        let ox = f64::from(x - self.axis.min.x);
        let oy = f64::from(y - self.axis.min.y);
        match self.geometry {
            Geometry::Radial { length } => (ox * ox + oy * oy).sqrt() / length,
            Geometry::Linear { dx, dy, length } => (oy * dy + ox * dx) / length / length,
            Geometry::Angular { initial_angle } => {
                let p = (ox.atan2(oy) - initial_angle) / PI / 2.0;
                if p < 0.0 { p + 1.0 } else { p }
            }
        }
    }
}

impl VirtualImage for GradientField {
    fn bounds(&self) -> IRect {
        self.bounds
    }

    fn color_at(&self, x: i32, y: i32) -> Color {
        self.stops.lookup(self.progress(x, y))
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/field.rs"]
mod tests;
