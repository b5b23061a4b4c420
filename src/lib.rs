//! Virtual images: pixel-addressable color sources that compose lazily.
//!
//! Every type here implements [`VirtualImage`], a "color at `(x, y)`" contract plus bounds.
//! Gradients synthesize color from geometry; transforms wrap other images and remap or
//! aggregate their pixels on demand. No bitmap exists until one is asked for:
//!
//! - Build a [`GradientField`] or load a buffer through the `image` crate
//! - Stack [`Rotate`], [`CanvasResize`], [`Screen`] or [`Mosaic`] views over it
//! - Query single pixels, or [`materialize_rgba8`] the whole graph
//!
//! Graphs can also be described as JSON [`Recipe`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod foundation;
mod gradient;
pub mod pattern;
pub mod recipe;
mod surface;
mod transform;

pub use crate::color::{ColorDef, Hsv};
pub use crate::foundation::core::{Color, IPoint, IRect, TRANSPARENT, narrow16, widen8};
pub use crate::foundation::error::{VirtImgError, VirtImgResult};
pub use crate::gradient::field::{GradientField, GradientKind};
pub use crate::gradient::stops::{ChannelScale, ColorStopTable};
pub use crate::pattern::{equals, equals_sub, search};
pub use crate::recipe::{Node, Recipe, StopDef};
pub use crate::surface::{
    ColorModel, MaterializeOpts, Rgba16Buffer, SharedImage, VirtualImage, materialize_rgba8,
    materialize_rgba16,
};
pub use crate::transform::canvas::CanvasResize;
pub use crate::transform::mosaic::Mosaic;
pub use crate::transform::rotate::Rotate;
pub use crate::transform::screen::{Screen, screen_channel};
