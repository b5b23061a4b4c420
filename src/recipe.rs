//! JSON recipes describing a composition graph.
//!
//! A recipe is a tree of [`Node`]s. [`Recipe::build`] constructs it bottom-up into a single
//! [`SharedImage`]; nothing is rendered until the result is queried or materialized.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::color::ColorDef;
use crate::foundation::core::IRect;
use crate::foundation::error::{VirtImgError, VirtImgResult};
use crate::gradient::field::{GradientField, GradientKind};
use crate::gradient::stops::{ChannelScale, ColorStopTable};
use crate::surface::{SharedImage, VirtualImage};
use crate::transform::canvas::CanvasResize;
use crate::transform::mosaic::Mosaic;
use crate::transform::rotate::Rotate;
use crate::transform::screen::Screen;

/// Top-level recipe document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Root of the composition graph.
    pub root: Node,
}

/// One gradient anchor as written in a recipe.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopDef {
    /// Stop color.
    pub color: ColorDef,
    /// Cumulative fraction; normalized by the last stop's value.
    pub at: f64,
}

/// A node of the composition graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Node {
    /// Gradient color field.
    Gradient {
        /// Radial, linear or angular geometry.
        shape: GradientKind,
        /// Queryable area.
        bounds: IRect,
        /// Axis vector from `[x0, y0]` to `[x1, y1]`.
        axis: IRect,
        /// Color stops, in non-decreasing `at` order.
        stops: Vec<StopDef>,
        /// Channel downscale for interpolated colors.
        #[serde(default)]
        scale: ChannelScale,
    },
    /// Image file decoded at build time, relative to the recipe directory.
    Image {
        /// Path to the image file.
        path: PathBuf,
    },
    /// Quarter-turn rotation.
    Rotate {
        /// Rotated node.
        source: Box<Node>,
        /// Clockwise quarter turns; negative is counter-clockwise.
        turns: i32,
    },
    /// Canvas grow/shrink without resampling.
    CanvasResize {
        /// Re-framed node.
        source: Box<Node>,
        /// New canvas bounds.
        bounds: IRect,
        /// Color outside the source; transparent black when omitted.
        #[serde(default = "transparent")]
        fill: ColorDef,
    },
    /// Screen blend over the sources' common area.
    Screen {
        /// Blended nodes, folded left to right.
        sources: Vec<Node>,
    },
    /// Block-average pixelation.
    Mosaic {
        /// Pixelated node.
        source: Box<Node>,
        /// Area to pixelate; the whole source when omitted.
        #[serde(default)]
        region: Option<IRect>,
        /// Cell edge in pixels.
        block_size: i32,
    },
}

fn transparent() -> ColorDef {
    ColorDef::rgba(0.0, 0.0, 0.0, 0.0)
}

impl Recipe {
    /// Parse a recipe from JSON text.
    pub fn from_json_str(s: &str) -> VirtImgResult<Self> {
        serde_json::from_str(s).map_err(|e| VirtImgError::serde(e.to_string()))
    }

    /// Read and parse a recipe file.
    pub fn load(path: &Path) -> VirtImgResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read recipe '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Construct the graph. Image paths resolve against `base_dir`.
    #[tracing::instrument(skip(self))]
    pub fn build(&self, base_dir: &Path) -> VirtImgResult<SharedImage> {
        self.root.build(base_dir)
    }
}

impl Node {
    /// Construct this node and everything below it.
    pub fn build(&self, base_dir: &Path) -> VirtImgResult<SharedImage> {
        let img: SharedImage = match self {
            Node::Gradient {
                shape,
                bounds,
                axis,
                stops,
                scale,
            } => {
                let table =
                    ColorStopTable::new(stops.iter().map(|s| (s.color.to_color(), s.at)))?
                        .with_scale(*scale);
                Arc::new(GradientField::new(*shape, *bounds, table, *axis)?)
            }
            Node::Image { path } => {
                let full = base_dir.join(path);
                let decoded = image::open(&full)
                    .with_context(|| format!("open image '{}'", full.display()))?;
                tracing::debug!(path = %full.display(), "decoded image node");
                Arc::new(decoded.into_rgba16())
            }
            Node::Rotate { source, turns } => {
                Arc::new(Rotate::new(source.build(base_dir)?, *turns))
            }
            Node::CanvasResize {
                source,
                bounds,
                fill,
            } => Arc::new(CanvasResize::new(
                source.build(base_dir)?,
                *bounds,
                fill.to_color(),
            )),
            Node::Screen { sources } => {
                let built = sources
                    .iter()
                    .map(|s| s.build(base_dir))
                    .collect::<VirtImgResult<Vec<_>>>()?;
                Arc::new(Screen::new(built)?)
            }
            Node::Mosaic {
                source,
                region,
                block_size,
            } => {
                let source = source.build(base_dir)?;
                let region = region.unwrap_or_else(|| source.bounds());
                Arc::new(Mosaic::new(source, region, *block_size)?)
            }
        };
        Ok(img)
    }
}

#[cfg(test)]
#[path = "../tests/unit/recipe/recipe.rs"]
mod tests;
