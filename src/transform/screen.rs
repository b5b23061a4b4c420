use image::Rgba;

use crate::foundation::core::{Color, IRect, widen8};
use crate::foundation::error::{VirtImgError, VirtImgResult};
use crate::surface::{ColorModel, SharedImage, VirtualImage};

/// Screen ("lighten") blend of one or more sources over their common area.
#[derive(Clone)]
pub struct Screen {
    sources: Vec<SharedImage>,
    bounds: IRect,
}

impl Screen {
    /// Blend `sources` in order. Fails when the list is empty or the sources share no area.
    #[tracing::instrument(level = "debug", skip(sources), fields(sources = sources.len()))]
    pub fn new(sources: Vec<SharedImage>) -> VirtImgResult<Self> {
        let Some(first) = sources.first() else {
            return Err(VirtImgError::construction("screen needs at least 1 image"));
        };
        let bounds = sources[1..]
            .iter()
            .fold(first.bounds(), |acc, s| acc.intersect(s.bounds()));
        if bounds.is_empty() {
            return Err(VirtImgError::construction(
                "screen sources have no common area",
            ));
        }
        Ok(Self { sources, bounds })
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("sources", &self.sources.len())
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// One screen step on a 16-bit channel: `max - (max - a)(max - b) / max`.
pub fn screen_channel(acc: u16, v: u16) -> u16 {
    const MAX: u32 = u16::MAX as u32;
    (MAX - (MAX - u32::from(v)) * (MAX - u32::from(acc)) / MAX) as u16
}

impl VirtualImage for Screen {
    fn bounds(&self) -> IRect {
        self.bounds
    }

    // Left fold from transparent black; the result is truncated to 8 bits.
    fn color_at(&self, x: i32, y: i32) -> Color {
        let acc = self.sources.iter().fold([0u16; 4], |mut acc, s| {
            let c = s.color_at(x, y).0;
            for i in 0..4 {
                acc[i] = screen_channel(acc[i], c[i]);
            }
            acc
        });
        widen8(Rgba(acc.map(|v| (v >> 8) as u8)))
    }

    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/screen.rs"]
mod tests;
