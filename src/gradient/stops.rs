use image::Rgba;

use crate::foundation::core::{Color, widen8};
use crate::foundation::error::{VirtImgError, VirtImgResult};

/// Divisor used when reducing interpolated 16-bit channels to 8 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelScale {
    /// Divide by 257, mapping `0..=65535` exactly onto `0..=255`.
    #[default]
    Exact,
    /// Divide by 256 and truncate, matching the historical renderer bit for bit.
    Legacy,
}

impl ChannelScale {
    /// Reduce one interpolated 16-bit channel to 8 bits.
    fn narrow(self, v: f64) -> u8 {
        let v = match self {
            ChannelScale::Exact => (v / 257.0).round(),
            ChannelScale::Legacy => (v / 256.0).trunc(),
        };
        v.clamp(0.0, 255.0) as u8
    }
}

/// Ordered `(fraction, color)` anchors of a gradient's color ramp.
///
/// Fractions are normalized at construction so the last one is exactly `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStopTable {
    fractions: Vec<f64>,
    colors: Vec<Color>,
    scale: ChannelScale,
}

impl ColorStopTable {
    /// Build a table from `(color, cumulative fraction)` pairs.
    ///
    /// Fractions must be finite and non-decreasing. Every fraction is divided by the last
    /// one; a multi-stop table whose last fraction is not positive is rejected.
    pub fn new(stops: impl IntoIterator<Item = (Color, f64)>) -> VirtImgResult<Self> {
        let (colors, mut fractions): (Vec<Color>, Vec<f64>) = stops.into_iter().unzip();
        let Some(&last) = fractions.last() else {
            return Err(VirtImgError::construction(
                "color stop table needs at least one stop",
            ));
        };
        if let Some(bad) = fractions.iter().find(|f| !f.is_finite()) {
            return Err(VirtImgError::construction(format!(
                "color stop fraction {bad} is not finite"
            )));
        }
        if let Some(w) = fractions.windows(2).find(|w| w[1] < w[0]) {
            return Err(VirtImgError::construction(format!(
                "color stop fractions must be non-decreasing ({} then {})",
                w[0], w[1]
            )));
        }

        if fractions.len() == 1 {
            fractions[0] = 1.0;
        } else if last <= 0.0 {
            return Err(VirtImgError::construction(
                "last color stop fraction must be > 0",
            ));
        } else {
            for f in &mut fractions {
                *f /= last;
            }
        }

        Ok(Self {
            fractions,
            colors,
            scale: ChannelScale::default(),
        })
    }

    /// Replace the channel downscale used for interpolated colors.
    pub fn with_scale(mut self, scale: ChannelScale) -> Self {
        self.scale = scale;
        self
    }

    /// Normalized stop fractions.
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Stop colors, in fraction order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Resolve `progress` to a color.
    ///
    /// Exact stop hits return the stop color untouched. Progress outside the table clamps to
    /// the first or last color, and NaN resolves to the first color. Anything else
    /// interpolates between the neighbouring stops and is reduced to 8 bits per channel.
    pub fn lookup(&self, progress: f64) -> Color {
        if progress.is_nan() {
            return self.colors[0];
        }
        let (n, found) = binary_search(&self.fractions, progress);
        if found {
            return self.colors[n];
        }
        if n == 0 {
            return self.colors[0];
        }
        if n == self.fractions.len() {
            return self.colors[n - 1];
        }

        // w1 weights the lower stop, w2 the upper one.
        let w1 = (self.fractions[n] - progress) / (self.fractions[n] - self.fractions[n - 1]);
        let w2 = 1.0 - w1;
        let lo = self.colors[n - 1].0;
        let hi = self.colors[n].0;
        let mut out = [0u8; 4];
        for i in 0..4 {
            out[i] = self.scale.narrow(f64::from(lo[i]) * w1 + f64::from(hi[i]) * w2);
        }
        widen8(Rgba(out))
    }
}

/// Binary search over ascending `sorted`.
///
/// Returns `(index, true)` on an exact hit, otherwise `(insertion index, false)` where the
/// insertion index is the first position whose value exceeds `target`.
pub(crate) fn binary_search(sorted: &[f64], target: f64) -> (usize, bool) {
    // Inclusive upper bound: among duplicate fractions the hit lands on the same stop for
    // every gradient kind.
    let mut low = 0isize;
    let mut high = sorted.len() as isize - 1;
    while low <= high {
        let mid = low + (high - low) / 2;
        let v = sorted[mid as usize];
        if v == target {
            return (mid as usize, true);
        } else if v > target {
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }
    (low as usize, false)
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/stops.rs"]
mod tests;
