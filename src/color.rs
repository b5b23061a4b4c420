use std::fmt;

use image::Rgba;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;

/// A color in hue/saturation/value space.
///
/// `h` is in degrees and wraps into `[0, 360)`; `s` and `v` are in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation, `0..=1`.
    pub s: f64,
    /// Value, `0..=1`.
    pub v: f64,
}

impl Hsv {
    /// Create an HSV color.
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to an opaque 16-bit color.
    pub fn to_color(self) -> Color {
        let mut h = self.h - (self.h / 360.0).trunc() * 360.0;
        if h < 0.0 {
            h += 360.0;
        }
        let v = self.v;
        let s = self.s;
        let sector = (h as i64 / 60) % 6;
        let f = h / 60.0 - sector as f64;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);
        let (r, g, b) = match sector {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        fn to_u16(x: f64) -> u16 {
            (x.clamp(0.0, 1.0) * 65535.0) as u16
        }
        Rgba([to_u16(r), to_u16(g), to_u16(b), u16::MAX])
    }
}

/// A color as written in recipe documents.
///
/// Accepts `"#RRGGBB"`, `"#RRGGBBAA"`, `{ "r", "g", "b", "a"? }`, `{ "h", "s", "v" }`,
/// `[r, g, b]` and `[r, g, b, a]`. Float channels are straight (non-premultiplied) `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    pub(crate) r: f64,
    pub(crate) g: f64,
    pub(crate) b: f64,
    pub(crate) a: f64,
}

impl ColorDef {
    /// Straight-alpha color from `0..=1` channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to a 16-bit query color, clamping each channel.
    pub fn to_color(self) -> Color {
        fn to_u16(x: f64) -> u16 {
            (x.clamp(0.0, 1.0) * 65535.0).round() as u16
        }
        Rgba([to_u16(self.r), to_u16(self.g), to_u16(self.b), to_u16(self.a)])
    }

    fn from_color(c: Color) -> Self {
        let [r, g, b, a] = c.0.map(|v| f64::from(v) / 65535.0);
        Self::rgba(r, g, b, a)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ColorDefVisitor)
    }
}

struct ColorDefVisitor;

impl<'de> Visitor<'de> for ColorDefVisitor {
    type Value = ColorDef;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex string, an {r,g,b,a} or {h,s,v} object, or an [r,g,b(,a)] array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ColorDef, E> {
        parse_hex(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ColorDef, A::Error> {
        let mut channels = Vec::with_capacity(4);
        while let Some(c) = seq.next_element::<f64>()? {
            channels.push(c);
        }
        match channels[..] {
            [r, g, b] => Ok(ColorDef::rgba(r, g, b, 1.0)),
            [r, g, b, a] => Ok(ColorDef::rgba(r, g, b, a)),
            _ => Err(de::Error::invalid_length(channels.len(), &"3 or 4 channels")),
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ColorDef, A::Error> {
        // Slots: r, g, b, a, h, s, v.
        let mut slots = [None::<f64>; 7];
        while let Some(key) = map.next_key::<String>()? {
            let idx = match key.as_str() {
                "r" => 0,
                "g" => 1,
                "b" => 2,
                "a" => 3,
                "h" => 4,
                "s" => 5,
                "v" => 6,
                other => {
                    return Err(de::Error::unknown_field(
                        other,
                        &["r", "g", "b", "a", "h", "s", "v"],
                    ));
                }
            };
            if slots[idx].is_some() {
                return Err(de::Error::custom(format!("duplicate channel `{key}`")));
            }
            slots[idx] = Some(map.next_value()?);
        }
        match slots {
            [Some(r), Some(g), Some(b), a, None, None, None] => {
                Ok(ColorDef::rgba(r, g, b, a.unwrap_or(1.0)))
            }
            [None, None, None, None, Some(h), Some(s), Some(v)] => {
                Ok(ColorDef::from_color(Hsv::new(h, s, v).to_color()))
            }
            _ => Err(de::Error::custom(
                "color object needs exactly r,g,b (optional a) or exactly h,s,v",
            )),
        }
    }
}

/// `#RRGGBB` or `#RRGGBBAA`, leading `#` optional.
fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let digits = s.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected #RRGGBB or #RRGGBBAA, got \"{s}\""));
    }
    let packed = u32::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
    let packed = if digits.len() == 6 {
        (packed << 8) | 0xff
    } else {
        packed
    };
    let [r, g, b, a] = packed.to_be_bytes().map(|byte| f64::from(byte) / 255.0);
    Ok(ColorDef::rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../tests/unit/color/color.rs"]
mod tests;
