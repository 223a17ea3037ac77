use crate::foundation::error::{QrShapeError, QrShapeResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Four-sided thickness in canvas units (padding around the symbol).
///
/// Sides missing from a JSON object take the default of 10, like a missing object does.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    #[serde(default = "default_edge")]
    pub left: f64,
    #[serde(default = "default_edge")]
    pub top: f64,
    #[serde(default = "default_edge")]
    pub right: f64,
    #[serde(default = "default_edge")]
    pub bottom: f64,
}

fn default_edge() -> f64 {
    10.0
}

impl Edges {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    /// Negative and non-finite sides are clamped to zero.
    pub fn clamped(self) -> Self {
        Self {
            left: non_negative(self.left),
            top: non_negative(self.top),
            right: non_negative(self.right),
            bottom: non_negative(self.bottom),
        }
    }

    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::uniform(default_edge())
    }
}

/// Corner radii of the clip rectangle. Not part of the fill geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerRadius {
    #[serde(default, alias = "topLeft")]
    pub top_left: f64,
    #[serde(default, alias = "topRight")]
    pub top_right: f64,
    #[serde(default, alias = "bottomRight")]
    pub bottom_right: f64,
    #[serde(default, alias = "bottomLeft")]
    pub bottom_left: f64,
}

impl CornerRadius {
    pub const fn uniform(r: f64) -> Self {
        Self {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            top_left: non_negative(self.top_left),
            top_right: non_negative(self.top_right),
            bottom_right: non_negative(self.bottom_right),
            bottom_left: non_negative(self.bottom_left),
        }
    }

    pub fn to_radii(self) -> kurbo::RoundedRectRadii {
        let c = self.clamped();
        kurbo::RoundedRectRadii::new(c.top_left, c.top_right, c.bottom_right, c.bottom_left)
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> QrShapeResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> QrShapeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| QrShapeError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(QrShapeError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::opaque(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(QrShapeError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// `#rrggbb` without alpha.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::opaque(*r, *g, *b)),
                [r, g, b, a] => Ok(Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

pub(crate) fn unit_interval(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// Shrink `rect` by per-side amounts. The result may be inverted when the edges exceed it.
pub(crate) fn deflate(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.x0 + edges.left,
        rect.y0 + edges.top,
        rect.x1 - edges.right,
        rect.y1 - edges.bottom,
    )
}

/// Strict overlap test: rectangles that only share an edge do not intersect.
pub(crate) fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
