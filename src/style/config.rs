use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encode::qr::EccLevel;
use crate::foundation::core::{CornerRadius, Edges, non_negative, unit_interval};
use crate::foundation::error::{QrShapeError, QrShapeResult};

/// Shape used for data modules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotShape {
    #[default]
    Square,
    Circle,
    /// Modules with exactly one neighbor taper toward the opposite side.
    Triangle,
}

/// Shape used for the three position markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    Square,
    Circle,
    /// Rounded marker with one sharp corner pointing away from the symbol.
    Drop,
}

/// Number of quiet-zone modules added on each side when the quiet zone is enabled.
pub const QUIET_ZONE_MODULES: usize = 4;

/// Style configuration for one QR surface.
///
/// Every field has a default, so a JSON file only needs the keys it changes. Out-of-range
/// values never fail: use [`StyleConfig::normalized`] (the builder does) to clamp them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    #[serde(alias = "dotShape")]
    pub dot_shape: DotShape,
    #[serde(alias = "markerShape")]
    pub marker_shape: MarkerShape,
    #[serde(alias = "quietZoneEnabled")]
    pub quiet_zone_enabled: bool,
    pub padding: Edges,
    /// Clip-only; never part of the fill geometry.
    #[serde(alias = "cornerRadius")]
    pub corner_radius: CornerRadius,
    /// Fraction of the data area occupied by the embedded image, `[0, 1]`.
    #[serde(alias = "imageScale")]
    pub image_scale: f64,
    /// Extra clearance around the image, in modules.
    #[serde(alias = "imagePaddingModules")]
    pub image_padding_modules: f64,
    #[serde(alias = "canvasWidth")]
    pub canvas_width: f64,
    #[serde(alias = "canvasHeight")]
    pub canvas_height: f64,
    /// Forwarded to the encoder; changing it re-encodes rather than re-laying out.
    #[serde(alias = "eccLevel")]
    pub ecc_level: EccLevel,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dot_shape: DotShape::Square,
            marker_shape: MarkerShape::Square,
            quiet_zone_enabled: true,
            padding: Edges::default(),
            corner_radius: CornerRadius::default(),
            image_scale: default_image_scale(),
            image_padding_modules: default_image_padding_modules(),
            canvas_width: default_canvas_extent(),
            canvas_height: default_canvas_extent(),
            ecc_level: EccLevel::Medium,
        }
    }
}

fn default_image_scale() -> f64 {
    0.25
}

fn default_image_padding_modules() -> f64 {
    0.2
}

fn default_canvas_extent() -> f64 {
    256.0
}

impl StyleConfig {
    /// Parse a style from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> QrShapeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| QrShapeError::serde(format!("parse style JSON: {e}")))
    }

    /// Parse a style from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> QrShapeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            QrShapeError::validation(format!("open style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Copy with every numeric field clamped into its valid domain.
    pub fn normalized(&self) -> Self {
        Self {
            padding: self.padding.clamped(),
            corner_radius: self.corner_radius.clamped(),
            image_scale: unit_interval(self.image_scale),
            image_padding_modules: non_negative(self.image_padding_modules),
            canvas_width: non_negative(self.canvas_width),
            canvas_height: non_negative(self.canvas_height),
            ..self.clone()
        }
    }

    pub fn quiet_zone_modules(&self) -> usize {
        if self.quiet_zone_enabled {
            QUIET_ZONE_MODULES
        } else {
            0
        }
    }

    /// `true` when switching from `self` to `other` changes the fill geometry.
    ///
    /// Corner radius only affects the clip and the ECC level goes through the encoder, so
    /// neither counts here.
    pub fn layout_differs(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.dot_shape != b.dot_shape
            || a.marker_shape != b.marker_shape
            || a.quiet_zone_enabled != b.quiet_zone_enabled
            || a.padding != b.padding
            || a.image_scale != b.image_scale
            || a.image_padding_modules != b.image_padding_modules
            || a.canvas_width != b.canvas_width
            || a.canvas_height != b.canvas_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
