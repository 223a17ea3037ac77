use std::sync::Arc;

use kurbo::{Rect, RoundedRect, Size};

use crate::encode::qr::Encoder;
use crate::foundation::error::QrShapeResult;
use crate::geometry::builder::{GeometryBuilder, LayoutMetrics};
use crate::geometry::mask::ImageMask;
use crate::matrix::bits::BitMatrix;
use crate::style::config::StyleConfig;
use crate::transition::controller::TransitionController;
use crate::transition::crossfade::TransitionFrame;

/// Everything a render surface needs to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub canvas: Size,
    /// Static backdrop, drawn first at full opacity.
    pub previous: Option<TransitionFrame>,
    /// Fading-in revision, drawn over `previous`.
    pub current: Option<TransitionFrame>,
    /// Where to draw the raster image, on top of the path.
    pub image_rect: Option<Rect>,
    /// Rounded-rect clip from the style's corner radius.
    pub clip: Option<RoundedRect>,
}

/// Host-facing owner of the encode → build → crossfade lifecycle for one QR surface.
///
/// Setters rebuild synchronously when the fill geometry changes and hand the result to the
/// transition controller. Encoding failures leave the last good geometry on screen.
pub struct QrSession {
    encoder: Box<dyn Encoder>,
    style: StyleConfig,
    data: Option<String>,
    image_configured: bool,
    builder: Option<GeometryBuilder>,
    layout: Option<LayoutMetrics>,
    image_mask: Option<ImageMask>,
    transitions: TransitionController,
}

impl std::fmt::Debug for QrSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrSession")
            .field("style", &self.style)
            .field("data_len", &self.data.as_ref().map(String::len))
            .field("image_configured", &self.image_configured)
            .field("layout", &self.layout)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}

impl QrSession {
    pub fn new(
        encoder: Box<dyn Encoder>,
        style: StyleConfig,
        transitions: TransitionController,
    ) -> Self {
        Self {
            encoder,
            style,
            data: None,
            image_configured: false,
            builder: None,
            layout: None,
            image_mask: None,
            transitions,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Matrix of the revision on screen.
    pub fn matrix(&self) -> Option<&Arc<BitMatrix>> {
        self.builder.as_ref().map(|b| b.classifier().matrix())
    }

    pub fn layout(&self) -> Option<&LayoutMetrics> {
        self.layout.as_ref()
    }

    pub fn image_mask(&self) -> Option<&ImageMask> {
        self.image_mask.as_ref()
    }

    pub fn transitions(&self) -> &TransitionController {
        &self.transitions
    }

    /// Mutable access for hosts that pace the ramp with [`TransitionController::tick`].
    pub fn transitions_mut(&mut self) -> &mut TransitionController {
        &mut self.transitions
    }

    /// Encode `data` and show it. On failure nothing changes and the error is returned.
    #[tracing::instrument(skip_all, fields(len = data.len()))]
    pub fn set_data(&mut self, data: &str) -> QrShapeResult<()> {
        if self.data.as_deref() == Some(data) {
            return Ok(());
        }
        let matrix = self.encode(data, &self.style)?;
        self.data = Some(data.to_owned());
        self.install_matrix(matrix);
        self.rebuild();
        Ok(())
    }

    /// Apply a new style. An ECC change re-encodes first; if that fails the old style stays.
    #[tracing::instrument(skip_all)]
    pub fn set_style(&mut self, style: StyleConfig) -> QrShapeResult<()> {
        let reencoded = match self.data.as_deref() {
            Some(data) if style.ecc_level != self.style.ecc_level => {
                Some(self.encode(data, &style)?)
            }
            _ => None,
        };
        let relayout = self.style.layout_differs(&style);
        self.style = style;

        match reencoded {
            Some(matrix) => {
                self.install_matrix(matrix);
                self.rebuild();
            }
            None if relayout => self.rebuild(),
            None => tracing::trace!("style change does not affect geometry"),
        }
        Ok(())
    }

    /// Toggle whether an embedded image is configured (changes the module mask).
    pub fn set_image(&mut self, configured: bool) {
        if self.image_configured == configured {
            return;
        }
        self.image_configured = configured;
        self.rebuild();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let style = self.style.clone().with_canvas(width, height);
        if self.style.layout_differs(&style) {
            self.style = style;
            self.rebuild();
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let style = self.style.normalized();
        let canvas = Size::new(style.canvas_width, style.canvas_height);
        let (previous, current) = self.transitions.frames();
        let clip = (canvas.width > 0.0 && canvas.height > 0.0).then(|| {
            RoundedRect::from_rect(canvas.to_rect(), style.corner_radius.to_radii())
        });
        RenderSnapshot {
            canvas,
            previous,
            current,
            image_rect: self.image_mask.map(|m| m.image_rect),
            clip,
        }
    }

    /// Teardown: cancel the ramp, drop both frames, the matrix and its caches.
    pub fn detach(&mut self) {
        self.transitions.detach();
        self.builder = None;
        self.layout = None;
        self.image_mask = None;
        self.data = None;
    }

    fn encode(&self, data: &str, style: &StyleConfig) -> QrShapeResult<BitMatrix> {
        self.encoder.encode(data, style.ecc_level).inspect_err(|e| {
            tracing::warn!(error = %e, "encoding failed; keeping the previous geometry");
        })
    }

    fn install_matrix(&mut self, matrix: BitMatrix) {
        let matrix = Arc::new(matrix);
        match self.builder.as_mut() {
            Some(builder) => builder.set_matrix(matrix),
            None => self.builder = Some(GeometryBuilder::new(matrix)),
        }
    }

    fn rebuild(&mut self) {
        let Some(builder) = self.builder.as_mut() else {
            return;
        };
        let out = builder.build(&self.style, self.image_configured);
        self.layout = out.layout;
        self.image_mask = out.image_mask;
        self.transitions.on_new_geometry(Arc::new(out.geometry));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/qr_session.rs"]
mod tests;
