use std::fmt::Write as _;

use base64::Engine as _;
use kurbo::{Rect, Shape};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{QrShapeError, QrShapeResult};
use crate::geometry::figure::ARC_TOLERANCE;
use crate::session::qr_session::RenderSnapshot;
use crate::transition::crossfade::TransitionFrame;

const CLIP_ID: &str = "qrshape-clip";

/// Colors and optional raster for [`write_svg`].
///
/// The compound path is the light surface with holes cut where modules are, so
/// `module_color` is painted underneath and shows through the holes.
#[derive(Clone, Debug)]
pub struct SvgExportOpts {
    /// Seen through module and marker holes.
    pub module_color: Rgba8,
    /// Fill of the compound path.
    pub surface_color: Rgba8,
    /// Encoded raster (PNG, JPEG, ...) drawn at the image rect.
    pub image: Option<Vec<u8>>,
}

impl Default for SvgExportOpts {
    fn default() -> Self {
        Self {
            module_color: Rgba8::BLACK,
            surface_color: Rgba8::WHITE,
            image: None,
        }
    }
}

/// Serialize one snapshot as a standalone SVG document.
///
/// Paint order: module color, previous frame, current frame at its opacity, image. Everything
/// is clipped to the corner-radius rounded rect.
#[tracing::instrument(skip_all, fields(w = snapshot.canvas.width, h = snapshot.canvas.height))]
pub fn write_svg(snapshot: &RenderSnapshot, opts: &SvgExportOpts) -> QrShapeResult<String> {
    let w = snapshot.canvas.width;
    let h = snapshot.canvas.height;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let Some(clip) = snapshot.clip else {
        out.push_str("</svg>\n");
        return Ok(out);
    };

    let _ = writeln!(
        out,
        r#"<defs><clipPath id="{CLIP_ID}"><path d="{}"/></clipPath></defs>"#,
        clip.to_path(ARC_TOLERANCE).to_svg()
    );
    let _ = writeln!(out, r#"<g clip-path="url(#{CLIP_ID})">"#);

    let canvas = Rect::new(0.0, 0.0, w, h);
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}"{}/>"#,
        canvas.width(),
        canvas.height(),
        paint_attrs("fill", opts.module_color)
    );

    for frame in [&snapshot.previous, &snapshot.current].into_iter().flatten() {
        write_frame(&mut out, frame, opts.surface_color);
    }

    if let (Some(bytes), Some(rect)) = (opts.image.as_deref(), snapshot.image_rect) {
        let href = data_uri(bytes)?;
        let _ = writeln!(
            out,
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" href="{href}"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
    }

    out.push_str("</g>\n</svg>\n");
    Ok(out)
}

fn write_frame(out: &mut String, frame: &TransitionFrame, color: Rgba8) {
    if frame.geometry.is_empty() || frame.opacity <= 0.0 {
        return;
    }
    let opacity = if frame.opacity < 1.0 {
        format!(r#" opacity="{}""#, frame.opacity)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        r#"<path d="{}" fill-rule="{}"{}{opacity}/>"#,
        frame.geometry.to_path().to_svg(),
        frame.geometry.fill_rule().svg_name(),
        paint_attrs("fill", color)
    );
}

fn paint_attrs(attr: &str, c: Rgba8) -> String {
    let mut s = format!(r#" {attr}="{}""#, c.to_hex_rgb());
    if c.a != 255 {
        let _ = write!(s, r#" {attr}-opacity="{}""#, c.alpha_f64());
    }
    s
}

fn data_uri(bytes: &[u8]) -> QrShapeResult<String> {
    let format = image::guess_format(bytes)
        .map_err(|e| QrShapeError::validation(format!("unrecognized image data: {e}")))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{encoded}", format.to_mime_type()))
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
