use std::sync::Arc;

use kurbo::{Rect, Size};

use crate::foundation::core::deflate;
use crate::geometry::figure::{Figure, FigureRole, FillRule, Geometry, Winding, rect_path};
use crate::geometry::finder::emit_markers;
use crate::geometry::mask::{ImageMask, compute_mask};
use crate::geometry::module::{Neighbors, shape_module};
use crate::matrix::bits::BitMatrix;
use crate::matrix::classifier::MatrixClassifier;
use crate::style::config::StyleConfig;

/// Resolved placement of the symbol on the canvas for one build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub canvas: Rect,
    /// Matrix dimension plus quiet zone on both sides.
    pub column_count: usize,
    pub row_count: usize,
    /// Size of one module on the canvas.
    pub symbol_size: Size,
    /// Canvas minus padding minus quiet zone: where the matrix is drawn.
    pub data_bounds: Rect,
}

impl LayoutMetrics {
    /// Rectangle of matrix cell `(col, row)`; negative or overflowing indices extrapolate.
    pub fn cell_rect(&self, col: i64, row: i64) -> Rect {
        let x = self.data_bounds.x0 + col as f64 * self.symbol_size.width;
        let y = self.data_bounds.y0 + row as f64 * self.symbol_size.height;
        Rect::new(x, y, x + self.symbol_size.width, y + self.symbol_size.height)
    }
}

/// Resolve the layout for an `n`×`n` matrix, or `None` when the canvas leaves no room.
pub fn compute_layout(n: usize, style: &StyleConfig) -> Option<LayoutMetrics> {
    let style = style.normalized();
    let quiet = style.quiet_zone_modules();
    let column_count = n + 2 * quiet;
    let row_count = column_count;
    if n == 0 || column_count == 0 {
        return None;
    }

    let canvas = Rect::new(0.0, 0.0, style.canvas_width, style.canvas_height);
    let avail_w = style.canvas_width - style.padding.horizontal();
    let avail_h = style.canvas_height - style.padding.vertical();
    if !(avail_w > 0.0 && avail_h > 0.0) {
        return None;
    }

    let symbol_size = Size::new(
        avail_w / column_count as f64,
        avail_h / row_count as f64,
    );
    if !(symbol_size.width.is_finite() && symbol_size.height.is_finite()) {
        return None;
    }

    let quiet = quiet as f64;
    let data_bounds = deflate(canvas, style.padding).inflate(
        -symbol_size.width * quiet,
        -symbol_size.height * quiet,
    );

    Some(LayoutMetrics {
        canvas,
        column_count,
        row_count,
        symbol_size,
        data_bounds,
    })
}

/// Result of one geometry build.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildOutput {
    pub geometry: Geometry,
    pub image_mask: Option<ImageMask>,
    /// `None` when the layout degenerated to an empty geometry.
    pub layout: Option<LayoutMetrics>,
}

impl BuildOutput {
    /// Where the host should draw the raster image, on top of the path.
    pub fn image_rect(&self) -> Option<Rect> {
        self.image_mask.map(|m| m.image_rect)
    }
}

/// Assembles the compound path for one matrix revision.
///
/// Owns the classifier so its memo table lives exactly as long as the matrix revision.
#[derive(Debug)]
pub struct GeometryBuilder {
    classifier: MatrixClassifier,
}

impl GeometryBuilder {
    pub fn new(matrix: Arc<BitMatrix>) -> Self {
        Self {
            classifier: MatrixClassifier::new(matrix),
        }
    }

    /// Start a new revision; the classifier cache is discarded.
    pub fn set_matrix(&mut self, matrix: Arc<BitMatrix>) {
        self.classifier.reset(matrix);
    }

    pub fn classifier(&self) -> &MatrixClassifier {
        &self.classifier
    }

    /// Build background, module holes and markers for the current matrix.
    ///
    /// Degenerate layouts never fail: a canvas without room for the symbol yields only the
    /// background figure (or nothing for an empty canvas).
    #[tracing::instrument(skip_all, fields(n = self.classifier.dimension(), image = image_configured))]
    pub fn build(&mut self, style: &StyleConfig, image_configured: bool) -> BuildOutput {
        let style = style.normalized();
        let mut geometry = Geometry::new(FillRule::EvenOdd);

        let canvas = Rect::new(0.0, 0.0, style.canvas_width, style.canvas_height);
        if canvas.area() > 0.0 {
            geometry.push(Figure {
                role: FigureRole::Background,
                winding: Winding::Clockwise,
                path: rect_path(canvas, Winding::Clockwise),
            });
        }

        let Some(layout) = compute_layout(self.classifier.dimension(), &style) else {
            tracing::debug!(
                width = style.canvas_width,
                height = style.canvas_height,
                "canvas leaves no room for the symbol"
            );
            return BuildOutput {
                geometry,
                image_mask: None,
                layout: None,
            };
        };

        let image_mask = image_configured.then(|| {
            compute_mask(
                layout.data_bounds,
                style.image_scale,
                style.image_padding_modules,
                layout.symbol_size,
            )
        });

        let n = i64::try_from(self.classifier.dimension()).unwrap_or(i64::MAX);
        for row in 0..n {
            for col in 0..n {
                if !self.is_drawn(&layout, image_mask.as_ref(), col, row) {
                    continue;
                }
                let neighbors = Neighbors {
                    left: self.is_drawn(&layout, image_mask.as_ref(), col - 1, row),
                    right: self.is_drawn(&layout, image_mask.as_ref(), col + 1, row),
                    top: self.is_drawn(&layout, image_mask.as_ref(), col, row - 1),
                    bottom: self.is_drawn(&layout, image_mask.as_ref(), col, row + 1),
                };
                geometry.push(shape_module(
                    layout.cell_rect(col, row),
                    neighbors,
                    style.dot_shape,
                ));
            }
        }

        emit_markers(
            &mut geometry,
            layout.data_bounds,
            layout.symbol_size,
            style.marker_shape,
        );

        tracing::debug!(
            figures = geometry.len(),
            modules = geometry.count_role(FigureRole::Module),
            "built geometry"
        );
        BuildOutput {
            geometry,
            image_mask,
            layout: Some(layout),
        }
    }

    /// Renderable and clear of the image mask.
    fn is_drawn(
        &mut self,
        layout: &LayoutMetrics,
        mask: Option<&ImageMask>,
        col: i64,
        row: i64,
    ) -> bool {
        if !self.classifier.is_renderable(col, row) {
            return false;
        }
        match mask {
            Some(mask) => !mask.excludes(layout.cell_rect(col, row)),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/builder.rs"]
mod tests;
