use kurbo::{Rect, Size};

use crate::foundation::core::{non_negative, rects_intersect, unit_interval};

/// Placement of the embedded image and the larger area kept free of modules around it.
///
/// Both rectangles exist together or not at all; `mask_rect` always contains `image_rect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageMask {
    pub image_rect: Rect,
    pub mask_rect: Rect,
}

impl ImageMask {
    /// `true` when `rect` overlaps the exclusion area (shared edges do not count).
    pub fn excludes(&self, rect: Rect) -> bool {
        rects_intersect(self.mask_rect, rect)
    }
}

/// Compute the image and exclusion rectangles for the data area.
///
/// `scale` is clamped to `[0, 1]` and `padding_modules` to `>= 0`. The image is a square of
/// side `min(w, h) * scale` centered in `data_bounds`; the mask grows it by
/// `padding_modules` symbols on every side.
pub fn compute_mask(
    data_bounds: Rect,
    scale: f64,
    padding_modules: f64,
    symbol_size: Size,
) -> ImageMask {
    let scale = unit_interval(scale);
    let padding = non_negative(padding_modules);

    let side = non_negative(data_bounds.width().min(data_bounds.height())) * scale;
    let center = data_bounds.center();
    let image_rect = Rect::from_center_size(center, Size::new(side, side));

    let inflate_x = padding * non_negative(symbol_size.width);
    let inflate_y = padding * non_negative(symbol_size.height);
    let mask_rect = image_rect.inflate(inflate_x, inflate_y);

    ImageMask {
        image_rect,
        mask_rect,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mask.rs"]
mod tests;
