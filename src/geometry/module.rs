use kurbo::{Point, Rect};

use crate::geometry::figure::{Figure, FigureRole, Winding, ellipse_path, polygon_path, rect_path};
use crate::style::config::DotShape;

/// 4-neighbor adjacency of a module. A flag is set when the neighbor is renderable and not
/// covered by the image mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Neighbors {
    pub fn count(self) -> usize {
        [self.left, self.right, self.top, self.bottom]
            .into_iter()
            .filter(|b| *b)
            .count()
    }

    /// The only connected side, if there is exactly one.
    fn single(self) -> Option<Side> {
        if self.count() != 1 {
            return None;
        }
        if self.left {
            Some(Side::Left)
        } else if self.right {
            Some(Side::Right)
        } else if self.top {
            Some(Side::Top)
        } else {
            Some(Side::Bottom)
        }
    }
}

/// Emit the hole figure for one data module.
pub fn shape_module(bounds: Rect, neighbors: Neighbors, shape: DotShape) -> Figure {
    let winding = Winding::CounterClockwise;
    let path = match shape {
        DotShape::Square => rect_path(bounds, winding),
        DotShape::Circle => ellipse_path(bounds, winding),
        DotShape::Triangle => match neighbors.single() {
            Some(side) => polygon_path(&taper_toward(bounds, side), winding),
            // Isolated, bridging or branching modules stay square.
            None => rect_path(bounds, winding),
        },
    };
    Figure {
        role: FigureRole::Module,
        winding,
        path,
    }
}

/// Five vertices in clockwise order: the full edge facing `side`, then the midpoints of the
/// two adjacent edges and of the opposite edge.
fn taper_toward(r: Rect, side: Side) -> [Point; 5] {
    let c = r.center();
    match side {
        Side::Top => [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, c.y),
            Point::new(c.x, r.y1),
            Point::new(r.x0, c.y),
        ],
        Side::Right => [
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(c.x, r.y1),
            Point::new(r.x0, c.y),
            Point::new(c.x, r.y0),
        ],
        Side::Bottom => [
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
            Point::new(r.x0, c.y),
            Point::new(c.x, r.y0),
            Point::new(r.x1, c.y),
        ],
        Side::Left => [
            Point::new(r.x0, r.y1),
            Point::new(r.x0, r.y0),
            Point::new(c.x, r.y0),
            Point::new(r.x1, c.y),
            Point::new(c.x, r.y1),
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/module.rs"]
mod tests;
