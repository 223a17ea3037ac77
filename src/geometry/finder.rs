use kurbo::{Affine, BezPath, Point, Rect, Size};

use crate::geometry::figure::{Figure, FigureRole, Geometry, Winding, ellipse_path, rect_path};
use crate::style::config::MarkerShape;

/// Markers span 7×7 symbol units.
pub const MARKER_MODULES: f64 = 7.0;

/// Cubic control-point ratio for quarter-circle approximation.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Which corner of the symbol a marker sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerCorner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl MarkerCorner {
    pub const ALL: [Self; 3] = [Self::TopLeft, Self::TopRight, Self::BottomLeft];

    /// Clockwise rotation that turns the drop's sharp corner toward this corner.
    fn drop_rotation_deg(self) -> f64 {
        match self {
            Self::TopLeft => 0.0,
            Self::TopRight => 90.0,
            Self::BottomLeft => 270.0,
        }
    }

    /// Outer 7×7 rectangle of the marker in this corner.
    pub fn outer_rect(self, data_bounds: Rect, symbol: Size) -> Rect {
        let w = symbol.width * MARKER_MODULES;
        let h = symbol.height * MARKER_MODULES;
        let origin = match self {
            Self::TopLeft => Point::new(data_bounds.x0, data_bounds.y0),
            Self::TopRight => Point::new(data_bounds.x1 - w, data_bounds.y0),
            Self::BottomLeft => Point::new(data_bounds.x0, data_bounds.y1 - h),
        };
        Rect::from_origin_size(origin, Size::new(w, h))
    }
}

/// Append the three position markers: outer ring solid, inner hole, center solid.
pub fn emit_markers(geometry: &mut Geometry, data_bounds: Rect, symbol: Size, shape: MarkerShape) {
    for corner in MarkerCorner::ALL {
        let outer = corner.outer_rect(data_bounds, symbol);
        let inner = outer.inflate(-symbol.width, -symbol.height);
        let center = outer.inflate(-2.0 * symbol.width, -2.0 * symbol.height);

        let layers = [
            (FigureRole::MarkerOuter, outer, Winding::Clockwise),
            (FigureRole::MarkerInner, inner, Winding::CounterClockwise),
            (FigureRole::MarkerCenter, center, Winding::Clockwise),
        ];
        for (role, rect, winding) in layers {
            geometry.push(Figure {
                role,
                winding,
                path: marker_layer(rect, shape, corner, winding),
            });
        }
    }
}

fn marker_layer(rect: Rect, shape: MarkerShape, corner: MarkerCorner, winding: Winding) -> BezPath {
    match shape {
        MarkerShape::Square => rect_path(rect, winding),
        MarkerShape::Circle => ellipse_path(rect, winding),
        MarkerShape::Drop => drop_path(rect, corner.drop_rotation_deg(), winding),
    }
}

#[derive(Clone, Copy, Debug)]
enum Seg {
    Line(Point),
    Cubic(Point, Point, Point),
}

/// Teardrop filling `rect`: three fully rounded corners and one sharp corner.
///
/// With `rotation_deg == 0` the sharp corner is top-left; positive angles rotate clockwise
/// about the rect center in 90° steps.
pub fn drop_path(rect: Rect, rotation_deg: f64, winding: Winding) -> BezPath {
    // Unit outline on [-1, 1]², sharp corner at (-1, -1), listed clockwise.
    let start = Point::new(-1.0, -1.0);
    let k = KAPPA;
    let segs = [
        Seg::Line(Point::new(0.0, -1.0)),
        Seg::Cubic(Point::new(k, -1.0), Point::new(1.0, -k), Point::new(1.0, 0.0)),
        Seg::Cubic(Point::new(1.0, k), Point::new(k, 1.0), Point::new(0.0, 1.0)),
        Seg::Cubic(Point::new(-k, 1.0), Point::new(-1.0, k), Point::new(-1.0, 0.0)),
        Seg::Line(start),
    ];

    let to_rect = Affine::translate(rect.center().to_vec2())
        * Affine::scale_non_uniform(rect.width() * 0.5, rect.height() * 0.5)
        * Affine::rotate(rotation_deg.to_radians());

    let path = match winding {
        Winding::Clockwise => outline(start, &segs),
        Winding::CounterClockwise => {
            let (rstart, rsegs) = reverse_outline(start, &segs);
            outline(rstart, &rsegs)
        }
    };
    to_rect * path
}

fn outline(start: Point, segs: &[Seg]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    for seg in segs {
        match *seg {
            Seg::Line(p) => path.line_to(p),
            Seg::Cubic(c1, c2, p) => path.curve_to(c1, c2, p),
        }
    }
    path.close_path();
    path
}

fn reverse_outline(start: Point, segs: &[Seg]) -> (Point, Vec<Seg>) {
    let end = |s: &Seg| match *s {
        Seg::Line(p) | Seg::Cubic(_, _, p) => p,
    };
    let last = segs.last().map(end).unwrap_or(start);
    let mut out = Vec::with_capacity(segs.len());
    for (i, seg) in segs.iter().enumerate().rev() {
        let target = if i == 0 { start } else { end(&segs[i - 1]) };
        out.push(match *seg {
            Seg::Line(_) => Seg::Line(target),
            Seg::Cubic(c1, c2, _) => Seg::Cubic(c2, c1, target),
        });
    }
    (last, out)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/finder.rs"]
mod tests;
