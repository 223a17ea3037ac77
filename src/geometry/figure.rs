use kurbo::{Arc, BezPath, Point, Rect, Shape, Vec2};

use std::f64::consts::PI;

/// Orientation of a closed figure in y-down canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Winding {
    /// Additive (solid) contribution.
    Clockwise,
    /// Subtractive contribution (hole).
    CounterClockwise,
}

/// What a figure represents inside a revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FigureRole {
    Background,
    Module,
    MarkerOuter,
    MarkerInner,
    MarkerCenter,
}

impl FigureRole {
    pub fn is_marker(self) -> bool {
        matches!(
            self,
            Self::MarkerOuter | Self::MarkerInner | Self::MarkerCenter
        )
    }
}

/// Fill rule the compound path is meant to be painted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    NonZero,
    #[default]
    EvenOdd,
}

impl FillRule {
    /// Value of the SVG `fill-rule` attribute.
    pub fn svg_name(self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

/// One closed sub-path with a fixed winding.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub role: FigureRole,
    pub winding: Winding,
    pub path: BezPath,
}

impl Figure {
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Signed area: positive for clockwise figures in y-down space.
    pub fn signed_area(&self) -> f64 {
        self.path.area()
    }
}

/// Ordered set of figures making up one revision's compound path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    figures: Vec<Figure>,
    fill_rule: FillRule,
}

impl Geometry {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            figures: Vec::new(),
            fill_rule,
        }
    }

    pub fn push(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn count_role(&self, role: FigureRole) -> usize {
        self.figures.iter().filter(|f| f.role == role).count()
    }

    /// Concatenate every figure into one compound path, in emission order.
    pub fn to_path(&self) -> BezPath {
        let mut out = BezPath::new();
        for figure in &self.figures {
            out.extend(figure.path.iter());
        }
        out
    }
}

// Path primitives. Every helper starts a new sub-path and closes it.

pub(crate) fn rect_path(rect: Rect, winding: Winding) -> BezPath {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    polygon_path(&[tl, tr, br, bl], winding)
}

/// `clockwise` lists the vertices in clockwise (y-down) order.
pub(crate) fn polygon_path(clockwise: &[Point], winding: Winding) -> BezPath {
    let mut path = BezPath::new();
    let mut emit = |i: usize, p: Point| {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    };
    match winding {
        Winding::Clockwise => clockwise.iter().enumerate().for_each(|(i, p)| emit(i, *p)),
        Winding::CounterClockwise => {
            // Keep the first vertex as the start point so both orientations share an origin.
            let reversed = clockwise
                .first()
                .into_iter()
                .chain(clockwise.iter().skip(1).rev());
            reversed.enumerate().for_each(|(i, p)| emit(i, *p));
        }
    }
    if !clockwise.is_empty() {
        path.close_path();
    }
    path
}

/// Ellipse inscribed in `rect`, drawn as two half arcs starting at the leftmost point.
pub(crate) fn ellipse_path(rect: Rect, winding: Winding) -> BezPath {
    let center = rect.center();
    let radii = Vec2::new(rect.width() * 0.5, rect.height() * 0.5);
    // Positive sweep is clockwise when y points down.
    let sweep = match winding {
        Winding::Clockwise => PI,
        Winding::CounterClockwise => -PI,
    };
    let mut path = BezPath::new();
    path.move_to(Point::new(rect.x0, center.y));
    for start in [PI, 0.0] {
        let arc = Arc::new(center, radii, start, sweep, 0.0);
        path.extend(arc.append_iter(ARC_TOLERANCE));
    }
    path.close_path();
    path
}

pub(crate) const ARC_TOLERANCE: f64 = 0.01;

#[cfg(test)]
#[path = "../../tests/unit/geometry/figure.rs"]
mod tests;
