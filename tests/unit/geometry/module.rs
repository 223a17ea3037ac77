use super::*;
use kurbo::{PathEl, Shape};

fn cell() -> Rect {
    Rect::new(10.0, 20.0, 14.0, 24.0)
}

fn vertices(f: &Figure) -> Vec<Point> {
    f.path
        .elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect()
}

fn only(side: &str) -> Neighbors {
    Neighbors {
        left: side == "left",
        right: side == "right",
        top: side == "top",
        bottom: side == "bottom",
    }
}

#[test]
fn square_and_circle_ignore_neighbors_and_are_holes() {
    for n in [Neighbors::default(), only("top"), only("left")] {
        let sq = shape_module(cell(), n, DotShape::Square);
        assert_eq!(sq.winding, Winding::CounterClockwise);
        assert_eq!(sq.role, FigureRole::Module);
        assert!((sq.signed_area() + 16.0).abs() < 1e-9);

        let ci = shape_module(cell(), n, DotShape::Circle);
        assert!(ci.signed_area() < 0.0);
        assert!((ci.signed_area().abs() - std::f64::consts::PI * 4.0).abs() < 0.2);
    }
}

#[test]
fn triangle_with_one_neighbor_tapers() {
    for side in ["left", "right", "top", "bottom"] {
        let f = shape_module(cell(), only(side), DotShape::Triangle);
        assert_eq!(vertices(&f).len(), 5, "{side}");
        // Two corner triangles of a quarter cell each are cut away.
        assert!((f.signed_area() + 12.0).abs() < 1e-9, "{side}");
        assert_eq!(f.path.bounding_box(), cell(), "{side}");
    }
}

#[test]
fn triangle_top_neighbor_keeps_top_edge() {
    let f = shape_module(cell(), only("top"), DotShape::Triangle);
    let v = vertices(&f);
    assert!(v.contains(&Point::new(10.0, 20.0)));
    assert!(v.contains(&Point::new(14.0, 20.0)));
    assert!(v.contains(&Point::new(14.0, 22.0)));
    assert!(v.contains(&Point::new(12.0, 24.0)));
    assert!(v.contains(&Point::new(10.0, 22.0)));
    assert!(!v.contains(&Point::new(10.0, 24.0)));
}

#[test]
fn triangle_points_away_from_left_neighbor() {
    let f = shape_module(cell(), only("left"), DotShape::Triangle);
    let v = vertices(&f);
    assert!(v.contains(&Point::new(10.0, 20.0)));
    assert!(v.contains(&Point::new(10.0, 24.0)));
    assert!(v.contains(&Point::new(14.0, 22.0)));
    assert!(!v.contains(&Point::new(14.0, 20.0)));
}

#[test]
fn triangle_degenerates_to_square_unless_exactly_one_neighbor() {
    let cases = [
        Neighbors::default(),
        Neighbors {
            left: true,
            right: true,
            ..Neighbors::default()
        },
        Neighbors {
            top: true,
            bottom: true,
            ..Neighbors::default()
        },
        Neighbors {
            left: true,
            top: true,
            ..Neighbors::default()
        },
        Neighbors {
            left: true,
            right: true,
            top: true,
            bottom: true,
        },
    ];
    for n in cases {
        let tri = shape_module(cell(), n, DotShape::Triangle);
        let sq = shape_module(cell(), n, DotShape::Square);
        assert_eq!(tri, sq, "{n:?}");
    }
}
