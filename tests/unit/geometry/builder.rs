use super::*;
use crate::foundation::core::Edges;
use crate::style::config::{DotShape, MarkerShape};

fn all_dark(n: usize) -> Arc<BitMatrix> {
    Arc::new(BitMatrix::from_fn(n, |_, _| true))
}

fn scenario_style() -> StyleConfig {
    StyleConfig {
        padding: Edges::ZERO,
        ..StyleConfig::default()
    }
    .with_canvas(210.0, 210.0)
}

fn module_bounds(out: &BuildOutput) -> Vec<Rect> {
    out.geometry
        .figures()
        .iter()
        .filter(|f| f.role == FigureRole::Module)
        .map(|f| f.bounds())
        .collect()
}

fn approx_rect(a: Rect, b: Rect) -> bool {
    (a.x0 - b.x0).abs() < 1e-9
        && (a.y0 - b.y0).abs() < 1e-9
        && (a.x1 - b.x1).abs() < 1e-9
        && (a.y1 - b.y1).abs() < 1e-9
}

#[test]
fn version_one_scenario_layout() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let out = b.build(&scenario_style(), false);
    let layout = out.layout.unwrap();
    assert_eq!(layout.column_count, 29);
    assert!((layout.symbol_size.width - 210.0 / 29.0).abs() < 1e-12);
    assert!((layout.symbol_size.height - 210.0 / 29.0).abs() < 1e-12);
    let q = 4.0 * 210.0 / 29.0;
    assert!(approx_rect(
        layout.data_bounds,
        Rect::new(q, q, 210.0 - q, 210.0 - q)
    ));

    let modules = module_bounds(&out);
    let at_8_8 = layout.cell_rect(8, 8);
    assert_eq!(
        modules.iter().filter(|r| approx_rect(**r, at_8_8)).count(),
        1
    );
    let at_0_0 = layout.cell_rect(0, 0);
    assert!(!modules.iter().any(|r| approx_rect(*r, at_0_0)));
}

#[test]
fn all_dark_matrix_emits_every_non_finder_cell() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let out = b.build(&scenario_style(), false);
    // 441 cells minus three 8x8 finder blocks.
    assert_eq!(out.geometry.count_role(FigureRole::Module), 441 - 3 * 64);
    assert_eq!(out.geometry.count_role(FigureRole::Background), 1);
    assert_eq!(out.geometry.len(), 1 + 249 + 9);
    assert!(out.image_rect().is_none());
}

#[test]
fn background_is_first_and_clockwise() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let out = b.build(&scenario_style(), false);
    let bg = &out.geometry.figures()[0];
    assert_eq!(bg.role, FigureRole::Background);
    assert_eq!(bg.winding, Winding::Clockwise);
    assert_eq!(bg.bounds(), Rect::new(0.0, 0.0, 210.0, 210.0));
    assert!(bg.signed_area() > 0.0);
}

#[test]
fn light_modules_are_not_emitted() {
    let m = Arc::new(BitMatrix::from_fn(21, |x, y| x == 10 && y == 12));
    let mut b = GeometryBuilder::new(m);
    let out = b.build(&scenario_style(), false);
    let modules = module_bounds(&out);
    assert_eq!(modules.len(), 1);
    assert!(approx_rect(modules[0], out.layout.unwrap().cell_rect(10, 12)));
}

#[test]
fn build_is_deterministic() {
    let m = Arc::new(BitMatrix::from_fn(25, |x, y| (x * 3 + y * 5) % 7 < 3));
    let style = StyleConfig {
        dot_shape: DotShape::Triangle,
        marker_shape: MarkerShape::Drop,
        ..StyleConfig::default()
    };
    let mut a = GeometryBuilder::new(m.clone());
    let mut b = GeometryBuilder::new(m);
    let first = a.build(&style, true);
    let again = a.build(&style, true);
    let other = b.build(&style, true);
    assert_eq!(first, again);
    assert_eq!(first, other);
}

#[test]
fn zero_canvas_yields_no_figures() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let style = StyleConfig::default().with_canvas(0.0, 0.0);
    let out = b.build(&style, true);
    assert!(out.geometry.is_empty());
    assert!(out.layout.is_none());
    assert!(out.image_mask.is_none());
}

#[test]
fn padding_larger_than_canvas_keeps_background_only() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let style = StyleConfig {
        padding: Edges::uniform(60.0),
        ..StyleConfig::default()
    }
    .with_canvas(100.0, 100.0);
    let out = b.build(&style, false);
    assert_eq!(out.geometry.len(), 1);
    assert_eq!(out.geometry.figures()[0].role, FigureRole::Background);
}

#[test]
fn non_finite_canvas_degrades_quietly() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let style = StyleConfig::default().with_canvas(f64::NAN, f64::INFINITY);
    let out = b.build(&style, false);
    assert!(out.layout.is_none());
    assert!(
        out.geometry
            .figures()
            .iter()
            .all(|f| f.role == FigureRole::Background)
    );
}

#[test]
fn image_mask_removes_covered_modules() {
    let mut b = GeometryBuilder::new(all_dark(25));
    let style = StyleConfig {
        image_scale: 0.3,
        ..scenario_style()
    };
    let plain = b.build(&style, false);
    let masked = b.build(&style, true);
    let mask = masked.image_mask.unwrap();
    assert!(
        masked.geometry.count_role(FigureRole::Module)
            < plain.geometry.count_role(FigureRole::Module)
    );
    for r in module_bounds(&masked) {
        assert!(!mask.excludes(r), "{r:?} overlaps the mask");
    }
    assert_eq!(masked.image_rect(), Some(mask.image_rect));
}

#[test]
fn triangles_never_point_into_the_mask() {
    // A horizontal run of dark modules crossing the image area.
    let m = Arc::new(BitMatrix::from_fn(25, |_, y| y == 12));
    let style = StyleConfig {
        dot_shape: DotShape::Triangle,
        // Image edges fall mid-cell so no module merely touches the mask.
        image_scale: 0.22,
        image_padding_modules: 0.0,
        ..scenario_style()
    };
    let mut b = GeometryBuilder::new(m);
    let out = b.build(&style, true);
    let layout = out.layout.unwrap();
    let mask = out.image_mask.unwrap();

    let mut run_ends = 0;
    for col in 0..25 {
        let cell = layout.cell_rect(col, 12);
        if mask.excludes(cell) {
            continue;
        }
        let fig = out
            .geometry
            .figures()
            .iter()
            .find(|f| f.role == FigureRole::Module && approx_rect(f.bounds(), cell))
            .unwrap();
        let touches_mask = mask.excludes(layout.cell_rect(col - 1, 12))
            || mask.excludes(layout.cell_rect(col + 1, 12));
        if touches_mask {
            // Only the neighbor away from the image counts, so the module tapers.
            let verts = fig.path.elements().len();
            assert_eq!(verts, 6, "col {col}: five vertices plus close");
            run_ends += 1;
        }
    }
    assert_eq!(run_ends, 2);
}

#[test]
fn markers_follow_data_bounds() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let out = b.build(&scenario_style(), false);
    let layout = out.layout.unwrap();
    let outer = out
        .geometry
        .figures()
        .iter()
        .find(|f| f.role == FigureRole::MarkerOuter)
        .unwrap();
    let s = layout.symbol_size;
    let expected = Rect::from_origin_size(
        (layout.data_bounds.x0, layout.data_bounds.y0),
        Size::new(7.0 * s.width, 7.0 * s.height),
    );
    assert!(approx_rect(outer.bounds(), expected));
}

#[test]
fn set_matrix_resets_classifier() {
    let mut b = GeometryBuilder::new(all_dark(21));
    let _ = b.build(&scenario_style(), false);
    assert!(b.classifier().cache_len() > 0);
    b.set_matrix(Arc::new(BitMatrix::from_fn(21, |_, _| false)));
    assert_eq!(b.classifier().cache_len(), 0);
    let out = b.build(&scenario_style(), false);
    assert_eq!(out.geometry.count_role(FigureRole::Module), 0);
}

#[test]
fn quiet_zone_toggle_changes_column_count() {
    let style = StyleConfig {
        quiet_zone_enabled: false,
        ..scenario_style()
    };
    let layout = compute_layout(21, &style).unwrap();
    assert_eq!(layout.column_count, 21);
    assert_eq!(layout.data_bounds, Rect::new(0.0, 0.0, 210.0, 210.0));
    assert!(compute_layout(0, &style).is_none());
}
