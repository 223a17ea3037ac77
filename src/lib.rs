//! qrshape turns QR module matrices into stylable vector geometry.
//!
//! A payload is encoded into a [`BitMatrix`], classified (finder blocks are drawn separately),
//! and assembled by [`GeometryBuilder`] into one compound path: a canvas-sized background,
//! one hole per visible module and three position markers. Layout changes crossfade from the
//! previous revision to the new one under a [`TransitionController`].
//!
//! # Pipeline overview
//!
//! 1. **Encode**: `&str + EccLevel -> BitMatrix` ([`Encoder`])
//! 2. **Build**: `BitMatrix + StyleConfig -> Geometry` ([`GeometryBuilder`])
//! 3. **Transition**: `Geometry -> (previous, current)` frames ([`TransitionController`])
//! 4. **Export** (optional): frames to a standalone SVG document ([`write_svg`])
//!
//! [`QrSession`] ties the steps together for a host that owns one QR surface.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic builds**: the same matrix and style always produce the same geometry.
//! - **Clamp, don't fail**: out-of-range style values are clamped; a canvas with no room for
//!   the symbol yields an empty geometry instead of an error.
#![forbid(unsafe_code)]

mod encode;
mod export;
mod foundation;
mod geometry;
mod matrix;
mod session;
mod style;
mod transition;

pub use encode::qr::{EccLevel, Encoder, QrcodeEncoder};
pub use export::svg::{SvgExportOpts, write_svg};
pub use foundation::core::{Affine, BezPath, CornerRadius, Edges, Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{QrShapeError, QrShapeResult};
pub use geometry::builder::{BuildOutput, GeometryBuilder, LayoutMetrics, compute_layout};
pub use geometry::figure::{Figure, FigureRole, FillRule, Geometry, Winding};
pub use geometry::finder::{MARKER_MODULES, MarkerCorner, drop_path, emit_markers};
pub use geometry::mask::{ImageMask, compute_mask};
pub use geometry::module::{Neighbors, shape_module};
pub use matrix::bits::BitMatrix;
pub use matrix::classifier::MatrixClassifier;
pub use session::qr_session::{QrSession, RenderSnapshot};
pub use style::config::{DotShape, MarkerShape, QUIET_ZONE_MODULES, StyleConfig};
pub use transition::controller::{RedrawHook, TransitionController};
pub use transition::crossfade::{Crossfade, RampOpts, RampStep, RampTicket, TransitionFrame};
