#![forbid(unsafe_code)]

//! Render-side geometry for goey toasts.
//!
//! - [`path`]: a small SVG path model with bounds and flattening.
//! - [`shape`]: the pill-to-blob morph outline.
//! - [`constraints`]: the layout clamps that hide content outside the
//!   current outline while a morph is in flight.

pub mod constraints;
pub mod path;
pub mod shape;

pub use constraints::{ClipInset, Flush, LayoutConstraints, MorphBranch, compute_constraints};
pub use path::{Path, PathCommand};
pub use shape::{ShapeKind, morph_path, pill_path};
