//! SVG Composer - a typed builder for SVG documents
//!
//! This library assembles SVG documents from typed attribute structs,
//! transform and path-data command models, and a document wrapper that
//! manages ids, a `defs` container and CSS style rules.
//!
//! # Example
//!
//! ```rust
//! use svg_composer::{Circle, Document, Rect, SvgElement, WriteOptions};
//!
//! let mut doc = Document::new(Rect::new(0.0, 0.0, 640.0, 480.0));
//! doc.add(SvgElement::circle(Circle::new(320.0, 240.0, 50.0))).unwrap();
//! let svg = doc.to_string(&WriteOptions::default()).unwrap();
//! assert!(svg.contains("<circle"));
//! ```

pub mod attrs;
pub mod document;
pub mod error;
pub mod geom;
pub mod paint;
pub mod path;
pub mod stylesheet;
pub mod transform;
pub mod units;
pub mod xml;

pub use attrs::{AttrValues, FieldSpec, WriteAttributes};
pub use document::{
    Circle, Document, ElementRef, Ellipse, GradientStop, LineSegment, Rect, SvgElement, ViewBox,
    WriteOptions, SVG_NAMESPACE, XLINK_NAMESPACE,
};
pub use error::{Error, Result};
pub use geom::{angle_between, polar_to_rect, Envelope, Pt};
pub use paint::{Effects, Fill, Stroke, StyleSource, TextAttrs};
pub use path::{render_path, PathCommand, PathOp};
pub use stylesheet::{Stylesheet, StylesheetError};
pub use transform::{render_transforms, Transform};
pub use units::{Unit, UnitValues};
