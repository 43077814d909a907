//! # pathd
//!
//! Compiles SVG path data (the `d` attribute of a `<path>` element) into an
//! ordered list of canonical path-construction instructions: move, line,
//! cubic, quadratic, elliptical arc and close.
//!
//! Path data is a compact little language. Commands may be absolute or
//! relative, repeat implicitly, and the smooth curve commands (`S`, `T`)
//! leave their first control point to be inferred from the previous segment.
//! The output of pathd has none of that: every instruction carries absolute
//! coordinates and explicit control points, ready to hand to a graphics
//! library's path builder.
//!
//! Coordinates can be rescaled on the way through, mapping a source canvas
//! (typically an icon's viewBox) onto a destination canvas.
//!
//! ## Architecture
//!
//! ```text
//! Input (d attribute text)
//!       ↓
//!   [lexer]      — classify commands / numbers, lex numbers
//!       ↓
//!   [transform]  — identity or per-axis rescale of each coordinate
//!       ↓
//!   [parser]     — command state machine, emits Instructions into a sink
//!       ↓
//!   [render]     — text / Skia source / JSON
//! ```
//!
//! ```
//! use pathd::model::{Instruction, Point};
//!
//! let path = pathd::parse_path("M 10 20 l 5 0 z").unwrap();
//! assert_eq!(path[1], Instruction::LineTo(Point::new(15.0, 20.0)));
//! ```

pub mod error;
pub mod input;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod render;
pub mod svg;
pub mod transform;

pub use error::{ConfigError, PathError, SvgError};
pub use model::{Instruction, Path, Point};
pub use parser::{PathParser, PathSink};
pub use transform::{CoordinateTransform, Identity, Rescale};

/// Compile path data with coordinates taken as written.
pub fn parse_path(d: &str) -> Result<Vec<Instruction>, PathError> {
    PathParser::new().parse(d)
}

/// Compile path data, rescaling every coordinate from the source canvas
/// size to the destination canvas size.
pub fn parse_path_rescaled(d: &str, rescale: Rescale) -> Result<Vec<Instruction>, PathError> {
    PathParser::with_transform(rescale).parse(d)
}
