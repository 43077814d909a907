//! # Instruction Renderers
//!
//! Text forms of a compiled path. Each renderer is a [`PathSink`], so it can
//! sit directly behind the parser and build its output as instructions
//! arrive, or be fed a finished instruction list through the `to_*`
//! helpers.
//!
//! - **text**: one `MoveTo(10, 20)`-style line per instruction.
//! - **skia**: C++ statements building an `SkPath` named `p`.
//! - **json**: the serde form of the instruction list.

use std::fmt::{self, Display, Write};

use crate::model::{Instruction, Point};
use crate::parser::PathSink;

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveTo(p) => write!(f, "MoveTo({})", p),
            Instruction::LineTo(p) => write!(f, "LineTo({})", p),
            Instruction::CubicTo(c1, c2, p) => write!(f, "CubicTo({}, {}, {})", c1, c2, p),
            Instruction::QuadTo(c, p) => write!(f, "QuadTo({}, {})", c, p),
            Instruction::ArcTo {
                radii,
                x_axis_rotation,
                large_arc,
                sweep_positive,
                end,
            } => write!(
                f,
                "ArcTo({}, {}, {}, {}, {})",
                radii, x_axis_rotation, large_arc, sweep_positive, end
            ),
            Instruction::Close => write!(f, "Close"),
        }
    }
}

/// Renders one `Display` line per instruction.
#[derive(Debug, Default)]
pub struct TextWriter {
    out: String,
}

impl TextWriter {
    pub fn new() -> Self {
        TextWriter::default()
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl PathSink for TextWriter {
    fn emit(&mut self, instruction: Instruction) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "{}", instruction);
    }
}

/// Renders C++ source that rebuilds the path with Skia's `SkPath` API.
#[derive(Debug)]
pub struct SkiaWriter {
    out: String,
}

impl Default for SkiaWriter {
    fn default() -> Self {
        SkiaWriter::new()
    }
}

impl SkiaWriter {
    pub fn new() -> Self {
        SkiaWriter {
            out: "SkPath p;\np.setFillType(SkPath::kWinding_FillType);\n".to_string(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl PathSink for SkiaWriter {
    fn emit(&mut self, instruction: Instruction) {
        let _ = match instruction {
            Instruction::MoveTo(p) => writeln!(self.out, "p.moveTo({});", p),
            Instruction::LineTo(p) => writeln!(self.out, "p.lineTo({});", p),
            Instruction::CubicTo(c1, c2, p) => {
                writeln!(self.out, "p.cubicTo({}, {}, {});", c1, c2, p)
            }
            Instruction::QuadTo(c, p) => writeln!(self.out, "p.quadTo({}, {});", c, p),
            Instruction::ArcTo {
                radii,
                x_axis_rotation,
                large_arc,
                sweep_positive,
                end,
            } => {
                let size = if large_arc {
                    "SkPath::kLarge_ArcSize"
                } else {
                    "SkPath::kSmall_ArcSize"
                };
                let direction = if sweep_positive {
                    "SkPathDirection::kCCW"
                } else {
                    "SkPathDirection::kCW"
                };
                writeln!(
                    self.out,
                    "p.arcTo({}, {}, {}, {}, {});",
                    radii, x_axis_rotation, size, direction, end
                )
            }
            Instruction::Close => writeln!(self.out, "p.close();"),
        };
    }
}

/// One line per instruction.
pub fn to_text(instructions: &[Instruction]) -> String {
    let mut w = TextWriter::new();
    for i in instructions {
        w.emit(*i);
    }
    w.finish()
}

/// Skia C++ source for the whole path.
pub fn to_skia_source(instructions: &[Instruction]) -> String {
    let mut w = SkiaWriter::new();
    for i in instructions {
        w.emit(*i);
    }
    w.finish()
}

/// Pretty-printed JSON array of instructions.
pub fn to_json(instructions: &[Instruction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(instructions)
}
