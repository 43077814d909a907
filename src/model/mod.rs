//! # Instruction Model
//!
//! The output representation of the compiler. A path string becomes an
//! ordered list of [`Instruction`]s, each one a canonical path-construction
//! primitive with every coordinate already resolved to absolute space: no
//! relative offsets, no shorthand curves, no implicit line-tos.
//!
//! Everything here is a plain value. Instructions serialize with serde so a
//! caller can hand them to another process without going through a renderer.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point in 2-D path space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Mirror `control` through this point: `2 * self - control`.
    pub fn reflect(self, control: Point) -> Point {
        self * 2.0 - control
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// One canonical path-construction primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    QuadTo(Point, Point),
    /// Elliptical arc. `sweep_positive` is the target's y-up direction flag,
    /// i.e. the inverse of the SVG sweep flag.
    #[serde(rename_all = "camelCase")]
    ArcTo {
        radii: Point,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep_positive: bool,
        end: Point,
    },
    Close,
}

impl Instruction {
    /// The point the pen rests on after this instruction, if it moves the pen.
    /// `Close` returns `None`: its endpoint is the subpath start, which only
    /// the enclosing path knows.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Instruction::MoveTo(p) | Instruction::LineTo(p) => Some(p),
            Instruction::CubicTo(_, _, p) | Instruction::QuadTo(_, p) => Some(p),
            Instruction::ArcTo { end, .. } => Some(end),
            Instruction::Close => None,
        }
    }

    /// Every point this instruction carries, control points included.
    /// Arc radii are extents, not positions, and are left out.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Instruction::MoveTo(p) | Instruction::LineTo(p) => vec![p],
            Instruction::CubicTo(c1, c2, p) => vec![c1, c2, p],
            Instruction::QuadTo(c, p) => vec![c, p],
            Instruction::ArcTo { end, .. } => vec![end],
            Instruction::Close => vec![],
        }
    }
}

/// Axis-aligned bounds over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    fn merge(self, p: Point) -> Bounds {
        Bounds {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl From<Point> for Bounds {
    fn from(p: Point) -> Self {
        Bounds { min: p, max: p }
    }
}

/// A compiled path: the instruction list plus a few queries over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub instructions: Vec<Instruction>,
}

impl Path {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Path { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Bounds over every emitted point, control points included. This is a
    /// conservative hull for curves, not the tight curve extent.
    pub fn bounds(&self) -> Option<Bounds> {
        self.instructions
            .iter()
            .flat_map(|i| i.points())
            .fold(None, |acc: Option<Bounds>, p| match acc {
                Some(b) => Some(b.merge(p)),
                None => Some(p.into()),
            })
    }

    /// Where the pen rests after the last instruction. `Close` sends it back
    /// to the start of the current subpath.
    pub fn end_point(&self) -> Point {
        let mut current = Point::ORIGIN;
        let mut subpath_start = Point::ORIGIN;
        for instruction in &self.instructions {
            match instruction {
                Instruction::MoveTo(p) => {
                    current = *p;
                    subpath_start = *p;
                }
                Instruction::Close => current = subpath_start,
                other => {
                    if let Some(p) = other.end_point() {
                        current = p;
                    }
                }
            }
        }
        current
    }
}

impl From<Vec<Instruction>> for Path {
    fn from(instructions: Vec<Instruction>) -> Self {
        Path::new(instructions)
    }
}
