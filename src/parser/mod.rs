//! # Path Interpreter
//!
//! The command-dispatch state machine. It pulls a command letter from the
//! lexer, then keeps consuming operand tuples for that command until the
//! next token is not a number, emitting one canonical [`Instruction`] per
//! tuple into a [`PathSink`].
//!
//! All state lives in a [`ParserState`] built fresh for every call, so a
//! [`PathParser`] can be reused and shared freely. A failed parse leaves
//! nothing behind that could affect the next one.
//!
//! ## Commands
//!
//! ```text
//! M/m (x y)+                      MoveTo, then LineTo for extra pairs
//! L/l (x y)+                      LineTo
//! H/h (x)+  V/v (y)+              LineTo along one axis
//! C/c (x1 y1 x2 y2 x y)+          CubicTo
//! S/s (x2 y2 x y)+                CubicTo, first control reflected
//! Q/q (x1 y1 x y)+                QuadTo
//! T/t (x y)+                      QuadTo, control reflected
//! A/a (rx ry rot large sweep x y)+ ArcTo
//! Z/z                             Close
//! ```
//!
//! Any other letter is skipped along with the numbers that follow it.

use log::{debug, trace, warn};

use crate::error::PathError;
use crate::lexer::{Lexer, Token};
use crate::model::{Instruction, Path, Point};
use crate::transform::{CoordinateTransform, Identity};

/// Receives instructions in emission order.
pub trait PathSink {
    fn emit(&mut self, instruction: Instruction);
}

impl PathSink for Vec<Instruction> {
    fn emit(&mut self, instruction: Instruction) {
        self.push(instruction);
    }
}

impl PathSink for Path {
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    fn emit(&mut self, instruction: Instruction) {
        (**self).emit(instruction);
    }
}

/// Compiles path data with a fixed coordinate transform.
#[derive(Debug, Clone, Default)]
pub struct PathParser<T = Identity> {
    transform: T,
}

impl PathParser<Identity> {
    pub fn new() -> Self {
        PathParser {
            transform: Identity,
        }
    }
}

impl<T: CoordinateTransform> PathParser<T> {
    pub fn with_transform(transform: T) -> Self {
        PathParser { transform }
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Parse a whole path string into a list of instructions.
    pub fn parse(&self, d: &str) -> Result<Vec<Instruction>, PathError> {
        let mut out = Vec::new();
        self.parse_into(d, &mut out)?;
        Ok(out)
    }

    /// Parse into an arbitrary sink. On error the sink keeps whatever was
    /// emitted before the failure.
    pub fn parse_into<S: PathSink>(&self, d: &str, sink: &mut S) -> Result<(), PathError> {
        debug!("parsing path data ({} bytes)", d.len());
        let mut state = ParserState::new(d, &self.transform);
        match state.run(sink) {
            Ok(()) => {
                debug!("emitted {} instructions", state.emitted);
                Ok(())
            }
            Err(e) => {
                debug!("path parse failed after {} instructions: {}", state.emitted, e);
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurveFamily {
    Cubic,
    Quadratic,
}

fn curve_family(command: char) -> Option<CurveFamily> {
    match command.to_ascii_uppercase() {
        'C' | 'S' => Some(CurveFamily::Cubic),
        'Q' | 'T' => Some(CurveFamily::Quadratic),
        _ => None,
    }
}

/// Mutable interpreter state for one parse call.
pub struct ParserState<'a, T> {
    lexer: Lexer<'a>,
    transform: &'a T,
    /// Endpoint of the last emitted primitive.
    current: Point,
    /// Trailing control point of the last cubic or quadratic.
    last_control: Point,
    subpath_start: Point,
    prev_command: Option<char>,
    emitted: usize,
}

impl<'a, T: CoordinateTransform> ParserState<'a, T> {
    pub fn new(src: &'a str, transform: &'a T) -> Self {
        ParserState {
            lexer: Lexer::new(src),
            transform,
            current: Point::ORIGIN,
            last_control: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
            prev_command: None,
            emitted: 0,
        }
    }

    /// Drive the whole input through the state machine.
    pub fn run<S: PathSink>(&mut self, sink: &mut S) -> Result<(), PathError> {
        while self.lexer.classify() != Token::EndOfInput {
            let offset = self.lexer.offset();
            let command = self.lexer.read_command()?;
            let relative = command.is_ascii_lowercase();

            match command.to_ascii_uppercase() {
                'M' => self.move_to(command, relative, sink)?,
                'L' => self.each_tuple(command, |st| {
                    let p = st.read_point(relative)?;
                    st.emit(sink, Instruction::LineTo(p));
                    Ok(())
                })?,
                'H' => self.each_tuple(command, |st| {
                    let x = st.read_x(relative)?;
                    let p = Point::new(x, st.current.y);
                    st.emit(sink, Instruction::LineTo(p));
                    Ok(())
                })?,
                'V' => self.each_tuple(command, |st| {
                    let y = st.read_y(relative)?;
                    let p = Point::new(st.current.x, y);
                    st.emit(sink, Instruction::LineTo(p));
                    Ok(())
                })?,
                'C' => self.each_tuple(command, |st| {
                    let c1 = st.read_point(relative)?;
                    let c2 = st.read_point(relative)?;
                    let end = st.read_point(relative)?;
                    st.last_control = c2;
                    st.emit(sink, Instruction::CubicTo(c1, c2, end));
                    Ok(())
                })?,
                'S' => self.each_tuple(command, |st| {
                    let c1 = st.reflected_control(CurveFamily::Cubic);
                    let c2 = st.read_point(relative)?;
                    let end = st.read_point(relative)?;
                    st.last_control = c2;
                    st.emit(sink, Instruction::CubicTo(c1, c2, end));
                    Ok(())
                })?,
                'Q' => self.each_tuple(command, |st| {
                    let c = st.read_point(relative)?;
                    let end = st.read_point(relative)?;
                    st.last_control = c;
                    st.emit(sink, Instruction::QuadTo(c, end));
                    Ok(())
                })?,
                'T' => self.each_tuple(command, |st| {
                    let c = st.reflected_control(CurveFamily::Quadratic);
                    let end = st.read_point(relative)?;
                    st.last_control = c;
                    st.emit(sink, Instruction::QuadTo(c, end));
                    Ok(())
                })?,
                'A' => self.each_tuple(command, |st| {
                    let arc = st.read_arc(relative)?;
                    st.emit(sink, arc);
                    Ok(())
                })?,
                'Z' => {
                    self.emit(sink, Instruction::Close);
                    self.current = self.subpath_start;
                    self.prev_command = Some(command);
                }
                _ => self.skip_unknown(command, offset)?,
            }
        }
        Ok(())
    }

    /// `M` is special only in that its first pair opens a subpath.
    fn move_to<S: PathSink>(
        &mut self,
        command: char,
        relative: bool,
        sink: &mut S,
    ) -> Result<(), PathError> {
        let mut first = true;
        self.each_tuple(command, |st| {
            let p = st.read_point(relative)?;
            if first {
                st.subpath_start = p;
                st.emit(sink, Instruction::MoveTo(p));
                first = false;
            } else {
                st.emit(sink, Instruction::LineTo(p));
            }
            Ok(())
        })
    }

    /// Run `step` for the mandatory first operand tuple and then for every
    /// further tuple, as long as the next token is a number.
    fn each_tuple<F>(&mut self, command: char, mut step: F) -> Result<(), PathError>
    where
        F: FnMut(&mut Self) -> Result<(), PathError>,
    {
        loop {
            step(self)?;
            self.prev_command = Some(command);
            if self.lexer.classify() != Token::NumericValue {
                return Ok(());
            }
        }
    }

    fn skip_unknown(&mut self, command: char, offset: usize) -> Result<(), PathError> {
        warn!("skipping unrecognized path command '{}' at offset {}", command, offset);
        while self.lexer.classify() == Token::NumericValue {
            self.lexer.read_value()?;
        }
        Ok(())
    }

    fn reflected_control(&self, family: CurveFamily) -> Point {
        match self.prev_command.and_then(curve_family) {
            Some(prev) if prev == family => self.current.reflect(self.last_control),
            _ => self.current,
        }
    }

    fn read_x(&mut self, relative: bool) -> Result<f64, PathError> {
        let x = self.transform.transform_x(self.lexer.read_value()?);
        Ok(if relative { self.current.x + x } else { x })
    }

    fn read_y(&mut self, relative: bool) -> Result<f64, PathError> {
        let y = self.transform.transform_y(self.lexer.read_value()?);
        Ok(if relative { self.current.y + y } else { y })
    }

    fn read_point(&mut self, relative: bool) -> Result<Point, PathError> {
        let x = self.transform.transform_x(self.lexer.read_value()?);
        let y = self.transform.transform_y(self.lexer.read_value()?);
        let p = Point::new(x, y);
        Ok(if relative { self.current + p } else { p })
    }

    /// Radii are transformed but never offset; rotation and flags are taken
    /// as written.
    fn read_arc(&mut self, relative: bool) -> Result<Instruction, PathError> {
        let rx = self.transform.transform_x(self.lexer.read_value()?);
        let ry = self.transform.transform_y(self.lexer.read_value()?);
        let x_axis_rotation = self.lexer.read_value()?;
        let large_arc = self.lexer.read_value()? != 0.0;
        let sweep = self.lexer.read_value()? != 0.0;
        let end = self.read_point(relative)?;
        Ok(Instruction::ArcTo {
            radii: Point::new(rx, ry),
            x_axis_rotation,
            large_arc,
            // SVG sweeps in y-down space; the target direction flag is y-up.
            sweep_positive: !sweep,
            end,
        })
    }

    fn emit<S: PathSink>(&mut self, sink: &mut S, instruction: Instruction) {
        if let Some(p) = instruction.end_point() {
            self.current = p;
        }
        trace!("{}", instruction);
        sink.emit(instruction);
        self.emitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Rescale;

    fn parse(d: &str) -> Vec<Instruction> {
        PathParser::new().parse(d).unwrap()
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  , \n").is_empty());
    }

    #[test]
    fn test_move_line_close() {
        let cmds = parse("M 10 20 L 30 40 Z");
        assert_eq!(
            cmds,
            vec![
                Instruction::MoveTo(pt(10.0, 20.0)),
                Instruction::LineTo(pt(30.0, 40.0)),
                Instruction::Close,
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_move() {
        let cmds = parse("M10,0 10,10 20,20");
        assert_eq!(cmds[0], Instruction::MoveTo(pt(10.0, 0.0)));
        assert_eq!(cmds[1], Instruction::LineTo(pt(10.0, 10.0)));
        assert_eq!(cmds[2], Instruction::LineTo(pt(20.0, 20.0)));
    }

    #[test]
    fn test_relative_move_repeats_accumulate() {
        let cmds = parse("m 10 20 5 5 5 5");
        assert_eq!(
            cmds,
            vec![
                Instruction::MoveTo(pt(10.0, 20.0)),
                Instruction::LineTo(pt(15.0, 25.0)),
                Instruction::LineTo(pt(20.0, 30.0)),
            ]
        );
    }

    #[test]
    fn test_horizontal_vertical() {
        let cmds = parse("M 1 2 H 10 v 5 h -3 V 0");
        assert_eq!(
            &cmds[1..],
            &[
                Instruction::LineTo(pt(10.0, 2.0)),
                Instruction::LineTo(pt(10.0, 7.0)),
                Instruction::LineTo(pt(7.0, 7.0)),
                Instruction::LineTo(pt(7.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_relative_cubic_uses_segment_start_for_all_points() {
        let cmds = parse("M 10 10 c 1 1 2 2 3 3");
        assert_eq!(
            cmds[1],
            Instruction::CubicTo(pt(11.0, 11.0), pt(12.0, 12.0), pt(13.0, 13.0))
        );
    }

    #[test]
    fn test_smooth_cubic_reflects_after_cubic() {
        let cmds = parse("C 0 0 10 10 20 20 S 30 30 40 40");
        assert_eq!(
            cmds[1],
            Instruction::CubicTo(pt(30.0, 30.0), pt(30.0, 30.0), pt(40.0, 40.0))
        );
    }

    #[test]
    fn test_smooth_cubic_after_line_uses_current_point() {
        let cmds = parse("M 0 0 L 20 20 S 30 30 40 40");
        assert_eq!(
            cmds[2],
            Instruction::CubicTo(pt(20.0, 20.0), pt(30.0, 30.0), pt(40.0, 40.0))
        );
    }

    #[test]
    fn test_smooth_cubic_repeats_reflect_each_other() {
        let cmds = parse("M 0 0 L 20 20 S 30 30 40 40 50 60 70 70");
        // second tuple reflects (30,30) through (40,40)
        assert_eq!(
            cmds[3],
            Instruction::CubicTo(pt(50.0, 50.0), pt(50.0, 60.0), pt(70.0, 70.0))
        );
    }

    #[test]
    fn test_smooth_cubic_ignores_quadratic_control() {
        let cmds = parse("M 0 0 Q 5 10 10 0 S 15 5 20 0");
        assert_eq!(
            cmds[2],
            Instruction::CubicTo(pt(10.0, 0.0), pt(15.0, 5.0), pt(20.0, 0.0))
        );
    }

    #[test]
    fn test_smooth_quad_chain() {
        let cmds = parse("M 0 0 Q 5 10 10 0 T 20 0 t 10 0");
        assert_eq!(cmds[1], Instruction::QuadTo(pt(5.0, 10.0), pt(10.0, 0.0)));
        assert_eq!(cmds[2], Instruction::QuadTo(pt(15.0, -10.0), pt(20.0, 0.0)));
        assert_eq!(cmds[3], Instruction::QuadTo(pt(25.0, 10.0), pt(30.0, 0.0)));
    }

    #[test]
    fn test_smooth_quad_case_insensitive_family() {
        let lower = parse("M 0 0 q 5 10 10 0 T 20 0");
        assert_eq!(lower[2], Instruction::QuadTo(pt(15.0, -10.0), pt(20.0, 0.0)));
    }

    #[test]
    fn test_smooth_quad_after_cubic_uses_current_point() {
        let cmds = parse("M 0 0 C 1 1 2 2 3 3 T 10 10");
        assert_eq!(cmds[2], Instruction::QuadTo(pt(3.0, 3.0), pt(10.0, 10.0)));
    }

    #[test]
    fn test_arc_flags() {
        let cmds = parse("M 0 0 A 5 5 0 1 0 10 10");
        assert_eq!(
            cmds[1],
            Instruction::ArcTo {
                radii: pt(5.0, 5.0),
                x_axis_rotation: 0.0,
                large_arc: true,
                sweep_positive: true,
                end: pt(10.0, 10.0),
            }
        );
        let cmds = parse("M 0 0 A 5 5 0 0 1 10 10");
        assert!(matches!(
            cmds[1],
            Instruction::ArcTo {
                large_arc: false,
                sweep_positive: false,
                ..
            }
        ));
    }

    #[test]
    fn test_relative_arc_offsets_only_endpoint() {
        let cmds = parse("M 10 10 a 5 6 30 0 0 10 0");
        assert_eq!(
            cmds[1],
            Instruction::ArcTo {
                radii: pt(5.0, 6.0),
                x_axis_rotation: 30.0,
                large_arc: false,
                sweep_positive: true,
                end: pt(20.0, 10.0),
            }
        );
    }

    #[test]
    fn test_close_restores_subpath_start_for_relative() {
        let cmds = parse("M 0 0 L 10 0 L 10 10 Z l 5 5");
        assert_eq!(cmds[4], Instruction::LineTo(pt(5.0, 5.0)));
    }

    #[test]
    fn test_absolute_close_also_restores_subpath_start() {
        let cmds = parse("M 1 1 L 10 0 Z h 4");
        assert_eq!(cmds[3], Instruction::LineTo(pt(5.0, 1.0)));
    }

    #[test]
    fn test_unknown_command_is_skipped() {
        let cmds = parse("M 0 0 X 1 2 L 3 4");
        assert_eq!(
            cmds,
            vec![
                Instruction::MoveTo(pt(0.0, 0.0)),
                Instruction::LineTo(pt(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_unknown_command_keeps_previous_command() {
        let cmds = parse("C 0 0 10 10 20 20 X S 30 30 40 40");
        assert_eq!(
            cmds[1],
            Instruction::CubicTo(pt(30.0, 30.0), pt(30.0, 30.0), pt(40.0, 40.0))
        );
    }

    #[test]
    fn test_expected_value() {
        let err = PathParser::new().parse("M 1 2 L a").unwrap_err();
        assert_eq!(err, PathError::ExpectedValue { offset: 8 });
    }

    #[test]
    fn test_expected_command() {
        let err = PathParser::new().parse("10 20").unwrap_err();
        assert_eq!(err, PathError::ExpectedCommand { offset: 0 });
        let err = PathParser::new().parse("M 0 0 Z 5").unwrap_err();
        assert_eq!(err, PathError::ExpectedCommand { offset: 8 });
    }

    #[test]
    fn test_truncated_command() {
        let err = PathParser::new().parse("M 0 0 C 1 2 3").unwrap_err();
        assert_eq!(err, PathError::TruncatedCommand { offset: 13 });
        let err = PathParser::new().parse("M 0 0 L").unwrap_err();
        assert_eq!(err, PathError::TruncatedCommand { offset: 7 });
    }

    #[test]
    fn test_partial_number_run_is_accepted() {
        let cmds = parse("M 1.2.3");
        assert_eq!(cmds, vec![Instruction::MoveTo(pt(1.2, 0.3))]);
    }

    #[test]
    fn test_malformed_number_is_fatal() {
        let err = PathParser::new().parse("M 0 0 L 1 -").unwrap_err();
        assert_eq!(
            err,
            PathError::MalformedNumber {
                lexeme: "-".to_string(),
                offset: 10,
            }
        );
    }

    #[test]
    fn test_parse_into_keeps_partial_output() {
        let mut out = Vec::new();
        let res = PathParser::new().parse_into("M 0 0 L 1 1 L 2", &mut out);
        assert!(res.is_err());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_rescaled_relative_offsets() {
        let parser = PathParser::with_transform(Rescale::new(10.0, 10.0, 20.0, 5.0).unwrap());
        let cmds = parser.parse("M 1 2 l 1 2").unwrap();
        assert_eq!(cmds[0], Instruction::MoveTo(pt(2.0, 1.0)));
        assert_eq!(cmds[1], Instruction::LineTo(pt(4.0, 2.0)));
    }

    #[test]
    fn test_rescale_applies_to_arc_radii_not_rotation() {
        let parser = PathParser::with_transform(Rescale::new(10.0, 10.0, 20.0, 20.0).unwrap());
        let cmds = parser.parse("M 0 0 A 1 2 45 0 0 3 4").unwrap();
        assert_eq!(
            cmds[1],
            Instruction::ArcTo {
                radii: pt(2.0, 4.0),
                x_axis_rotation: 45.0,
                large_arc: false,
                sweep_positive: true,
                end: pt(6.0, 8.0),
            }
        );
    }

    #[test]
    fn test_parser_is_reusable_after_error() {
        let parser = PathParser::new();
        assert!(parser.parse("M 0 0 L").is_err());
        assert_eq!(
            parser.parse("l 1 1").unwrap(),
            vec![Instruction::LineTo(pt(1.0, 1.0))]
        );
    }
}
