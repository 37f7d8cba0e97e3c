//! Path data commands.
//!
//! Every command kind carries exactly its required parameters; the
//! relative/absolute distinction is a flag on the command, expressed as
//! letter case on output. Rendering compacts whitespace: a separator space
//! is only emitted where the following value does not start with a minus
//! sign, since the sign itself already separates tokens.

use crate::error::{Error, Result};
use crate::geom::fmt_number;

/// The parameter payload of one path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Horizontal { x: f64 },
    Vertical { y: f64 },
    Cubic { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    SmoothCubic { x2: f64, y2: f64, x: f64, y: f64 },
    Quadratic { x1: f64, y1: f64, x: f64, y: f64 },
    SmoothQuadratic { x: f64, y: f64 },
    Arc {
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

impl PathOp {
    fn base_letter(&self) -> char {
        match self {
            PathOp::Move { .. } => 'M',
            PathOp::Line { .. } => 'L',
            PathOp::Horizontal { .. } => 'H',
            PathOp::Vertical { .. } => 'V',
            PathOp::Cubic { .. } => 'C',
            PathOp::SmoothCubic { .. } => 'S',
            PathOp::Quadratic { .. } => 'Q',
            PathOp::SmoothQuadratic { .. } => 'T',
            PathOp::Arc { .. } => 'A',
            PathOp::Close => 'Z',
        }
    }

    fn field_names(&self) -> &'static [&'static str] {
        match self {
            PathOp::Move { .. } | PathOp::Line { .. } | PathOp::SmoothQuadratic { .. } => {
                &["x", "y"]
            }
            PathOp::Horizontal { .. } => &["x"],
            PathOp::Vertical { .. } => &["y"],
            PathOp::Cubic { .. } => &["x1", "y1", "x2", "y2", "x", "y"],
            PathOp::SmoothCubic { .. } => &["x2", "y2", "x", "y"],
            PathOp::Quadratic { .. } => &["x1", "y1", "x", "y"],
            PathOp::Arc { .. } => &[
                "rx",
                "ry",
                "x-axis-rotation",
                "large-arc-flag",
                "sweep-flag",
                "x",
                "y",
            ],
            PathOp::Close => &[],
        }
    }

    /// Parameter values in attribute order; arc flags render as 0 or 1
    fn values(&self) -> Vec<f64> {
        match *self {
            PathOp::Move { x, y }
            | PathOp::Line { x, y }
            | PathOp::SmoothQuadratic { x, y } => vec![x, y],
            PathOp::Horizontal { x } => vec![x],
            PathOp::Vertical { y } => vec![y],
            PathOp::Cubic { x1, y1, x2, y2, x, y } => vec![x1, y1, x2, y2, x, y],
            PathOp::SmoothCubic { x2, y2, x, y } => vec![x2, y2, x, y],
            PathOp::Quadratic { x1, y1, x, y } => vec![x1, y1, x, y],
            PathOp::Arc {
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => vec![
                rx,
                ry,
                x_rotation,
                if large_arc { 1.0 } else { 0.0 },
                if sweep { 1.0 } else { 0.0 },
                x,
                y,
            ],
            PathOp::Close => vec![],
        }
    }
}

/// A path command plus its positioning mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCommand {
    op: PathOp,
    relative: bool,
}

impl PathCommand {
    pub fn absolute(op: PathOp) -> Self {
        Self { op, relative: false }
    }

    pub fn relative(op: PathOp) -> Self {
        Self { op, relative: true }
    }

    pub fn op(&self) -> &PathOp {
        &self.op
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// The command letter, lowercased for relative commands
    pub fn letter(&self) -> char {
        let base = self.op.base_letter();
        if self.relative {
            base.to_ascii_lowercase()
        } else {
            base
        }
    }

    /// Declared parameter names of this command kind
    pub fn fields(&self) -> &'static [&'static str] {
        self.op.field_names()
    }

    fn undeclared(&self, field: &str) -> Error {
        Error::UndeclaredPathField {
            letter: self.letter(),
            field: field.to_string(),
        }
    }

    /// Read a parameter by field name; arc flags read as 0 or 1
    pub fn value(&self, field: &str) -> Result<f64> {
        let idx = self
            .fields()
            .iter()
            .position(|f| *f == field)
            .ok_or_else(|| self.undeclared(field))?;
        Ok(self.op.values()[idx])
    }

    /// Write a parameter by field name; a nonzero value sets an arc flag
    pub fn set_value(&mut self, field: &str, value: f64) -> Result<()> {
        macro_rules! dispatch {
            ($($variant:ident { $($f:ident),+ }),+ $(,)?) => {
                match (&mut self.op, field) {
                    $($( (PathOp::$variant { $f, .. }, stringify!($f)) => *$f = value, )+)+
                    (PathOp::Arc { x_rotation, .. }, "x-axis-rotation") => *x_rotation = value,
                    (PathOp::Arc { large_arc, .. }, "large-arc-flag") => *large_arc = value != 0.0,
                    (PathOp::Arc { sweep, .. }, "sweep-flag") => *sweep = value != 0.0,
                    _ => return Err(self.undeclared(field)),
                }
            };
        }
        dispatch!(
            Move { x, y },
            Line { x, y },
            Horizontal { x },
            Vertical { y },
            Cubic { x1, y1, x2, y2, x, y },
            SmoothCubic { x2, y2, x, y },
            Quadratic { x1, y1, x, y },
            SmoothQuadratic { x, y },
            Arc { rx, ry, x, y },
        );
        Ok(())
    }

    /// Render this command. With `omit_letter` the letter is dropped in
    /// favor of a separating space, unless the first value's minus sign
    /// already separates it from the previous token.
    pub fn render(&self, omit_letter: bool) -> String {
        let values = self.op.values();
        let mut out = String::new();
        if !omit_letter {
            out.push(self.letter());
        }
        for (i, v) in values.iter().enumerate() {
            let text = fmt_number(*v);
            let separated = !text.starts_with('-');
            if separated && (i > 0 || omit_letter) {
                out.push(' ');
            }
            out.push_str(&text);
        }
        out
    }
}

/// Whether a letter denotes a relative path command
pub fn is_relative_letter(letter: char) -> bool {
    letter.is_ascii_lowercase()
}

/// Render a command sequence into a `d` attribute value. Consecutive
/// commands with the same letter chain without repeating it.
pub fn render_path(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    let mut previous: Option<char> = None;
    for cmd in commands {
        let letter = cmd.letter();
        out.push_str(&cmd.render(previous == Some(letter)));
        previous = Some(letter);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_casing() {
        let abs = PathCommand::absolute(PathOp::Line { x: 1.0, y: 2.0 });
        let rel = PathCommand::relative(PathOp::Line { x: 1.0, y: 2.0 });
        assert_eq!(abs.letter(), 'L');
        assert_eq!(rel.letter(), 'l');
        assert_eq!(PathCommand::absolute(PathOp::Close).letter(), 'Z');
        assert_eq!(PathCommand::relative(PathOp::Close).letter(), 'z');
    }

    #[test]
    fn test_render_sign_compaction() {
        let cmd = PathCommand::absolute(PathOp::Line { x: -5.0, y: 3.0 });
        assert_eq!(cmd.render(false), "L-5 3");
        let cmd = PathCommand::absolute(PathOp::Line { x: 5.0, y: 3.0 });
        assert_eq!(cmd.render(false), "L5 3");
        let cmd = PathCommand::absolute(PathOp::Line { x: 5.0, y: -3.0 });
        assert_eq!(cmd.render(false), "L5-3");
    }

    #[test]
    fn test_render_omit_letter() {
        let cmd = PathCommand::absolute(PathOp::Line { x: 5.0, y: 3.0 });
        assert_eq!(cmd.render(true), " 5 3");
        let cmd = PathCommand::absolute(PathOp::Line { x: -5.0, y: 3.0 });
        assert_eq!(cmd.render(true), "-5 3");
    }

    #[test]
    fn test_arc_flags_render_binary() {
        let cmd = PathCommand::absolute(PathOp::Arc {
            rx: 30.0,
            ry: 50.0,
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
            x: 162.55,
            y: 162.45,
        });
        assert_eq!(cmd.render(false), "A30 50 0 0 1 162.55 162.45");
    }

    #[test]
    fn test_value_access() {
        let cmd = PathCommand::absolute(PathOp::Cubic {
            x1: 1.0,
            y1: 2.0,
            x2: 3.0,
            y2: 4.0,
            x: 5.0,
            y: 6.0,
        });
        assert_eq!(cmd.value("x2").unwrap(), 3.0);
        assert!(matches!(
            cmd.value("rx"),
            Err(Error::UndeclaredPathField { letter: 'C', .. })
        ));
    }

    #[test]
    fn test_set_value() {
        let mut cmd = PathCommand::relative(PathOp::Move { x: 0.0, y: 0.0 });
        cmd.set_value("x", 12.0).unwrap();
        assert_eq!(cmd.render(false), "m12 0");
        assert!(matches!(
            cmd.set_value("x1", 1.0),
            Err(Error::UndeclaredPathField { letter: 'm', .. })
        ));

        let mut arc = PathCommand::absolute(PathOp::Arc {
            rx: 1.0,
            ry: 1.0,
            x_rotation: 0.0,
            large_arc: false,
            sweep: false,
            x: 2.0,
            y: 2.0,
        });
        arc.set_value("large-arc-flag", 1.0).unwrap();
        assert_eq!(arc.value("large-arc-flag").unwrap(), 1.0);
    }

    #[test]
    fn test_render_path_chains_same_letter() {
        let cmds = [
            PathCommand::absolute(PathOp::Move { x: 10.0, y: 10.0 }),
            PathCommand::absolute(PathOp::Line { x: 20.0, y: 20.0 }),
            PathCommand::absolute(PathOp::Line { x: 30.0, y: -10.0 }),
            PathCommand::absolute(PathOp::Close),
        ];
        assert_eq!(render_path(&cmds), "M10 10L20 20 30-10Z");
    }

    #[test]
    fn test_render_path_relative_mix() {
        let cmds = [
            PathCommand::absolute(PathOp::Move { x: 0.0, y: 0.0 }),
            PathCommand::relative(PathOp::Line { x: 5.0, y: 0.0 }),
            PathCommand::relative(PathOp::Line { x: 0.0, y: 5.0 }),
            PathCommand::absolute(PathOp::Line { x: 0.0, y: 0.0 }),
        ];
        assert_eq!(render_path(&cmds), "M0 0l5 0 0 5L0 0");
        assert!(is_relative_letter('l'));
        assert!(!is_relative_letter('L'));
    }

    #[test]
    fn test_horizontal_vertical() {
        let cmds = [
            PathCommand::absolute(PathOp::Move { x: 1.0, y: 1.0 }),
            PathCommand::absolute(PathOp::Horizontal { x: 9.0 }),
            PathCommand::absolute(PathOp::Vertical { y: -4.0 }),
        ];
        assert_eq!(render_path(&cmds), "M1 1H9V-4");
    }
}
