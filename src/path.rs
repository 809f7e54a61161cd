//! SVG path-data parser for traced frame outlines
//!
//! Supports the subset of SVG path syntax emitted by bitmap tracers:
//! - M (absolute moveto)
//! - m (relative moveto)
//! - l (relative lineto)
//! - c (relative cubic Bézier; control points are discarded)
//! - z / Z (closepath, no operation)
//!
//! A command letter stays in effect for every following group of operands
//! until the next letter appears.

use thiserror::Error;

use crate::models::Point;

/// Error type for path parsing failures
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// Unknown command character
    #[error("unknown command '{0}'")]
    UnknownCommand(char),
    /// Not enough coordinates for command
    #[error("not enough coordinates for command '{0}'")]
    NotEnoughCoordinates(char),
    /// Invalid number format
    #[error("invalid number '{0}': {1}")]
    InvalidNumber(String, String),
    /// Coordinates appeared before any command letter
    #[error("coordinates before the first path command")]
    MissingCommand,
}

/// A supported path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `M x y`
    MoveAbs,
    /// `m dx dy`
    MoveRel,
    /// `l dx dy`
    LineRel,
    /// `c dx1 dy1 dx2 dy2 dx dy`
    CubicRel,
}

impl Command {
    /// Map a command letter to a supported command.
    pub fn from_letter(letter: char) -> Result<Self, PathError> {
        match letter {
            'M' => Ok(Self::MoveAbs),
            'm' => Ok(Self::MoveRel),
            'l' => Ok(Self::LineRel),
            'c' => Ok(Self::CubicRel),
            other => Err(PathError::UnknownCommand(other)),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::MoveAbs => 'M',
            Self::MoveRel => 'm',
            Self::LineRel => 'l',
            Self::CubicRel => 'c',
        }
    }

    /// Number of operands consumed per repetition of this command.
    pub fn operand_count(self) -> usize {
        match self {
            Self::CubicRel => 6,
            Self::MoveAbs | Self::MoveRel | Self::LineRel => 2,
        }
    }
}

/// A resolved path operation in absolute source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    /// Start of a new subpath
    MoveTo(Point),
    /// Straight segment to a point (curves are flattened to their endpoint)
    LineTo(Point),
}

impl PathOp {
    pub fn point(self) -> Point {
        match self {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => p,
        }
    }
}

/// Lexical token of path data.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PathToken<'a> {
    Command(char),
    Close,
    Number(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ParserState {
    AwaitingCommand,
    InCommand(Command),
    Failed,
}

/// Streaming parser over one `d` attribute.
///
/// Yields one [`PathOp`] per operand group. Parsing stops at the first error.
#[derive(Debug)]
pub struct PathParser<'a> {
    tokens: std::vec::IntoIter<PathToken<'a>>,
    state: ParserState,
    cursor: Point,
}

impl<'a> PathParser<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            tokens: tokenize_path(data).into_iter(),
            state: ParserState::AwaitingCommand,
            cursor: Point::ORIGIN,
        }
    }

    fn fail(&mut self, err: PathError) -> Option<Result<PathOp, PathError>> {
        self.state = ParserState::Failed;
        Some(Err(err))
    }

    /// Consume the remaining operands of `cmd` and resolve the operation.
    fn apply(&mut self, cmd: Command, first: &str) -> Result<PathOp, PathError> {
        let count = cmd.operand_count();
        let mut operands = [0.0; 6];
        operands[0] = parse_number(first)?;
        for slot in operands[1..count].iter_mut() {
            match self.tokens.next() {
                Some(PathToken::Number(text)) => *slot = parse_number(text)?,
                _ => return Err(PathError::NotEnoughCoordinates(cmd.letter())),
            }
        }

        // Only the endpoint matters; cubic control points are dropped.
        let (x, y) = (operands[count - 2], operands[count - 1]);
        let op = match cmd {
            Command::MoveAbs => PathOp::MoveTo(Point::new(x, y)),
            Command::MoveRel => PathOp::MoveTo(self.cursor.offset(x, y)),
            Command::LineRel | Command::CubicRel => PathOp::LineTo(self.cursor.offset(x, y)),
        };
        self.cursor = op.point();
        Ok(op)
    }
}

impl Iterator for PathParser<'_> {
    type Item = Result<PathOp, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == ParserState::Failed {
                return None;
            }
            match self.tokens.next()? {
                PathToken::Close => continue,
                PathToken::Command(letter) => match Command::from_letter(letter) {
                    Ok(cmd) => self.state = ParserState::InCommand(cmd),
                    Err(e) => return self.fail(e),
                },
                PathToken::Number(text) => {
                    let cmd = match self.state {
                        ParserState::InCommand(cmd) => cmd,
                        _ => return self.fail(PathError::MissingCommand),
                    };
                    return match self.apply(cmd, text) {
                        Ok(op) => Some(Ok(op)),
                        Err(e) => self.fail(e),
                    };
                }
            }
        }
    }
}

/// Parse path data into absolute operations.
///
/// # Examples
///
/// ```
/// use svg2clip::models::Point;
/// use svg2clip::path::{parse_path, PathOp};
///
/// let ops = parse_path("M100 200 l10 0 c1 1 2 2 5 5z").unwrap();
/// assert_eq!(
///     ops,
///     vec![
///         PathOp::MoveTo(Point::new(100.0, 200.0)),
///         PathOp::LineTo(Point::new(110.0, 200.0)),
///         PathOp::LineTo(Point::new(115.0, 205.0)),
///     ]
/// );
/// ```
///
/// # Errors
///
/// Returns `PathError` if the path uses an unsupported command or is malformed.
pub fn parse_path(data: &str) -> Result<Vec<PathOp>, PathError> {
    PathParser::new(data).collect()
}

/// Tokenize path data into command, close and number tokens
fn tokenize_path(data: &str) -> Vec<PathToken<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, ch) in data.char_indices() {
        match ch {
            // Exponent marker inside a number
            'e' | 'E' if start.is_some() => {}
            'z' | 'Z' => {
                flush_number(data, &mut start, i, &mut tokens);
                tokens.push(PathToken::Close);
            }
            c if c.is_ascii_alphabetic() => {
                flush_number(data, &mut start, i, &mut tokens);
                tokens.push(PathToken::Command(c));
            }
            c if c == ',' || c.is_whitespace() => {
                flush_number(data, &mut start, i, &mut tokens);
            }
            // A sign starts a new number unless it belongs to an exponent
            '-' | '+' => {
                if start.is_some() && !matches!(prev, Some('e') | Some('E')) {
                    flush_number(data, &mut start, i, &mut tokens);
                }
                if start.is_none() {
                    start = Some(i);
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
        prev = Some(ch);
    }
    flush_number(data, &mut start, data.len(), &mut tokens);

    tokens
}

fn flush_number<'a>(
    data: &'a str,
    start: &mut Option<usize>,
    end: usize,
    tokens: &mut Vec<PathToken<'a>>,
) {
    if let Some(s) = start.take() {
        tokens.push(PathToken::Number(&data[s..end]));
    }
}

fn parse_number(text: &str) -> Result<f64, PathError> {
    let value =
        text.parse::<f64>().map_err(|e| PathError::InvalidNumber(text.to_string(), e.to_string()))?;
    if !value.is_finite() {
        return Err(PathError::InvalidNumber(text.to_string(), "not a finite number".to_string()));
    }
    Ok(value)
}
