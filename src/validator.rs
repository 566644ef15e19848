use std::fmt;

use crate::diagnostic::Diagnostics;

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    /// First character is not `+ - * / % =`.
    UnknownOperator(char),
    /// Operator and operand are not separated by a space (`+5`).
    MissingSeparator,
    /// Arithmetic operator with nothing after it.
    MissingOperand,
    /// Operand is neither a digit run nor one lowercase letter.
    InvalidOperand(String),
    /// `=` followed by something other than a single variable letter.
    InvalidAssignTarget(String),
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperator(ch) => write!(f, "unknown operator '{ch}'"),
            Self::MissingSeparator => {
                write!(f, "expected a space between operator and operand")
            }
            Self::MissingOperand => write!(f, "missing operand"),
            Self::InvalidOperand(operand) => {
                write!(
                    f,
                    "invalid operand '{operand}', \
                     expected a number or a lowercase letter"
                )
            }
            Self::InvalidAssignTarget(target) => {
                write!(f, "cannot assign to '{target}'")
            }
        }
    }
}

/// A rejected source line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised instruction `{text}`: {kind}")]
pub struct LineError {
    pub kind: LineErrorKind,
    pub line: usize,
    pub text: String,
}

/// An accepted line with its original 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Outcome of validating a whole buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    /// Lines that satisfy the grammar, in source order.
    pub lines: Vec<SourceLine>,
    /// Number of non-blank lines that were rejected.
    pub rejected: usize,
}

impl Validated {
    /// True when the buffer held nothing but blank lines.
    #[must_use]
    pub const fn is_empty_program(&self) -> bool {
        self.lines.is_empty() && self.rejected == 0
    }
}

/// Split `input` into lines and keep the ones that match the grammar.
///
/// Blank lines are skipped silently. Every other rejected line gets one
/// error diagnostic quoting its text; validation never stops early.
pub fn validate(input: &str, diagnostics: &mut Diagnostics) -> Validated {
    let mut validated = Validated::default();

    for (index, raw) in input.lines().enumerate() {
        let number = index + 1;
        let text = normalize(raw);
        if text.is_empty() {
            continue;
        }

        match check_line(&text) {
            Ok(()) => validated.lines.push(SourceLine { number, text }),
            Err(kind) => {
                let err = LineError {
                    kind,
                    line: number,
                    text: raw.trim().to_string(),
                };
                diagnostics.error(err.line, err.to_string());
                validated.rejected += 1;
            }
        }
    }

    validated
}

/// Tabs become spaces, surrounding whitespace is dropped.
fn normalize(raw: &str) -> String {
    raw.replace('\t', " ").trim_matches([' ', '\r']).to_string()
}

/// Match one normalized, non-empty line against the grammar:
///
/// ```text
/// line := op ' '+ operand | '=' ' '+ letter | '='
/// ```
pub fn check_line(line: &str) -> Result<(), LineErrorKind> {
    let mut chars = line.chars();
    let Some(op) = chars.next() else {
        return Err(LineErrorKind::MissingOperand);
    };
    let rest = chars.as_str();

    if !matches!(op, '+' | '-' | '*' | '/' | '%' | '=') {
        return Err(LineErrorKind::UnknownOperator(op));
    }

    if rest.is_empty() {
        return if op == '=' {
            Ok(())
        } else {
            Err(LineErrorKind::MissingOperand)
        };
    }

    if !rest.starts_with(' ') {
        return Err(LineErrorKind::MissingSeparator);
    }

    let operand = rest.trim_start_matches(' ');
    if operand.is_empty() {
        return if op == '=' {
            Ok(())
        } else {
            Err(LineErrorKind::MissingOperand)
        };
    }

    if is_letter(operand) {
        return Ok(());
    }
    if op == '=' {
        return Err(LineErrorKind::InvalidAssignTarget(operand.to_string()));
    }
    if operand.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }

    Err(LineErrorKind::InvalidOperand(operand.to_string()))
}

fn is_letter(operand: &str) -> bool {
    let mut chars = operand.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(ch), None) if ch.is_ascii_lowercase()
    )
}
