use std::fmt;

use crate::token::{Operation, Token};

/// Right-hand side of an arithmetic instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Variable(char),
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Literal(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Literal(i64::from(value))
    }
}

impl From<char> for Operand {
    fn from(name: char) -> Self {
        Self::Variable(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Instruction(Operation, Operand),
    Assign(char),
    End,
    Blank,
}

/// Programmatic construction of a source script.
///
/// ```
/// use calcc::Script;
///
/// let script = Script::new().add(5).mul(2).assign('a').end();
/// assert_eq!(script.to_string(), "+ 5\n* 2\n= a\n=\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<Line>,
}

impl Script {
    /// Create an empty script.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append `<op> <operand>` for an arithmetic operation.
    #[must_use]
    pub fn instruction(mut self, operation: Operation, operand: impl Into<Operand>) -> Self {
        self.lines
            .push(Line::Instruction(operation, operand.into()));
        self
    }

    #[must_use]
    pub fn add(self, operand: impl Into<Operand>) -> Self {
        self.instruction(Operation::Add, operand)
    }

    #[must_use]
    pub fn sub(self, operand: impl Into<Operand>) -> Self {
        self.instruction(Operation::Sub, operand)
    }

    #[must_use]
    pub fn mul(self, operand: impl Into<Operand>) -> Self {
        self.instruction(Operation::Mul, operand)
    }

    #[must_use]
    pub fn div(self, operand: impl Into<Operand>) -> Self {
        self.instruction(Operation::Div, operand)
    }

    #[must_use]
    pub fn modulo(self, operand: impl Into<Operand>) -> Self {
        self.instruction(Operation::Mod, operand)
    }

    /// Append `= <name>`.
    #[must_use]
    pub fn assign(mut self, name: char) -> Self {
        self.lines.push(Line::Assign(name));
        self
    }

    /// Append the bare `=` end marker.
    #[must_use]
    pub fn end(mut self) -> Self {
        self.lines.push(Line::End);
        self
    }

    /// Append an empty line.
    #[must_use]
    pub fn blank(mut self) -> Self {
        self.lines.push(Line::Blank);
        self
    }

    /// Tokens for this script as the lexer would produce them, numbered
    /// from line 1.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let number = i + 1;
                match *line {
                    Line::Instruction(op, Operand::Literal(v)) => {
                        Some(Token::literal(op, v, number))
                    }
                    Line::Instruction(op, Operand::Variable(name)) => {
                        Some(Token::variable(op, name, number))
                    }
                    Line::Assign(name) => Some(Token::variable(Operation::Assign, name, number)),
                    Line::End => Some(Token::end(number)),
                    Line::Blank => None,
                }
            })
            .collect()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Instruction(op, Operand::Literal(v)) => writeln!(f, "{} {v}", op.symbol())?,
                Line::Instruction(op, Operand::Variable(name)) => {
                    writeln!(f, "{} {name}", op.symbol())?;
                }
                Line::Assign(name) => writeln!(f, "= {name}")?,
                Line::End => writeln!(f, "=")?,
                Line::Blank => writeln!(f)?,
            }
        }
        Ok(())
    }
}
