use std::fmt;

use crate::token::{Operation, RESULT_NAME};

/// Identifier in the generated program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ident {
    /// The implicit result, rendered as `result`.
    Result,
    /// A user variable letter.
    Var(char),
}

impl Ident {
    /// Map a token variable name to an identifier.
    #[must_use]
    pub const fn from_name(name: char) -> Self {
        if name == RESULT_NAME {
            Self::Result
        } else {
            Self::Var(name)
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Result => f.write_str("result"),
            Self::Var(name) => write!(f, "{name}"),
        }
    }
}

/// Right-hand side expression, fully parenthesized when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Var(Ident),
    Binary {
        op: Operation,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
}

impl Expr {
    #[must_use]
    pub fn binary(op: Operation, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Var(ident) => write!(f, "{ident}"),
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs}{}{rhs})", op.symbol()),
        }
    }
}

/// One `target = value;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: Ident,
    pub value: Expr,
}

/// Generated program: declarations in first-seen order, then the
/// assignments in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Ident>,
    pub assignments: Vec<Assignment>,
}

impl Program {
    /// Expression finally stored in `result`, if any.
    #[must_use]
    pub fn result(&self) -> Option<&Expr> {
        self.assignments
            .iter()
            .rev()
            .find(|a| a.target == Ident::Result)
            .map(|a| &a.value)
    }
}
