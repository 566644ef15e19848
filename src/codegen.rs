//! Lowering of an optimized token stream into a [`Program`].
//!
//! Tokens are split into assignment groups: every `Assign` token closes
//! the current group, and the operations before it are folded left to
//! right onto a `0` seed, e.g. `+ 5`, `<< 1`, `= $` becomes
//! `result = ((0+5)<<1);`.
//!
//! A group with no operations re-publishes the value of the most recent
//! assignment that did carry data, or `0` when there is none.

use crate::ast::{Assignment, Expr, Ident, Program};
use crate::token::{Token, TokenKind};

/// Declared variables in first-seen order, with whether each has been
/// assigned from a group that carried data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    entries: Vec<(Ident, bool)>,
    last_with_data: Option<Ident>,
}

impl VariableTable {
    /// Record a variable if it has not been seen yet.
    pub fn declare(&mut self, ident: Ident) {
        if !self.entries.iter().any(|(seen, _)| *seen == ident) {
            self.entries.push((ident, false));
        }
    }

    /// Record an assignment to `ident`.
    pub fn assign(&mut self, ident: Ident, has_data: bool) {
        self.declare(ident);
        if has_data {
            for entry in &mut self.entries {
                if entry.0 == ident {
                    entry.1 = true;
                }
            }
            self.last_with_data = Some(ident);
        }
    }

    #[must_use]
    pub fn has_data(&self, ident: Ident) -> bool {
        self.entries
            .iter()
            .any(|(seen, data)| *seen == ident && *data)
    }

    /// Most recently assigned variable whose group carried data.
    #[must_use]
    pub const fn last_with_data(&self) -> Option<Ident> {
        self.last_with_data
    }

    #[must_use]
    pub fn declarations(&self) -> Vec<Ident> {
        self.entries.iter().map(|(ident, _)| *ident).collect()
    }
}

/// Build the program for an analyzed (and usually optimized) stream.
///
/// Lowering stops at the first end-of-program token; operations after
/// the last assignment are not emitted.
#[must_use]
pub fn lower(tokens: &[Token]) -> Program {
    let mut table = VariableTable::default();
    let mut assignments = Vec::new();
    let mut body: Vec<Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::EndOfProgram => break,
            TokenKind::Variable(name) if token.is_assign() => {
                let target = Ident::from_name(name);
                let value = match fold(&body) {
                    Some(expr) => {
                        table.assign(target, true);
                        expr
                    }
                    None => {
                        let value = table
                            .last_with_data()
                            .map_or(Expr::Number(0), Expr::Var);
                        table.assign(target, false);
                        value
                    }
                };
                assignments.push(Assignment { target, value });
                body.clear();
            }
            TokenKind::Variable(name) => {
                table.declare(Ident::from_name(name));
                body.push(*token);
            }
            TokenKind::Literal(_) => body.push(*token),
        }
    }

    table.declare(Ident::Result);

    Program {
        declarations: table.declarations(),
        assignments,
    }
}

/// Fold a group body into `(((0 op v0) op v1) ...)`.
fn fold(body: &[Token]) -> Option<Expr> {
    if body.is_empty() {
        return None;
    }

    let expr = body.iter().fold(Expr::Number(0), |acc, token| {
        let operand = match token.kind {
            TokenKind::Literal(value) => Expr::Number(value),
            TokenKind::Variable(name) => Expr::Var(Ident::from_name(name)),
            TokenKind::EndOfProgram => return acc,
        };
        Expr::binary(token.operation, acc, operand)
    });
    Some(expr)
}
