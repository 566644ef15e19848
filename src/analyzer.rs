//! Semantic pass over the token stream.
//!
//! Flags division and modulo by a zero literal, makes sure the program
//! ends in exactly one end-of-program token, and inserts the implicit
//! assignment of the accumulated expression to the result.

use crate::diagnostic::Diagnostics;
use crate::token::{Operation, Token, TokenKind};

/// Analyze a full token sequence and return the corrected one.
///
/// The output always ends in `[.., assign $, end]`.
#[must_use]
pub fn analyze(tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Token> {
    scan_hazards(tokens, diagnostics);

    let mut analyzed = match tokens.iter().position(Token::is_end) {
        Some(end) => {
            if let Some(next) = tokens.get(end + 1) {
                diagnostics.warning(next.line, "unreachable code after end marker");
            }
            tokens[..=end].to_vec()
        }
        None => {
            let line = tokens.last().map_or(1, |last| last.line + 1);
            diagnostics.error(
                line,
                format!("missing end marker, auto-inserted at line {line}"),
            );
            let mut tokens = tokens.to_vec();
            tokens.push(Token::end(line));
            tokens
        }
    };

    // The end marker becomes `assign $` followed by a fresh end marker.
    let end_line = analyzed.last().map_or(1, |end| end.line);
    analyzed.pop();
    analyzed.push(Token::assign_result(end_line));
    analyzed.push(Token::end(end_line));
    analyzed
}

fn scan_hazards(tokens: &[Token], diagnostics: &mut Diagnostics) {
    for token in tokens {
        if token.kind != TokenKind::Literal(0) {
            continue;
        }
        match token.operation {
            Operation::Div => diagnostics.warning(token.line, "division by zero"),
            Operation::Mod => diagnostics.warning(token.line, "modulo by zero"),
            _ => {}
        }
    }
}
