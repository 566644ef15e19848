use crate::diagnostic::Diagnostics;
use crate::token::{Operation, Token};
use crate::validator::SourceLine;

/// A validated line that still could not be turned into a token.
///
/// Seeing one means the validator and the lexer disagree about the
/// grammar, or a literal does not fit in an `i64`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unknown operator '{0}'")]
    UnknownOperator(char),
    #[error("empty instruction")]
    Empty,
    #[error("unclassifiable operand '{0}'")]
    Operand(String),
    #[error("literal '{0}' does not fit in a 64-bit integer")]
    Overflow(String),
}

/// Turn validated lines into tokens, one per line.
///
/// A line that fails to scan is dropped and reported as an internal
/// consistency fault at its source line.
pub fn tokenize(lines: &[SourceLine], diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(lines.len());

    for line in lines {
        match scan_line(&line.text, line.number) {
            Ok(token) => tokens.push(token),
            Err(err) => {
                diagnostics.error(line.number, format!("internal consistency fault: {err}"));
            }
        }
    }

    tokens
}

/// Scan one pre-validated line into a token.
pub fn scan_line(line: &str, number: usize) -> Result<Token, ScanError> {
    let line = line.trim_start_matches(' ');
    let mut chars = line.chars();
    let op_char = chars.next().ok_or(ScanError::Empty)?;
    let operation = Operation::from_char(op_char).ok_or(ScanError::UnknownOperator(op_char))?;
    let operand = chars.as_str().trim_matches(' ');

    if operand.is_empty() {
        return if operation == Operation::Assign {
            Ok(Token::end(number))
        } else {
            Err(ScanError::Operand(String::new()))
        };
    }

    let mut operand_chars = operand.chars();
    if let (Some(name), None) = (operand_chars.next(), operand_chars.next()) {
        if name.is_ascii_lowercase() {
            return Ok(Token::variable(operation, name, number));
        }
    }

    if operation != Operation::Assign && operand.bytes().all(|b| b.is_ascii_digit()) {
        let value = operand
            .parse::<i64>()
            .map_err(|_| ScanError::Overflow(operand.to_string()))?;
        return Ok(Token::literal(operation, value, number));
    }

    Err(ScanError::Operand(operand.to_string()))
}
