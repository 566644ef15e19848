//! Peephole rewrites over an analyzed token stream.
//!
//! Three passes run in a fixed order: dead prefix elimination before a
//! multiply by zero, removal of identity operations, then strength
//! reduction of power-of-two multiplies and divides into shifts.

use crate::token::{Operation, Token, TokenKind};

/// Largest power of two rewritten into a shift.
pub const MAX_SHIFT_OPERAND: i64 = 1024;

/// Run all passes and return the rewritten sequence.
#[must_use]
pub fn optimize(tokens: &[Token]) -> Vec<Token> {
    let tokens = eliminate_dead_prefix(tokens);
    let tokens = eliminate_identities(&tokens);
    reduce_strength(&tokens)
}

/// Exponent `k` when `value == 2^k` and `1 <= value <= 1024`.
#[must_use]
pub fn shift_exponent(value: i64) -> Option<u32> {
    let v = u64::try_from(value).ok()?;
    (v.is_power_of_two() && value <= MAX_SHIFT_OPERAND).then(|| v.trailing_zeros())
}

/// Drop everything up to and including the last `* 0`.
///
/// The cut is skipped when a variable assigned inside the dropped
/// prefix is read as an operand afterwards.
#[must_use]
pub fn eliminate_dead_prefix(tokens: &[Token]) -> Vec<Token> {
    let Some(cut) = tokens
        .iter()
        .rposition(|t| t.operation == Operation::Mul && t.kind == TokenKind::Literal(0))
    else {
        return tokens.to_vec();
    };

    let (prefix, rest) = tokens.split_at(cut + 1);
    let clobbers_live_variable = prefix.iter().any(|assigned| {
        let TokenKind::Variable(name) = assigned.kind else {
            return false;
        };
        assigned.is_assign()
            && rest
                .iter()
                .any(|read| !read.is_assign() && read.kind == TokenKind::Variable(name))
    });

    if clobbers_live_variable {
        tokens.to_vec()
    } else {
        rest.to_vec()
    }
}

/// Remove `+ 0`, `- 0`, `* 1` and `/ 1`.
///
/// A group whose body consists only of identities keeps its first one,
/// so it still counts as carrying data.
#[must_use]
pub fn eliminate_identities(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut group_start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_assign() && !token.is_end() {
            continue;
        }
        let body = &tokens[group_start..i];
        let kept: Vec<Token> = body.iter().copied().filter(|t| !is_identity(t)).collect();
        if kept.is_empty() {
            out.extend(body.first().copied());
        } else {
            out.extend(kept);
        }
        out.push(*token);
        group_start = i + 1;
    }
    out.extend_from_slice(&tokens[group_start..]);

    out
}

fn is_identity(token: &Token) -> bool {
    matches!(
        (token.operation, token.kind),
        (Operation::Add | Operation::Sub, TokenKind::Literal(0))
            | (Operation::Mul | Operation::Div, TokenKind::Literal(1))
    )
}

/// Rewrite `* 2^k` to `<< k` and `/ 2^k` to `>> k` for `2^k <= 1024`.
#[must_use]
pub fn reduce_strength(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| {
            let shift = match token.operation {
                Operation::Mul => Operation::ShiftLeft,
                Operation::Div => Operation::ShiftRight,
                _ => return *token,
            };
            match token.value().and_then(shift_exponent) {
                Some(exponent) => Token::literal(shift, i64::from(exponent), token.line),
                None => *token,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(operation: Operation, value: i64) -> Token {
        Token::literal(operation, value, 1)
    }

    fn tail() -> [Token; 2] {
        [Token::assign_result(1), Token::end(1)]
    }

    #[test]
    fn exponents_for_boundary_set() {
        for k in 0..=10 {
            assert_eq!(shift_exponent(1 << k), Some(k));
        }
        for v in [0, -2, 3, 6, 1000, 2048, 4096] {
            assert_eq!(shift_exponent(v), None, "{v}");
        }
    }

    #[test]
    fn dead_prefix_before_multiply_by_zero() {
        let input = [
            lit(Operation::Add, 1),
            lit(Operation::Mul, 0),
            lit(Operation::Add, 5),
            Token::assign_result(1),
            Token::end(1),
        ];
        let out = optimize(&input);
        assert_eq!(out, vec![lit(Operation::Add, 5), tail()[0], tail()[1]]);
    }

    #[test]
    fn dead_prefix_uses_last_multiply_by_zero() {
        let input = [
            lit(Operation::Mul, 0),
            lit(Operation::Add, 3),
            lit(Operation::Mul, 0),
            lit(Operation::Add, 7),
            Token::assign_result(1),
            Token::end(1),
        ];
        let out = eliminate_dead_prefix(&input);
        assert_eq!(out[0], lit(Operation::Add, 7));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn dead_prefix_kept_when_variable_is_read_later() {
        let input = [
            lit(Operation::Add, 1),
            Token::variable(Operation::Assign, 'a', 1),
            lit(Operation::Mul, 0),
            Token::variable(Operation::Add, 'a', 1),
            Token::assign_result(1),
            Token::end(1),
        ];
        assert_eq!(eliminate_dead_prefix(&input), input.to_vec());
    }

    #[test]
    fn identities_removed() {
        let input = [
            lit(Operation::Add, 4),
            lit(Operation::Add, 0),
            lit(Operation::Sub, 0),
            lit(Operation::Mul, 1),
            lit(Operation::Div, 1),
            lit(Operation::Mod, 1),
            Token::assign_result(1),
            Token::end(1),
        ];
        let out = eliminate_identities(&input);
        assert_eq!(
            out,
            vec![
                lit(Operation::Add, 4),
                lit(Operation::Mod, 1),
                tail()[0],
                tail()[1]
            ]
        );
    }

    #[test]
    fn all_identity_group_keeps_one_token() {
        let input = [
            lit(Operation::Add, 0),
            lit(Operation::Mul, 1),
            Token::assign_result(1),
            Token::end(1),
        ];
        let out = eliminate_identities(&input);
        assert_eq!(out, vec![lit(Operation::Add, 0), tail()[0], tail()[1]]);
    }

    #[test]
    fn strength_reduction() {
        let input = [
            lit(Operation::Mul, 8),
            lit(Operation::Div, 1024),
            lit(Operation::Mul, 6),
            lit(Operation::Div, 2048),
            lit(Operation::Mod, 4),
        ];
        let out = reduce_strength(&input);
        assert_eq!(
            out,
            vec![
                lit(Operation::ShiftLeft, 3),
                lit(Operation::ShiftRight, 10),
                lit(Operation::Mul, 6),
                lit(Operation::Div, 2048),
                lit(Operation::Mod, 4),
            ]
        );
    }

    #[test]
    fn variable_operands_untouched() {
        let input = [
            Token::variable(Operation::Mul, 'x', 1),
            Token::assign_result(1),
            Token::end(1),
        ];
        assert_eq!(optimize(&input), input.to_vec());
    }

    #[test]
    fn idempotent() {
        let input = [
            lit(Operation::Add, 3),
            lit(Operation::Mul, 0),
            lit(Operation::Add, 0),
            lit(Operation::Add, 9),
            lit(Operation::Mul, 4),
            lit(Operation::Div, 1),
            Token::assign_result(1),
            Token::end(1),
        ];
        let once = optimize(&input);
        assert_eq!(optimize(&once), once);
    }
}
