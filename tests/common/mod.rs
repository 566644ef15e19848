#![allow(dead_code)]

use std::collections::HashMap;

use calcc::{Compilation, Diagnostic, Operation, Severity, Token, TokenKind, compile};

/// Compile and assert the run was not an empty program.
pub fn compile_ok(input: &str) -> Compilation {
    let out = compile(input);
    assert!(
        out.ok,
        "expected a program for:\n{input}\n--- diagnostics ---\n{:?}",
        out.diagnostics
    );
    out
}

/// The single `result = ...;` line that assigns the final value.
pub fn result_line(program: &str) -> &str {
    program
        .lines()
        .filter(|l| l.trim_start().starts_with("result = "))
        .last()
        .unwrap_or_else(|| panic!("no result assignment in:\n{program}"))
        .trim()
}

pub fn of_severity(diagnostics: &[Diagnostic], severity: Severity) -> Vec<&Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .collect()
}

/// Evaluate a token stream the way the generated C program would.
///
/// Each assignment group starts from `0`; an empty group re-publishes
/// the most recent variable assigned from a group with data.
pub fn interpret(tokens: &[Token]) -> i64 {
    let mut vars: HashMap<char, i64> = HashMap::new();
    let mut acc: Option<i64> = None;
    let mut last_with_data: Option<char> = None;

    for token in tokens {
        match token.kind {
            TokenKind::EndOfProgram => break,
            TokenKind::Variable(name) if token.operation == Operation::Assign => {
                let value = match acc.take() {
                    Some(v) => {
                        last_with_data = Some(name);
                        v
                    }
                    None => last_with_data.map_or(0, |n| vars.get(&n).copied().unwrap_or(0)),
                };
                vars.insert(name, value);
            }
            TokenKind::Variable(name) => {
                let operand = vars.get(&name).copied().unwrap_or(0);
                acc = Some(apply(token.operation, acc.unwrap_or(0), operand));
            }
            TokenKind::Literal(operand) => {
                acc = Some(apply(token.operation, acc.unwrap_or(0), operand));
            }
        }
    }

    vars.get(&'$').copied().unwrap_or(0)
}

fn apply(op: Operation, lhs: i64, rhs: i64) -> i64 {
    match op {
        Operation::Add => lhs.wrapping_add(rhs),
        Operation::Sub => lhs.wrapping_sub(rhs),
        Operation::Mul => lhs.wrapping_mul(rhs),
        Operation::Div => lhs.wrapping_div(rhs),
        Operation::Mod => lhs.wrapping_rem(rhs),
        Operation::ShiftLeft => lhs.wrapping_shl(u32::try_from(rhs).unwrap()),
        Operation::ShiftRight => lhs.wrapping_shr(u32::try_from(rhs).unwrap()),
        Operation::Assign | Operation::End => unreachable!("not an arithmetic operation"),
    }
}
