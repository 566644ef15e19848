//! End-to-end compilation scenarios: source text in, C program and
//! diagnostics out.

mod common;

use calcc::{Error, Severity, compile, compile_str, render};
use common::{compile_ok, interpret, of_severity, result_line};

#[test]
fn multiply_by_two_becomes_shift() {
    let out = compile_ok("+ 5\n* 2\n=\n");
    assert!(out.diagnostics.is_empty());
    assert_eq!(result_line(&out.program), "result = ((0+5)<<1);");
    assert_eq!(interpret(&out.tokens), 10);
}

#[test]
fn multiply_by_zero_drops_prefix() {
    let out = compile_ok("* 0\n+ 7\n=\n");
    assert!(out.diagnostics.is_empty());
    assert_eq!(result_line(&out.program), "result = (0+7);");
    assert_eq!(interpret(&out.tokens), 7);
}

#[test]
fn missing_end_marker_is_inserted() {
    let out = compile_ok("+ 5\n");
    let errors = of_severity(&out.diagnostics, Severity::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 2);
    assert!(errors[0].message.contains("missing end marker"));
    assert_eq!(result_line(&out.program), "result = (0+5);");
    assert_eq!(interpret(&out.tokens), 5);
}

#[test]
fn division_by_zero_is_kept_verbatim() {
    let out = compile_ok("/ 0\n=\n");
    assert_eq!(out.diagnostics.len(), 1);
    let warning = &out.diagnostics[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.line, 1);
    assert_eq!(warning.message, "division by zero");
    assert!(out.program.contains("\tresult = (0/0);\n"));
}

#[test]
fn blank_input_is_not_a_program() {
    for input in ["", "\n\n", "  \t \n \n"] {
        let out = compile(input);
        assert!(!out.ok);
        assert!(out.program.is_empty());
        assert!(out.diagnostics.is_empty());
    }
}

#[test]
fn only_rejected_lines_still_compile() {
    let out = compile_ok("hello\nworld\n");
    let errors = of_severity(&out.diagnostics, Severity::Error);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[2].line, 1);
    assert!(errors[2].message.contains("missing end marker"));
    assert_eq!(result_line(&out.program), "result = 0;");
}

#[test]
fn full_program_text() {
    let out = compile_ok("+ 3\n= a\n- a\n* 3\n=\n");
    let expected = "\
#include <stdio.h>

int main(void)
{
\tlong a = 0, result = 0;

\ta = (0+3);
\tresult = ((0-a)*3);

\tprintf(\"Result = %ld\\n\", result);
\treturn 0;
}
";
    assert_eq!(out.program, expected);
}

#[test]
fn reassigning_variable_without_data() {
    let out = compile_ok("+ 4\n= a\n= b\n=\n");
    assert!(out.program.contains("\ta = (0+4);\n\tb = a;\n\tresult = a;\n"));
    assert_eq!(interpret(&out.tokens), 4);
}

#[test]
fn diagnostics_in_discovery_order() {
    let input = "+ 1\noops\n% 0\n=\n+ 2\n";
    let out = compile_ok(input);
    let rendered = render(&out.diagnostics);
    assert_eq!(
        rendered,
        "2: error: unrecognised instruction `oops`: unknown operator 'o'\n\
         3: warning: modulo by zero\n\
         5: warning: unreachable code after end marker\n"
    );
}

#[test]
fn blank_lines_do_not_shift_line_numbers() {
    let out = compile_ok("\n\n+ 1\n\n/ 0\n");
    let lines: Vec<_> = out.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![5, 6]);
}

#[test]
fn strict_entry_point() {
    assert!(compile_str("+ 1\n=\n").is_ok());
    assert_eq!(compile_str("\n"), Err(Error::EmptyProgram));

    let err = compile_str("+ 1\n").unwrap_err();
    assert!(matches!(&err, Error::Rejected(errors) if errors.len() == 1));
    assert_eq!(err.to_string(), "compilation failed with 1 error(s)");
}

#[test]
fn warnings_do_not_fail_strict_compile() {
    let program = compile_str("+ 9\n/ 0\n=\n").expect("warnings only");
    assert!(program.contains("result = ((0+9)/0);"));
}
