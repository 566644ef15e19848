//! Serializes a [`Program`] as a C translation unit.

use std::fmt::Write as _;

use crate::ast::{Ident, Program};

/// Format a `Program` as C source text.
///
/// Every variable is declared as a zero-initialised `long` on one line,
/// followed by the assignments and a `printf` of `result`.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();

    out.push_str("#include <stdio.h>\n\n");
    out.push_str("int main(void)\n{\n");

    format_declarations(&mut out, &program.declarations);
    out.push('\n');

    for assignment in &program.assignments {
        let _ = writeln!(out, "\t{} = {};", assignment.target, assignment.value);
    }
    if !program.assignments.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "\tprintf(\"Result = %ld\\n\", {});", Ident::Result);
    out.push_str("\treturn 0;\n");
    out.push_str("}\n");

    out
}

fn format_declarations(out: &mut String, declarations: &[Ident]) {
    out.push_str("\tlong ");
    for (i, ident) in declarations.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{ident} = 0");
    }
    out.push_str(";\n");
}
