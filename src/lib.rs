//! Compiler for a line-oriented accumulator language.
//!
//! Each source line applies one operation to a running value or stores
//! it into a single-letter variable; a bare `=` ends the program. The
//! compiler validates, tokenizes, analyzes and optimizes the script and
//! emits an equivalent C program that prints the result.
//!
//! # Quick start
//!
//! ```
//! let out = calcc::compile("+ 5\n* 2\n=\n");
//! assert!(out.ok);
//! assert!(out.diagnostics.is_empty());
//! assert!(out.program.contains("result = ((0+5)<<1);"));
//! ```
//!
//! ## Stage by stage
//!
//! ```
//! use calcc::{Diagnostics, analyze, format, lower, optimize, tokenize, validate};
//!
//! let mut diagnostics = Diagnostics::new();
//! let validated = validate("+ 5\n", &mut diagnostics);
//! let tokens = tokenize(&validated.lines, &mut diagnostics);
//! let tokens = optimize(&analyze(&tokens, &mut diagnostics));
//! let program = lower(&tokens);
//!
//! assert_eq!(diagnostics.len(), 1); // missing end marker
//! assert!(format(&program).contains("result = (0+5);"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod analyzer;
pub mod ast;
pub mod builder;
pub mod codegen;
pub mod diagnostic;
pub mod formatter;
pub mod lexer;
pub mod optimizer;
pub mod token;
pub mod validator;

pub use analyzer::analyze;
pub use ast::{Assignment, Expr, Ident, Program};
pub use builder::{Operand, Script};
pub use codegen::{VariableTable, lower};
pub use diagnostic::{Diagnostic, Diagnostics, Severity, render};
pub use formatter::format;
pub use lexer::{ScanError, scan_line, tokenize};
pub use optimizer::{optimize, shift_exponent};
pub use token::{Operation, Token, TokenKind};
pub use validator::{LineError, LineErrorKind, SourceLine, Validated, validate};

/// Error type for the strict [`compile_str`] entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input holds no instruction lines at all.
    #[error("empty program: no instructions found")]
    EmptyProgram,
    /// Compilation produced error diagnostics.
    #[error("compilation failed with {} error(s)", .0.len())]
    Rejected(Vec<Diagnostic>),
}

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Run the peephole optimizer before code generation.
    pub optimize: bool,
}

impl Options {
    #[must_use]
    pub const fn new() -> Self {
        Self { optimize: true }
    }

    #[must_use]
    pub const fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Generated C source; empty when `ok` is false.
    pub program: String,
    /// Findings in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
    /// Final token stream fed to code generation.
    pub tokens: Vec<Token>,
    /// False only when the input holds no instruction lines.
    pub ok: bool,
}

/// Compile `input` with default options.
#[must_use]
pub fn compile(input: &str) -> Compilation {
    compile_with(input, Options::default())
}

/// Compile `input`, always returning the generated program together
/// with every diagnostic; only an empty program short-circuits.
#[must_use]
pub fn compile_with(input: &str, options: Options) -> Compilation {
    let mut diagnostics = Diagnostics::new();

    let validated = validate(input, &mut diagnostics);
    if validated.is_empty_program() {
        return Compilation {
            program: String::new(),
            diagnostics: diagnostics.into_vec(),
            tokens: Vec::new(),
            ok: false,
        };
    }

    let tokens = tokenize(&validated.lines, &mut diagnostics);
    let tokens = analyze(&tokens, &mut diagnostics);
    let tokens = if options.optimize {
        optimize(&tokens)
    } else {
        tokens
    };
    let program = format(&lower(&tokens));

    Compilation {
        program,
        diagnostics: diagnostics.into_vec(),
        tokens,
        ok: true,
    }
}

/// Compile `input`, failing on an empty program or any error
/// diagnostic. Warnings are dropped.
pub fn compile_str(input: &str) -> Result<String, Error> {
    let out = compile(input);
    if !out.ok {
        return Err(Error::EmptyProgram);
    }

    let errors: Vec<Diagnostic> = out
        .diagnostics
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    if errors.is_empty() {
        Ok(out.program)
    } else {
        Err(Error::Rejected(errors))
    }
}
