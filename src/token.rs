use std::fmt;

/// Name reserved for the implicit result variable.
pub const RESULT_NAME: char = '$';

/// Operation applied by a token to the current accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    ShiftLeft,
    ShiftRight,
    /// Publish the accumulated expression into a variable.
    Assign,
    /// End of program.
    End,
}

impl Operation {
    /// Map a source operator character to its operation.
    ///
    /// `=` maps to `Assign`; the lexer turns a bare `=` into `End`.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Mod),
            '=' => Some(Self::Assign),
            _ => None,
        }
    }

    /// Operator spelling in the generated C source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Assign | Self::End => "=",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::ShiftLeft => "shl",
            Self::ShiftRight => "shr",
            Self::Assign => "assign",
            Self::End => "end",
        };
        f.write_str(name)
    }
}

/// Token kinds, each carrying its own payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Single-letter variable; `$` is the implicit result.
    Variable(char),
    /// Non-negative decimal literal, or a shift amount after strength
    /// reduction.
    Literal(i64),
    /// End-of-program marker (a bare `=`).
    EndOfProgram,
}

/// A single instruction with the source line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub operation: Operation,
    pub line: usize,
}

impl Token {
    /// A literal operand, e.g. `+ 5`.
    #[must_use]
    pub const fn literal(operation: Operation, value: i64, line: usize) -> Self {
        Self {
            kind: TokenKind::Literal(value),
            operation,
            line,
        }
    }

    /// A variable operand (`+ a`) or assignment (`= a`).
    #[must_use]
    pub const fn variable(operation: Operation, name: char, line: usize) -> Self {
        Self {
            kind: TokenKind::Variable(name),
            operation,
            line,
        }
    }

    /// The end-of-program marker.
    #[must_use]
    pub const fn end(line: usize) -> Self {
        Self {
            kind: TokenKind::EndOfProgram,
            operation: Operation::End,
            line,
        }
    }

    /// Synthetic assignment of the accumulated expression to the result.
    #[must_use]
    pub const fn assign_result(line: usize) -> Self {
        Self::variable(Operation::Assign, RESULT_NAME, line)
    }

    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfProgram)
    }

    #[must_use]
    pub const fn is_assign(&self) -> bool {
        matches!(self.operation, Operation::Assign)
    }

    /// Literal value, if this token carries one.
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Check that kind and operation agree: `End` iff end-of-program,
    /// and `Assign` only on variables.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        match (self.kind, self.operation) {
            (TokenKind::EndOfProgram, Operation::End) => true,
            (TokenKind::EndOfProgram, _)
            | (_, Operation::End)
            | (TokenKind::Literal(_), Operation::Assign) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Variable(name) => {
                write!(f, "{}: variable {} {name}", self.line, self.operation)
            }
            TokenKind::Literal(value) => {
                write!(f, "{}: literal {} {value}", self.line, self.operation)
            }
            TokenKind::EndOfProgram => write!(f, "{}: end", self.line),
        }
    }
}
