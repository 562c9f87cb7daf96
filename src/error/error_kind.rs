/// The error code held by an [`Engine`](crate::interpreter::engine::Engine).
///
/// Every [`EvalError`](crate::error::EvalError) maps to exactly one kind.
/// `Ok` is the code of an engine that has not failed, or whose last explicit
/// operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorKind {
    /// No error.
    #[default]
    Ok,
    /// The expression was empty.
    EmptyExpression,
    /// A name that is not an ASCII letter was used where a variable was
    /// required.
    InvalidVariableName,
    /// Two letters directly follow each other.
    VariableNameTooLong,
    /// Opening and closing braces do not pair up.
    UnmatchedBraces,
    /// The right-hand side of a division was exactly zero.
    DivideByZero,
    /// An operator symbol that is not `+`, `-`, `*` or `/`.
    UnknownOperator,
    /// A number, variable, `-` or `(` was expected.
    OperandExpected,
    /// Resolving the pending operators failed.
    EvaluationFailed,
    /// An operator or `)` was expected.
    OperatorExpected,
    /// An operator was left without operands.
    TooManyOperators,
    /// More than one operand remained, or none at all.
    TooManyOperands,
    /// A numeric literal could not be converted.
    MalformedLiteral,
    /// Storage for the evaluation stacks could not be reserved.
    OutOfMemory,
}

impl ErrorKind {
    /// Returns the fixed description shown to users for this code.
    ///
    /// # Example
    /// ```
    /// use expreval::error::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::Ok.description(), "No errors");
    /// assert_eq!(ErrorKind::DivideByZero.description(), "Syntax error: divide by 0");
    /// ```
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "No errors",
            Self::EmptyExpression => "Warning: empty expression",
            Self::InvalidVariableName => {
                "Syntax error: invalid variable name, valid variable names are a-z and A-Z"
            },
            Self::VariableNameTooLong => {
                "Syntax error: invalid variable name, only single character variable names are \
                 allowed"
            },
            Self::UnmatchedBraces => "Syntax error: unmatched braces",
            Self::DivideByZero => "Syntax error: divide by 0",
            Self::UnknownOperator => "Syntax error: unknown operator",
            Self::OperandExpected => "Syntax error: operand expected",
            Self::EvaluationFailed => "Syntax error: intermediate evaluation failed",
            Self::OperatorExpected => "Syntax error: operator expected",
            Self::TooManyOperators => "Syntax error: too many operators",
            Self::TooManyOperands => "Syntax error: too many operands",
            Self::MalformedLiteral => "Syntax error: malformed numeric literal",
            Self::OutOfMemory => "Fatal error: out of memory",
        }
    }

    /// Returns `true` for every code except [`ErrorKind::Ok`].
    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
