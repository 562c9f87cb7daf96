use thiserror::Error;

use crate::error::ErrorKind;

/// Result type used by the scan and evaluation passes.
pub type EvalResult<T> = Result<T, EvalError>;

/// Represents all errors that can occur while loading or evaluating an
/// expression.
///
/// Positions are byte offsets into the whole loaded expression, including
/// for failures raised inside nested braces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression has no characters at all.
    #[error("Empty expression.")]
    EmptyExpression,
    /// A variable was requested for a name that is not an ASCII letter.
    #[error("Invalid variable name '{name}'. Valid variable names are a-z and A-Z.")]
    InvalidVariableName {
        /// The rejected name.
        name: char,
    },
    /// A second letter directly follows a variable.
    #[error("Variable name too long at position {position}. Only single letters are allowed.")]
    VariableNameTooLong {
        /// Position of the second letter.
        position: usize,
    },
    /// Braces do not pair up.
    #[error("Unmatched braces at position {position}.")]
    UnmatchedBraces {
        /// Position of the stray `)`, or the end of the text when a `(` is
        /// never closed.
        position: usize,
    },
    /// A number, variable, `-` or `(` was expected.
    #[error("Operand expected at position {position}.")]
    OperandExpected {
        /// Position of the unexpected character.
        position: usize,
    },
    /// An operator or `)` was expected.
    #[error("Operator expected at position {position}.")]
    OperatorExpected {
        /// Position of the unexpected character.
        position: usize,
    },
    /// A run of digits and decimal points that is not a number.
    #[error("Malformed numeric literal '{literal}' at position {position}.")]
    MalformedLiteral {
        /// The literal as written.
        literal:  String,
        /// Position of its first character.
        position: usize,
    },
    /// The right-hand operand of a division is exactly zero.
    #[error("Divide by 0 at position {position}.")]
    DivideByZero {
        /// Position of the `/` operator.
        position: usize,
    },
    /// An operator symbol that is not one of `+ - * /`.
    #[error("Unknown operator '{symbol}' at position {position}.")]
    UnknownOperator {
        /// The rejected symbol.
        symbol:   char,
        /// Position of the symbol.
        position: usize,
    },
    /// Resolving the pending operators of a (sub-)expression failed.
    #[error("Intermediate evaluation failed: {source}")]
    EvaluationFailed {
        /// The failure raised while resolving.
        #[source]
        source: Box<Self>,
    },
    /// An operator was left over without operands.
    #[error("Too many operators at position {position}.")]
    TooManyOperators {
        /// Position where the (sub-)expression ended.
        position: usize,
    },
    /// The (sub-)expression did not reduce to exactly one operand.
    #[error("Too many operands at position {position}.")]
    TooManyOperands {
        /// Position where the (sub-)expression ended.
        position: usize,
    },
    /// Stack storage could not be reserved.
    #[error("Out of memory.")]
    OutOfMemory,
}

impl EvalError {
    /// Returns the code of this error itself.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyExpression => ErrorKind::EmptyExpression,
            Self::InvalidVariableName { .. } => ErrorKind::InvalidVariableName,
            Self::VariableNameTooLong { .. } => ErrorKind::VariableNameTooLong,
            Self::UnmatchedBraces { .. } => ErrorKind::UnmatchedBraces,
            Self::OperandExpected { .. } => ErrorKind::OperandExpected,
            Self::OperatorExpected { .. } => ErrorKind::OperatorExpected,
            Self::MalformedLiteral { .. } => ErrorKind::MalformedLiteral,
            Self::DivideByZero { .. } => ErrorKind::DivideByZero,
            Self::UnknownOperator { .. } => ErrorKind::UnknownOperator,
            Self::EvaluationFailed { .. } => ErrorKind::EvaluationFailed,
            Self::TooManyOperators { .. } => ErrorKind::TooManyOperators,
            Self::TooManyOperands { .. } => ErrorKind::TooManyOperands,
            Self::OutOfMemory => ErrorKind::OutOfMemory,
        }
    }

    /// Returns the code of the deepest failure.
    ///
    /// For [`EvalError::EvaluationFailed`] this is the code of the wrapped
    /// error; for every other variant it equals [`EvalError::kind`].
    ///
    /// # Example
    /// ```
    /// use expreval::error::{ErrorKind, EvalError};
    ///
    /// let err = EvalError::EvaluationFailed { source: Box::new(EvalError::DivideByZero {
    ///     position: 1,
    /// }) };
    /// assert_eq!(err.kind(), ErrorKind::EvaluationFailed);
    /// assert_eq!(err.root_kind(), ErrorKind::DivideByZero);
    /// ```
    #[must_use]
    pub fn root_kind(&self) -> ErrorKind {
        match self {
            Self::EvaluationFailed { source } => source.root_kind(),
            other => other.kind(),
        }
    }

    /// Returns the byte position the error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::VariableNameTooLong { position }
            | Self::UnmatchedBraces { position }
            | Self::OperandExpected { position }
            | Self::OperatorExpected { position }
            | Self::MalformedLiteral { position, .. }
            | Self::DivideByZero { position }
            | Self::UnknownOperator { position, .. }
            | Self::TooManyOperators { position }
            | Self::TooManyOperands { position } => Some(*position),
            Self::EvaluationFailed { source } => source.position(),
            Self::EmptyExpression | Self::InvalidVariableName { .. } | Self::OutOfMemory => None,
        }
    }

    /// Wraps failures of the arithmetic itself in
    /// [`EvalError::EvaluationFailed`].
    ///
    /// Stack invariant violations are structural and pass through unchanged.
    #[must_use]
    pub fn during_resolution(self) -> Self {
        match self {
            Self::DivideByZero { .. } | Self::UnknownOperator { .. } => {
                Self::EvaluationFailed { source: Box::new(self) }
            },
            other => other,
        }
    }
}
