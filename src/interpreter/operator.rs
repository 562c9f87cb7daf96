use crate::error::{EvalError, EvalResult};

/// The four binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOperator {
    /// Maps an operator symbol to its operator.
    ///
    /// # Errors
    /// Returns [`EvalError::UnknownOperator`] for any other symbol, pointing
    /// at `position`.
    ///
    /// # Example
    /// ```
    /// use expreval::{error::ErrorKind, interpreter::operator::BinaryOperator};
    ///
    /// assert_eq!(BinaryOperator::from_symbol('*', 0).unwrap(), BinaryOperator::Mul);
    /// let err = BinaryOperator::from_symbol('^', 3).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::UnknownOperator);
    /// ```
    pub const fn from_symbol(symbol: char, position: usize) -> EvalResult<Self> {
        match symbol {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Sub),
            '*' => Ok(Self::Mul),
            '/' => Ok(Self::Div),
            _ => Err(EvalError::UnknownOperator { symbol, position }),
        }
    }

    /// Returns the symbol of this operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// `true` for `+` and `-`.
    ///
    /// Pushing a low precedence operator first resolves everything already
    /// pending, which is what gives `*` and `/` their higher precedence.
    #[must_use]
    pub const fn is_low_precedence(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    /// Applies the operator to `lhs` and `rhs`.
    ///
    /// # Errors
    /// Returns [`EvalError::DivideByZero`] when dividing by exactly `0.0`.
    /// Only the right-hand operand is checked.
    ///
    /// # Example
    /// ```
    /// use expreval::interpreter::operator::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Sub.apply(8.0, 6.0, 0).unwrap(), 2.0);
    /// assert_eq!(BinaryOperator::Div.apply(0.0, 4.0, 0).unwrap(), 0.0);
    /// assert!(BinaryOperator::Div.apply(4.0, 0.0, 0).is_err());
    /// ```
    pub fn apply(self, lhs: f64, rhs: f64, position: usize) -> EvalResult<f64> {
        Ok(match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(EvalError::DivideByZero { position });
                }
                lhs / rhs
            },
        })
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
