use std::{collections::HashMap, num::ParseFloatError};

use crate::error::{EvalError, EvalResult};

/// A named slot holding the value of a single letter variable.
///
/// The name is fixed at creation. The value starts at `0.0` and is marked as
/// set once something assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name:   char,
    value:  f64,
    is_set: bool,
}

impl Variable {
    /// Creates an unset variable with value `0.0`.
    ///
    /// # Errors
    /// Returns [`EvalError::InvalidVariableName`] unless `name` is an ASCII
    /// letter.
    ///
    /// # Example
    /// ```
    /// use expreval::interpreter::variable::Variable;
    ///
    /// let a = Variable::new('a').unwrap();
    /// assert_eq!(a.value(), 0.0);
    /// assert!(!a.is_set());
    /// assert!(Variable::new('7').is_err());
    /// ```
    pub const fn new(name: char) -> EvalResult<Self> {
        if !name.is_ascii_alphabetic() {
            return Err(EvalError::InvalidVariableName { name });
        }
        Ok(Self { name,
                  value: 0.0,
                  is_set: false })
    }

    #[must_use]
    pub const fn name(&self) -> char {
        self.name
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.is_set
    }

    /// Assigns a value and marks the variable as set.
    pub const fn set_value(&mut self, value: f64) {
        self.value = value;
        self.is_set = true;
    }

    /// Parses `text` as a number and assigns it.
    ///
    /// Surrounding whitespace is ignored. On failure the variable is left
    /// untouched.
    ///
    /// # Errors
    /// Returns the parse error when `text` is not a floating-point number.
    pub fn parse_value(&mut self, text: &str) -> Result<(), ParseFloatError> {
        let value = text.trim().parse()?;
        self.set_value(value);
        Ok(())
    }

    /// Resets the value to `0.0` and marks the variable as unset.
    pub const fn clear(&mut self) {
        self.value = 0.0;
        self.is_set = false;
    }
}

/// Supplies variable values to an engine.
///
/// The engine asks once per variable and round, passing the variable's
/// current value as the default. Returning `None` cancels the round.
pub trait ValueSource {
    /// Returns the value for `name`, or `None` to cancel.
    fn resolve(&mut self, name: char, default: f64) -> Option<f64>;
}

impl<F> ValueSource for F where F: FnMut(char, f64) -> Option<f64>
{
    fn resolve(&mut self, name: char, default: f64) -> Option<f64> {
        self(name, default)
    }
}

/// Fixed assignments. Names without an entry keep their default, so a map
/// never cancels.
impl ValueSource for HashMap<char, f64> {
    fn resolve(&mut self, name: char, default: f64) -> Option<f64> {
        Some(self.get(&name).copied().unwrap_or(default))
    }
}
