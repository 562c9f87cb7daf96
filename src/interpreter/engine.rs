use tracing::debug;

use crate::{
    error::{ErrorKind, EvalError, EvalResult},
    interpreter::variable::{ValueSource, Variable},
};

/// Outcome of collecting variable values for a round.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Every variable received a value.
    Complete,
    /// The value source cancelled; no variable was modified.
    Cancelled,
}

/// The expression engine.
///
/// An engine owns one loaded expression and the variables discovered in it.
/// A session runs as:
///
/// 1. [`Engine::load`] stores the expression and runs the scan pass, which
///    discovers variables and checks that braces pair up.
/// 2. [`Engine::collect_variables`] asks a [`ValueSource`] for the value of
///    every discovered variable.
/// 3. [`Engine::evaluate`] computes the result.
///
/// Steps 2 and 3 may be repeated any number of times with new values.
///
/// The engine also keeps the code of its most recent failure, readable
/// through [`Engine::last_error`].
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use expreval::interpreter::engine::{Collection, Engine};
///
/// let mut engine = Engine::new();
/// engine.load("(a + 10) * 50 / ((b - 6) * 9)").unwrap();
/// assert_eq!(engine.variable_count(), 2);
///
/// let mut values = HashMap::from([('a', 0.0), ('b', 8.0)]);
/// assert_eq!(engine.collect_variables(&mut values), Collection::Complete);
///
/// let result = engine.evaluate().unwrap();
/// assert!((result - 500.0 / 18.0).abs() < 1e-12);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    pub(crate) expression: String,
    pub(crate) variables:  Vec<Variable>,
    pub(crate) last_error: ErrorKind,
}

impl Engine {
    /// Creates an engine with no expression loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session with `expression`.
    ///
    /// Previously discovered variables are discarded, then the scan pass
    /// collects the variables of the new expression. A failed load keeps
    /// neither the text nor any variables, so a following
    /// [`Engine::evaluate`] reports an empty expression.
    ///
    /// # Errors
    /// - [`EvalError::EmptyExpression`] for an empty string.
    /// - [`EvalError::VariableNameTooLong`] for two adjacent letters.
    /// - [`EvalError::UnmatchedBraces`] when the brace depth does not return
    ///   to zero.
    pub fn load(&mut self, expression: &str) -> EvalResult<()> {
        expression.clone_into(&mut self.expression);
        self.variables.clear();

        let result = self.scan_variables();
        match &result {
            Ok(()) => debug!(expression, variables = self.variables.len(), "expression loaded"),
            Err(_) => {
                self.expression.clear();
                self.variables.clear();
            },
        }
        self.record(result)
    }

    /// Asks `source` for the value of every discovered variable, in discovery
    /// order.
    ///
    /// Each request passes the variable's current value as the default.
    /// Values are only stored once all of them have been supplied, so a
    /// cancelled collection leaves every variable as it was.
    pub fn collect_variables<S>(&mut self, source: &mut S) -> Collection
        where S: ValueSource + ?Sized
    {
        let mut values = Vec::with_capacity(self.variables.len());
        for variable in &self.variables {
            match source.resolve(variable.name(), variable.value()) {
                Some(value) => values.push(value),
                None => {
                    debug!(variable = %variable.name(), "value collection cancelled");
                    return Collection::Cancelled;
                },
            }
        }

        for (variable, value) in self.variables.iter_mut().zip(values) {
            variable.set_value(value);
        }
        debug!(count = self.variables.len(), "variable values collected");
        Collection::Complete
    }

    /// Evaluates the loaded expression with the current variable values.
    ///
    /// # Errors
    /// Returns the first failure of the evaluation pass. The engine's error
    /// state then holds the code of the deepest failure, so a division by
    /// zero reads as [`ErrorKind::DivideByZero`] even though the returned
    /// error wraps it in [`EvalError::EvaluationFailed`].
    pub fn evaluate(&mut self) -> EvalResult<f64> {
        let result = if self.expression.is_empty() {
            Err(EvalError::EmptyExpression)
        } else {
            self.evaluate_span(&self.expression, 0, false)
                .map(|evaluated| evaluated.value)
        };

        match &result {
            Ok(value) => debug!(value, "expression evaluated"),
            Err(err) => debug!(kind = ?err.root_kind(), "evaluation failed"),
        }
        self.record(result)
    }

    /// Runs one round: collects values from `source`, then evaluates.
    ///
    /// Returns `Ok(None)` when the collection was cancelled; nothing is
    /// evaluated in that case.
    pub fn run_round<S>(&mut self, source: &mut S) -> EvalResult<Option<f64>>
        where S: ValueSource + ?Sized
    {
        match self.collect_variables(source) {
            Collection::Complete => self.evaluate().map(Some),
            Collection::Cancelled => Ok(None),
        }
    }

    /// The loaded expression, empty before the first load.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The discovered variables, in discovery order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Looks up a discovered variable by name.
    #[must_use]
    pub fn variable(&self, name: char) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name() == name)
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The code of the most recent failure, or [`ErrorKind::Ok`] if the last
    /// load or evaluation succeeded.
    #[must_use]
    pub const fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    fn record<T>(&mut self, result: EvalResult<T>) -> EvalResult<T> {
        self.last_error = match &result {
            Ok(_) => ErrorKind::Ok,
            Err(err) => err.root_kind(),
        };
        result
    }
}
