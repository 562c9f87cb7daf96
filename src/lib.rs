//! # expreval
//!
//! expreval evaluates arithmetic expressions made of numbers, single letter
//! variables, the operators `+ - * /`, unary minus and braces, respecting the
//! usual operator precedence.
//!
//! An expression is processed in two passes. The scan pass discovers which
//! variables the expression uses and checks that braces pair up. Once every
//! variable has a value, the evaluation pass computes the result, as often
//! as needed with new values.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::EvalResult,
    interpreter::{engine::Engine, variable::ValueSource},
};

/// Provides unified error types for loading and evaluation.
///
/// This module defines every failure of the scan and evaluation passes,
/// together with the error codes an engine stores and their descriptions.
///
/// # Responsibilities
/// - Defines the error enum for all failure modes, with source positions.
/// - Maps each failure to a stable code and a human-readable description.
pub mod error;
/// The expression engine.
///
/// This module ties together tokenizing, variable discovery, value
/// collection and evaluation into the engine that callers drive.
///
/// # Responsibilities
/// - Discovers variables and checks brace balance.
/// - Collects variable values through a caller supplied capability.
/// - Evaluates expressions with precedence, braces and unary minus.
pub mod interpreter;
/// The interactive console around the engine.
///
/// Reads expressions and values from the user under a character policy and
/// presents results and errors.
pub mod shell;
/// General helpers, currently number formatting.
pub mod util;

/// Loads `expression`, collects its variables from `source` and evaluates it.
///
/// Returns `Ok(None)` if `source` cancelled.
///
/// # Errors
/// Returns the load or evaluation failure.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use expreval::evaluate_with;
///
/// let mut values = HashMap::from([('x', 3.0)]);
/// assert_eq!(evaluate_with("2 + x * 4", &mut values).unwrap(), Some(14.0));
///
/// // A closure works as a value source too; returning `None` cancels.
/// let mut cancel = |_name: char, _default: f64| -> Option<f64> { None };
/// assert_eq!(evaluate_with("x + 1", &mut cancel).unwrap(), None);
///
/// assert!(evaluate_with("5 / 0", &mut values).is_err());
/// ```
pub fn evaluate_with<S>(expression: &str, source: &mut S) -> EvalResult<Option<f64>>
    where S: ValueSource + ?Sized
{
    let mut engine = Engine::new();
    engine.load(expression)?;
    engine.run_round(source)
}
