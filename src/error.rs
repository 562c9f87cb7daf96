/// Typed evaluation failures.
///
/// Defines every failure that can be raised while loading, scanning or
/// evaluating an expression. Each variant carries the byte position of the
/// offending character when one exists, so callers can point at it.
pub mod eval_error;
/// The stored error code.
///
/// A fieldless mirror of [`EvalError`] that the engine keeps as its current
/// error state, together with the fixed human-readable description of each
/// code.
pub mod error_kind;

pub use error_kind::ErrorKind;
pub use eval_error::{EvalError, EvalResult};
