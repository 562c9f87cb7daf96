/// The expression engine and its session lifecycle.
///
/// Owns the loaded expression, the discovered variables and the current error
/// code, and exposes loading, value collection and evaluation.
pub mod engine;
/// The evaluation pass.
///
/// Computes the value of an expression with the current variable values,
/// honouring precedence, braces and unary minus.
pub mod evaluator;
/// Tokens shared by the scan and evaluation passes.
pub mod lexer;
/// The binary operators and their arithmetic.
pub mod operator;
/// The scan pass: variable discovery and brace balance.
pub mod scanner;
/// Variable slots and the capability that fills them.
pub mod variable;
