/// The evaluation state machine.
///
/// Walks the expression token by token, alternating between expecting an
/// operand and expecting an operator, and recurses into braces.
pub mod core;

/// Operand and operator stacks.
///
/// Holds the values and operators waiting to be combined and resolves them
/// in stack order.
pub mod stack;
