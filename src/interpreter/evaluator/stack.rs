use tracing::trace;

use crate::{
    error::{EvalError, EvalResult},
    interpreter::operator::BinaryOperator,
};

/// The operand and operator stacks of one evaluation call.
///
/// Each (sub-)expression owns its own pair. Operators are stored with the
/// position of their symbol so that arithmetic failures can point at it.
#[derive(Debug)]
pub struct Stacks {
    operands:  Vec<f64>,
    operators: Vec<(BinaryOperator, usize)>,
}

impl Stacks {
    /// Operand slots reserved up front; most (sub-)expressions fit.
    const INITIAL_CAPACITY: usize = 8;

    /// Creates empty stacks with a small fixed reservation.
    ///
    /// # Errors
    /// Returns [`EvalError::OutOfMemory`] if the storage cannot be reserved.
    pub fn new() -> EvalResult<Self> {
        let mut operands = Vec::new();
        let mut operators = Vec::new();
        operands.try_reserve(Self::INITIAL_CAPACITY)
                .map_err(|_| EvalError::OutOfMemory)?;
        operators.try_reserve(Self::INITIAL_CAPACITY)
                 .map_err(|_| EvalError::OutOfMemory)?;
        Ok(Self { operands, operators })
    }

    /// Pushes an operand.
    ///
    /// # Errors
    /// Returns [`EvalError::OutOfMemory`] if the stack cannot grow.
    pub fn push_operand(&mut self, value: f64) -> EvalResult<()> {
        trace!(value, "operand");
        self.operands.try_reserve(1)
                     .map_err(|_| EvalError::OutOfMemory)?;
        self.operands.push(value);
        Ok(())
    }

    /// Pushes an operator with the position of its symbol.
    ///
    /// # Errors
    /// Returns [`EvalError::OutOfMemory`] if the stack cannot grow.
    pub fn push_operator(&mut self, operator: BinaryOperator, position: usize) -> EvalResult<()> {
        trace!(%operator, "operator");
        self.operators.try_reserve(1)
                      .map_err(|_| EvalError::OutOfMemory)?;
        self.operators.push((operator, position));
        Ok(())
    }

    /// `true` while at least one operator waits to be resolved.
    #[must_use]
    pub fn has_pending_operators(&self) -> bool {
        !self.operators.is_empty()
    }

    /// Resolves every pending operator, most recent first.
    ///
    /// Each step pops one operator and two operands, the first popped being
    /// the right-hand side, and pushes the result back.
    ///
    /// # Errors
    /// - [`EvalError::DivideByZero`] from the arithmetic.
    /// - [`EvalError::TooManyOperators`] if an operator lacks its operands.
    pub fn resolve(&mut self) -> EvalResult<()> {
        self.resolve_while(|_| true)
    }

    /// Resolves pending operators from the top for as long as `predicate`
    /// accepts the topmost one.
    ///
    /// # Errors
    /// Same as [`Stacks::resolve`].
    pub fn resolve_while<P>(&mut self, mut predicate: P) -> EvalResult<()>
        where P: FnMut(BinaryOperator) -> bool
    {
        while let Some(&(operator, position)) = self.operators.last()
              && predicate(operator)
        {
            self.operators.pop();
            let (Some(rhs), Some(lhs)) = (self.operands.pop(), self.operands.pop()) else {
                return Err(EvalError::TooManyOperators { position });
            };
            let result = operator.apply(lhs, rhs, position)?;
            trace!("{lhs} {operator} {rhs} = {result}");
            self.operands.push(result);
        }
        Ok(())
    }

    /// Consumes the stacks and returns the single remaining operand.
    ///
    /// `position` is where the (sub-)expression ended.
    ///
    /// # Errors
    /// - [`EvalError::TooManyOperators`] if operators are still pending.
    /// - [`EvalError::TooManyOperands`] unless exactly one operand remains.
    pub fn finish(mut self, position: usize) -> EvalResult<f64> {
        if self.has_pending_operators() {
            return Err(EvalError::TooManyOperators { position });
        }
        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(EvalError::TooManyOperands { position }),
        }
    }
}
