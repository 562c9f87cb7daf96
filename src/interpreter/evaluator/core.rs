use logos::Logos;
use tracing::{trace, warn};

use crate::{
    error::{EvalError, EvalResult},
    interpreter::{
        engine::Engine, evaluator::stack::Stacks, lexer::Token, operator::BinaryOperator,
    },
};

/// What the evaluator accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A number, a variable, a unary `-` or a `(`.
    ExpectOperand,
    /// A binary operator, or the `)` that ends a sub-expression.
    ExpectOperator,
}

/// The value of a (sub-)expression and how much text produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluated {
    /// The computed value.
    pub value:    f64,
    /// Bytes consumed, including the closing `)` of a sub-expression.
    pub consumed: usize,
}

impl Engine {
    /// Evaluates `text` as a (sub-)expression.
    ///
    /// `offset` is the position of `text` within the whole expression and is
    /// only used for error positions. A `nested` call starts right after a
    /// `(` and stops at its matching `)`; the top level call runs to the end
    /// of the text.
    ///
    /// Operands go onto an operand stack and binary operators onto an
    /// operator stack. Before a `+` or `-` is pushed, everything pending is
    /// resolved, so any `*` and `/` already queued complete first. Before a
    /// `*` or `/` is pushed, a `*` or `/` on top of the stack is resolved,
    /// which keeps runs like `8 / 2 / 2` left-associative. A `(` recurses and
    /// the sub-expression's value becomes a single operand.
    pub(crate) fn evaluate_span(&self,
                                text: &str,
                                offset: usize,
                                nested: bool)
                                -> EvalResult<Evaluated> {
        trace!(offset, nested, "enter expression");

        let mut stacks = Stacks::new()?;
        let mut state = State::ExpectOperand;
        let mut negate = false;
        let mut closed = false;
        let mut consumed = 0;

        let mut lexer = Token::lexer(text);
        while let Some(token) = lexer.next() {
            let span = lexer.span();
            let position = offset + span.start;

            let Ok(token) = token else {
                return Err(match state {
                               State::ExpectOperand => EvalError::OperandExpected { position },
                               State::ExpectOperator => EvalError::OperatorExpected { position },
                           });
            };

            match (state, token) {
                (State::ExpectOperand, Token::OpenBrace) => {
                    let inner = self.evaluate_span(&text[span.end..], offset + span.end, true)?;
                    lexer.bump(inner.consumed);
                    stacks.push_operand(take_negation(&mut negate, inner.value))?;
                    state = State::ExpectOperator;
                },
                // Any run of signs leaves one negation pending.
                (State::ExpectOperand, Token::Operator('-')) => negate = true,
                (State::ExpectOperand, Token::Variable(name)) => {
                    let value = self.variable_value(name);
                    stacks.push_operand(take_negation(&mut negate, value))?;
                    state = State::ExpectOperator;
                },
                (State::ExpectOperand, Token::Number(literal)) => {
                    let value = parse_literal(literal, position)?;
                    stacks.push_operand(take_negation(&mut negate, value))?;
                    state = State::ExpectOperator;
                },
                (State::ExpectOperand, _) => return Err(EvalError::OperandExpected { position }),
                (State::ExpectOperator, Token::CloseBrace) => {
                    if !nested {
                        return Err(EvalError::UnmatchedBraces { position });
                    }
                    consumed = span.end;
                    closed = true;
                    break;
                },
                (State::ExpectOperator, Token::Operator(symbol)) => {
                    let operator = BinaryOperator::from_symbol(symbol, position)?;
                    let resolved = if operator.is_low_precedence() {
                        stacks.resolve()
                    } else {
                        stacks.resolve_while(|pending| !pending.is_low_precedence())
                    };
                    resolved.map_err(EvalError::during_resolution)?;
                    stacks.push_operator(operator, position)?;
                    state = State::ExpectOperand;
                },
                (State::ExpectOperator, _) => {
                    return Err(EvalError::OperatorExpected { position });
                },
            }
            consumed = lexer.span().end;
        }

        let end = offset + consumed;
        if nested && !closed {
            return Err(EvalError::UnmatchedBraces { position: offset + text.len() });
        }
        if state == State::ExpectOperand && stacks.has_pending_operators() {
            return Err(EvalError::TooManyOperators { position: end });
        }

        stacks.resolve().map_err(EvalError::during_resolution)?;
        let value = stacks.finish(end)?;

        trace!(value, consumed, "leave expression");
        Ok(Evaluated { value, consumed })
    }

    /// The current value of `name`, or `0.0` for a name the scan pass never
    /// saw.
    fn variable_value(&self, name: char) -> f64 {
        self.variable(name).map_or_else(|| {
                                            warn!(variable = %name, "unknown variable, using 0");
                                            0.0
                                        },
                                        |variable| variable.value())
    }
}

/// Applies and clears a pending unary minus.
const fn take_negation(negate: &mut bool, value: f64) -> f64 {
    if *negate {
        *negate = false;
        -value
    } else {
        value
    }
}

/// Converts a run of digits and decimal points to a number.
///
/// Runs with more than one decimal point, or no digit at all, are rejected.
fn parse_literal(literal: &str, position: usize) -> EvalResult<f64> {
    let malformed = || EvalError::MalformedLiteral { literal: literal.to_string(),
                                                     position };

    if literal.matches('.').count() > 1 {
        return Err(malformed());
    }
    literal.parse().map_err(|_| malformed())
}
