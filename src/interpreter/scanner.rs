use logos::Logos;

use crate::{
    error::{EvalError, EvalResult},
    interpreter::{engine::Engine, lexer::Token, variable::Variable},
};

impl Engine {
    /// Discovers the variables of the loaded expression and checks brace
    /// balance.
    ///
    /// This pass reads every token once. Letters become variables, added the
    /// first time each name is seen. Braces move a depth counter, which must
    /// be back at zero at the end. The reported position is the first `)`
    /// that closed nothing, or the end of the text when a `(` stays open.
    /// Everything else is left for the
    /// evaluation pass to judge.
    pub(crate) fn scan_variables(&mut self) -> EvalResult<()> {
        if self.expression.is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        let mut depth: isize = 0;
        let mut first_stray = None;
        let mut last_variable_end = None;

        let mut lexer = Token::lexer(&self.expression);
        while let Some(token) = lexer.next() {
            let span = lexer.span();
            match token {
                Ok(Token::Variable(name)) => {
                    if last_variable_end == Some(span.start) {
                        return Err(EvalError::VariableNameTooLong { position: span.start });
                    }
                    if !self.variables.iter().any(|variable| variable.name() == name) {
                        self.variables.push(Variable::new(name)?);
                    }
                    last_variable_end = Some(span.end);
                },
                Ok(Token::OpenBrace) => depth += 1,
                Ok(Token::CloseBrace) => {
                    depth -= 1;
                    if depth < 0 && first_stray.is_none() {
                        first_stray = Some(span.start);
                    }
                },
                _ => {},
            }
        }

        if depth != 0 {
            let position = first_stray.unwrap_or(self.expression.len());
            return Err(EvalError::UnmatchedBraces { position });
        }
        Ok(())
    }
}
