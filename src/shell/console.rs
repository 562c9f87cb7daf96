use std::io::{self, Write};

use tracing::debug;

use crate::{
    error::{ErrorKind, EvalError},
    interpreter::{
        engine::{Collection, Engine},
        variable::ValueSource,
    },
    shell::line_reader::{LineInput, LineReader},
    util::num::{DEFAULT_PRECISION, format_significant},
};

/// Presentation settings of the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Significant digits of printed numbers.
    pub precision: usize,
    /// Whether to greet the user with a banner.
    pub banner:    bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { precision: DEFAULT_PRECISION,
               banner:    true, }
    }
}

/// The interactive shell.
///
/// Asks for an expression, then repeatedly asks for variable values and
/// prints the result. An expression without variables is evaluated once.
/// Errors print their description and lead back to the expression prompt,
/// as does cancelling a value prompt. Cancelling the expression prompt ends
/// the session.
///
/// Lines come from any [`LineInput`]: a [`BufRead`](std::io::BufRead) such
/// as piped stdin, or a [`Terminal`](crate::shell::terminal::Terminal).
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use expreval::shell::console::{Console, ShellConfig};
///
/// let input = Cursor::new("a * 2\n21\n\u{1b}\n");
/// let config = ShellConfig { banner: false, ..ShellConfig::default() };
/// let mut console = Console::new(input, Vec::new(), config);
/// console.run().unwrap();
///
/// let output = String::from_utf8(console.into_output()).unwrap();
/// assert!(output.contains("Result = 42"));
/// ```
pub struct Console<R, W> {
    input:  R,
    output: W,
    config: ShellConfig,
}

impl<R: LineInput, W: Write> Console<R, W> {
    #[must_use]
    pub const fn new(input: R, output: W, config: ShellConfig) -> Self {
        Self { input,
               output,
               config }
    }

    /// Gives back the output, for inspecting what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs sessions until the expression prompt is cancelled.
    ///
    /// # Errors
    /// Propagates I/O errors of the input or output.
    pub fn run(&mut self) -> io::Result<()> {
        if self.config.banner {
            self.show_banner()?;
        }
        while let Some(expression) = self.request_expression()? {
            self.run_session(&expression)?;
        }
        writeln!(self.output, "Cancelled.")?;
        self.output.flush()
    }

    fn run_session(&mut self, expression: &str) -> io::Result<()> {
        let mut engine = Engine::new();
        if let Err(err) = engine.load(expression) {
            return self.show_error(expression, engine.last_error(), &err);
        }
        debug!(expression, variables = engine.variable_count(), "session started");

        loop {
            self.show_expression(expression)?;

            let mut prompt = ValuePrompt { input:     &mut self.input,
                                           output:    &mut self.output,
                                           precision: self.config.precision,
                                           failure:   None, };
            let collection = engine.collect_variables(&mut prompt);
            if let Some(err) = prompt.failure {
                return Err(err);
            }
            if collection == Collection::Cancelled {
                writeln!(self.output, "Cancelled.")?;
                return Ok(());
            }

            match engine.evaluate() {
                Ok(value) => self.show_result(value)?,
                Err(err) => return self.show_error(expression, engine.last_error(), &err),
            }

            if engine.variable_count() == 0 {
                return Ok(());
            }
        }
    }

    fn show_banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "A Simple Expression Evaluator")?;
        writeln!(self.output)?;
        writeln!(self.output,
                 "(Press <ESC>, or end the input, to quit. Default values are shown in [])")?;
        writeln!(self.output)
    }

    fn request_expression(&mut self) -> io::Result<Option<String>> {
        self.input.prompt_line("Please enter an expression : ",
                               &LineReader::expression(),
                               &mut self.output)
    }

    fn show_expression(&mut self, expression: &str) -> io::Result<()> {
        writeln!(self.output, "------------------------------------------------")?;
        writeln!(self.output, "Expression: \"{expression}\"")
    }

    fn show_result(&mut self, value: f64) -> io::Result<()> {
        writeln!(self.output,
                 "Result = {}",
                 format_significant(value, self.config.precision))?;
        writeln!(self.output)
    }

    fn show_error(&mut self, expression: &str, kind: ErrorKind, err: &EvalError) -> io::Result<()> {
        writeln!(self.output, "{}", kind.description())?;
        if let Some(position) = err.position() {
            let column = expression.get(..position)
                                   .map_or(position, |prefix| prefix.chars().count());
            writeln!(self.output, "  {expression}")?;
            writeln!(self.output, "  {}^", " ".repeat(column))?;
        }
        writeln!(self.output)
    }
}

/// Asks the user for variable values on behalf of an engine.
struct ValuePrompt<'a, R, W> {
    input:     &'a mut R,
    output:    &'a mut W,
    precision: usize,
    /// The I/O error that ended collection, if any.
    failure:   Option<io::Error>,
}

impl<R: LineInput, W: Write> ValuePrompt<'_, R, W> {
    /// Prompts until a number, an empty line (keeping `default`) or a
    /// cancellation is entered.
    fn ask(&mut self, name: char, default: f64) -> io::Result<Option<f64>> {
        let reader = LineReader::number();
        let prompt = format!("Value for variable {name} [{}] : ",
                             format_significant(default, self.precision));
        loop {
            let Some(text) = self.input.prompt_line(&prompt, &reader, self.output)? else {
                return Ok(None);
            };
            if text.is_empty() {
                return Ok(Some(default));
            }
            match text.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "'{text}' is not a number.")?,
            }
        }
    }
}

impl<R: LineInput, W: Write> ValueSource for ValuePrompt<'_, R, W> {
    fn resolve(&mut self, name: char, default: f64) -> Option<f64> {
        self.ask(name, default).unwrap_or_else(|err| {
                                   self.failure = Some(err);
                                   None
                               })
    }
}
