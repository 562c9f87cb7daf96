use std::io::{self, BufRead, Write};

const ESCAPE: char = '\u{1b}';
const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

/// Reads one line of user input under a character policy.
///
/// Characters outside the policy are dropped as if they had never been
/// typed. Backspace and delete remove the last accepted character. A line is
/// accepted at CR, LF or TAB. An escape character anywhere in the line, or
/// the end of the stream, cancels input.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use expreval::shell::line_reader::LineReader;
///
/// let reader = LineReader::number();
/// let mut input = Cursor::new("-1x2.5\n");
/// assert_eq!(reader.read_line(&mut input).unwrap(), Some("-12.5".to_string()));
///
/// let mut input = Cursor::new("12\u{1b}\n");
/// assert_eq!(reader.read_line(&mut input).unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReader {
    allow_numerics: bool,
    allow_alpha:    bool,
    other:          String,
}

impl Default for LineReader {
    /// Letters, digits, `.` and space.
    fn default() -> Self {
        Self { allow_numerics: true,
               allow_alpha:    true,
               other:          ". ".to_string(), }
    }
}

impl LineReader {
    /// Creates a reader with an explicit policy.
    ///
    /// `other` lists every accepted character that is neither a digit nor a
    /// letter.
    #[must_use]
    pub fn new(allow_numerics: bool, allow_alpha: bool, other: &str) -> Self {
        Self { allow_numerics,
               allow_alpha,
               other: other.to_string() }
    }

    /// The policy for typing an expression.
    #[must_use]
    pub fn expression() -> Self {
        Self::new(true, true, "+-*/ .()")
    }

    /// The policy for typing a variable value.
    #[must_use]
    pub fn number() -> Self {
        Self::new(true, false, ".-")
    }

    #[must_use]
    pub fn allow_numerics(mut self, allow: bool) -> Self {
        self.allow_numerics = allow;
        self
    }

    #[must_use]
    pub fn allow_alpha(mut self, allow: bool) -> Self {
        self.allow_alpha = allow;
        self
    }

    /// Replaces the set of accepted characters beyond digits and letters.
    #[must_use]
    pub fn allow_other_characters(mut self, other: &str) -> Self {
        other.clone_into(&mut self.other);
        self
    }

    /// `true` if `c` may appear in the result.
    #[must_use]
    pub fn allows(&self, c: char) -> bool {
        (self.allow_alpha && c.is_ascii_alphabetic())
        || (self.allow_numerics && c.is_ascii_digit())
        || self.other.contains(c)
    }

    /// Reads up to the next accepting character and returns the filtered
    /// text, or `None` if input was cancelled.
    ///
    /// # Errors
    /// Propagates I/O errors of the underlying reader.
    pub fn read_line<R: BufRead + ?Sized>(&self, input: &mut R) -> io::Result<Option<String>> {
        let mut raw = String::new();
        if input.read_line(&mut raw)? == 0 {
            return Ok(None);
        }
        Ok(self.filter(&raw))
    }

    /// Applies the policy to text that was typed as one line.
    ///
    /// Returns `None` if the text contains an escape character.
    #[must_use]
    pub fn filter(&self, raw: &str) -> Option<String> {
        let mut result = String::new();
        for c in raw.chars() {
            match c {
                ESCAPE => return None,
                '\r' | '\n' | '\t' => break,
                BACKSPACE | DELETE => {
                    result.pop();
                },
                c if self.allows(c) => result.push(c),
                _ => {},
            }
        }
        Some(result)
    }
}

/// Where the shell gets its lines from.
///
/// Every [`BufRead`] is a line input that writes the prompt to the shell's
/// output and reads with [`LineReader::read_line`]. An interactive terminal
/// uses [`Terminal`](crate::shell::terminal::Terminal) instead.
pub trait LineInput {
    /// Shows `prompt`, reads one line and filters it through `policy`.
    ///
    /// `output` is the shell's output; pending text must be flushed before
    /// the user types. `None` means the user cancelled.
    ///
    /// # Errors
    /// Propagates I/O errors of the input or output.
    fn prompt_line(&mut self,
                   prompt: &str,
                   policy: &LineReader,
                   output: &mut dyn Write)
                   -> io::Result<Option<String>>;
}

impl<R: BufRead + ?Sized> LineInput for R {
    fn prompt_line(&mut self,
                   prompt: &str,
                   policy: &LineReader,
                   output: &mut dyn Write)
                   -> io::Result<Option<String>> {
        write!(output, "{prompt}")?;
        output.flush()?;
        policy.read_line(self)
    }
}
