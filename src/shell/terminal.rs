use std::io::{self, Write};

use rustyline::{Cmd, DefaultEditor, KeyCode, KeyEvent, Modifiers, error::ReadlineError};
use tracing::debug;

use crate::shell::line_reader::{LineInput, LineReader};

/// Line input from an interactive terminal.
///
/// The line editor handles backspace, cursor movement and history while the
/// user types. Escape, Ctrl-C and Ctrl-D cancel the prompt at any time. The
/// accepted line is filtered through the prompt's [`LineReader`] policy.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    /// Sets up the line editor.
    ///
    /// # Errors
    /// Fails if the terminal cannot be configured.
    pub fn new() -> io::Result<Self> {
        let mut editor = DefaultEditor::new().map_err(into_io)?;
        editor.bind_sequence(KeyEvent(KeyCode::Esc, Modifiers::NONE), Cmd::Interrupt);
        Ok(Self { editor })
    }
}

impl LineInput for Terminal {
    fn prompt_line(&mut self,
                   prompt: &str,
                   policy: &LineReader,
                   output: &mut dyn Write)
                   -> io::Result<Option<String>> {
        output.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                let filtered = policy.filter(&line);
                if let Some(text) = &filtered
                   && !text.is_empty()
                {
                    self.editor
                        .add_history_entry(text.as_str())
                        .map_err(into_io)?;
                }
                Ok(filtered)
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                debug!("prompt cancelled");
                Ok(None)
            },
            Err(err) => Err(into_io(err)),
        }
    }
}

fn into_io(err: ReadlineError) -> io::Error {
    match err {
        ReadlineError::Io(err) => err,
        err => io::Error::other(err),
    }
}
