/// The interactive session: banner, prompts, results and error display.
pub mod console;
/// Line input restricted to a character policy, with cancellation.
pub mod line_reader;
/// Line input from an interactive terminal through a line editor.
pub mod terminal;
