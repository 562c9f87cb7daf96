use std::{
    collections::VecDeque,
    io::{self, Cursor, Write},
};

use expreval::shell::{
    console::{Console, ShellConfig},
    line_reader::{LineInput, LineReader},
};

/// Line input that hands out prepared lines, as an editor would after the
/// user pressed enter. `None` entries stand for a cancelled prompt.
struct Scripted {
    lines: VecDeque<Option<&'static str>>,
}

impl LineInput for Scripted {
    fn prompt_line(&mut self,
                   prompt: &str,
                   policy: &LineReader,
                   output: &mut dyn Write)
                   -> io::Result<Option<String>> {
        write!(output, "<{}>", prompt.trim_end())?;
        output.flush()?;
        Ok(self.lines
               .pop_front()
               .flatten()
               .and_then(|line| policy.filter(line)))
    }
}

fn run_session(input: &str) -> String {
    let config = ShellConfig { banner: false,
                               ..ShellConfig::default() };
    let mut console = Console::new(Cursor::new(input.to_string()), Vec::new(), config);
    console.run().expect("session failed");
    String::from_utf8(console.into_output()).expect("output is not utf-8")
}

fn read(reader: &LineReader, input: &str) -> Option<String> {
    reader.read_line(&mut Cursor::new(input)).expect("read failed")
}

#[test]
fn line_reader_drops_characters_outside_policy() {
    let reader = LineReader::expression();
    assert_eq!(read(&reader, "(a + 1) % 2 = b\n"), Some("(a + 1)  2  b".to_string()));

    let reader = LineReader::number();
    assert_eq!(read(&reader, "1e5\n"), Some("15".to_string()));
}

#[test]
fn line_reader_default_policy() {
    let reader = LineReader::default();
    assert_eq!(read(&reader, "Ab 1.5-+\n"), Some("Ab 1.5".to_string()));
}

#[test]
fn line_reader_builder_replaces_policy() {
    let reader = LineReader::default().allow_alpha(false)
                                      .allow_numerics(false)
                                      .allow_other_characters("xy");
    assert!(!reader.allows('a'));
    assert!(reader.allows('x'));
    assert_eq!(read(&reader, "axbyc1\n"), Some("xy".to_string()));
}

#[test]
fn line_reader_accepts_at_tab_and_handles_backspace() {
    let reader = LineReader::default();
    assert_eq!(read(&reader, "abc\u{8}\u{8}d\tignored\n"), Some("ad".to_string()));
    assert_eq!(read(&reader, "\u{8}\u{7f}x\r\n"), Some("x".to_string()));
}

#[test]
fn line_reader_cancels_on_escape_or_end_of_input() {
    let reader = LineReader::default();
    assert_eq!(read(&reader, "abc\u{1b}def\n"), None);
    assert_eq!(read(&reader, ""), None);
    assert_eq!(read(&reader, "\n"), Some(String::new()));
}

#[test]
fn filter_applies_policy_to_an_edited_line() {
    assert_eq!(LineReader::number().filter("-2.5kg"), Some("-2.5".to_string()));
    assert_eq!(LineReader::expression().filter("a % b"), Some("a  b".to_string()));
    assert_eq!(LineReader::expression().filter("1 + \u{1b}"), None);
}

#[test]
fn buffered_input_writes_the_prompt() {
    let mut input = Cursor::new("12x\n");
    let mut output = Vec::new();
    let line = input.prompt_line("Value : ", &LineReader::number(), &mut output)
                    .unwrap();
    assert_eq!(line, Some("12".to_string()));
    assert_eq!(output, b"Value : ");
}

#[test]
fn console_runs_on_any_line_input() {
    let input = Scripted { lines: VecDeque::from([Some("x * 3"), Some("4"), None, None]) };
    let config = ShellConfig { banner: false,
                               ..ShellConfig::default() };
    let mut console = Console::new(input, Vec::new(), config);
    console.run().unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Result = 12"));
    assert_eq!(output.matches("Cancelled.").count(), 2);
    assert!(output.contains("<Value for variable x [0] :>"));
    assert!(output.contains("<Value for variable x [4] :>"));
}

#[test]
fn banner_is_shown_by_default() {
    let mut console = Console::new(Cursor::new(""), Vec::new(), ShellConfig::default());
    console.run().unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.starts_with("A Simple Expression Evaluator"));
}

#[test]
fn constant_expression_is_evaluated_once() {
    let output = run_session("2 + 3 * 4\n");
    assert_eq!(output.matches("Result = 14").count(), 1);
    assert!(output.contains("Expression: \"2 + 3 * 4\""));
    assert_eq!(output.matches("Please enter an expression : ").count(), 2);
}

#[test]
fn variables_are_prompted_each_round() {
    let output = run_session("(a + 10) * 50 / ((b - 6) * 9)\n0\n8\n8\n7\n\u{1b}\n");
    assert!(output.contains("Value for variable a [0] : "));
    assert!(output.contains("Value for variable b [0] : "));
    assert!(output.contains("Result = 27.7778"));
    assert!(output.contains("Value for variable a [0] : Value for variable b [8] : "));
    assert!(output.contains("Result = 100"));
    assert!(output.contains("Value for variable a [8] : "));
    assert!(output.contains("Cancelled."));
}

#[test]
fn empty_value_keeps_the_default() {
    let output = run_session("x * 2\n5\n\n\u{1b}\n");
    assert_eq!(output.matches("Result = 10").count(), 2);
    assert!(output.contains("Value for variable x [5] : "));
}

#[test]
fn invalid_value_is_asked_again() {
    let output = run_session("x + 1\n1-2\n3\n\u{1b}\n");
    assert!(output.contains("'1-2' is not a number."));
    assert!(output.contains("Result = 4"));
}

#[test]
fn errors_show_description_and_caret() {
    let output = run_session("5 / 0\n");
    assert!(output.contains("Syntax error: divide by 0\n  5 / 0\n    ^\n"));
}

#[test]
fn load_errors_lead_back_to_the_expression_prompt() {
    let output = run_session("ab + 1\n\n1 + 1\n");
    assert!(output.contains("only single character variable names are allowed"));
    assert!(output.contains("Warning: empty expression"));
    assert!(output.contains("Result = 2"));
    assert!(!output.contains("Expression: \"ab + 1\""));
}

#[test]
fn precision_is_configurable() {
    let config = ShellConfig { precision: 3,
                               banner:    false, };
    let mut console = Console::new(Cursor::new("2 / 3\n"), Vec::new(), config);
    console.run().unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.contains("Result = 0.667"));
}
