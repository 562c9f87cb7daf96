use logos::Logos;

/// Represents a lexical token of an expression.
///
/// Both passes read the expression through this lexer: the scan pass only
/// looks at variables and braces, the evaluation pass at everything. Any
/// character that no variant matches is reported by the lexer as an error
/// token, which each pass interprets on its own terms.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    /// A maximal run of digits and decimal points, such as `3`, `2.5`, `.5`
    /// or the malformed `1.2.3`. Conversion happens in the evaluator so that
    /// malformed runs can be reported with their position.
    #[regex(r"[0-9.]+", |lex| lex.slice())]
    Number(&'a str),
    /// A single letter variable such as `a` or `B`.
    #[regex(r"[a-zA-Z]", |lex| lex.slice().chars().next())]
    Variable(char),
    /// One of `+ - * /`.
    #[regex(r"[-+*/]", |lex| lex.slice().chars().next())]
    Operator(char),
    /// `(`
    #[token("(")]
    OpenBrace,
    /// `)`
    #[token(")")]
    CloseBrace,
    /// Spaces, tabs, line breaks and feeds.
    #[regex(r"[ \t\r\n\x0B\x0C]+", logos::skip)]
    Ignored,
}
