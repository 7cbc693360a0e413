use logos::Logos;
use tracing::{debug, trace};

use crate::{
    error::{LexError, Outcome},
    interpreter::stream::{Token, TokenKind, TokenStream},
};

/// Raw character classes recognized by the scanner.
///
/// Logos only splits the input into maximal runs of one class. The rules that
/// depend on neighbouring characters (sign absorption, two-character
/// operators, the ban on two operators in a row) are applied afterwards by
/// [`tokenize_into`].
#[derive(Logos, Debug, Copy, Clone, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
enum Lexeme {
    /// Spaces and tabs.
    #[regex(r"[ \t]+")]
    Blank,
    /// A run of `\n`, `\r` and `;`, collapsed into a single separator.
    #[regex(r"[\n\r;]+", |lex| {
        lex.extras.line += lex.slice().matches('\n').count();
    })]
    LineBreak,
    /// Digits and decimal points, e.g. `3.14` or `.5`.
    #[regex(r"[0-9.]+")]
    Digits,
    /// Letters, optionally followed by letters and digits, e.g. `log10`.
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Letters,
    /// A single operator character.
    #[regex(r"[-+*/%^<>=&|!]")]
    OperatorChar,
    /// `(`, `)`, `{` or `}`.
    #[regex(r"[(){}]")]
    Bracket,
}

/// Additional information carried by the scanner.
///
/// Tracks the current line number for error reporting.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// An operator character that has been read but not yet emitted.
///
/// It may still grow into a two-character operator (`+=`) or be absorbed as
/// the sign of a number (`-5`).
struct PendingOperator {
    symbol: char,
    line:   usize,
}

impl PendingOperator {
    fn flush(self, stream: &mut TokenStream) {
        stream.push(Token::new(TokenKind::Operator, self.symbol.to_string(), self.line));
    }
}

fn flush(pending: &mut Option<PendingOperator>, stream: &mut TokenStream) {
    if let Some(op) = pending.take() {
        op.flush(stream);
    }
}

/// Converts source text into a token stream.
///
/// Tokenizing never panics and always terminates. On error the returned
/// outcome still carries every token produced before the fault, terminated by
/// the `EndOfStream` sentinel.
///
/// ## Example
/// ```
/// use winzig::interpreter::{lexer::tokenize, stream::TokenKind};
///
/// let outcome = tokenize("x += -5");
/// assert!(outcome.is_ok());
///
/// let texts: Vec<_> = outcome.output.tokens().iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["x", "+=", "-5", ""]);
/// assert_eq!(outcome.output.tokens()[2].kind, TokenKind::Number);
///
/// assert!(tokenize("1 ++ 2").error.is_some());
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Outcome<TokenStream, LexError> {
    let mut stream = TokenStream::new();
    match tokenize_into(&mut stream, source) {
        Ok(()) => Outcome::ok(stream),
        Err(e) => Outcome::failed(stream, e),
    }
}

/// Tokenizes `source` into an existing stream, replacing its contents.
///
/// This is what a session uses to reuse one stream across many inputs.
///
/// # Errors
/// Returns a [`LexError`] for two operator characters in a row (where the
/// second is not `=`) or for a character outside the language. The stream
/// then holds the partial result.
pub fn tokenize_into(stream: &mut TokenStream, source: &str) -> Result<(), LexError> {
    stream.reset();

    let mut lexer = Lexeme::lexer(source);
    let mut pending: Option<PendingOperator> = None;
    let mut result = Ok(());

    loop {
        let line = lexer.extras.line;
        let Some(lexeme) = lexer.next() else {
            break;
        };
        let slice = lexer.slice();

        match lexeme {
            Ok(Lexeme::Blank) => flush(&mut pending, stream),
            Ok(Lexeme::LineBreak) => {
                flush(&mut pending, stream);
                stream.push(Token::new(TokenKind::LineSeparator, ";", line));
            },
            Ok(Lexeme::Digits) => match pending.take() {
                Some(PendingOperator { symbol: symbol @ ('+' | '-'),
                                       line: sign_line, }) => {
                    stream.push(Token::new(TokenKind::Number, format!("{symbol}{slice}"), sign_line));
                },
                other => {
                    if let Some(op) = other {
                        op.flush(stream);
                    }
                    stream.push(Token::new(TokenKind::Number, slice, line));
                },
            },
            Ok(Lexeme::Letters) => {
                flush(&mut pending, stream);
                stream.push(Token::new(TokenKind::Word, slice, line));
            },
            Ok(Lexeme::OperatorChar) => {
                let symbol = slice.chars().next().unwrap_or_default();
                match pending.take() {
                    Some(previous) if symbol == '=' => {
                        // A completed operator leaves nothing pending, so a sign may follow.
                        stream.push(Token::new(TokenKind::Operator,
                                               format!("{}=", previous.symbol),
                                               previous.line));
                    },
                    Some(previous) => {
                        result = Err(LexError::TwoOperatorsInARow { previous:
                                                                        previous.symbol
                                                                                .to_string(),
                                                                    found: symbol,
                                                                    line });
                        pending = Some(previous);
                        break;
                    },
                    None => pending = Some(PendingOperator { symbol, line }),
                }
            },
            Ok(Lexeme::Bracket) => {
                flush(&mut pending, stream);
                stream.push(Token::new(TokenKind::Operator, slice, line));
            },
            Err(()) => {
                result = Err(LexError::InvalidChar { found: slice.chars().next().unwrap_or_default(),
                                                     line });
                break;
            },
        }
    }

    flush(&mut pending, stream);

    match &result {
        Ok(()) => trace!(tokens = stream.len(), "tokenized source"),
        Err(e) => debug!(tokens = stream.len(), error = %e, "tokenizing stopped"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Status;

    fn kinds_and_texts(stream: &TokenStream) -> Vec<(TokenKind, &str)> {
        stream.tokens().iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn splits_words_numbers_and_operators() {
        let outcome = tokenize("x = 2 * y1");
        assert!(outcome.is_ok());
        assert_eq!(kinds_and_texts(&outcome.output),
                   [(TokenKind::Word, "x"),
                    (TokenKind::Operator, "="),
                    (TokenKind::Number, "2"),
                    (TokenKind::Operator, "*"),
                    (TokenKind::Word, "y1"),
                    (TokenKind::EndOfStream, "")]);
    }

    #[test]
    fn separators_collapse_into_one_token() {
        let outcome = tokenize("a;;;\n\r\nb");
        assert!(outcome.is_ok());
        assert_eq!(kinds_and_texts(&outcome.output),
                   [(TokenKind::Word, "a"),
                    (TokenKind::LineSeparator, ";"),
                    (TokenKind::Word, "b"),
                    (TokenKind::EndOfStream, "")]);
        assert_eq!(outcome.output.tokens()[2].line, 3);
    }

    #[test]
    fn sign_is_absorbed_into_a_following_number() {
        let outcome = tokenize("(-5) + .5");
        let texts: Vec<_> = outcome.output.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["(", "-5", ")", "+", ".5", ""]);
        assert_eq!(outcome.output.tokens()[1].kind, TokenKind::Number);
    }

    #[test]
    fn equals_completes_a_two_character_operator() {
        for op in ["==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|="] {
            let outcome = tokenize(&format!("a {op} b"));
            assert!(outcome.is_ok(), "{op}");
            assert_eq!(outcome.output.tokens()[1].text, op);
        }
    }

    #[test]
    fn brackets_flush_pending_tokens() {
        let outcome = tokenize("sin(x){}");
        let texts: Vec<_> = outcome.output.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["sin", "(", "x", ")", "{", "}", ""]);
    }

    #[test]
    fn two_operators_in_a_row_is_a_syntax_error() {
        let outcome = tokenize("1 ++ 2");
        let error = outcome.error.clone().unwrap();
        assert_eq!(error.status(), Status::SyntaxError);
        assert!(matches!(error, LexError::TwoOperatorsInARow { found: '+', .. }));

        // Partial output is kept and still ends with the sentinel.
        let texts: Vec<_> = outcome.output.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["1", "+", ""]);
    }

    #[test]
    fn a_sign_may_directly_follow_a_two_character_operator() {
        let outcome = tokenize("x+=-5");
        assert!(outcome.is_ok());
        assert_eq!(kinds_and_texts(&outcome.output),
                   [(TokenKind::Word, "x"),
                    (TokenKind::Operator, "+="),
                    (TokenKind::Number, "-5"),
                    (TokenKind::EndOfStream, "")]);

        let outcome = tokenize("a==-1");
        assert!(outcome.is_ok());
        assert_eq!(outcome.output.tokens()[2].text, "-1");
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let outcome = tokenize("x = 3 # comment");
        let error = outcome.error.unwrap();
        assert_eq!(error.status(), Status::InvalidChar);
        assert_eq!(error, LexError::InvalidChar { found: '#', line: 1 });
        assert_eq!(outcome.output.len(), 3);
    }

    #[test]
    fn empty_source_yields_only_the_sentinel() {
        let outcome = tokenize("");
        assert!(outcome.is_ok());
        assert!(outcome.output.is_empty());
    }

    #[test]
    fn tokenize_into_replaces_previous_contents() {
        let mut stream = TokenStream::new();
        tokenize_into(&mut stream, "1 + 2").unwrap();
        tokenize_into(&mut stream, "y").unwrap();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.peek().text, "y");
    }
}
