use std::fmt;

/// The lexical class of a [`Token`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifiers, builtin names and the keywords `if`, `else` and `while`.
    Word,
    /// Numeric literals, possibly with a sign absorbed from a preceding `+`
    /// or `-` (e.g. `-5`).
    Number,
    /// One- or two-character operators as well as `(`, `)`, `{` and `}`.
    Operator,
    /// A run of newlines, carriage returns and semicolons.
    LineSeparator,
    /// The synthetic sentinel that terminates every stream.
    EndOfStream,
}

/// A minimal lexical unit.
///
/// Tokens are immutable once produced. The text of a `LineSeparator` is always
/// `";"` and the text of the `EndOfStream` sentinel is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical class.
    pub kind: TokenKind,
    /// The source text of the token.
    pub text: String,
    /// The 1-based source line the token starts on.
    pub line: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self { kind,
               text: text.into(),
               line }
    }

    /// Creates the `EndOfStream` sentinel.
    #[must_use]
    pub const fn end_of_stream(line: usize) -> Self {
        Self { kind: TokenKind::EndOfStream,
               text: String::new(),
               line }
    }

    /// Returns `true` if this is an operator token with exactly the given
    /// text.
    ///
    /// ## Example
    /// ```
    /// use winzig::interpreter::stream::{Token, TokenKind};
    ///
    /// let token = Token::new(TokenKind::Operator, "(", 1);
    /// assert!(token.is_operator("("));
    /// assert!(!token.is_operator(")"));
    /// ```
    #[must_use]
    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// Returns `true` if this is a word token with exactly the given text.
    #[must_use]
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == TokenKind::Word && self.text == text
    }

    /// Returns `true` for the `EndOfStream` sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfStream => write!(f, "<end of input>"),
            TokenKind::LineSeparator => write!(f, "<line separator>"),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// A growable, cursor-addressed buffer of tokens.
///
/// The buffer always ends with exactly one `EndOfStream` sentinel, so looking
/// past the real content is well-defined: [`peek`](Self::peek) and
/// [`pop`](Self::pop) keep returning the sentinel once the cursor reaches it.
/// Popping past the sentinel does not fault; it marks the stream as overrun
/// instead, which the parser reports as an unexpected end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens:  Vec<Token>,
    cursor:  usize,
    overrun: bool,
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream {
    /// Creates a stream holding only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self { tokens:  vec![Token::end_of_stream(1)],
               cursor:  0,
               overrun: false, }
    }

    /// Builds a stream from already lexed tokens and appends the sentinel.
    ///
    /// Any `EndOfStream` tokens in the input are dropped, so the invariant of
    /// a single trailing sentinel holds.
    pub fn from_tokens<I>(tokens: I) -> Self
        where I: IntoIterator<Item = Token>
    {
        let mut stream = Self::new();
        for token in tokens {
            stream.push(token);
        }
        stream
    }

    /// Appends a token in front of the sentinel.
    pub fn push(&mut self, token: Token) {
        if token.is_end() {
            return;
        }
        let line = token.line;
        let sentinel = self.tokens.len() - 1;
        self.tokens.insert(sentinel, token);
        if let Some(last) = self.tokens.last_mut() {
            last.line = line;
        }
    }

    /// The number of real tokens, excluding the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    /// Returns `true` if the stream holds no real tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All tokens including the trailing sentinel.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once something tried to consume past the sentinel.
    #[must_use]
    pub const fn overran(&self) -> bool {
        self.overrun
    }

    fn sentinel(&self) -> &Token {
        // The vector is never empty: `new` seeds the sentinel and nothing
        // removes it.
        &self.tokens[self.tokens.len() - 1]
    }

    /// Returns the token under the cursor without moving it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.cursor).unwrap_or_else(|| self.sentinel())
    }

    /// Returns the token after the one under the cursor without moving it.
    #[must_use]
    pub fn peek_next(&self) -> &Token {
        self.tokens.get(self.cursor + 1).unwrap_or_else(|| self.sentinel())
    }

    /// Consumes and returns the token under the cursor.
    ///
    /// Popping the sentinel itself is allowed and leaves the cursor past it;
    /// popping again marks the stream as overrun and returns the sentinel.
    ///
    /// ## Example
    /// ```
    /// use winzig::interpreter::stream::{Token, TokenKind, TokenStream};
    ///
    /// let mut stream = TokenStream::from_tokens([Token::new(TokenKind::Number, "1", 1)]);
    ///
    /// assert_eq!(stream.pop().text, "1");
    /// assert!(stream.pop().is_end());
    /// assert!(!stream.overran());
    /// assert!(stream.pop().is_end());
    /// assert!(stream.overran());
    /// ```
    pub fn pop(&mut self) -> Token {
        let token = self.peek().clone();
        self.advance();
        token
    }

    /// Skips one token.
    pub fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        } else {
            self.overrun = true;
        }
    }

    /// Rewinds the cursor to the first token, keeping the contents.
    pub const fn rewind(&mut self) {
        self.cursor = 0;
        self.overrun = false;
    }

    /// Clears the contents and the cursor so the stream can take the tokens
    /// of the next input.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.tokens.push(Token::end_of_stream(1));
        self.cursor = 0;
        self.overrun = false;
    }
}
