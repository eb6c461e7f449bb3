use logos::Logos;

use crate::error::LexerError;

/// A lexical token.
///
/// Value-bearing variants compare equal only when their payloads match;
/// marker variants compare by kind alone. `Indent`, `Dedent` and `Eof` are
/// synthesized by the [`Lexer`] from layout, never scanned from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An integer literal.
    Number(i32),
    /// An identifier.
    Id(String),
    /// A string literal with escape sequences already decoded.
    String(String),
    /// A single character with no token of its own, such as `=` or `:`.
    Char(char),
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
    /// End of a logical line. Consecutive newlines collapse into one.
    Newline,
    /// Indentation grew by one unit (two spaces).
    Indent,
    /// Indentation shrank by one unit.
    Dedent,
    /// End of input, preceded by the dedents needed to return to depth 0.
    Eof,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
}

/// Raw lexemes as scanned from text, before any layout handling.
#[derive(Logos, Debug, PartialEq)]
#[logos(extras = LexerExtras)]
enum RawToken {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_number)]
    Number(i32),
    /// `class`
    #[token("class")]
    Class,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `def`
    #[token("def")]
    Def,
    /// `print`
    #[token("print")]
    Print,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `None`
    #[token("None")]
    None,
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// Identifier tokens; variable, class, method or field names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Id(String),
    /// String literals delimited by `'` or `"`, with escape decoding.
    #[regex(r#"'([^'\\\n]|\\.)*'"#, unescape)]
    #[regex(r#""([^"\\\n]|\\.)*""#, unescape)]
    Str(String),
    /// `==`
    #[token("==")]
    Eq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<=`
    #[token("<=")]
    LessOrEq,
    /// `>=`
    #[token(">=")]
    GreaterOrEq,
    /// `=`
    #[token("=")]
    Assign,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// End of a physical line.
    #[token("\n", |lex| lex.extras.line += 1)]
    Newline,
    /// Runs of spaces. Significant at the start of a line, separators
    /// elsewhere.
    #[regex(r" +")]
    Spaces,
    /// Tabs, carriage returns and form feeds carry no structure.
    #[regex(r"[\t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the scanner during tokenization.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn parse_number(lex: &logos::Lexer<RawToken>) -> Option<i32> {
    lex.slice().parse().ok()
}

fn unescape(lex: &logos::Lexer<RawToken>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut decoded = String::with_capacity(inner.len());
    let mut symbols = inner.chars();
    while let Some(symbol) = symbols.next() {
        if symbol == '\\' {
            match symbols.next()? {
                '\\' => decoded.push('\\'),
                'n' => decoded.push('\n'),
                'r' => decoded.push('\r'),
                't' => decoded.push('\t'),
                '\'' => decoded.push('\''),
                '"' => decoded.push('"'),
                _ => return Option::None,
            }
        } else {
            decoded.push(symbol);
        }
    }
    Some(decoded)
}

/// A pull-based token source with layout handling.
///
/// The full token sequence is produced up front: leading blank lines are
/// dropped, runs of newlines collapse into a single [`Token::Newline`],
/// indentation deltas become [`Token::Indent`] and [`Token::Dedent`] in
/// front of a line's first content token, and the stream always ends with
/// the dedents needed to return to depth 0 followed by exactly one
/// [`Token::Eof`]. Parsers then consume the sequence through [`current`],
/// [`advance`] and the `expect` assertions.
///
/// [`current`]: Lexer::current
/// [`advance`]: Lexer::advance
///
/// # Examples
/// ```
/// use snakelet::interpreter::lexer::{Lexer, Token};
///
/// let mut lexer = Lexer::new("x = 1\n").unwrap();
/// assert_eq!(*lexer.current(), Token::Id("x".to_string()));
/// assert_eq!(*lexer.advance(), Token::Char('='));
/// ```
pub struct Lexer {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
}

impl Lexer {
    /// Tokenizes a complete source text.
    ///
    /// # Errors
    /// Returns a [`LexerError`] for malformed string literals (unterminated,
    /// or containing an unrecognized escape), integer literals outside the
    /// 32-bit range, and indentation that is not a multiple of two spaces.
    pub fn new(source: &str) -> Result<Self, LexerError> {
        let mut raw = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });
        let mut tokens: Vec<(Token, usize)> = Vec::new();
        let mut depth = 0;
        let mut at_line_start = true;
        let mut leading_spaces = 0;

        while let Some(scanned) = raw.next() {
            let line = raw.extras.line;
            match scanned {
                Ok(RawToken::Newline) => {
                    // A line that produced no content token is blank or
                    // comment-only; its indentation never counts.
                    at_line_start = true;
                    leading_spaces = 0;
                    if matches!(tokens.last(), Some((token, _)) if *token != Token::Newline) {
                        tokens.push((Token::Newline, line));
                    }
                }
                Ok(RawToken::Spaces) => {
                    if at_line_start {
                        leading_spaces += raw.slice().len();
                    }
                }
                scanned => {
                    let produced = match scanned {
                        Ok(token) => vec![content_token(token)],
                        Err(()) => stray_tokens(raw.slice(), line)?,
                    };
                    if at_line_start {
                        at_line_start = false;
                        if leading_spaces % 2 != 0 {
                            return Err(LexerError::OddIndentation { line });
                        }
                        sync_indent(&mut tokens, &mut depth, leading_spaces / 2, line);
                        leading_spaces = 0;
                    }
                    for token in produced {
                        tokens.push((token, line));
                    }
                }
            }
        }

        let line = raw.extras.line;
        if matches!(tokens.last(), Some((token, _)) if *token != Token::Newline) {
            tokens.push((Token::Newline, line));
        }
        sync_indent(&mut tokens, &mut depth, 0, line);
        tokens.push((Token::Eof, line));

        Ok(Self { tokens, cursor: 0 })
    }

    /// The most recently produced token.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.cursor].0
    }

    /// The source line of the current token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tokens[self.cursor].1
    }

    /// Moves to the next token and returns it. Once [`Token::Eof`] is
    /// current, further calls are no-ops returning `Eof`.
    pub fn advance(&mut self) -> &Token {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Asserts that the current token equals `expected`, payload included.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] on a mismatch.
    pub fn expect(&self, expected: &Token) -> Result<(), LexerError> {
        if self.current() == expected {
            Ok(())
        } else {
            Err(self.mismatch(&format!("{expected:?}")))
        }
    }

    /// Asserts that the current token is an identifier and returns its
    /// name.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] if the current token is not
    /// an identifier.
    pub fn expect_id(&self) -> Result<&str, LexerError> {
        match self.current() {
            Token::Id(name) => Ok(name),
            _ => Err(self.mismatch("an identifier")),
        }
    }

    /// Advances, then asserts that the new current token equals `expected`.
    ///
    /// # Errors
    /// Returns [`LexerError::UnexpectedToken`] on a mismatch.
    pub fn expect_next(&mut self, expected: &Token) -> Result<(), LexerError> {
        self.advance();
        self.expect(expected)
    }

    fn mismatch(&self, expected: &str) -> LexerError {
        LexerError::UnexpectedToken {
            expected: expected.to_owned(),
            found: format!("{:?}", self.current()),
            line: self.line(),
        }
    }
}

/// Emits the `Indent`/`Dedent` run taking the stream from `depth` to
/// `level`, one token per unit of change.
fn sync_indent(tokens: &mut Vec<(Token, usize)>, depth: &mut usize, level: usize, line: usize) {
    while *depth < level {
        tokens.push((Token::Indent, line));
        *depth += 1;
    }
    while *depth > level {
        tokens.push((Token::Dedent, line));
        *depth -= 1;
    }
}

/// Maps unmatched input to tokens or errors. A slice starting with a quote
/// is a string literal that failed to scan; an all-digit slice is an
/// integer literal that failed to parse; anything else becomes `Char`
/// tokens and is left for the parser to reject.
fn stray_tokens(slice: &str, line: usize) -> Result<Vec<Token>, LexerError> {
    if slice.starts_with('\'') || slice.starts_with('"') {
        return Err(LexerError::MalformedString { line });
    }
    if slice.starts_with(|symbol: char| symbol.is_ascii_digit()) {
        return Err(LexerError::NumberOutOfRange { line });
    }
    Ok(slice.chars().map(Token::Char).collect())
}

fn content_token(raw: RawToken) -> Token {
    match raw {
        RawToken::Number(value) => Token::Number(value),
        RawToken::Id(name) => Token::Id(name),
        RawToken::Str(text) => Token::String(text),
        RawToken::Class => Token::Class,
        RawToken::Return => Token::Return,
        RawToken::If => Token::If,
        RawToken::Else => Token::Else,
        RawToken::Def => Token::Def,
        RawToken::Print => Token::Print,
        RawToken::And => Token::And,
        RawToken::Or => Token::Or,
        RawToken::Not => Token::Not,
        RawToken::None => Token::None,
        RawToken::True => Token::True,
        RawToken::False => Token::False,
        RawToken::Eq => Token::Eq,
        RawToken::NotEq => Token::NotEq,
        RawToken::LessOrEq => Token::LessOrEq,
        RawToken::GreaterOrEq => Token::GreaterOrEq,
        RawToken::Assign => Token::Char('='),
        RawToken::Less => Token::Char('<'),
        RawToken::Greater => Token::Char('>'),
        RawToken::Bang => Token::Char('!'),
        RawToken::Colon => Token::Char(':'),
        RawToken::LParen => Token::Char('('),
        RawToken::RParen => Token::Char(')'),
        RawToken::Comma => Token::Char(','),
        RawToken::Dot => Token::Char('.'),
        RawToken::Plus => Token::Char('+'),
        RawToken::Minus => Token::Char('-'),
        RawToken::Star => Token::Char('*'),
        RawToken::Slash => Token::Char('/'),
        RawToken::Comment | RawToken::Newline | RawToken::Spaces | RawToken::Ignored => {
            unreachable!("layout lexemes are consumed before this point")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, Token};

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source).expect("lexing failed");
        let mut all = vec![lexer.current().clone()];
        while *lexer.current() != Token::Eof {
            all.push(lexer.advance().clone());
        }
        all
    }

    fn id(name: &str) -> Token {
        Token::Id(name.to_string())
    }

    #[test]
    fn plain_assignment() {
        assert_eq!(
            tokens("x = 1\n"),
            vec![
                id("x"),
                Token::Char('='),
                Token::Number(1),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn indented_block() {
        assert_eq!(
            tokens("if x == 2:\n  y = 3\n"),
            vec![
                Token::If,
                id("x"),
                Token::Eq,
                Token::Number(2),
                Token::Char(':'),
                Token::Newline,
                Token::Indent,
                id("y"),
                Token::Char('='),
                Token::Number(3),
                Token::Newline,
                Token::Dedent,
                Token::Eof
            ]
        );
    }

    #[test]
    fn missing_final_newline_is_synthesized() {
        assert_eq!(
            tokens("x = 1"),
            vec![
                id("x"),
                Token::Char('='),
                Token::Number(1),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn leading_blank_lines_are_consumed() {
        assert_eq!(
            tokens("\n\n\nx = 1\n"),
            vec![
                id("x"),
                Token::Char('='),
                Token::Number(1),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_collapse() {
        let source = "x = 1\n\n# a note\n   \ny = 2  # trailing\n";
        assert_eq!(
            tokens(source),
            vec![
                id("x"),
                Token::Char('='),
                Token::Number(1),
                Token::Newline,
                id("y"),
                Token::Char('='),
                Token::Number(2),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn nested_dedents_replay_before_eof() {
        let source = "if a:\n  if b:\n    x = 1\n";
        let all = tokens(source);
        let tail = &all[all.len() - 4..];
        assert_eq!(
            tail,
            [Token::Newline, Token::Dedent, Token::Dedent, Token::Eof]
        );
    }

    #[test]
    fn indent_balance_holds() {
        let source = "if a:\n  x = 1\n  if b:\n    y = 2\nz = 3\nif c:\n  w = 4";
        let all = tokens(source);
        let indents = all.iter().filter(|token| **token == Token::Indent).count();
        let dedents = all.iter().filter(|token| **token == Token::Dedent).count();
        assert_eq!(indents, dedents);
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            tokens("a <= b >= c != d == e < f > g\n"),
            vec![
                id("a"),
                Token::LessOrEq,
                id("b"),
                Token::GreaterOrEq,
                id("c"),
                Token::NotEq,
                id("d"),
                Token::Eq,
                id("e"),
                Token::Char('<'),
                id("f"),
                Token::Char('>'),
                id("g"),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            tokens("classes = None\n"),
            vec![
                id("classes"),
                Token::Char('='),
                Token::None,
                Token::Newline,
                Token::Eof
            ]
        );
        assert_eq!(tokens("not True and False or x\n")[..5].to_vec(), vec![
            Token::Not,
            Token::True,
            Token::And,
            Token::False,
            Token::Or,
        ]);
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(
            tokens(r"s = 'a\n\t\\\'b'" ),
            vec![
                id("s"),
                Token::Char('='),
                Token::String("a\n\t\\'b".to_string()),
                Token::Newline,
                Token::Eof
            ]
        );
        assert_eq!(
            tokens("s = \"it's\"\n"),
            vec![
                id("s"),
                Token::Char('='),
                Token::String("it's".to_string()),
                Token::Newline,
                Token::Eof
            ]
        );
    }

    #[test]
    fn malformed_strings_are_rejected() {
        assert!(Lexer::new(r"x = '\q'").is_err());
        assert!(Lexer::new("x = 'abc").is_err());
        assert!(Lexer::new("x = \"abc\n\"").is_err());
    }

    #[test]
    fn oversized_number_is_rejected() {
        assert!(Lexer::new("x = 99999999999\n").is_err());
        assert!(Lexer::new("x = 2147483647\n").is_ok());
    }

    #[test]
    fn odd_indentation_is_rejected() {
        assert!(Lexer::new("if a:\n   x = 1\n").is_err());
        assert!(Lexer::new("if a:\n  x = 1\n").is_ok());
    }

    #[test]
    fn advance_is_a_no_op_at_eof() {
        let mut lexer = Lexer::new("").expect("lexing failed");
        assert_eq!(*lexer.current(), Token::Eof);
        assert_eq!(*lexer.advance(), Token::Eof);
        assert_eq!(*lexer.advance(), Token::Eof);
    }

    #[test]
    fn expect_checks_kind_and_payload() {
        let mut lexer = Lexer::new("x = 1\n").expect("lexing failed");
        assert_eq!(lexer.expect_id().expect("expected an identifier"), "x");
        assert!(lexer.expect(&Token::Id("x".to_string())).is_ok());
        assert!(lexer.expect(&Token::Id("y".to_string())).is_err());
        assert!(lexer.expect_next(&Token::Char('=')).is_ok());
        assert!(lexer.expect_next(&Token::Number(2)).is_err());
    }

    #[test]
    fn unknown_characters_become_char_tokens() {
        assert_eq!(
            tokens("x @ y\n"),
            vec![
                id("x"),
                Token::Char('@'),
                id("y"),
                Token::Newline,
                Token::Eof
            ]
        );
    }
}
