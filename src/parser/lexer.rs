//! Lexer (tokenizer) for C expression source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Whitespace and comments are skipped (never emitted) but still
//! advance the line/column counters, including newlines embedded in block
//! comments. Multi-character operators are matched greedily, longest first,
//! so `<<=` wins over `<<` and `<<` over `<`.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, kept as raw source text. The base (hex, binary,
    /// octal, decimal, float) is resolved at evaluation time.
    Number(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Type keywords
    Int(SourceLocation),
    Float(SourceLocation),
    Char(SourceLocation),
    Void(SourceLocation),
    Double(SourceLocation),
    Long(SourceLocation),
    Short(SourceLocation),
    Signed(SourceLocation),
    Unsigned(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Bitwise
    Amp(SourceLocation),   // &
    Pipe(SourceLocation),  // |
    Caret(SourceLocation), // ^
    Tilde(SourceLocation), // ~
    Shl(SourceLocation),   // <<
    Shr(SourceLocation),   // >>

    // Assignment
    Eq(SourceLocation),        // =
    PlusEq(SourceLocation),    // +=
    MinusEq(SourceLocation),   // -=
    StarEq(SourceLocation),    // *=
    SlashEq(SourceLocation),   // /=
    PercentEq(SourceLocation), // %=
    ShlEq(SourceLocation),     // <<=
    ShrEq(SourceLocation),     // >>=
    AmpEq(SourceLocation),     // &=
    CaretEq(SourceLocation),   // ^=
    PipeEq(SourceLocation),    // |=

    // Increment/Decrement
    PlusPlus(SourceLocation),   // ++
    MinusMinus(SourceLocation), // --

    // Ternary
    Question(SourceLocation), // ?
    Colon(SourceLocation),    // :

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,
    Arrow(SourceLocation),     // ->

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Number(_, loc)
            | Token::Ident(_, loc)
            | Token::Int(loc)
            | Token::Float(loc)
            | Token::Char(loc)
            | Token::Void(loc)
            | Token::Double(loc)
            | Token::Long(loc)
            | Token::Short(loc)
            | Token::Signed(loc)
            | Token::Unsigned(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Amp(loc)
            | Token::Pipe(loc)
            | Token::Caret(loc)
            | Token::Tilde(loc)
            | Token::Shl(loc)
            | Token::Shr(loc)
            | Token::Eq(loc)
            | Token::PlusEq(loc)
            | Token::MinusEq(loc)
            | Token::StarEq(loc)
            | Token::SlashEq(loc)
            | Token::PercentEq(loc)
            | Token::ShlEq(loc)
            | Token::ShrEq(loc)
            | Token::AmpEq(loc)
            | Token::CaretEq(loc)
            | Token::PipeEq(loc)
            | Token::PlusPlus(loc)
            | Token::MinusMinus(loc)
            | Token::Question(loc)
            | Token::Colon(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Arrow(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// The type-keyword spelling, for declaration parsing. `None` when the
    /// token is not a type keyword.
    pub fn type_keyword(&self) -> Option<&'static str> {
        match self {
            Token::Int(_) => Some("int"),
            Token::Float(_) => Some("float"),
            Token::Char(_) => Some("char"),
            Token::Void(_) => Some("void"),
            Token::Double(_) => Some("double"),
            Token::Long(_) => Some("long"),
            Token::Short(_) => Some("short"),
            Token::Signed(_) => Some("signed"),
            Token::Unsigned(_) => Some("unsigned"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text, _) => write!(f, "number literal {}", text),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Float(_) => write!(f, "'float'"),
            Token::Char(_) => write!(f, "'char'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::Double(_) => write!(f, "'double'"),
            Token::Long(_) => write!(f, "'long'"),
            Token::Short(_) => write!(f, "'short'"),
            Token::Signed(_) => write!(f, "'signed'"),
            Token::Unsigned(_) => write!(f, "'unsigned'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::Pipe(_) => write!(f, "'|'"),
            Token::Caret(_) => write!(f, "'^'"),
            Token::Tilde(_) => write!(f, "'~'"),
            Token::Shl(_) => write!(f, "'<<'"),
            Token::Shr(_) => write!(f, "'>>'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::PlusEq(_) => write!(f, "'+='"),
            Token::MinusEq(_) => write!(f, "'-='"),
            Token::StarEq(_) => write!(f, "'*='"),
            Token::SlashEq(_) => write!(f, "'/='"),
            Token::PercentEq(_) => write!(f, "'%='"),
            Token::ShlEq(_) => write!(f, "'<<='"),
            Token::ShrEq(_) => write!(f, "'>>='"),
            Token::AmpEq(_) => write!(f, "'&='"),
            Token::CaretEq(_) => write!(f, "'^='"),
            Token::PipeEq(_) => write!(f, "'|='"),
            Token::PlusPlus(_) => write!(f, "'++'"),
            Token::MinusMinus(_) => write!(f, "'--'"),
            Token::Question(_) => write!(f, "'?'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Arrow(_) => write!(f, "'->'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type: illegal character or unterminated block comment.
#[derive(Debug, Clone, Error)]
#[error("Lexical error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for C expression source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            // Numeric literals
            '0'..='9' => Ok(self.number_literal(ch, loc)),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            // Operators and punctuation
            '+' => {
                if self.peek() == Some('+') {
                    self.advance();
                    Ok(Token::PlusPlus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PlusEq(loc))
                } else {
                    Ok(Token::Plus(loc))
                }
            }
            '-' => {
                if self.peek() == Some('-') {
                    self.advance();
                    Ok(Token::MinusMinus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::MinusEq(loc))
                } else if self.peek() == Some('>') {
                    self.advance();
                    Ok(Token::Arrow(loc))
                } else {
                    Ok(Token::Minus(loc))
                }
            }
            '*' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::StarEq(loc))
                } else {
                    Ok(Token::Star(loc))
                }
            }
            '/' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::SlashEq(loc))
                } else {
                    Ok(Token::Slash(loc))
                }
            }
            '%' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PercentEq(loc))
                } else {
                    Ok(Token::Percent(loc))
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::EqEq(loc))
                } else {
                    Ok(Token::Eq(loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq(loc))
                } else {
                    Ok(Token::Bang(loc))
                }
            }
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Ok(Token::ShlEq(loc))
                    } else {
                        Ok(Token::Shl(loc))
                    }
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le(loc))
                } else {
                    Ok(Token::Lt(loc))
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Ok(Token::ShrEq(loc))
                    } else {
                        Ok(Token::Shr(loc))
                    }
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge(loc))
                } else {
                    Ok(Token::Gt(loc))
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::AndAnd(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::AmpEq(loc))
                } else {
                    Ok(Token::Amp(loc))
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PipeEq(loc))
                } else {
                    Ok(Token::Pipe(loc))
                }
            }
            '^' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::CaretEq(loc))
                } else {
                    Ok(Token::Caret(loc))
                }
            }
            '~' => Ok(Token::Tilde(loc)),
            '?' => Ok(Token::Question(loc)),
            ':' => Ok(Token::Colon(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Illegal character '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Lex a numeric literal, keeping its raw text.
    ///
    /// Shapes: `0x`/`0X` hex, `0b`/`0B` binary, decimal digits with optional
    /// fraction and/or exponent. A leading `0` followed by more digits lexes
    /// as a single token here and resolves as octal during evaluation. The
    /// exponent marker is consumed only when at least one digit follows it,
    /// so `12e` lexes as the number `12` and the identifier `e`.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_digit);

        // Hex and binary prefixes require at least one digit after the base
        // marker; otherwise the marker is left for the next token.
        if first_digit == '0' {
            if let Some(marker) = self.peek() {
                let is_hex = marker == 'x' || marker == 'X';
                let is_bin = marker == 'b' || marker == 'B';
                let digit_ok = |c: char| {
                    if is_hex {
                        c.is_ascii_hexdigit()
                    } else {
                        c == '0' || c == '1'
                    }
                };

                if (is_hex || is_bin) && self.peek_ahead(1).is_some_and(digit_ok) {
                    text.push(marker);
                    self.advance();
                    while let Some(ch) = self.peek() {
                        if digit_ok(ch) {
                            text.push(ch);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    return Token::Number(text, loc);
                }
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Optional fraction: digits after the point may be empty ("12.")
        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Optional exponent, only when a digit actually follows
        if let Some(e) = self.peek() {
            if e == 'e' || e == 'E' {
                let (sign_len, digit_at) = match self.peek_ahead(1) {
                    Some('+') | Some('-') => (1, 2),
                    _ => (0, 1),
                };
                if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    text.push(e);
                    self.advance();
                    if sign_len == 1 {
                        if let Some(sign) = self.advance() {
                            text.push(sign);
                        }
                    }
                    while let Some(ch) = self.peek() {
                        if ch.is_ascii_digit() {
                            text.push(ch);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        Token::Number(text, loc)
    }

    /// Lex an identifier or type keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Keywords only match whole words; the loop above has already
        // consumed the full identifier, so a prefix like "integer" falls
        // through to Ident.
        match ident.as_str() {
            "int" => Token::Int(loc),
            "float" => Token::Float(loc),
            "char" => Token::Char(loc),
            "void" => Token::Void(loc),
            "double" => Token::Double(loc),
            "long" => Token::Long(loc),
            "short" => Token::Short(loc),
            "signed" => Token::Signed(loc),
            "unsigned" => Token::Unsigned(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */); newlines inside still advance
    /// the line counter via `advance`.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
