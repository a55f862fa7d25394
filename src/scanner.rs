//! Module `scanner` implements a one‑pass, streaming lexer for the Rose language.
//!
//! It transforms a byte slice (`&[u8]`) into a sequence of [`Token`]s, skipping
//! whitespace and emitting exactly one `EOF` token at the end.  Designed as a
//! `FusedIterator`, it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a [u8]) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, RoseError>` on each `.next()`.  Scan errors are
//!   fatal: after the first `Err` the iterator is exhausted and no `EOF` is
//!   produced.
//!
//! - `tokenize(src: &[u8]) -> Result<Vec<Token>>`
//!   Collects the whole sequence, or returns the first scan error.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `{`, `}`, `(`, `)`, `;`, `,`, `.`, `+`, `-`,
//!   `*`, `/`, `|`, `&`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=`.
//! - String literals: `"` … `"`, may span lines; the closing quote is located
//!   with `memchr`.
//! - Numeric literals: digits with an optional `.digits` fraction.  A `.` that
//!   is not followed by a digit is a `MalformedNumber`.
//! - Identifiers/keywords: letter or `_` first, then alphanumerics or `_`,
//!   resolved through the perfect‑hash `KEYWORDS` map.
//!
//! # Example
//!
//! ```rust
//! use rose_interpreter::scanner::Scanner;
//!
//! let mut scanner = Scanner::new(b"print 123;");
//! for result in &mut scanner {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("{}", err),
//!     }
//! }
//! ```

use crate::error::{RoseError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::{memchr, memchr_iter};
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"or"     => TokenType::OR,
    b"if"     => TokenType::IF,
    b"else"   => TokenType::ELSE,
    b"while"  => TokenType::WHILE,
    b"fn"     => TokenType::FN,
    b"for"    => TokenType::FOR,
    b"return" => TokenType::RETURN,
    b"var"    => TokenType::VAR,
    b"struct" => TokenType::STRUCT,
    b"print"  => TokenType::PRINT,
    b"true"   => TokenType::TRUE,
    b"false"  => TokenType::FALSE,
};

/// Scan the whole buffer.  Stops at the first error; on success the returned
/// sequence always ends with exactly one `EOF` token.
pub fn tokenize(src: &[u8]) -> Result<Vec<Token>> {
    let tokens: Vec<Token> = Scanner::new(src).collect::<Result<Vec<Token>>>()?;

    info!("Tokenized {} bytes into {} tokens", src.len(), tokens.len());

    Ok(tokens)
}

/// A single pass **scanner / lexer** that converts raw bytes into a sequence
/// of [`Token`]s.
pub struct Scanner<'a> {
    src: &'a [u8],              // entire source buffer
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a [u8]) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Pick the two-byte kind when the next byte is `=`.
    #[inline(always)]
    fn with_equal(&mut self, double: TokenType, single: TokenType) -> TokenType {
        if self.match_byte(b'=') {
            double
        } else {
            single
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  If the lexeme produces
    /// an actual token the kind is stored in `self.pending`; whitespace leaves
    /// `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        let tt: TokenType = match b {
            // ── single‑character punctuators ──────────────────────────────
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b';' => TokenType::SEMICOLON,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'+' => TokenType::PLUS,
            b'-' => TokenType::MINUS,
            b'*' => TokenType::STAR,
            b'/' => TokenType::SLASH,
            b'|' => TokenType::PIPE,
            b'&' => TokenType::AMPERSAND,

            // ── two‑character operators (!=, ==, <=, >=) ─────────────────
            b'!' => self.with_equal(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.with_equal(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.with_equal(TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.with_equal(TokenType::GREATER_EQUAL, TokenType::GREATER),

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => return Ok(()),

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            b'"' => self.parse_string()?,

            b'0'..=b'9' => self.parse_number()?,

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.parse_identifier(),

            _ => {
                return Err(RoseError::UnexpectedCharacter {
                    character: char::from(b),
                    line: self.line,
                });
            }
        };

        self.pending = Some(tt);

        Ok(())
    }

    /// Parse a double‑quoted string literal.
    ///
    /// * `self.start` still points to the opening `"`.
    /// * On success `self.curr` points **past** the closing `"`.
    fn parse_string(&mut self) -> Result<TokenType> {
        let rest: &[u8] = &self.src[self.curr..];

        let Some(pos) = memchr(b'"', rest) else {
            debug!("Unterminated string starting on line {}", self.line);

            return Err(RoseError::UnterminatedString { line: self.line });
        };

        self.line += memchr_iter(b'\n', &rest[..pos]).count();
        self.curr += pos + 1; // body plus closing quote

        Ok(TokenType::STRING)
    }

    /// Parse a numeric literal (`123`, `3.14`).  Fractions are optional, but a
    /// dot must be followed by at least one digit.
    fn parse_number(&mut self) -> Result<TokenType> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.match_byte(b'.') {
            if !self.peek().is_ascii_digit() {
                let lexeme = String::from_utf8_lossy(&self.src[self.start..self.curr]);

                return Err(RoseError::malformed_number(self.line, lexeme));
            }

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        Ok(TokenType::NUMBER)
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) -> TokenType {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        KEYWORDS
            .get(slice)
            .copied()
            .unwrap_or(TokenType::IDENTIFIER)
    }

    /// Source text of the token just scanned.  Strings drop their quotes.
    fn lexeme(&self, tt: TokenType) -> String {
        let slice: &[u8] = match tt {
            TokenType::STRING => &self.src[self.start + 1..self.curr - 1],
            _ => &self.src[self.start..self.curr],
        };

        String::from_utf8_lossy(slice).into_owned()
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        // Loop until we either emit a token, hit EOF, or see an error.
        while self.curr <= self.len() {
            // 1. EOF guard – emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::eof(self.line)));
            }

            // 2. Reset per‑token state.
            self.start = self.curr;
            self.pending = None;

            // 3. Attempt to scan a token; errors end the stream.
            if let Err(e) = self.scan_token() {
                self.curr = self.len() + 1;
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                debug!("Scanned token ({}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, self.lexeme(tt), self.line)));
            }
            // Otherwise it was whitespace → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
