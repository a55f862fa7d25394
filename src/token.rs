use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the Rose scanner.
///
/// Literal classes (`IDENTIFIER`, `STRING`, `NUMBER`) carry no payload: the
/// value is recovered from the token's lexeme when it is evaluated.
/// `EOF` marks the end of input.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// ';'
    SEMICOLON,

    /// ','
    COMMA,

    /// '.'
    DOT,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '*'
    STAR,

    /// '/'
    SLASH,

    /// '|'
    PIPE,

    /// '&'
    AMPERSAND,

    /// '!'
    BANG,

    /// '='
    EQUAL,

    /// '<'
    LESS,

    /// '>'
    GREATER,

    /// '=='
    EQUAL_EQUAL,

    /// '!='
    BANG_EQUAL,

    /// '<='
    LESS_EQUAL,

    /// '>='
    GREATER_EQUAL,

    /// A user‑defined identifier
    IDENTIFIER,

    /// A string literal (lexeme holds the contents without quotes)
    STRING,

    /// A numeric literal
    NUMBER,

    /// 'and'
    AND,

    /// 'or'
    OR,

    /// 'if'
    IF,

    /// 'else'
    ELSE,

    /// 'while'
    WHILE,

    /// 'fn'
    FN,

    /// 'for'
    FOR,

    /// 'return'
    RETURN,

    /// 'var'
    VAR,

    /// 'struct'
    STRUCT,

    /// 'print'
    PRINT,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Variant name as printed by the `tokenize` command.
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::COMMA => "COMMA",
            TokenType::DOT => "DOT",
            TokenType::PLUS => "PLUS",
            TokenType::MINUS => "MINUS",
            TokenType::STAR => "STAR",
            TokenType::SLASH => "SLASH",
            TokenType::PIPE => "PIPE",
            TokenType::AMPERSAND => "AMPERSAND",
            TokenType::BANG => "BANG",
            TokenType::EQUAL => "EQUAL",
            TokenType::LESS => "LESS",
            TokenType::GREATER => "GREATER",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::LESS_EQUAL => "LESS_EQUAL",
            TokenType::GREATER_EQUAL => "GREATER_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::STRING => "STRING",
            TokenType::NUMBER => "NUMBER",
            TokenType::AND => "AND",
            TokenType::OR => "OR",
            TokenType::IF => "IF",
            TokenType::ELSE => "ELSE",
            TokenType::WHILE => "WHILE",
            TokenType::FN => "FN",
            TokenType::FOR => "FOR",
            TokenType::RETURN => "RETURN",
            TokenType::VAR => "VAR",
            TokenType::STRUCT => "STRUCT",
            TokenType::PRINT => "PRINT",
            TokenType::TRUE => "TRUE",
            TokenType::FALSE => "FALSE",
            TokenType::EOF => "EOF",
        }
    }

    /// Keywords that open a new declaration or statement.  The parser
    /// resynchronises in front of these after an error.
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenType::FN
                | TokenType::VAR
                | TokenType::IF
                | TokenType::ELSE
                | TokenType::RETURN
                | TokenType::FOR
                | TokenType::STRUCT
                | TokenType::PRINT
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token, including its type, the original lexeme,
/// and the line number where it was found.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Token {
    /// The category of this token.
    pub token_type: TokenType,

    /// The substring of the source that produced this token.  For strings,
    /// the text between the quotes.
    pub lexeme: String,

    /// Byte length of `lexeme`.
    pub length: usize,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    /// Create a new Token with the given type, lexeme, and line.
    pub fn new<S: Into<String>>(token_type: TokenType, lexeme: S, line: usize) -> Self {
        let lexeme: String = lexeme.into();

        debug!(
            "Creating new token: type={}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            length: lexeme.len(),
            lexeme,
            line,
        }
    }

    /// The single end-of-input token.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenType::EOF, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::STRING => write!(f, "{} \"{}\"", self.token_type, self.lexeme),
            TokenType::EOF => write!(f, "{}", self.token_type),
            _ => write!(f, "{} {}", self.token_type, self.lexeme),
        }
    }
}
