//! Centralised error hierarchy for the **Rose interpreter**.
//!
//! The scanner and parser report their diagnostics as one of the variants
//! defined here, and the evaluator uses it for the few conditions that end a
//! run outright.  Ordinary runtime failures are *not* errors: they travel as
//! [`Value::RuntimeError`](crate::value::Value::RuntimeError) through
//! expression evaluation and are printed like any other value.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoseError {
    /// A byte that cannot begin any token.
    #[error("[line {line}] Error: Unexpected character: {character}")]
    UnexpectedCharacter { character: char, line: usize },

    /// End of input reached before the closing `"`.
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },

    /// A `.` after digits that is not followed by another digit.
    #[error("[line {line}] Error: Malformed number '{lexeme}'.")]
    MalformedNumber { lexeme: String, line: usize },

    #[error("[line {line}] Error: Expected variable name.")]
    ExpectedVarName { line: usize },

    #[error("[line {line}] Error: Expected '=' after variable name.")]
    ExpectedEquals { line: usize },

    #[error("[line {line}] Error: Expected ';' after {after}.")]
    ExpectedSemicolon { after: &'static str, line: usize },

    #[error("[line {line}] Error: Expected '(' after {after}.")]
    ExpectedLeftParen { after: &'static str, line: usize },

    #[error("[line {line}] Error: Expected ')' after {after}.")]
    ExpectedRightParen { after: &'static str, line: usize },

    #[error("[line {line}] Error: Expected '}}' after block.")]
    ExpectedRightBrace { line: usize },

    /// The pre-clause of a `for` loop must be a `var` declaration.
    #[error("[line {line}] Error: Expected 'var' declaration in for loop.")]
    ExpectedLoopVariable { line: usize },

    /// `=` whose left-hand side is not a plain identifier.
    #[error("[line {line}] Error: Invalid assignment target.")]
    InvalidAssignmentTarget { line: usize },

    /// No expression could start at the current token.
    #[error("[line {line}] Error: Unexpected end: expected expression, found {found}.")]
    UnexpectedEnd { found: String, line: usize },

    /// Call expressions have no runtime meaning and stop the program.
    #[error("[line {line}] Fatal: Call expressions are not supported.")]
    UnsupportedCall { line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on writes
    /// to the output channel.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RoseError {
    /// Helper constructor for the **scanner**'s malformed-number case.
    pub fn malformed_number<S: Into<String>>(line: usize, lexeme: S) -> Self {
        let lexeme: String = lexeme.into();

        info!("Creating MalformedNumber error: line={}, lexeme={}", line, lexeme);

        RoseError::MalformedNumber { lexeme, line }
    }

    /// Helper constructor for the **parser** when no expression can start.
    pub fn unexpected_end<S: Into<String>>(line: usize, found: S) -> Self {
        let found: String = found.into();

        info!("Creating UnexpectedEnd error: line={}, found={}", line, found);

        RoseError::UnexpectedEnd { found, line }
    }

    /// Line the diagnostic points at.  `None` for I/O failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            RoseError::UnexpectedCharacter { line, .. }
            | RoseError::UnterminatedString { line }
            | RoseError::MalformedNumber { line, .. }
            | RoseError::ExpectedVarName { line }
            | RoseError::ExpectedEquals { line }
            | RoseError::ExpectedSemicolon { line, .. }
            | RoseError::ExpectedLeftParen { line, .. }
            | RoseError::ExpectedRightParen { line, .. }
            | RoseError::ExpectedRightBrace { line }
            | RoseError::ExpectedLoopVariable { line }
            | RoseError::InvalidAssignmentTarget { line }
            | RoseError::UnexpectedEnd { line, .. }
            | RoseError::UnsupportedCall { line } => Some(*line),
            RoseError::Io(_) => None,
        }
    }

    /// The diagnostic text without the `[line N]` prefix.
    pub fn message(&self) -> String {
        let rendered: String = self.to_string();

        match rendered.split_once("] ") {
            Some((prefix, rest)) if prefix.starts_with("[line ") => rest.to_string(),
            _ => rendered,
        }
    }

    /// `true` for scanner and parser diagnostics.
    pub fn is_diagnostic(&self) -> bool {
        !matches!(self, RoseError::UnsupportedCall { .. } | RoseError::Io(_))
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, RoseError>;
