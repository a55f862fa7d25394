//! Interpreter-visible values and their operator contracts.
//!
//! Every operation here is total.  Unsupported combinations produce a
//! [`Value::RuntimeError`] instead of failing, and an error operand is
//! returned unchanged by any further operation on it (left operand first).

use std::fmt;

use crate::token::TokenType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    RuntimeError(String),
}

impl Value {
    pub fn error<S: Into<String>>(message: S) -> Self {
        Value::RuntimeError(message.into())
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "String",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::RuntimeError(_) => "RuntimeError",
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Value::RuntimeError(_))
    }

    /// `true` only for `Bool(true)`.  Every other value, errors included,
    /// counts as false.
    pub const fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// `self <op> other`.
    pub fn binary(&self, op: TokenType, other: &Value) -> Value {
        match (self, other) {
            (Value::RuntimeError(_), _) => self.clone(),
            (_, Value::RuntimeError(_)) => other.clone(),

            (Value::Str(a), Value::Str(b)) => match op {
                TokenType::PLUS => Value::Str(format!("{}{}", a, b)),
                TokenType::EQUAL_EQUAL => Value::Bool(a == b),
                TokenType::LESS => Value::Bool(a < b),
                _ => unsupported(self, other),
            },

            (Value::Int(a), Value::Int(b)) => {
                int_binary(op, *a, *b).unwrap_or_else(|| unsupported(self, other))
            }

            (Value::Bool(a), Value::Bool(b)) => match op {
                TokenType::EQUAL_EQUAL => Value::Bool(a == b),
                _ => unsupported(self, other),
            },

            _ => unsupported(self, other),
        }
    }

    /// `<op> self`.
    pub fn unary(&self, op: TokenType) -> Value {
        match (self, op) {
            (Value::RuntimeError(_), _) => self.clone(),
            (Value::Int(n), TokenType::MINUS) => n
                .checked_neg()
                .map_or_else(|| Value::error("integer overflow"), Value::Int),
            (Value::Bool(b), TokenType::BANG) => Value::Bool(!b),
            _ => unsupported(self, self),
        }
    }

    /// `self(args)`.  No value kind is callable.
    pub fn call(&self, _args: &[Value]) -> Value {
        match self {
            Value::RuntimeError(_) => self.clone(),
            _ => unsupported(self, self),
        }
    }
}

/// Integer arithmetic, bitwise and comparison operators.  `None` means the
/// operator is not defined for `Int`.
fn int_binary(op: TokenType, a: i64, b: i64) -> Option<Value> {
    let checked = |result: Option<i64>, message: &str| {
        result.map_or_else(|| Value::error(message), Value::Int)
    };

    let value: Value = match op {
        TokenType::PLUS => checked(a.checked_add(b), "integer overflow"),
        TokenType::MINUS => checked(a.checked_sub(b), "integer overflow"),
        TokenType::STAR => checked(a.checked_mul(b), "integer overflow"),
        TokenType::SLASH if b == 0 => Value::error("division by zero"),
        TokenType::SLASH => checked(a.checked_div(b), "integer overflow"),
        TokenType::PIPE => Value::Int(a | b),
        TokenType::AMPERSAND => Value::Int(a & b),
        TokenType::EQUAL_EQUAL => Value::Bool(a == b),
        TokenType::LESS => Value::Bool(a < b),
        _ => return None,
    };

    Some(value)
}

fn unsupported(a: &Value, b: &Value) -> Value {
    Value::RuntimeError(format!(
        "unsupported operation of ({} and {})",
        a.type_name(),
        b.type_name()
    ))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),

            Value::Int(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::Bool(b) => write!(f, "{}", b),

            Value::RuntimeError(message) => write!(f, "{}", message),
        }
    }
}
