use std::io::{self, Stdout, Write};

use log::{debug, info, warn};

use crate::environment::Environment;
use crate::error::{Result, RoseError};
use crate::expr::{Expr, ExprVisitor};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Tree-walking evaluator.  Each executed `print` writes one `> value` line
/// to `out`.
pub struct Interpreter<W: Write = Stdout> {
    environment: Environment,
    out: W,
}

impl Interpreter<Stdout> {
    /// Interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        info!("Initializing Interpreter");

        Self {
            environment: Environment::new(),
            out,
        }
    }

    /// Interprets a list of statements (a "program"), top to bottom.  Only a
    /// fatal condition or a failed write stops it early.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            self.execute(stmt)?;
        }

        self.out.flush()?;

        info!("Interpretation completed successfully");
        Ok(())
    }

    pub fn execute(&mut self, stmt: &Stmt) -> Result<()> {
        stmt.accept(self)
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        expr.accept(self)
    }

    /// The output sink, e.g. to inspect a captured buffer.
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Assignment: only an existing binding can be overwritten.
    fn assign(&mut self, target: &Expr, value_expr: &Expr) -> Result<Value> {
        let Expr::Literal { value: name } = target else {
            return Ok(Value::error("invalid assignment target"));
        };

        let value: Value = self.evaluate(value_expr)?;

        if self.environment.assign(&name.lexeme, value.clone()) {
            debug!("Assigned {} to '{}'", value, name.lexeme);
            Ok(value)
        } else {
            warn!(
                "Assignment to undeclared variable '{}' on line {}",
                name.lexeme, name.line
            );
            Ok(undefined(&name.lexeme))
        }
    }
}

fn undefined(name: &str) -> Value {
    Value::RuntimeError(format!("undefined variable '{}'", name))
}

// ───────────────────── derived comparisons ─────────────────────
//
// Only `==` and `<` are primitive.  Each helper stops at the first
// constituent that yields a `RuntimeError`.

fn not_equal(left: &Value, right: &Value) -> Value {
    left.binary(TokenType::EQUAL_EQUAL, right).unary(TokenType::BANG)
}

fn less_equal(left: &Value, right: &Value) -> Value {
    let less: Value = left.binary(TokenType::LESS, right);
    if less.is_error() {
        return less;
    }

    let equal: Value = left.binary(TokenType::EQUAL_EQUAL, right);
    if equal.is_error() {
        return equal;
    }

    match (&less, &equal) {
        (Value::Bool(a), Value::Bool(b)) => Value::Bool(*a || *b),
        _ => Value::RuntimeError(format!(
            "unsupported operation of ({} and {})",
            less.type_name(),
            equal.type_name()
        )),
    }
}

fn greater(left: &Value, right: &Value) -> Value {
    less_equal(left, right).unary(TokenType::BANG)
}

fn greater_equal(left: &Value, right: &Value) -> Value {
    left.binary(TokenType::LESS, right).unary(TokenType::BANG)
}

impl<W: Write> ExprVisitor<Result<Value>> for Interpreter<W> {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        if operator.token_type == TokenType::EQUAL {
            return self.assign(left, right);
        }

        let left_val: Value = self.evaluate(left)?;
        let right_val: Value = self.evaluate(right)?;
        debug!("Binary {} on {} and {}", operator.lexeme, left_val, right_val);

        let value: Value = match operator.token_type {
            TokenType::BANG_EQUAL => not_equal(&left_val, &right_val),
            TokenType::LESS_EQUAL => less_equal(&left_val, &right_val),
            TokenType::GREATER => greater(&left_val, &right_val),
            TokenType::GREATER_EQUAL => greater_equal(&left_val, &right_val),
            op => left_val.binary(op, &right_val),
        };

        Ok(value)
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let value: Value = self.evaluate(right)?;

        Ok(value.unary(operator.token_type))
    }

    fn visit_grouping(&mut self, inner: &Expr) -> Result<Value> {
        self.evaluate(inner)
    }

    fn visit_call(&mut self, _callee: &Expr, paren: &Token, _arguments: &[Expr]) -> Result<Value> {
        debug!("Call expression on line {} stops the program", paren.line);

        Err(RoseError::UnsupportedCall { line: paren.line })
    }

    fn visit_literal(&mut self, value: &Token) -> Result<Value> {
        let lexeme: &str = &value.lexeme;

        let val: Value = match value.token_type {
            TokenType::IDENTIFIER => self
                .environment
                .get(lexeme)
                .cloned()
                .unwrap_or_else(|| undefined(lexeme)),
            TokenType::STRING => Value::Str(lexeme.to_string()),
            TokenType::NUMBER => lexeme.parse::<i64>().map_or_else(
                |_| Value::RuntimeError(format!("invalid integer literal '{}'", lexeme)),
                Value::Int,
            ),
            TokenType::TRUE => Value::Bool(true),
            TokenType::FALSE => Value::Bool(false),
            other => Value::RuntimeError(format!("invalid literal token {}", other)),
        };

        Ok(val)
    }
}

impl<W: Write> StmtVisitor<Result<()>> for Interpreter<W> {
    fn visit_expression(&mut self, expr: &Expr) -> Result<()> {
        let value: Value = self.evaluate(expr)?;

        if let Value::RuntimeError(message) = &value {
            warn!("Discarded runtime error on line {}: {}", expr.line(), message);
        }

        Ok(())
    }

    fn visit_print(&mut self, expr: &Expr) -> Result<()> {
        let value: Value = self.evaluate(expr)?;

        writeln!(self.out, "> {}", value)?;

        debug!("Printed value: {}", value);
        Ok(())
    }

    fn visit_block(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Entering block with {} statements", statements.len());

        self.environment.push();
        let result: Result<()> = statements.iter().try_for_each(|stmt| self.execute(stmt));
        self.environment.pop();

        result
    }

    fn visit_if(&mut self, condition: &Expr, body: &Stmt) -> Result<()> {
        if self.check_condition(condition)? {
            self.execute(body)?;
        }

        Ok(())
    }

    fn visit_var_decl(&mut self, name: &Token, init: &Expr) -> Result<()> {
        let value: Value = self.evaluate(init)?;

        debug!("Variable '{}' defined with value: {}", name.lexeme, value);

        self.environment.define(&name.lexeme, value);
        Ok(())
    }

    fn visit_for(&mut self, init: &Stmt, condition: &Expr, post: &Expr, body: &Stmt) -> Result<()> {
        // No child scope: the loop variable outlives the loop.
        self.execute(init)?;

        while self.check_condition(condition)? {
            self.execute(body)?;
            self.evaluate(post)?;
        }

        debug!("Exited for loop");
        Ok(())
    }
}

impl<W: Write> Interpreter<W> {
    /// Evaluate a branch or loop condition.  Only `Bool(true)` passes;
    /// anything else, including a `RuntimeError`, reads as false.
    fn check_condition(&mut self, condition: &Expr) -> Result<bool> {
        let value: Value = self.evaluate(condition)?;

        if !matches!(value, Value::Bool(_)) {
            warn!(
                "Non-boolean condition on line {} treated as false: {}",
                condition.line(),
                value
            );
        }

        Ok(value.is_true())
    }
}
