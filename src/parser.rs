/*!
Recursive‑descent parser for Rose.

Consumes the scanner's token sequence (which always ends in `EOF`) and builds
[`Stmt`] trees.  Errors do not stop the parse: each malformed declaration
records one diagnostic, the parser resynchronises at the next statement
boundary and carries on, and every collected diagnostic is returned together.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `declaration`, `statement`   | `debug`| High‑level descent into grammar branches. |
| Error recovery               | `debug`| Tokens discarded by `synchronize`.        |

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → declaration* EOF ;
declaration    → varDecl | statement ;
varDecl        → "var" IDENT "=" expression ";" ;
statement      → printStmt | block | ifStmt | forStmt | exprStmt ;
printStmt      → "print" expression ";" ;
block          → "{" declaration* "}" ;
ifStmt         → "if" "(" expression ")" statement ;
forStmt        → "for" "(" varDecl expression ";" expression ")" statement ;
exprStmt       → expression ";" ;
expression     → assignment ;
assignment     → bitwise ( "=" assignment )? ;
bitwise        → equality ( ( "&" | "|" ) equality )* ;
equality       → comparison ( ( "==" | "!=" ) comparison )* ;
comparison     → term ( ( "<" | "<=" | ">" | ">=" ) term )* ;
term           → factor ( ( "+" | "-" ) factor )* ;
factor         → unary ( ( "*" | "/" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" )* ;
arguments      → expression ( "," expression )* ;
primary        → NUMBER | STRING | IDENT | "true" | "false"
               | "(" expression ")" ;
```

The assignment target is only checked after the right-hand side parsed, so
`1 + 2 = 3;` is a well-formed expression with an illegal target.
*/

use crate::error::{Result, RoseError};
use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    /// Number of blocks currently open.
    depth: usize,
    errors: Vec<RoseError>,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  `tokens` must end with an `EOF` token, as
    /// produced by [`tokenize`](crate::scanner::tokenize).
    pub fn new(tokens: &'a [Token]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program.  Either every statement parsed, or the full
    /// list of diagnostics is returned and the partial tree is dropped.
    pub fn parse(&mut self) -> std::result::Result<Vec<Stmt>, Vec<RoseError>> {
        let (statements, errors) = self.parse_recovering();

        if errors.is_empty() {
            Ok(statements)
        } else {
            Err(errors)
        }
    }

    /// Parse an entire program, returning the statements that parsed cleanly
    /// alongside every diagnostic, in source order.
    pub fn parse_recovering(&mut self) -> (Vec<Stmt>, Vec<RoseError>) {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        let errors: Vec<RoseError> = std::mem::take(&mut self.errors);

        info!(
            "Parse finished: {} statement(s), {} error(s)",
            statements.len(),
            errors.len()
        );

        (statements, errors)
    }

    // ──────────────────────── declaration rules ───────────────────

    /// Parse one declaration.  On failure the error is recorded, the parser
    /// is resynchronised and `None` is returned.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration at token {}", self.current);

        let start: usize = self.current;

        let result = if self.matches(TokenType::VAR) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                debug!("Parse error: {}", e);
                self.errors.push(e);
                self.synchronize(start);
                None
            }
        }
    }

    /// `"var"` has already been consumed.
    fn var_declaration(&mut self) -> Result<Stmt> {
        if !self.check(TokenType::IDENTIFIER) {
            return Err(RoseError::ExpectedVarName {
                line: self.error_line(),
            });
        }
        let name: Token = self.advance().clone();

        if !self.matches(TokenType::EQUAL) {
            return Err(RoseError::ExpectedEquals {
                line: self.error_line(),
            });
        }

        let init: Expr = self.expression()?;

        self.consume_semicolon("variable declaration")?;

        Ok(Stmt::VarDecl { name, init })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        debug!("Entering statement: {}", self.peek().token_type);

        if self.matches(TokenType::PRINT) {
            self.print_statement()
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block {
                statements: self.block()?,
            })
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::FOR) {
            self.for_statement()
        } else {
            self.expression_statement()
        }
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume_semicolon("value")?;

        Ok(Stmt::Print { expr })
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume_semicolon("expression")?;

        Ok(Stmt::Expression { expr })
    }

    /// `"{"` has already been consumed.  Malformed inner declarations are
    /// recovered here, so only a missing `}` fails the block itself.
    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        self.depth += 1;

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.depth -= 1;

        if !self.matches(TokenType::RIGHT_BRACE) {
            return Err(RoseError::ExpectedRightBrace {
                line: self.error_line(),
            });
        }

        Ok(statements)
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.consume_left_paren("'if'")?;
        let condition: Expr = self.expression()?;
        self.consume_right_paren("if condition")?;

        let body: Box<Stmt> = Box::new(self.statement()?);

        Ok(Stmt::If { condition, body })
    }

    fn for_statement(&mut self) -> Result<Stmt> {
        self.consume_left_paren("'for'")?;

        if !self.matches(TokenType::VAR) {
            return Err(RoseError::ExpectedLoopVariable {
                line: self.error_line(),
            });
        }
        let init: Box<Stmt> = Box::new(self.var_declaration()?);

        let condition: Expr = self.expression()?;
        self.consume_semicolon("loop condition")?;

        let post: Expr = self.expression()?;
        self.consume_right_paren("for clauses")?;

        let body: Box<Stmt> = Box::new(self.statement()?);

        Ok(Stmt::For {
            init,
            condition,
            post,
            body,
        })
    }

    // ───────────────────────── expression rules ───────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.bitwise()?;

        if self.matches(TokenType::EQUAL) {
            let equals: Token = self.previous().clone();
            let rhs: Expr = self.assignment()?;

            let is_identifier: bool = matches!(
                &expr,
                Expr::Literal { value } if value.token_type == TokenType::IDENTIFIER
            );

            if !is_identifier {
                return Err(RoseError::InvalidAssignmentTarget { line: equals.line });
            }

            return Ok(Expr::Binary {
                left: Box::new(expr),
                operator: equals,
                right: Box::new(rhs),
            });
        }

        Ok(expr)
    }

    fn bitwise(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::AMPERSAND, TokenType::PIPE], Self::equality)
    }

    fn equality(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::EQUAL_EQUAL, TokenType::BANG_EQUAL], Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.left_assoc(
            &[
                TokenType::LESS,
                TokenType::LESS_EQUAL,
                TokenType::GREATER,
                TokenType::GREATER_EQUAL,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::PLUS, TokenType::MINUS], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::STAR, TokenType::SLASH], Self::unary)
    }

    /// One left‑associative precedence level: `operand ( op operand )*`.
    fn left_assoc(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr>,
    ) -> Result<Expr> {
        let mut expr: Expr = operand(self)?;

        while self.matches_any(operators) {
            let operator: Token = self.previous().clone();
            let right: Expr = operand(self)?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches_any(&[TokenType::BANG, TokenType::MINUS]) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        while self.matches(TokenType::LEFT_PAREN) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume_right_paren("arguments")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren: self.previous().clone(),
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches_any(&[
            TokenType::NUMBER,
            TokenType::STRING,
            TokenType::IDENTIFIER,
            TokenType::TRUE,
            TokenType::FALSE,
        ]) {
            return Ok(Expr::Literal {
                value: self.previous().clone(),
            });
        }

        if self.matches(TokenType::LEFT_PAREN) {
            let inner: Expr = self.expression()?;

            self.consume_right_paren("expression")?;

            return Ok(Expr::Grouping {
                inner: Box::new(inner),
            });
        }

        let found: &Token = self.peek();
        let found: String = match found.token_type {
            TokenType::EOF => "end of input".to_string(),
            _ => format!("'{}'", found.lexeme),
        };

        Err(RoseError::unexpected_end(self.peek().line, found))
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn matches_any(&mut self, ttypes: &[TokenType]) -> bool {
        ttypes.iter().any(|&ttype| self.matches(ttype))
    }

    fn consume_semicolon(&mut self, after: &'static str) -> Result<()> {
        if self.matches(TokenType::SEMICOLON) {
            return Ok(());
        }

        Err(RoseError::ExpectedSemicolon {
            after,
            line: self.error_line(),
        })
    }

    fn consume_left_paren(&mut self, after: &'static str) -> Result<()> {
        if self.matches(TokenType::LEFT_PAREN) {
            return Ok(());
        }

        Err(RoseError::ExpectedLeftParen {
            after,
            line: self.error_line(),
        })
    }

    fn consume_right_paren(&mut self, after: &'static str) -> Result<()> {
        if self.matches(TokenType::RIGHT_PAREN) {
            return Ok(());
        }

        Err(RoseError::ExpectedRightParen {
            after,
            line: self.error_line(),
        })
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token {
        &self.tokens[self.current - 1]
    }

    /// Line for "expected X" diagnostics: the token the missing piece should
    /// have followed, or the first token of the input.
    fn error_line(&self) -> usize {
        if self.current == 0 {
            self.peek().line
        } else {
            self.previous().line
        }
    }

    /// Discards tokens until it thinks it is at a statement boundary: just
    /// past the next `;`, in front of a statement keyword, or in front of
    /// the `}` closing the enclosing block.  Always makes progress relative
    /// to `start`, where the failed declaration began.
    fn synchronize(&mut self, start: usize) {
        if self.current == start {
            // skip the token that caused the error
            if self.advance().token_type == TokenType::SEMICOLON {
                return;
            }
        }

        while !self.is_at_end() {
            if self.peek().token_type.starts_statement() {
                return;
            }

            // left for `block` to close
            if self.depth > 0 && self.check(TokenType::RIGHT_BRACE) {
                return;
            }

            let skipped: &Token = self.advance();

            debug!("Discarded token {}", skipped);

            if skipped.token_type == TokenType::SEMICOLON {
                return;
            }
        }
    }
}
