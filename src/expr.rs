use serde::Serialize;

use crate::token::Token;

/// Expression node.  Every child is exclusively owned by its parent, so a
/// tree is finite and acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Infix operator, including assignment (`=`).
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Prefix `!` or `-`.
    Unary { operator: Token, right: Box<Expr> },

    /// Parenthesised sub‑expression.
    Grouping { inner: Box<Expr> },

    /// `callee(arguments)`.  `paren` is the closing `)`, kept for error lines.
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// Number, string, boolean or identifier token.
    Literal { value: Token },
}

/// One method per [`Expr`] variant.  Implement this to add a new tree walker
/// without touching the variants.
pub trait ExprVisitor<T> {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> T;

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> T;

    fn visit_grouping(&mut self, inner: &Expr) -> T;

    fn visit_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> T;

    fn visit_literal(&mut self, value: &Token) -> T;
}

impl Expr {
    /// Route `self` to the matching `visit_*` method.
    pub fn accept<T, V>(&self, visitor: &mut V) -> T
    where
        V: ExprVisitor<T> + ?Sized,
    {
        match self {
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),

            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),

            Expr::Grouping { inner } => visitor.visit_grouping(inner),

            Expr::Call {
                callee,
                paren,
                arguments,
            } => visitor.visit_call(callee, paren, arguments),

            Expr::Literal { value } => visitor.visit_literal(value),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Expr::Binary { operator, .. } => operator.line,

            Expr::Unary { operator, .. } => operator.line,

            Expr::Grouping { inner } => inner.line(),

            Expr::Call { paren, .. } => paren.line,

            Expr::Literal { value } => value.line,
        }
    }
}
