use serde::Serialize;

use crate::expr::Expr;
use crate::token::Token;

/// Statement node.  A program is an ordered sequence of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Expression evaluated for its side effects.
    Expression { expr: Expr },

    Print { expr: Expr },

    /// `{ declaration* }`, evaluated in a fresh child scope.
    Block { statements: Vec<Stmt> },

    /// One-armed conditional; the language has no `else`.
    If { condition: Expr, body: Box<Stmt> },

    /// `var name = init;`
    VarDecl { name: Token, init: Expr },

    /// `for (var ...; condition; post) body`.  `init` is always a `VarDecl`.
    For {
        init: Box<Stmt>,
        condition: Expr,
        post: Expr,
        body: Box<Stmt>,
    },
}

/// One method per [`Stmt`] variant.
pub trait StmtVisitor<T> {
    fn visit_expression(&mut self, expr: &Expr) -> T;

    fn visit_print(&mut self, expr: &Expr) -> T;

    fn visit_block(&mut self, statements: &[Stmt]) -> T;

    fn visit_if(&mut self, condition: &Expr, body: &Stmt) -> T;

    fn visit_var_decl(&mut self, name: &Token, init: &Expr) -> T;

    fn visit_for(&mut self, init: &Stmt, condition: &Expr, post: &Expr, body: &Stmt) -> T;
}

impl Stmt {
    /// Route `self` to the matching `visit_*` method.
    pub fn accept<T, V>(&self, visitor: &mut V) -> T
    where
        V: StmtVisitor<T> + ?Sized,
    {
        match self {
            Stmt::Expression { expr } => visitor.visit_expression(expr),

            Stmt::Print { expr } => visitor.visit_print(expr),

            Stmt::Block { statements } => visitor.visit_block(statements),

            Stmt::If { condition, body } => visitor.visit_if(condition, body),

            Stmt::VarDecl { name, init } => visitor.visit_var_decl(name, init),

            Stmt::For {
                init,
                condition,
                post,
                body,
            } => visitor.visit_for(init, condition, post, body),
        }
    }
}
