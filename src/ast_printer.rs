use crate::expr::{Expr, ExprVisitor};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::Token;

/// Renders trees in parenthesised prefix form, e.g. `(+ 1 (* 2 3))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        AstPrinter.expr(expr)
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        AstPrinter.stmt(stmt)
    }

    fn expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn parenthesize<'e>(&mut self, name: &str, exprs: impl IntoIterator<Item = &'e Expr>) -> String {
        let mut s = format!("({}", name);
        for expr in exprs {
            s.push(' ');
            s.push_str(&self.expr(expr));
        }
        s.push(')');
        s
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, [left, right])
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, [right])
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        self.parenthesize("group", [inner])
    }

    fn visit_call(&mut self, callee: &Expr, _paren: &Token, arguments: &[Expr]) -> String {
        let name = format!("call {}", self.expr(callee));
        self.parenthesize(&name, arguments)
    }

    fn visit_literal(&mut self, value: &Token) -> String {
        value.lexeme.clone()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_expression(&mut self, expr: &Expr) -> String {
        self.parenthesize("expr", [expr])
    }

    fn visit_print(&mut self, expr: &Expr) -> String {
        self.parenthesize("print", [expr])
    }

    fn visit_block(&mut self, statements: &[Stmt]) -> String {
        let mut s = String::from("(block");
        for stmt in statements {
            s.push(' ');
            s.push_str(&self.stmt(stmt));
        }
        s.push(')');
        s
    }

    fn visit_if(&mut self, condition: &Expr, body: &Stmt) -> String {
        format!("(if {} {})", self.expr(condition), self.stmt(body))
    }

    fn visit_var_decl(&mut self, name: &Token, init: &Expr) -> String {
        format!("(var {} {})", name.lexeme, self.expr(init))
    }

    fn visit_for(&mut self, init: &Stmt, condition: &Expr, post: &Expr, body: &Stmt) -> String {
        format!(
            "(for {} {} {} {})",
            self.stmt(init),
            self.expr(condition),
            self.expr(post),
            self.stmt(body)
        )
    }
}
