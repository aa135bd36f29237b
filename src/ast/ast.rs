use std::{fmt::Display, slice::Iter};

use crate::Span;

use super::{
    expressions::{BooleanExpr, IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Statement
///
/// Every statement kind the parser can produce. Consumers match on it
/// exhaustively, so a new kind has to be handled everywhere it matters.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    /// Returns the span of the statement, from its first token to its `;`.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Let(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
///
/// Grouping parentheses have no node of their own, only their effect on
/// precedence survives into the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Boolean(BooleanExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(expr) => &expr.span,
            Expr::Integer(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Infix(expr) => &expr.span,
        }
    }

    pub fn set_span(&mut self, span: Span) {
        match self {
            Expr::Identifier(expr) => expr.span = span,
            Expr::Integer(expr) => expr.span = span,
            Expr::Boolean(expr) => expr.span = span,
            Expr::Prefix(expr) => expr.span = span,
            Expr::Infix(expr) => expr.span = span,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Boolean(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
        }
    }
}

/// Program
///
/// The statements of one source, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Stmt;
    type IntoIter = Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, stmt) in self.body.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }

        Ok(())
    }
}
