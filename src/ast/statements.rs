use std::fmt::Display;

use crate::Span;

use super::ast::Expr;

/// `let <identifier> = <value>;`
///
/// The identifier is kept as a parsed expression, the parser does not check
/// that it is a plain name.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub identifier: Expr,
    pub value: Expr,
    pub span: Span,
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let stmt:: ident:{} value:{}", self.identifier, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    pub span: Span,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return stmt:: value:{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "expression stmt:: value:{}", self.expression)
    }
}
