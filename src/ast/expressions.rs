use std::fmt::Display;

use crate::Span;

use super::ast::Expr;

// LITERALS

/// Identifier Expression
/// Represents a name in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub value: String,
    pub span: Span,
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Expression
/// Represents a decimal integer literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i64,
    pub span: Span,
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Boolean Expression
/// Represents `true` or `false` in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// COMPLEX

/// Prefix Expression
/// Represents a unary `!` or `-` applied to an expression.
///
/// Renders as `(<operator><right>)`, e.g. `(-a)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: String,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// Represents a binary operation between two expressions.
///
/// Renders fully parenthesised as `(<left> <operator> <right>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
    pub span: Span,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}
