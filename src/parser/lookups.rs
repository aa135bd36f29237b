use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest to highest.
///
/// `<` and `>` sit on separate levels, so `a < b > c` groups as
/// `(a < (b > c))` while `a > b < c` groups as `((a > b) < c)`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Equals,
    LessThan,
    GreaterThan,
    Sum,
    Product,
    Prefix,
    // Reserved for call expressions, nothing binds here yet
    Call,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
/// Infix rules carry their operator's binding power alongside the handler.
pub type LEDLookup = HashMap<TokenKind, (BindingPower, LEDHandler)>;

/// Grammar dispatch tables, built once and shared by every parser.
#[derive(Default)]
pub struct Lookups {
    /// Statement handlers keyed by the statement's first token
    pub stmt_lookup: StmtLookup,
    /// Null denotation (prefix position) handlers
    pub nud_lookup: NUDLookup,
    /// Left denotation (infix position) handlers
    pub led_lookup: LEDLookup,
}

impl Lookups {
    /// Registers an infix handler together with the operator's binding power.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.led_lookup.insert(kind, (binding_power, led_fn));
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Binding power of `kind` in infix position, `Lowest` for anything that
    /// is not an operator.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.led_lookup
            .get(&kind)
            .map_or(BindingPower::Lowest, |(binding_power, _)| *binding_power)
    }
}

lazy_static! {
    pub static ref LOOKUPS: Lookups = create_token_lookups();
}

pub fn create_token_lookups() -> Lookups {
    let mut lookups = Lookups::default();

    // Equality and relational
    lookups.led(TokenKind::Equals, BindingPower::Equals, parse_infix_expr);
    lookups.led(TokenKind::NotEquals, BindingPower::Equals, parse_infix_expr);
    lookups.led(TokenKind::Less, BindingPower::LessThan, parse_infix_expr);
    lookups.led(TokenKind::Greater, BindingPower::GreaterThan, parse_infix_expr);

    // Additive and multiplicative
    lookups.led(TokenKind::Plus, BindingPower::Sum, parse_infix_expr);
    lookups.led(TokenKind::Dash, BindingPower::Sum, parse_infix_expr);
    lookups.led(TokenKind::Star, BindingPower::Product, parse_infix_expr);
    lookups.led(TokenKind::Slash, BindingPower::Product, parse_infix_expr);

    // Literals and symbols
    lookups.nud(TokenKind::Number, parse_primary_expr);
    lookups.nud(TokenKind::Identifier, parse_primary_expr);
    lookups.nud(TokenKind::Boolean, parse_primary_expr);
    lookups.nud(TokenKind::Not, parse_prefix_expr);
    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    lookups.stmt(TokenKind::Let, parse_let_stmt);
    lookups.stmt(TokenKind::Return, parse_return_stmt);

    lookups
}
