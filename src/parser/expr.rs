use crate::{
    ast::{
        ast::Expr,
        expressions::{BooleanExpr, IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// Every nested operand and every chained infix operator costs one level of
/// the parser's depth budget, which is handed back when this call returns.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let depth = parser.depth();
    let result = parse_expr_within_budget(parser, bp);
    parser.restore_depth(depth);

    result
}

fn parse_expr_within_budget(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.descend()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(no_prefix_rule_error(parser));
    };

    let mut left = nud_fn(parser)?;

    // While the lookahead operator binds tighter than bp, keep extending lhs.
    // Tokens without an infix rule end the expression.
    while parser.has_tokens() {
        let Some((operator_bp, led_fn)) = parser
            .get_led_lookup()
            .get(&parser.lookahead_token_kind())
            .copied()
        else {
            break;
        };

        if operator_bp <= bp {
            break;
        }

        parser.advance();
        parser.descend()?;
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn no_prefix_rule_error(parser: &Parser) -> Error {
    let token = parser.current_token();

    if token.kind == TokenKind::Illegal {
        return Error::new(ErrorImpl::UnrecognisedToken, parser.get_position());
    }

    Error::new(
        ErrorImpl::NoPrefixRule {
            kind: token.kind,
            token: token.value.clone(),
        },
        parser.get_position(),
    )
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Number => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerExpr {
                value,
                span: token.span,
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::Boolean => match token.value.parse::<bool>() {
            Ok(value) => Ok(Expr::Boolean(BooleanExpr {
                value,
                span: token.span,
            })),
            Err(_) => Err(Error::new(
                ErrorImpl::BooleanParseError { token: token.value },
                token.span.start,
            )),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(IdentifierExpr {
            value: token.value,
            span: token.span,
        })),
        _ => Err(no_prefix_rule_error(parser)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start,
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token.value,
        right: Box::new(rhs),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator: operator_token.value,
        right: Box::new(right),
    }))
}

/// Parses `( expr )`. No grouping node is built; the inner expression takes
/// over the span of the parentheses.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let mut expr = parse_expr(parser, BindingPower::Lowest)?;
    let end = parser.expect_peek(TokenKind::CloseParen)?.span.end;

    expr.set_span(Span { start, end });
    Ok(expr)
}
