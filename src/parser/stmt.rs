use crate::{
    ast::{
        ast::Stmt,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    let expression = parse_expr(parser, BindingPower::Lowest)?;
    let end = parser.expect_peek(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expression.get_span().start.clone(),
            end,
        },
        expression,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    // Any expression is accepted in the binding position
    let identifier = parse_expr(parser, BindingPower::Lowest)?;

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;
    let end = parser.expect_peek(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::Let(LetStmt {
        identifier,
        value,
        span: Span { start, end },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_expr(parser, BindingPower::Lowest)?;
    let end = parser.expect_peek(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span { start, end },
    }))
}
