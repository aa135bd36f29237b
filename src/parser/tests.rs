//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - `let`, `return` and expression statements
//! - Operator precedence and associativity
//! - Prefix operators and grouping
//! - Error recording and resynchronisation

use pretty_assertions::assert_eq;

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{parse, Parser, MAX_EXPR_DEPTH},
};

fn parse_source(source: &str) -> (Parser, Program) {
    parse(Lexer::new(source, Some("test.lang".to_string())))
}

fn renderings(program: &Program) -> Vec<String> {
    program.iter().map(|stmt| stmt.to_string()).collect()
}

/// Parses a single expression statement and returns the expression's rendering.
fn render_expression(source: &str) -> String {
    let (parser, program) = parse_source(source);

    assert!(
        parser.errors().is_empty(),
        "unexpected errors for {:?}: {:?}",
        source,
        parser.error_messages()
    );
    assert_eq!(program.len(), 1, "expected one statement for {:?}", source);

    match &program.body[0] {
        Stmt::Expression(stmt) => stmt.expression.to_string(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let (parser, program) = parse_source("let a = 10; let b = 2; let c = 5;");

    assert!(parser.errors().is_empty());
    assert_eq!(
        renderings(&program),
        vec![
            "let stmt:: ident:a value:10",
            "let stmt:: ident:b value:2",
            "let stmt:: ident:c value:5",
        ]
    );
}

#[test]
fn test_parse_return_statements() {
    let (parser, program) = parse_source("return 5; return 10; return 993322;");

    assert!(parser.errors().is_empty());
    assert_eq!(
        renderings(&program),
        vec![
            "return stmt:: value:5",
            "return stmt:: value:10",
            "return stmt:: value:993322",
        ]
    );
    assert!(program.iter().all(|stmt| matches!(stmt, Stmt::Return(_))));
}

#[test]
fn test_parse_integer_literal_statement() {
    let (parser, program) = parse_source("5;");

    assert!(parser.errors().is_empty());
    assert_eq!(renderings(&program), vec!["expression stmt:: value:5"]);

    match &program.body[0] {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Integer(integer) => assert_eq!(integer.value, 5),
            other => panic!("expected an integer, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_prefix_expressions() {
    assert_eq!(render_expression("-5;"), "(-5)");
    assert_eq!(render_expression("!asdf;"), "(!asdf)");
    assert_eq!(render_expression("!true;"), "(!true)");
    assert_eq!(render_expression("--a;"), "(-(-a))");
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", "(5 + 5)"),
        ("5 - 5;", "(5 - 5)"),
        ("5 / 5;", "(5 / 5)"),
        ("5 * 5;", "(5 * 5)"),
        ("5 < 5;", "(5 < 5)"),
        ("5 > 5;", "(5 > 5)"),
        ("5 == 5;", "(5 == 5)"),
        ("5 != 5;", "(5 != 5)"),
        ("true == false;", "(true == false)"),
    ];

    for (source, expected) in cases {
        assert_eq!(render_expression(source), expected, "source: {}", source);
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("a + b + c;", "((a + b) + c)"),
        ("a - b - c;", "((a - b) - c)"),
        ("a * b / c;", "((a * b) / c)"),
        ("a + b * c;", "(a + (b * c))"),
        ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
        ("-a * b;", "((-a) * b)"),
        ("!-a;", "(!(-a))"),
        ("a - -b;", "(a - (-b))"),
        ("a == b == c;", "((a == b) == c)"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5;",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("5 > 4 == 3 < 4;", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4))"),
        ("3 > 5 == false;", "((3 > 5) == false)"),
    ];

    for (source, expected) in cases {
        assert_eq!(render_expression(source), expected, "source: {}", source);
    }
}

#[test]
fn test_mixed_comparison_chains() {
    // `>` binds tighter than `<`
    assert_eq!(render_expression("a < b > c;"), "(a < (b > c))");
    assert_eq!(render_expression("a > b < c;"), "((a > b) < c)");
}

#[test]
fn test_grouped_expressions() {
    let cases = [
        ("1 + (2 + 3) + 4;", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2;", "((5 + 5) * 2)"),
        ("2 / (5 + 5);", "(2 / (5 + 5))"),
        ("-(5 + 5);", "(-(5 + 5))"),
        ("!(true == true);", "(!(true == true))"),
        ("((a));", "a"),
    ];

    for (source, expected) in cases {
        assert_eq!(render_expression(source), expected, "source: {}", source);
    }
}

#[test]
fn test_parse_boolean_literals() {
    let (parser, program) = parse_source("true; false; 3 > 5 == false;");

    assert!(parser.errors().is_empty());
    assert_eq!(
        renderings(&program),
        vec![
            "expression stmt:: value:true",
            "expression stmt:: value:false",
            "expression stmt:: value:((3 > 5) == false)",
        ]
    );

    match &program.body[1] {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Boolean(boolean) => assert!(!boolean.value),
            other => panic!("expected a boolean, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_let_binding_accepts_any_expression() {
    let (parser, program) = parse_source("let 5 = 10; let (a) = b + 1;");

    assert!(parser.errors().is_empty());
    assert_eq!(
        renderings(&program),
        vec![
            "let stmt:: ident:5 value:10",
            "let stmt:: ident:a value:(b + 1)",
        ]
    );
}

#[test]
fn test_parse_mixed_statements_keep_source_order() {
    let (parser, program) = parse_source("let a = 1;\nreturn a;\na + 1;");

    assert!(parser.errors().is_empty());
    assert!(matches!(program.body[0], Stmt::Let(_)));
    assert!(matches!(program.body[1], Stmt::Return(_)));
    assert!(matches!(program.body[2], Stmt::Expression(_)));
    assert_eq!(
        program.to_string(),
        "let stmt:: ident:a value:1\nreturn stmt:: value:a\nexpression stmt:: value:(a + 1)"
    );
}

#[test]
fn test_parse_empty_program() {
    let (parser, program) = parse_source("");
    assert!(parser.errors().is_empty());
    assert!(program.is_empty());

    let (parser, program) = parse_source(" \n\t ");
    assert!(parser.errors().is_empty());
    assert!(program.is_empty());
}

#[test]
fn test_malformed_let_is_reported_and_dropped() {
    let (parser, program) = parse_source("let a 10;");

    assert!(program.is_empty());
    assert_eq!(parser.errors().len(), 1);

    let error = &parser.errors()[0];
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            found: TokenKind::Number,
            token: "10".to_string(),
        }
    );
    assert_eq!(error.get_position().0, 6);
    assert_eq!(
        parser.error_messages(),
        vec!["invalid syntax: expected Assignment, found Number \"10\""]
    );
}

#[test]
fn test_recovery_keeps_following_statement() {
    let (parser, program) = parse_source("let a 10; let b = 2;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(renderings(&program), vec!["let stmt:: ident:b value:2"]);
}

#[test]
fn test_recovery_stops_at_statement_keyword() {
    let (parser, program) = parse_source("let x = 5 let y = 6; } return 1;");

    assert_eq!(parser.errors().len(), 2);
    assert_eq!(
        renderings(&program),
        vec!["let stmt:: ident:y value:6", "return stmt:: value:1"]
    );
    assert_eq!(parser.errors()[0].get_error_name(), "UnexpectedToken");
    assert_eq!(parser.errors()[1].get_error_name(), "NoPrefixRule");
}

#[test]
fn test_missing_semicolon() {
    let (parser, program) = parse_source("-5; !asdf");

    assert_eq!(renderings(&program), vec!["expression stmt:: value:(-5)"]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::EOF,
            token: String::new(),
        }
    );
}

#[test]
fn test_missing_close_paren() {
    let (parser, program) = parse_source("(1 + 2; x;");

    assert_eq!(renderings(&program), vec!["expression stmt:: value:x"]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            found: TokenKind::Semicolon,
            token: ";".to_string(),
        }
    );
}

#[test]
fn test_errors_are_recorded_in_order() {
    let (parser, program) = parse_source("let = 1; return ; x");

    assert!(program.is_empty());

    let names: Vec<&str> = parser
        .errors()
        .iter()
        .map(|error| error.get_error_name())
        .collect();
    assert_eq!(names, vec!["NoPrefixRule", "NoPrefixRule", "UnexpectedToken"]);

    let positions: Vec<usize> = parser
        .errors()
        .iter()
        .map(|error| error.get_position().0)
        .collect();
    assert_eq!(positions, vec![4, 16, 19]);
}

#[test]
fn test_illegal_token_is_unrecognised() {
    let (parser, program) = parse_source("let x = @; let y = 1;");

    assert_eq!(renderings(&program), vec!["let stmt:: ident:y value:1"]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::UnrecognisedToken
    );
    assert_eq!(parser.errors()[0].get_position().0, 8);
}

#[test]
fn test_reserved_keyword_has_no_prefix_rule() {
    let (parser, program) = parse_source("fn;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::NoPrefixRule {
            kind: TokenKind::Fn,
            token: "fn".to_string(),
        }
    );
}

#[test]
fn test_integer_overflow_fails_the_statement() {
    let (parser, program) = parse_source("9223372036854775807; 9223372036854775808;");

    assert_eq!(
        renderings(&program),
        vec!["expression stmt:: value:9223372036854775807"]
    );
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::NumberParseError {
            token: "9223372036854775808".to_string(),
        }
    );
}

#[test]
fn test_garbage_input_terminates() {
    let (parser, program) = parse_source("@@@ ;;; )))");

    assert!(program.is_empty());
    assert_eq!(parser.errors().len(), 4);
}

#[test]
fn test_statement_and_expression_spans() {
    let (_, program) = parse_source("let a = 1 + 2;");

    let Stmt::Let(stmt) = &program.body[0] else {
        panic!("expected a let statement");
    };

    assert_eq!(stmt.span.start.0, 0);
    assert_eq!(stmt.span.end.0, 14);
    assert_eq!(stmt.value.get_span().start.0, 8);
    assert_eq!(stmt.value.get_span().end.0, 13);
    assert_eq!(stmt.span.start.1.as_str(), "test.lang");
}

#[test]
fn test_grouped_expression_span_covers_parentheses() {
    let (_, program) = parse_source("(5 + 5) * 2;");

    let Stmt::Expression(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    assert_eq!(stmt.span.start.0, 0);
    assert_eq!(stmt.span.end.0, 12);

    let Expr::Infix(product) = &stmt.expression else {
        panic!("expected an infix expression");
    };
    assert_eq!(product.span.start.0, 0);
    assert_eq!(product.span.end.0, 11);
    assert_eq!(product.left.get_span().start.0, 0);
    assert_eq!(product.left.get_span().end.0, 7);

    let (_, program) = parse_source("((a));");
    assert_eq!(program.body[0].get_span().start.0, 0);
    assert_eq!(program.body[0].get_span().end.0, 6);
}

#[test]
fn test_deeply_nested_parentheses_fail_the_statement() {
    let depth = 10_000;
    let source = format!("{}a{}; x;", "(".repeat(depth), ")".repeat(depth));
    let (parser, program) = parse_source(&source);

    assert_eq!(renderings(&program), vec!["expression stmt:: value:x"]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_EXPR_DEPTH
        }
    );
    assert_eq!(parser.errors()[0].get_position().0, MAX_EXPR_DEPTH);
}

#[test]
fn test_long_prefix_chain_fails_the_statement() {
    let source = format!("{}a; let y = 1;", "-".repeat(50_000));
    let (parser, program) = parse_source(&source);

    assert_eq!(renderings(&program), vec!["let stmt:: ident:y value:1"]);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_long_infix_chain_fails_the_statement() {
    let source = format!("{}1;", "1 + ".repeat(1_000));
    let (parser, program) = parse_source(&source);

    assert!(program.is_empty());
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.errors()[0].get_error_name(), "NestingTooDeep");
}

#[test]
fn test_nesting_within_depth_budget() {
    let depth = 200;
    let source = format!("{}a{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(render_expression(&source), "a");

    let source = format!("{}1;", "1 + ".repeat(100));
    let rendered = render_expression(&source);
    assert!(rendered.starts_with(&"(".repeat(100)));
    assert!(rendered.ends_with("+ 1)"));

    // The budget is per expression, so siblings do not accumulate
    let nested = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
    let source = format!("{} + {};", nested, nested);
    assert_eq!(render_expression(&source), "(a + a)");
}

#[test]
fn test_token_without_infix_rule_ends_the_expression() {
    let parser = Parser::new(Lexer::new("", None));
    assert_eq!(parser.get_binding_power(TokenKind::Star), BindingPower::Product);
    assert_eq!(parser.get_binding_power(TokenKind::Less), BindingPower::LessThan);
    assert_eq!(
        parser.get_binding_power(TokenKind::Assignment),
        BindingPower::Lowest
    );

    let (parser, program) = parse_source("a = b;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors()[0].get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Assignment,
            token: "=".to_string(),
        }
    );
}

#[test]
fn test_parser_keeps_one_token_of_lookahead() {
    let mut parser = Parser::new(Lexer::new("a + b", None));

    assert_eq!(parser.current_token().value, "a");
    assert_eq!(parser.lookahead_token().value, "+");

    let previous = parser.advance();
    assert_eq!(previous.value, "a");
    assert_eq!(parser.current_token_kind(), TokenKind::Plus);
    assert_eq!(parser.lookahead_token_kind(), TokenKind::Identifier);
}

#[test]
fn test_parse_program_after_completion_is_empty() {
    let mut parser = Parser::new(Lexer::new("a; b;", None));

    assert_eq!(parser.parse_program().len(), 2);
    assert!(parser.parse_program().is_empty());
    assert!(parser.errors().is_empty());
}
