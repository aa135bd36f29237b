//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program loop. The
//! parser pulls tokens lazily from a [`Lexer`], keeping one token of
//! lookahead, and dispatches through the shared tables in
//! [`super::lookups`]:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix position
//! - LED (left denotation) handlers for infix position
//! - Binding powers for operator precedence
//!
//! After a handler succeeds the current token is the last token it consumed:
//! the final token of an expression, or the `;` of a statement.

use log::{debug, info};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{BindingPower, LEDLookup, Lookups, NUDLookup, StmtLookup, LOOKUPS},
    stmt::parse_stmt,
};

/// Deepest expression tree a single statement may build, counting both
/// nested operands and chained infix operators.
pub const MAX_EXPR_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, read one at a time
    lexer: Lexer,
    /// The token being interpreted
    current_token: Token,
    /// Exactly one token ahead of `current_token`
    lookahead_token: Token,
    /// Dispatch tables
    lookups: &'static Lookups,
    /// Errors of failed statements, in source order
    errors: Vec<Error>,
    /// Number of times the parser has advanced
    consumed: usize,
    /// Depth of the expression tree under construction
    depth: usize,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// The first two tokens are pulled immediately to fill the current and
    /// lookahead slots.
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let lookahead_token = lexer.next_token();

        Parser {
            lexer,
            current_token,
            lookahead_token,
            lookups: &LOOKUPS,
            errors: vec![],
            consumed: 0,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn lookahead_token(&self) -> &Token {
        &self.lookahead_token
    }

    pub fn lookahead_token_kind(&self) -> TokenKind {
        self.lookahead_token.kind
    }

    /// Advances to the next token and returns the previous current token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let lookahead = std::mem::replace(&mut self.lookahead_token, next);
        self.consumed += 1;
        std::mem::replace(&mut self.current_token, lookahead)
    }

    /// Expects the lookahead token to be of `expected_kind` and advances onto
    /// it.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at the
    /// offending lookahead token. The parser does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = &self.lookahead_token;

        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: token.kind,
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }

        self.advance();
        Ok(self.current_token.clone())
    }

    /// Returns true while the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &'static StmtLookup {
        &self.lookups.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &'static NUDLookup {
        &self.lookups.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &'static LEDLookup {
        &self.lookups.led_lookup
    }

    pub fn get_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.lookups.binding_power(kind)
    }

    /// Goes one level deeper into the expression tree.
    ///
    /// Fails with `NestingTooDeep` once [`MAX_EXPR_DEPTH`] is exceeded, so
    /// deeply nested input is rejected instead of exhausting the stack.
    pub fn descend(&mut self) -> Result<(), Error> {
        self.depth += 1;

        if self.depth > MAX_EXPR_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_EXPR_DEPTH,
                },
                self.get_position(),
            ));
        }

        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token.span.start.clone()
    }

    /// Errors recorded so far, one per failed statement.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Parses statements until EOF.
    ///
    /// A statement that fails to parse is left out of the program, its error
    /// is recorded and parsing resumes at the next statement boundary.
    pub fn parse_program(&mut self) -> Program {
        info!("parsing {}", self.lexer.file());

        let mut body = vec![];

        while self.has_tokens() {
            let start = self.consumed;

            match parse_stmt(self) {
                Ok(stmt) => {
                    body.push(stmt);
                    // Step off the statement's `;`
                    self.advance();
                }
                Err(error) => {
                    debug!(
                        "statement starting at token {} failed at byte {}: {}",
                        start,
                        error.get_position().0,
                        error
                    );
                    self.errors.push(error);
                    self.synchronize(start);
                }
            }
        }

        info!(
            "parsed {} statements with {} errors",
            body.len(),
            self.errors.len()
        );

        Program { body }
    }

    /// Skips to the start of the next statement after a failure.
    ///
    /// Stops just past the next `;`, or on a `let`/`return` keyword reached
    /// after the failed statement's first token. Always advances at least
    /// once unless the input is exhausted.
    fn synchronize(&mut self, start: usize) {
        while self.has_tokens() {
            if self.consumed > start
                && self
                    .current_token
                    .is_one_of_many(&[TokenKind::Let, TokenKind::Return])
            {
                break;
            }

            if self.current_token_kind() == TokenKind::Semicolon {
                self.advance();
                break;
            }

            self.advance();
        }

        debug!("resynchronised on {}", self.current_token);
    }
}

/// Parses everything `lexer` produces.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the recorded errors
/// - The parsed Program, which omits every statement that failed
pub fn parse(lexer: Lexer) -> (Parser, Program) {
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    (parser, program)
}
