use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixRule { .. } => "NoPrefixRule",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::BooleanParseError { .. } => "BooleanParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken => ErrorTip::None,
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::Semicolon,
                token,
                ..
            } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedToken {
                expected, token, ..
            } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::NoPrefixRule { kind, .. } => ErrorTip::Suggestion(format!(
                "An expression cannot start with {}",
                kind
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression across several `let` statements",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::BooleanParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid boolean: `{}`, expected `true` or `false`",
                token
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token")]
    UnrecognisedToken,
    #[error("invalid syntax: expected {expected}, found {found} {token:?}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        token: String,
    },
    #[error("no prefix parse rule for {kind} {token:?}")]
    NoPrefixRule { kind: TokenKind, token: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("invalid integer literal: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid boolean literal: {token:?}")]
    BooleanParseError { token: String },
}
