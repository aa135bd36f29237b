use std::rc::Rc;

use log::trace;

use crate::{MK_SPAN, MK_TOKEN};

use super::tokens::{classify, Token, TokenKind};

/// On-demand scanner over a byte buffer.
///
/// Each call to [`Lexer::next_token`] produces exactly one token. Once the
/// input is exhausted every further call produces an `EOF` token.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: Vec<u8>,
    /// Offset of `ch`
    pos: usize,
    /// Offset of the byte after `ch`
    read_pos: usize,
    /// Current byte, 0 once `pos` is past the end of `source`
    ch: u8,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: impl Into<Vec<u8>>, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source: source.into(),
            pos: 0,
            read_pos: 0,
            ch: 0,
            file: file_name,
        };
        lexer.advance();
        lexer
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;

        let (kind, value) = match self.ch {
            _ if self.at_eof() => (TokenKind::EOF, String::new()),
            b'+' => (TokenKind::Plus, String::from("+")),
            b'-' => (TokenKind::Dash, String::from("-")),
            b'*' => (TokenKind::Star, String::from("*")),
            b'/' => (TokenKind::Slash, String::from("/")),
            b'{' => (TokenKind::OpenCurly, String::from("{")),
            b'}' => (TokenKind::CloseCurly, String::from("}")),
            b'(' => (TokenKind::OpenParen, String::from("(")),
            b')' => (TokenKind::CloseParen, String::from(")")),
            b'<' => (TokenKind::Less, String::from("<")),
            b'>' => (TokenKind::Greater, String::from(">")),
            b';' => (TokenKind::Semicolon, String::from(";")),
            b',' => (TokenKind::Comma, String::from(",")),
            b'=' => {
                if self.peek() == b'=' {
                    self.advance();
                    (TokenKind::Equals, String::from("=="))
                } else {
                    (TokenKind::Assignment, String::from("="))
                }
            }
            b'!' => {
                if self.peek() == b'=' {
                    self.advance();
                    (TokenKind::NotEquals, String::from("!="))
                } else {
                    (TokenKind::Not, String::from("!"))
                }
            }
            ch if ch.is_ascii_alphabetic() => {
                let word = self.read_while(|ch| ch.is_ascii_alphabetic());
                return self.finish(classify(&word), word, start);
            }
            ch if ch.is_ascii_digit() => {
                let number = self.read_while(|ch| ch.is_ascii_digit());
                return self.finish(TokenKind::Number, number, start);
            }
            _ => (TokenKind::Illegal, String::new()),
        };

        self.advance();
        self.finish(kind, value, start)
    }

    fn finish(&self, kind: TokenKind, value: String, start: usize) -> Token {
        let token = MK_TOKEN!(kind, value, MK_SPAN!(start, self.pos, self.file));
        trace!("lexed {} at {}..{}", token, start, self.pos);
        token
    }

    /// Moves one byte forward. The cursor never moves further than one past
    /// the end of the source, so repeated calls at the end are harmless.
    fn advance(&mut self) {
        self.pos = self.read_pos.min(self.source.len());
        self.read_pos = self.pos + 1;
        self.ch = self.source.get(self.pos).copied().unwrap_or(0);
    }

    fn peek(&self) -> u8 {
        self.source.get(self.read_pos).copied().unwrap_or(0)
    }

    /// Consumes the maximal run of bytes matching `predicate`, starting at the
    /// current byte, and leaves the cursor on the first byte after the run.
    fn read_while(&mut self, predicate: fn(u8) -> bool) -> String {
        let start = self.pos;
        while !self.at_eof() && predicate(self.ch) {
            self.advance();
        }

        String::from_utf8_lossy(&self.source[start..self.pos]).into_owned()
    }

    fn skip_whitespace(&mut self) {
        while !self.at_eof() && matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.advance();
        }
    }
}

/// Runs a lexer over `source` to completion.
///
/// The returned tokens always end with a single `EOF` token.
pub fn tokenize(source: impl Into<Vec<u8>>, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
