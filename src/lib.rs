#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub usize, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line text (including its newline, if
/// any) and the offset of `pos` within that line. A position one past
/// the final byte is reported at the end of the last line, which is where
/// end-of-input diagnostics point.
pub fn get_line_at_position(source: &str, pos: usize) -> Option<(usize, String, usize)> {
    if pos > source.len() {
        return None;
    }

    let mut start = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if pos < end {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    let line_count = source.split_inclusive('\n').count();

    if source.is_empty() || source.ends_with('\n') {
        Some((line_count + 1, String::new(), 0))
    } else {
        let last_line = source.rsplit('\n').next().unwrap_or_default();
        Some((line_count, last_line.to_string(), last_line.len()))
    }
}

/// Renders an error as a caret diagnostic against the source it came from.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedToken (expected `=`, found ...)
        -> main.lang
           |
        20 | let a 10;
           | ------^
    */

    let position = error.get_position();
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        output.push_str(&format!("   at byte {}\n", position.0));
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
