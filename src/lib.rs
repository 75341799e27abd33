#![allow(clippy::module_inception)]

use std::{fmt::Display, io::Write, rc::Rc};

use crate::{
    config::Config,
    errors::errors::{Error, ErrorTip},
    interpreter::{interpreter::Interpreter, value::Value},
    parser::parser::parse,
    semantic_analyzer::semantic_analyzer::analyze,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic_analyzer;

extern crate regex;

/// A 1-based line/column location inside a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs every phase over `source` and returns the value `main` produced.
///
/// The value is also written to `output`, the same way the CLI prints it.
pub fn run_source<W: Write>(source: &str, config: &Config, output: W) -> Result<Option<Value>, Error> {
    let program = parse(source, Some(config.file_name.clone()))?;
    let model = analyze(&program, config)?;
    let mut interpreter = Interpreter::new(&program, &model, config, output);
    interpreter.interpret()
}

/// Returns the text of the 1-based `line` of `source`, without its line break.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}


/// Renders an error the way the CLI shows it.
///
/// Errors with a position also get the offending line and a caret under the column.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> main.go
          |
        2 | var x @
          | ------^
    */

    let mut rendered = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error),
        tip => format!("Error: {} ({})\n", error, tip),
    };

    let Some(position) = error.get_position() else {
        return rendered;
    };
    let Some(line_text) = get_line_at_position(source, position.line) else {
        return rendered;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("-> {}\n", position.file));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, source: &str) {
    print!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
