use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match. Returns `None` when the matched text produces no token.
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Every pattern is anchored; two-character operators come before their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \t\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z][a-zA-Z0-9]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::EqEq) },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Eq) },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEq) },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LtEq) },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Lt) },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GtEq) },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Gt) },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus) },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Multi) },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Divide) },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen) },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen) },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBrace) },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBrace) },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
    ];
}

/// Pull-based lexer: every call to [`Lexer::next_token`] scans exactly one token.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: impl Into<String>, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: source.into(),
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn advance_char(&mut self, c: char) {
        self.pos += c.len_utf8();
        self.column += 1;
    }

    pub fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            self.advance_char(c);
        }
    }

    pub fn start_new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Scans the next token. Once the input is exhausted every call yields `EOF`.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                let position = self.get_position();
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::new(),
                    Span {
                        start: position.clone(),
                        end: position
                    }
                ));
            }

            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            let Some((handler, text)) = matched else {
                return Err(Error::at(
                    ErrorImpl::UnknownCharacter {
                        character: self.at().unwrap_or_default(),
                    },
                    self.get_position(),
                ));
            };

            if let Some(token) = handler(self, &text)? {
                tracing::trace!(%token, "lexed");
                return Ok(token);
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    lexer.advance_over(matched);
    Ok(None)
}

fn newline_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    lexer.advance_over(matched);
    let token = MK_TOKEN!(TokenKind::Newline, String::from(matched), Span { start, end: lexer.get_position() });
    lexer.start_new_line();

    Ok(Some(token))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    lexer.advance_over(matched);

    // `1.` or `1.2.`: a dot that the pattern could not consume
    if lexer.at() == Some('.') {
        return Err(Error::at(
            ErrorImpl::MalformedNumber { literal: format!("{}.", matched) },
            lexer.get_position(),
        ));
    }

    let kind = if matched.contains('.') {
        TokenKind::FloatNum
    } else {
        TokenKind::IntNum
    };

    Ok(Some(MK_TOKEN!(kind, String::from(matched), Span { start, end: lexer.get_position() })))
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    lexer.advance_over(matched);

    let mut string_literal = String::new();
    loop {
        match lexer.at() {
            None => return Err(Error::at(ErrorImpl::UnterminatedString, start)),
            Some('"') => {
                lexer.advance_char('"');
                break;
            }
            Some(character @ ('\r' | '\n' | '\t' | '\\' | '%')) => {
                return Err(Error::at(
                    ErrorImpl::IllegalStringCharacter { character },
                    lexer.get_position(),
                ));
            }
            Some(character) => {
                string_literal.push(character);
                lexer.advance_char(character);
            }
        }
    }

    Ok(Some(MK_TOKEN!(TokenKind::String, string_literal, Span { start, end: lexer.get_position() })))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    lexer.advance_over(matched);

    let kind = RESERVED_LOOKUP.get(matched).copied().unwrap_or(TokenKind::Ident);

    Ok(Some(MK_TOKEN!(kind, String::from(matched), Span { start, end: lexer.get_position() })))
}

/// Scans the whole source eagerly. The returned stream always ends with a single `EOF`.
pub fn tokenize(source: impl Into<String>, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let at_end = token.kind == TokenKind::EOF;
        tokens.push(token);

        if at_end {
            return Ok(tokens);
        }
    }
}
