//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry point.
//! The parser pulls tokens from the lexer on demand and keeps a two-token
//! window (current + peek). Statements are dispatched through a lookup table
//! keyed by the leading token; expressions use NUD/LED handlers with binding
//! powers for operator precedence.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{
        ast::{Block, Program},
        expressions::CallId,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::{parse_func_decl, parse_top_level_terminator, parse_var_decl},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token source, pulled one token at a time
    lexer: Lexer,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Counter for generating call-site ids
    current_id: u32,
}

impl Parser {
    /// Creates a parser and fills its two-token window from `lexer`.
    ///
    /// Fails if either of the first two tokens cannot be scanned.
    pub fn new(mut lexer: Lexer) -> Result<Self, Error> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        let file = lexer.file();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            current_id: 0,
        };
        create_token_lookups(&mut parser);

        Ok(parser)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Advances to the next token and returns the previous current token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        let peek = std::mem::replace(&mut self.peek, next);
        Ok(std::mem::replace(&mut self.current, peek))
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// Returns the consumed token if the current token matches.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::at(
                    ErrorImpl::UnexpectedToken {
                        expected: expected_kind.to_string(),
                        found: self.current_token_kind().to_string(),
                    },
                    self.get_position(),
                )),
            }
        } else {
            self.advance()
        }
    }

    /// Expects a token of the specified kind with the default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UNEXPECTED_TOKEN` error at the current token.
    pub fn unexpected(&self, expected: &str) -> Error {
        Error::at(
            ErrorImpl::UnexpectedToken {
                expected: String::from(expected),
                found: self.current.describe(),
            },
            self.get_position(),
        )
    }

    /// Consumes any run of newline tokens.
    pub fn skip_newlines(&mut self) -> Result<(), Error> {
        while self.current_token_kind() == TokenKind::Newline {
            self.advance()?;
        }
        Ok(())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Hands out the next call-site id.
    pub fn advance_id(&mut self) -> CallId {
        let id = self.current_id;
        self.current_id += 1;
        CallId(id)
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a complete program.
///
/// `program := {NEWLINE} "package" IDENT NEWLINE {declaration NEWLINE}`
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    parser.skip_newlines()?;

    parser.expect(TokenKind::Package)?;
    let package = parser.expect(TokenKind::Ident)?.value;
    parse_top_level_terminator(parser)?;

    let mut block = Block::default();

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Var => block.var_decls.push(parse_var_decl(parser)?),
            TokenKind::Func => block.functions.push(parse_func_decl(parser)?),
            _ => return Err(parser.unexpected("FUNC or VAR")),
        }
        parse_top_level_terminator(parser)?;
    }

    tracing::debug!(
        file = %parser.file(),
        package = %package,
        functions = block.functions.len(),
        vars = block.var_decls.len(),
        "parsed program"
    );

    Ok(Program { package, block })
}

/// Parses source text into a [`Program`].
///
/// This is the main entry point: the lexer is driven lazily by the parser.
pub fn parse(source: &str, file: Option<String>) -> Result<Program, Error> {
    parse_with_lexer(Lexer::new(source, file))
}

/// Parses the token stream of an already constructed lexer.
pub fn parse_with_lexer(lexer: Lexer) -> Result<Program, Error> {
    let mut parser = Parser::new(lexer)?;
    parse_program(&mut parser)
}
