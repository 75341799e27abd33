use crate::{ast::{ast::{FuncBlock, VarDecl}, statements::{AssignOp, ForStatement, GotoDecl, IfStatement, LabelDecl, RetDecl, StatesList, Stmt}, types::TypeName}, errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind, parser::{expr::{parse_call, parse_condition, parse_expr}, lookups::BindingPower}, Span};

use super::{parser::Parser, types::parse_type};

/// Parses one statement inside a block, including its terminator.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();
    let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() else {
        return Err(Error::at(
            ErrorImpl::InvalidStatement {
                token: parser.current_token().describe(),
                kind: token_kind.to_string(),
            },
            parser.get_position(),
        ));
    };

    let stmt = stmt_fn(parser)?;
    parse_terminator(parser)?;

    Ok(stmt)
}

/// A statement ends at a run of newlines, or right before the `}` closing its block.
pub fn parse_terminator(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Newline => parser.skip_newlines(),
        TokenKind::RBrace => Ok(()),
        _ => Err(parser.unexpected("NEWLINE")),
    }
}

/// Top-level declarations end at a run of newlines or at the end of input.
pub fn parse_top_level_terminator(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Newline => parser.skip_newlines(),
        TokenKind::EOF => Ok(()),
        _ => Err(parser.unexpected("NEWLINE")),
    }
}

/// `{` NEWLINE* {statement} `}`
pub fn parse_block(parser: &mut Parser) -> Result<StatesList, Error> {
    parser.expect(TokenKind::LBrace)?;
    parser.skip_newlines()?;

    let mut statements = vec![];

    while parser.current_token_kind() != TokenKind::RBrace {
        if !parser.has_tokens() {
            return Err(parser.unexpected("RBRACE"));
        }

        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::RBrace)?;

    Ok(StatesList { statements })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::VarDecl(parse_var_decl(parser)?))
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDecl, Error> {
    parser.expect(TokenKind::Var)?;

    let identifier = parser.expect(TokenKind::Ident)?;

    let Some(var_type) = TypeName::from_token_kind(parser.current_token_kind()) else {
        return Err(Error::at(
            ErrorImpl::MissingVariableType {
                variable: identifier.value,
                found: parser.current_token().describe(),
            },
            parser.get_position(),
        ));
    };
    parser.advance()?;

    Ok(VarDecl {
        ident: identifier.value,
        var_type,
        span: identifier.span,
    })
}

pub fn parse_func_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::FuncBlock(parse_func_decl(parser)?))
}

pub fn parse_func_decl(parser: &mut Parser) -> Result<FuncBlock, Error> {
    parser.expect(TokenKind::Func)?;

    let name = parser.expect(TokenKind::Ident)?;

    parser.expect(TokenKind::LParen)?;
    let params = parse_params(parser)?;
    parser.expect(TokenKind::RParen)?;

    let return_type = if parser.current_token_kind() != TokenKind::LBrace {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(FuncBlock {
        name: name.value,
        params,
        return_type,
        body,
        span: name.span,
    })
}

/// Parameters, where consecutive names may share one type: `(a, b int, c float)`.
fn parse_params(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let mut params = vec![];

    if parser.current_token_kind() == TokenKind::RParen {
        return Ok(params);
    }

    loop {
        let mut names = vec![parser.expect(TokenKind::Ident)?];
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance()?;
            names.push(parser.expect(TokenKind::Ident)?);
        }

        let var_type = parse_type(parser)?;
        params.extend(names.into_iter().map(|name| VarDecl {
            ident: name.value,
            var_type,
            span: name.span,
        }));

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance()?;
            }
            TokenKind::RParen => break,
            _ => return Err(parser.unexpected("COMMA or RPAREN")),
        }
    }

    Ok(params)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;

    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::If(IfStatement { condition, body }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::For)?;

    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStatement { condition, body }))
}

pub fn parse_goto_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Goto)?;
    let ident = parser.expect(TokenKind::Ident)?.value;

    Ok(Stmt::Goto(GotoDecl { ident }))
}

pub fn parse_label_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Label)?;
    let ident = parser.expect(TokenKind::Ident)?.value;

    Ok(Stmt::Label(LabelDecl { ident }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::Return)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Stmt::Return(RetDecl { value }))
}

/// An identifier starts either an assignment or a call statement.
pub fn parse_ident_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.peek_token_kind() {
        TokenKind::Eq => {
            let identifier = parser.advance()?;
            parser.advance()?;
            let value = parse_expr(parser, BindingPower::Default)?;

            Ok(Stmt::Assign(AssignOp {
                ident: identifier.value,
                value,
                span: Span {
                    start: identifier.span.start,
                    end: parser.get_position(),
                },
            }))
        }
        TokenKind::LParen => Ok(Stmt::Call(parse_call(parser)?)),
        kind => Err(Error::at(
            ErrorImpl::InvalidStatement {
                token: parser.current_token().describe(),
                kind: kind.to_string(),
            },
            parser.get_position(),
        )),
    }
}
