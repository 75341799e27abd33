use crate::{ast::{expressions::{BinOp, BinOperator, CmpOp, ConditionOp, Expr, FuncCall, Ident, Num, UnaryOp, UnaryOperator}, types::Literal}, errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind, Span};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expression"));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser.get_bp_lookup().get(&parser.current_token_kind()).unwrap_or(&BindingPower::Default) > bp {
        let token_kind = parser.current_token_kind();
        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("operator"));
        };
        let token_bp = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::IntNum => {
            let Ok(value) = parser.current_token().value.parse::<i64>() else {
                return Err(Error::at(ErrorImpl::NumberParseError { token: parser.current_token().value.clone() }, parser.get_position()));
            };

            Ok(Expr::Num(Num { value: Literal::Int(value), span: parser.advance()?.span }))
        }
        TokenKind::FloatNum => {
            let Ok(value) = parser.current_token().value.parse::<f64>() else {
                return Err(Error::at(ErrorImpl::NumberParseError { token: parser.current_token().value.clone() }, parser.get_position()));
            };

            Ok(Expr::Num(Num { value: Literal::Float(value), span: parser.advance()?.span }))
        }
        TokenKind::Ident if parser.peek_token_kind() == TokenKind::LParen => {
            Ok(Expr::Call(parse_call(parser)?))
        }
        TokenKind::Ident => {
            let token = parser.advance()?;
            Ok(Expr::Ident(Ident { name: token.value, span: token.span }))
        }
        _ => Err(parser.unexpected("expression")),
    }
}

/// `+x` / `-x`. The sign binds to a single operand, it does not nest.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = match operator_token.kind {
        TokenKind::Minus => UnaryOperator::Minus,
        _ => UnaryOperator::Plus,
    };

    let operand = match parser.current_token_kind() {
        TokenKind::IntNum | TokenKind::FloatNum | TokenKind::Ident => parse_primary_expr(parser)?,
        TokenKind::LParen => parse_grouping_expr(parser)?,
        _ => return Err(parser.unexpected("number, identifier or LPAREN")),
    };

    Ok(Expr::Unary(Box::new(UnaryOp { op, operand })))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::LParen)?;

    if parser.current_token_kind() == TokenKind::RParen {
        return Err(Error::at(ErrorImpl::EmptyParentheses, parser.get_position()));
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::RParen)?;

    Ok(expr)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = match operator_token.kind {
        TokenKind::Plus => BinOperator::Add,
        TokenKind::Minus => BinOperator::Sub,
        TokenKind::Multi => BinOperator::Mul,
        _ => BinOperator::Div,
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(Box::new(BinOp { left, op, right })))
}

/// `IDENT ( [expr {, expr}] )`, shared by call statements and call expressions.
pub fn parse_call(parser: &mut Parser) -> Result<FuncCall, Error> {
    let name = parser.expect(TokenKind::Ident)?;
    parser.expect(TokenKind::LParen)?;

    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::RParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance()?;
            args.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::RParen)?;

    Ok(FuncCall {
        id: parser.advance_id(),
        name: name.value,
        args,
        span: Span {
            start: name.span.start,
            end: parser.get_position(),
        },
    })
}

/// `expr cmp expr`, the only place comparison operators are accepted.
pub fn parse_condition(parser: &mut Parser) -> Result<ConditionOp, Error> {
    let left = parse_expr(parser, BindingPower::Default)?;

    let op = match parser.current_token_kind() {
        TokenKind::EqEq => CmpOp::Eq,
        TokenKind::NotEq => CmpOp::NotEq,
        TokenKind::Lt => CmpOp::Lt,
        TokenKind::LtEq => CmpOp::LtEq,
        TokenKind::Gt => CmpOp::Gt,
        TokenKind::GtEq => CmpOp::GtEq,
        _ => return Err(parser.unexpected("comparison operator")),
    };
    parser.advance()?;

    let right = parse_expr(parser, BindingPower::Default)?;

    Ok(ConditionOp { left, op, right })
}
