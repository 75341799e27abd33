use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The closed set of error categories a run can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IllegalChar,
    UnexpectedToken,
    SyntaxError,
    IdNotFound,
    DuplicateId,
    MismatchError,
    RuntimeError,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::IllegalChar => "Illegal character",
            ErrorKind::UnexpectedToken => "Unexpected token",
            ErrorKind::SyntaxError => "Syntax error",
            ErrorKind::IdNotFound => "Identifier not found",
            ErrorKind::DuplicateId => "Duplicate identifier found",
            ErrorKind::MismatchError => "Mismatching parameter",
            ErrorKind::RuntimeError => "Runtime error",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::IllegalChar => "ILLEGAL_CHAR",
            ErrorKind::UnexpectedToken => "UNEXPECTED_TOKEN",
            ErrorKind::SyntaxError => "SYNTAX_ERROR",
            ErrorKind::IdNotFound => "ID_NOT_FOUND",
            ErrorKind::DuplicateId => "DUPLICATE_ID",
            ErrorKind::MismatchError => "MISMATCH_ERROR",
            ErrorKind::RuntimeError => "RUNTIME_ERROR",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Option<Position>) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn at(error_impl: ErrorImpl, position: Position) -> Self {
        Error::new(error_impl, Some(position))
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnknownCharacter { .. }
            | ErrorImpl::IllegalStringCharacter { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::MalformedNumber { .. } => ErrorKind::IllegalChar,
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::ExpectedType { .. } => {
                ErrorKind::UnexpectedToken
            }
            ErrorImpl::InvalidStatement { .. }
            | ErrorImpl::MissingVariableType { .. }
            | ErrorImpl::EmptyParentheses
            | ErrorImpl::NumberParseError { .. } => ErrorKind::SyntaxError,
            ErrorImpl::UndefinedVariable { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::FunctionNotFound { .. }
            | ErrorImpl::VariableNotInFrame { .. } => ErrorKind::IdNotFound,
            ErrorImpl::DuplicateIdentifier { .. } => ErrorKind::DuplicateId,
            ErrorImpl::ArgumentCountMismatch { .. } => ErrorKind::MismatchError,
            ErrorImpl::DivisionByZero
            | ErrorImpl::CallDepthExceeded { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::OutputFailure { .. } => ErrorKind::RuntimeError,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownCharacter { .. } => "UnknownCharacter",
            ErrorImpl::IllegalStringCharacter { .. } => "IllegalStringCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::InvalidStatement { .. } => "InvalidStatement",
            ErrorImpl::MissingVariableType { .. } => "MissingVariableType",
            ErrorImpl::EmptyParentheses => "EmptyParentheses",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::VariableNotInFrame { .. } => "VariableNotInFrame",
            ErrorImpl::DuplicateIdentifier { .. } => "DuplicateIdentifier",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::CallDepthExceeded { .. } => "CallDepthExceeded",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::OutputFailure { .. } => "OutputFailure",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Close the string with `\"` on the same line"))
            }
            ErrorImpl::MalformedNumber { .. } => ErrorTip::Suggestion(String::from(
                "A `.` in a number must be followed by at least one digit",
            )),
            ErrorImpl::IllegalStringCharacter { .. } => ErrorTip::Suggestion(String::from(
                "Strings may not contain tabs, newlines, `\\` or `%`",
            )),
            ErrorImpl::MissingVariableType { .. } => {
                ErrorTip::Suggestion(String::from("Declare variables as `var name int` or `var name float`"))
            }
            ErrorImpl::EmptyParentheses => {
                ErrorTip::Suggestion(String::from("Put an expression between the parentheses"))
            }
            ErrorImpl::NumberParseError { .. } => {
                ErrorTip::Suggestion(String::from("Is it above the integer limit?"))
            }
            ErrorImpl::VariableNotInFrame { .. } => ErrorTip::Suggestion(String::from(
                "Only locals and parameters are visible inside a function at runtime",
            )),
            ErrorImpl::ArgumentCountMismatch { .. } => ErrorTip::Suggestion(String::from(
                "Pass exactly one argument per declared parameter",
            )),
            ErrorImpl::CallDepthExceeded { .. } => {
                ErrorTip::Suggestion(String::from("Does the recursion have a base case?"))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(
                f,
                "{} : {} - {}",
                self.kind().message(),
                position,
                self.internal_error
            ),
            None => write!(f, "{} : {}", self.kind().message(), self.internal_error),
        }
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
    #[error("Unknown token: {character}")]
    UnknownCharacter { character: char },
    #[error("Illegal character in string : {character:?}")]
    IllegalStringCharacter { character: char },
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Illegal character in number : {literal}")]
    MalformedNumber { literal: String },
    #[error("Expected {expected}, but found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Expected type, but found {found}")]
    ExpectedType { found: String },
    #[error("Invalid statement {token} at ({kind})")]
    InvalidStatement { token: String, kind: String },
    #[error("Expected type after `var {variable}`, but found {found}")]
    MissingVariableType { variable: String, found: String },
    #[error("The left and right parentheses are not allowed to be put together")]
    EmptyParentheses,
    #[error("Error parsing number: {token}")]
    NumberParseError { token: String },
    #[error("NameError : Undefined variable: '{variable}'")]
    UndefinedVariable { variable: String },
    #[error("Unknown type '{type_}'")]
    UnknownType { type_: String },
    #[error("Function {function} can't found")]
    FunctionNotFound { function: String },
    #[error("Variable '{variable}' is not bound in activation record '{record}'")]
    VariableNotInFrame { variable: String, record: String },
    #[error("Duplicate identifier '{identifier}' found")]
    DuplicateIdentifier { identifier: String },
    #[error("Function {function} expects {expected} arguments, but received {received}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
    #[error("Function {function} returned no value")]
    MissingReturnValue { function: String },
    #[error("Failed to write program output: {reason}")]
    OutputFailure { reason: String },
}
