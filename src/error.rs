use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpressionError>;

/// Every way compiling or evaluating an expression can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("The expression can not be empty")]
    EmptyExpression,

    #[error("Unable to parse number '{literal}' at position {position}")]
    MalformedNumber { literal: String, position: usize },

    #[error("Unknown function or variable '{token}' at pos {position} in expression '{expression}'")]
    UnknownFunctionOrVariable {
        token: String,
        position: usize,
        expression: String,
    },

    #[error("Unable to parse char '{ch}' (Code:{}) at [{position}]", *ch as u32)]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("Missing operator between adjacent operands at [{position}]")]
    AmbiguousAdjacency { position: usize },

    #[error("Unknown operator '{symbol}' at [{position}]")]
    UnknownOperator { symbol: String, position: usize },

    #[error("Misplaced function separator ',' or mismatched parentheses")]
    MisplacedSeparator,

    #[error("Mismatched parentheses detected. Please check the expression")]
    MismatchedParentheses,

    #[error("A variable can not have the same name as a function [{0}]")]
    NameCollision(String),

    #[error("The operator symbol '{0}' is invalid")]
    InvalidOperatorSymbol(String),

    #[error("Operator '{symbol}' can only have 1 or 2 operands, got {arity}")]
    InvalidOperatorArity { symbol: String, arity: usize },

    #[error("The function name '{0}' is invalid")]
    InvalidFunctionName(String),

    #[error("The variable name '{0}' is invalid")]
    InvalidVariableName(String),

    #[error("No value has been set for the variable '{0}'")]
    UnboundVariable(String),

    #[error("Invalid number of operands available for '{0}' operator")]
    InvalidOperandCount(String),

    #[error("Invalid number of arguments available for '{0}' function")]
    InvalidArgumentCount(String),

    #[error("{0}")]
    Arithmetic(String),

    #[error("Invalid number of items on the output queue ({0}). Might be caused by an invalid number of arguments for a function")]
    InvalidStackSize(usize),

    #[error("Asynchronous evaluation failed: {0}")]
    Async(String),
}
