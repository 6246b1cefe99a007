use crate::error::{ExpressionError, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Evaluation rule shared by operators and functions.
pub type ApplyFn = Arc<dyn Fn(&[f64]) -> std::result::Result<f64, String> + Send + Sync>;

pub const ALLOWED_OPERATOR_CHARS: [char; 19] = [
    '+', '-', '*', '/', '%', '^', '!', '#', '§', '$', '&', ';', ':', '~', '<', '>', '|', '=', '¬',
];

pub const PRECEDENCE_OR: i32 = 100;
pub const PRECEDENCE_AND: i32 = 200;
pub const PRECEDENCE_ADDITION: i32 = 500;
pub const PRECEDENCE_SUBTRACTION: i32 = PRECEDENCE_ADDITION;
pub const PRECEDENCE_MULTIPLICATION: i32 = 1000;
pub const PRECEDENCE_DIVISION: i32 = PRECEDENCE_MULTIPLICATION;
pub const PRECEDENCE_MODULO: i32 = PRECEDENCE_DIVISION;
pub const PRECEDENCE_UNARY_MINUS: i32 = 5000;
pub const PRECEDENCE_UNARY_PLUS: i32 = PRECEDENCE_UNARY_MINUS;
pub const PRECEDENCE_NOT: i32 = PRECEDENCE_UNARY_MINUS;
pub const PRECEDENCE_POWER: i32 = 10000;

/// A prefix, postfix or infix operator.
///
/// Unary operators that are right associative act as prefix operators (`-x`),
/// left associative unary operators act as postfix operators (`x!`).
#[derive(Clone)]
pub struct Operator {
    symbol: String,
    arity: usize,
    left_associative: bool,
    precedence: i32,
    apply: ApplyFn,
}

impl Operator {
    pub fn new<F>(symbol: &str, arity: usize, left_associative: bool, precedence: i32, apply: F) -> Self
    where
        F: Fn(&[f64]) -> std::result::Result<f64, String> + Send + Sync + 'static,
    {
        Self {
            symbol: symbol.to_string(),
            arity,
            left_associative,
            precedence,
            apply: Arc::new(apply),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_unary(&self) -> bool {
        self.arity == 1
    }

    pub fn is_left_associative(&self) -> bool {
        self.left_associative
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    pub fn apply(&self, args: &[f64]) -> std::result::Result<f64, String> {
        (self.apply)(args)
    }

    /// Checks the symbol and arity before the operator is registered.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() || !self.symbol.chars().all(is_allowed_operator_char) {
            return Err(ExpressionError::InvalidOperatorSymbol(self.symbol.clone()));
        }
        if self.arity != 1 && self.arity != 2 {
            return Err(ExpressionError::InvalidOperatorArity {
                symbol: self.symbol.clone(),
                arity: self.arity,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .field("left_associative", &self.left_associative)
            .field("precedence", &self.precedence)
            .finish()
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.arity == other.arity
            && self.left_associative == other.left_associative
            && self.precedence == other.precedence
    }
}

pub fn is_allowed_operator_char(ch: char) -> bool {
    ALLOWED_OPERATOR_CHARS.contains(&ch)
}

fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

static BUILTIN_OPERATORS: Lazy<Vec<Operator>> = Lazy::new(|| {
    vec![
        Operator::new("+", 2, true, PRECEDENCE_ADDITION, |args| Ok(args[0] + args[1])),
        Operator::new("-", 2, true, PRECEDENCE_SUBTRACTION, |args| Ok(args[0] - args[1])),
        Operator::new("*", 2, true, PRECEDENCE_MULTIPLICATION, |args| Ok(args[0] * args[1])),
        Operator::new("/", 2, true, PRECEDENCE_DIVISION, |args| {
            if args[1] == 0.0 {
                Err("Division by zero!".to_string())
            } else {
                Ok(args[0] / args[1])
            }
        }),
        Operator::new("%", 2, true, PRECEDENCE_MODULO, |args| {
            if args[1] == 0.0 {
                Err("Modulo by zero!".to_string())
            } else {
                Ok(args[0] % args[1])
            }
        }),
        Operator::new("^", 2, false, PRECEDENCE_POWER, |args| Ok(args[0].powf(args[1]))),
        Operator::new("-", 1, false, PRECEDENCE_UNARY_MINUS, |args| Ok(-args[0])),
        Operator::new("+", 1, false, PRECEDENCE_UNARY_PLUS, |args| Ok(args[0])),
        Operator::new("&", 2, true, PRECEDENCE_AND, |args| {
            Ok(truth(args[0] != 0.0 && args[1] != 0.0))
        }),
        Operator::new("|", 2, true, PRECEDENCE_OR, |args| {
            Ok(truth(args[0] != 0.0 || args[1] != 0.0))
        }),
        Operator::new("¬", 1, false, PRECEDENCE_NOT, |args| Ok(truth(args[0] == 0.0))),
    ]
});

/// Looks up a built-in operator by its single character symbol and arity.
pub fn builtin_operator(symbol: char, arity: usize) -> Option<Operator> {
    BUILTIN_OPERATORS
        .iter()
        .find(|op| op.arity == arity && op.symbol.chars().eq(std::iter::once(symbol)))
        .cloned()
}

/// The binary `*` inserted for implicit multiplication.
pub fn multiplication() -> Operator {
    BUILTIN_OPERATORS[2].clone()
}
