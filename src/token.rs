use crate::function::Function;
use crate::operator::Operator;
use std::fmt;

/// A free variable. The slot indexes the value table of the owning
/// expression and is assigned when the expression is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    slot: usize,
}

impl Variable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slot: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Variable(Variable),
    Operator(Operator),
    Function(Function),
    ParenOpen,
    ParenClose,
    Separator,
}

impl Token {
    pub fn variable(name: &str) -> Self {
        Token::Variable(Variable::new(name))
    }

    /// Whether a following operand starts an implicit multiplication.
    pub(crate) fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::ParenClose
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "NUMBER[{:?}]", value),
            Token::Variable(variable) => write!(f, "VARIABLE[{}]", variable.name()),
            Token::Operator(operator) => write!(f, "OPERATOR[{}]", operator.symbol()),
            Token::Function(function) => write!(f, "FUNCTION[{}]", function.name()),
            Token::ParenOpen => write!(f, "PARENTHESES_OPEN[(]"),
            Token::ParenClose => write!(f, "PARENTHESES_CLOSE[)]"),
            Token::Separator => write!(f, "SEPARATOR[,]"),
        }
    }
}
