extern crate self as shuntix_rs;

pub mod builder;
pub mod constants;
pub mod error;
pub mod expression;
pub mod function;
pub mod functions;
pub mod operator;
pub mod shunting_yard;
pub mod simplifier;
pub mod symbols;
pub mod token;
pub mod tokenizer;

pub use builder::ExpressionBuilder;
pub use error::{ExpressionError, Result};
pub use expression::{Expression, ValidationResult};
pub use function::Function;
pub use operator::Operator;
pub use shuntix_macros::shuntix_fn;
pub use token::Token;

use std::collections::HashMap;

/// Compiles `expression` with every key of `context` declared as a variable,
/// binds the values and evaluates it.
pub fn evaluate_expression(expression: &str, context: &HashMap<String, f64>) -> Result<f64> {
    let mut compiled = ExpressionBuilder::new(expression)
        .variables(context.keys())
        .build()?;
    compiled.set_variables(context)?;
    compiled.evaluate()
}
