mod concurrent;
mod validation;

pub use validation::ValidationResult;

use crate::constants::builtin_constant;
use crate::error::{ExpressionError, Result};
use crate::functions::is_builtin_function;
use crate::shunting_yard::render;
use crate::token::Token;
use log::trace;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A compiled postfix expression together with its variable bindings.
///
/// All occurrences of a name share one slot, so binding `x` once updates
/// every use site. Cloning copies the bindings; operators and functions
/// are shared.
#[derive(Debug, Clone)]
pub struct Expression {
    tokens: Vec<Token>,
    slots: HashMap<String, usize>,
    values: Vec<Option<f64>>,
    user_functions: Arc<HashSet<String>>,
}

impl Expression {
    /// Builds an expression straight from a postfix token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_user_functions(tokens, HashSet::new())
    }

    pub(crate) fn with_user_functions(mut tokens: Vec<Token>, user_functions: HashSet<String>) -> Self {
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut values = Vec::new();

        for token in tokens.iter_mut() {
            if let Token::Variable(variable) = token {
                let slot = match slots.get(variable.name()) {
                    Some(&slot) => slot,
                    None => {
                        let slot = values.len();
                        slots.insert(variable.name().to_string(), slot);
                        values.push(builtin_constant(variable.name()));
                        slot
                    }
                };
                variable.set_slot(slot);
            }
        }

        Self {
            tokens,
            slots,
            values,
            user_functions: Arc::new(user_functions),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Binds `value` to `name`. Names the expression does not use are ignored.
    pub fn set_variable(&mut self, name: &str, value: f64) -> Result<&mut Self> {
        if self.user_functions.contains(name) || is_builtin_function(name) {
            return Err(ExpressionError::NameCollision(name.to_string()));
        }
        match self.slots.get(name) {
            Some(&slot) => self.values[slot] = Some(value),
            None => trace!("Expression has no variable '{}', ignoring", name),
        }
        Ok(self)
    }

    pub fn set_variables(&mut self, values: &HashMap<String, f64>) -> Result<&mut Self> {
        for (name, value) in values {
            self.set_variable(name, *value)?;
        }
        Ok(self)
    }

    pub fn variable_names(&self) -> HashSet<String> {
        self.slots.keys().cloned().collect()
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn evaluate(&self) -> Result<f64> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.tokens.len());

        for token in &self.tokens {
            trace!("evaluate {} with stack {:?}", token, stack);
            match token {
                Token::Number(value) => stack.push(*value),
                Token::Variable(variable) => {
                    let value = self.values[variable.slot()].ok_or_else(|| {
                        ExpressionError::UnboundVariable(variable.name().to_string())
                    })?;
                    stack.push(value);
                }
                Token::Operator(operator) => {
                    let args = pop_operands(&mut stack, operator.arity()).ok_or_else(|| {
                        ExpressionError::InvalidOperandCount(operator.symbol().to_string())
                    })?;
                    stack.push(operator.apply(&args).map_err(ExpressionError::Arithmetic)?);
                }
                Token::Function(function) => {
                    let args = pop_operands(&mut stack, function.arity()).ok_or_else(|| {
                        ExpressionError::InvalidArgumentCount(function.name().to_string())
                    })?;
                    stack.push(function.apply(&args).map_err(ExpressionError::Arithmetic)?);
                }
                Token::ParenOpen | Token::ParenClose => {
                    return Err(ExpressionError::MismatchedParentheses)
                }
                Token::Separator => return Err(ExpressionError::MisplacedSeparator),
            }
        }

        match stack.as_slice() {
            [value] => Ok(*value),
            _ => Err(ExpressionError::InvalidStackSize(stack.len())),
        }
    }
}

/// Pops the top `count` values, keeping them in source order.
fn pop_operands(stack: &mut Vec<f64>, count: usize) -> Option<Vec<f64>> {
    (stack.len() >= count).then(|| stack.split_off(stack.len() - count))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(&self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ExpressionBuilder;
    use crate::function::Function;
    use crate::operator::builtin_operator;
    use std::f64::consts::E;

    fn eval(expression: &str) -> Result<f64> {
        ExpressionBuilder::new(expression).build()?.evaluate()
    }

    fn eval_simplified(expression: &str) -> Result<f64> {
        ExpressionBuilder::new(expression).simplify(true).build()?.evaluate()
    }

    #[test]
    fn test_simple_arithmetic() {
        assert_eq!(eval("2 + 3"), Ok(5.0));
        assert_eq!(eval("10 - 5"), Ok(5.0));
        assert_eq!(eval("6 * 7"), Ok(42.0));
        assert_eq!(eval("9 / 3"), Ok(3.0));
        assert_eq!(eval("10 % 3"), Ok(1.0));
    }

    #[test]
    fn test_complex_arithmetic() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(10 - 2) / 4"), Ok(2.0));
        assert_eq!(eval("((5 + 3) * (10 / 2)) + ((4 - 2) * (6 / 3)) - (8 % 3)"), Ok(42.0));
        assert_eq!(eval("((10 * (5 + 3)) / 4) - (2 * ((6 / 3) + (7 - 5)))"), Ok(12.0));
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval("2^3^2"), Ok(512.0));
        assert_eq!(eval("-3^2"), Ok(-9.0));
        assert_eq!(eval("(-3)^2"), Ok(9.0));
        assert_eq!(eval("8 - 4 - 2"), Ok(2.0));
        assert_eq!(eval("2^-1"), Ok(0.5));
        assert_eq!(eval("--2"), Ok(2.0));
        assert_eq!(eval("3 - -2"), Ok(5.0));
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(eval("1 & 0 | 1"), Ok(1.0));
        assert_eq!(eval("1 & (0 | 0)"), Ok(0.0));
        assert_eq!(eval("¬0 & 1"), Ok(1.0));
        assert_eq!(eval("2 + 2 & 0"), Ok(0.0));
    }

    #[test]
    fn test_implicit_multiplication() {
        let mut expression = ExpressionBuilder::new("2x").variable("x").build().unwrap();
        expression.set_variable("x", 3.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(6.0));

        assert_eq!(eval("2sin(0)"), Ok(0.0));
        assert_eq!(eval("2(3+4)"), Ok(14.0));

        let mut expression = ExpressionBuilder::new("x2x").variable("x").build().unwrap();
        expression.set_variable("x", E).unwrap();
        assert_eq!(expression.evaluate(), Ok(2.0 * E * E));

        let mut expression = ExpressionBuilder::new("x(2)").variable("x").build().unwrap();
        expression.set_variable("x", 4.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(8.0));
    }

    #[test]
    fn test_builtin_functions() {
        assert_eq!(eval("pow(2, 10)"), Ok(1024.0));
        assert_eq!(eval("sqrt(16) + abs(-2)"), Ok(6.0));
        assert_eq!(eval("floor(2.7) * ceil(0.2)"), Ok(2.0));
        assert_eq!(eval("signum(-4)"), Ok(-1.0));
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval("pi"), Ok(std::f64::consts::PI));
        assert_eq!(eval("π"), Ok(std::f64::consts::PI));
        assert_eq!(eval("2e"), Ok(2.0 * E));
        assert_eq!(eval("φ"), Ok(1.61803398874));

        let mut expression = ExpressionBuilder::new("pi * 2").build().unwrap();
        expression.set_variable("pi", 3.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(6.0));
    }

    #[test]
    fn test_shared_variable_slot() {
        let mut expression = ExpressionBuilder::new("x + x * x").variable("x").build().unwrap();
        assert_eq!(expression.variable_names(), HashSet::from(["x".to_string()]));
        expression.set_variable("x", 2.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(6.0));
        expression.set_variable("x", 3.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(12.0));
    }

    #[test]
    fn test_set_variables_from_map() {
        let mut expression = ExpressionBuilder::new("price * volume")
            .variables(["price", "volume"])
            .build()
            .unwrap();
        let context = HashMap::from([("price".to_string(), 20.0), ("volume".to_string(), 50.0)]);
        expression.set_variables(&context).unwrap();
        assert_eq!(expression.evaluate(), Ok(1000.0));
    }

    #[test]
    fn test_unbound_variable() {
        let mut expression = ExpressionBuilder::new("x + y").variables(["x", "y"]).build().unwrap();
        expression.set_variable("x", 1.0).unwrap();
        assert_eq!(
            expression.evaluate(),
            Err(ExpressionError::UnboundVariable("y".to_string()))
        );
    }

    #[test]
    fn test_variable_named_like_function() {
        let mut expression = ExpressionBuilder::new("x")
            .variable("x")
            .function(Function::new("f", 1, |args| Ok(args[0])))
            .build()
            .unwrap();
        assert_eq!(
            expression.set_variable("sin", 1.0).err(),
            Some(ExpressionError::NameCollision("sin".to_string()))
        );
        assert_eq!(
            expression.set_variable("f", 1.0).err(),
            Some(ExpressionError::NameCollision("f".to_string()))
        );
        assert!(expression.set_variable("unused", 1.0).is_ok());
    }

    #[test]
    fn test_contains_variable() {
        let expression = ExpressionBuilder::new("a * 2")
            .variables(["a", "b"])
            .build()
            .unwrap();
        assert!(expression.contains_variable("a"));
        assert!(!expression.contains_variable("b"));
    }

    #[test]
    fn test_clone_has_independent_bindings() {
        let mut original = ExpressionBuilder::new("x * 10").variable("x").build().unwrap();
        original.set_variable("x", 1.0).unwrap();
        let mut copy = original.clone();
        copy.set_variable("x", 2.0).unwrap();
        assert_eq!(original.evaluate(), Ok(10.0));
        assert_eq!(copy.evaluate(), Ok(20.0));
    }

    #[test]
    fn test_simplification_is_transparent() {
        for expression in [
            "2 + 3 * 4",
            "-3^2",
            "2^3^2",
            "sin(1) * cos(2) / tan(0.5)",
            "log(10) + sqrt(2) - 7 % 3",
            "pow(1.5, 2.5) * (1 - 1e-3)",
        ] {
            let plain = eval(expression).unwrap();
            let folded = eval_simplified(expression).unwrap();
            assert_eq!(plain.to_bits(), folded.to_bits(), "{expression}");
        }
    }

    #[test]
    fn test_non_deterministic_function_is_reevaluated() {
        let random = Function::with_determinism("rnd", 0, false, |_| Ok(rand::random::<f64>()));
        let expression = ExpressionBuilder::new("rnd()")
            .function(random)
            .simplify(true)
            .build()
            .unwrap();
        assert_eq!(expression.to_string(), "FUNCTION[rnd]");
        let first = expression.evaluate().unwrap();
        let second = expression.evaluate().unwrap();
        let third = expression.evaluate().unwrap();
        assert_ne!(first, second);
        assert_ne!(second, third);
    }

    #[test]
    fn test_deterministic_function_is_folded() {
        let draw = Function::new("draw", 0, |_| Ok(rand::random::<f64>()));
        let expression = ExpressionBuilder::new("draw() * 2")
            .function(draw)
            .simplify(true)
            .build()
            .unwrap();
        assert!(matches!(expression.tokens(), [Token::Number(_)]));
        let first = expression.evaluate().unwrap();
        assert_eq!(expression.evaluate(), Ok(first));
        assert_eq!(expression.evaluate(), Ok(first));
    }

    #[test]
    fn test_division_and_modulo_by_zero() {
        for expression in ["1/0", "14 % 0"] {
            assert!(matches!(eval(expression), Err(ExpressionError::Arithmetic(_))));
            assert!(matches!(
                ExpressionBuilder::new(expression).simplify(true).build(),
                Err(ExpressionError::Arithmetic(_))
            ));
        }
    }

    #[test]
    fn test_reusable_after_evaluation_error() {
        let mut expression = ExpressionBuilder::new("x / y").variables(["x", "y"]).build().unwrap();
        expression.set_variable("x", 10.0).unwrap().set_variable("y", 0.0).unwrap();
        assert_eq!(
            expression.evaluate(),
            Err(ExpressionError::Arithmetic("Division by zero!".to_string()))
        );
        expression.set_variable("y", 4.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(2.5));
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(eval("sin(1, 2)"), Err(ExpressionError::InvalidStackSize(2)));
        assert_eq!(
            eval("pow(2)"),
            Err(ExpressionError::InvalidArgumentCount("pow".to_string()))
        );
    }

    #[test]
    fn test_malformed_token_sequences() {
        let plus = builtin_operator('+', 2).unwrap();
        let expression = Expression::new(vec![Token::Number(1.0), Token::Operator(plus)]);
        assert_eq!(
            expression.evaluate(),
            Err(ExpressionError::InvalidOperandCount("+".to_string()))
        );

        let expression = Expression::new(vec![Token::Number(1.0), Token::Number(2.0)]);
        assert_eq!(expression.evaluate(), Err(ExpressionError::InvalidStackSize(2)));

        let expression = Expression::new(Vec::new());
        assert_eq!(expression.evaluate(), Err(ExpressionError::InvalidStackSize(0)));
    }

    #[test]
    fn test_direct_tokens_share_slots() {
        let times = builtin_operator('*', 2).unwrap();
        let mut expression = Expression::new(vec![
            Token::variable("x"),
            Token::variable("x"),
            Token::Operator(times),
        ]);
        expression.set_variable("x", 5.0).unwrap();
        assert_eq!(expression.evaluate(), Ok(25.0));
    }

    #[test]
    fn test_display_postfix() {
        let expression = ExpressionBuilder::new("2*x").variable("x").build().unwrap();
        assert_eq!(expression.to_string(), "NUMBER[2.0] VARIABLE[x] OPERATOR[*]");

        let expression = ExpressionBuilder::new("sin(x) * (1 + 2)")
            .variable("x")
            .simplify(true)
            .build()
            .unwrap();
        assert_eq!(
            expression.to_string(),
            "VARIABLE[x] FUNCTION[sin] NUMBER[3.0] OPERATOR[*]"
        );
    }
}
