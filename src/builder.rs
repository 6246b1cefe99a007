use crate::constants::CONSTANT_NAMES;
use crate::error::{ExpressionError, Result};
use crate::expression::Expression;
use crate::function::{is_valid_name, Function};
use crate::operator::Operator;
use crate::shunting_yard::convert_to_rpn;
use crate::symbols::SymbolTable;
use log::debug;

/// Collects the declarations for one expression and compiles it.
///
/// Registration methods chain. A bad declaration is remembered and
/// reported by [`ExpressionBuilder::build`].
///
/// ```
/// use shuntix_rs::ExpressionBuilder;
///
/// let mut expression = ExpressionBuilder::new("3x + 2")
///     .variable("x")
///     .build()
///     .unwrap();
/// expression.set_variable("x", 2.0).unwrap();
/// assert_eq!(expression.evaluate(), Ok(8.0));
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    expression: String,
    symbols: SymbolTable,
    implicit_multiplication: bool,
    simplify: bool,
    error: Option<ExpressionError>,
}

impl ExpressionBuilder {
    pub fn new(expression: &str) -> Self {
        Self {
            expression: expression.to_string(),
            symbols: SymbolTable::new(),
            implicit_multiplication: true,
            simplify: false,
            error: None,
        }
    }

    pub fn variable(mut self, name: &str) -> Self {
        if !is_valid_name(name) {
            return self.fail(ExpressionError::InvalidVariableName(name.to_string()));
        }
        self.symbols = self.symbols.with_variables([name]);
        self
    }

    pub fn variables<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.variable(name.as_ref()))
    }

    pub fn function(mut self, function: Function) -> Self {
        if !is_valid_name(function.name()) {
            return self.fail(ExpressionError::InvalidFunctionName(function.name().to_string()));
        }
        self.symbols = self.symbols.with_function(function);
        self
    }

    pub fn functions<I>(self, functions: I) -> Self
    where
        I: IntoIterator<Item = Function>,
    {
        functions.into_iter().fold(self, Self::function)
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        if let Err(err) = operator.validate() {
            return self.fail(err);
        }
        self.symbols = self.symbols.with_operator(operator);
        self
    }

    pub fn operators<I>(self, operators: I) -> Self
    where
        I: IntoIterator<Item = Operator>,
    {
        operators.into_iter().fold(self, Self::operator)
    }

    /// Whether adjacent operands such as `2x` multiply. On by default.
    pub fn implicit_multiplication(mut self, enabled: bool) -> Self {
        self.implicit_multiplication = enabled;
        self
    }

    /// Whether constant sub-expressions are folded at build time. Off by default.
    pub fn simplify(mut self, enabled: bool) -> Self {
        self.simplify = enabled;
        self
    }

    fn fail(mut self, err: ExpressionError) -> Self {
        self.error.get_or_insert(err);
        self
    }

    pub fn build(self) -> Result<Expression> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.expression.trim().is_empty() {
            return Err(ExpressionError::EmptyExpression);
        }

        let symbols = self.symbols.with_variables(CONSTANT_NAMES);
        if let Some(name) = symbols
            .variables()
            .iter()
            .find(|name| symbols.function(name).is_some())
        {
            return Err(ExpressionError::NameCollision(name.clone()));
        }

        debug!(
            "Building '{}' (implicit multiplication: {}, simplify: {})",
            self.expression, self.implicit_multiplication, self.simplify
        );
        let tokens = convert_to_rpn(
            &self.expression,
            &symbols,
            self.implicit_multiplication,
            self.simplify,
        )?;
        Ok(Expression::with_user_functions(tokens, symbols.user_function_names()))
    }
}
