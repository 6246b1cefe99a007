use super::Expression;
use crate::token::Token;

/// Outcome of [`Expression::validate`]. Valid exactly when there are no errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::from_errors(Vec::new())
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Expression {
    /// Checks the postfix sequence without evaluating it.
    ///
    /// Walks the tokens counting the operands that would be on the stack.
    /// With `check_variables` set, every occurrence of an unbound variable
    /// is reported as well.
    pub fn validate(&self, check_variables: bool) -> ValidationResult {
        let mut errors = Vec::new();

        if check_variables {
            for token in &self.tokens {
                if let Token::Variable(variable) = token {
                    if self.values[variable.slot()].is_none() {
                        errors.push(format!("The variable '{}' has not been set", variable.name()));
                    }
                }
            }
        }

        if self.tokens.is_empty() {
            errors.push("The expression is empty".to_string());
            return ValidationResult::from_errors(errors);
        }

        let mut count: isize = 0;
        for token in &self.tokens {
            match token {
                Token::Number(_) | Token::Variable(_) => count += 1,
                Token::Function(function) => {
                    let arity = function.arity() as isize;
                    if arity > count {
                        errors.push(format!("Not enough arguments for '{}'", function.name()));
                    }
                    if arity > 1 {
                        count -= arity - 1;
                    } else if arity == 0 {
                        // a function without arguments pushes its result
                        count += 1;
                    }
                }
                Token::Operator(operator) => {
                    if !operator.is_unary() {
                        count -= 1;
                    }
                }
                Token::ParenOpen | Token::ParenClose => {
                    errors.push("Mismatched parentheses".to_string());
                }
                Token::Separator => errors.push("Misplaced function separator".to_string()),
            }
            if count < 1 {
                errors.push("Too many operators".to_string());
                return ValidationResult::from_errors(errors);
            }
        }

        if count > 1 {
            errors.push("Too many operands".to_string());
        }
        ValidationResult::from_errors(errors)
    }

    pub fn validate_default(&self) -> ValidationResult {
        self.validate(true)
    }
}
