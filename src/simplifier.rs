use crate::error::{ExpressionError, Result};
use crate::token::Token;

/// Folds every operator or deterministic function whose operands are all
/// numbers into a single number.
///
/// The top of the output stack is always the last token of the last complete
/// operand, so when the top `n` tokens are all numbers they are exactly the
/// `n` operands. Folding runs the operation eagerly, so a division by zero in
/// a constant sub-expression fails here rather than at evaluation.
pub fn simplify(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        let fold = match &token {
            Token::Operator(operator) => constant_operands(&output, operator.arity())
                .map(|args| (args.len(), operator.apply(&args))),
            Token::Function(function) if function.is_deterministic() => {
                constant_operands(&output, function.arity())
                    .map(|args| (args.len(), function.apply(&args)))
            }
            _ => None,
        };

        match fold {
            Some((arity, value)) => {
                let value = value.map_err(ExpressionError::Arithmetic)?;
                output.truncate(output.len() - arity);
                output.push(Token::Number(value));
            }
            None => output.push(token),
        }
    }

    Ok(output)
}

fn constant_operands(output: &[Token], arity: usize) -> Option<Vec<f64>> {
    if output.len() < arity {
        return None;
    }
    output[output.len() - arity..]
        .iter()
        .map(|token| match token {
            Token::Number(value) => Some(*value),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::shunting_yard::{convert_to_rpn, render};
    use crate::symbols::SymbolTable;

    fn simplified(expression: &str, symbols: &SymbolTable) -> String {
        let tokens = convert_to_rpn(expression, symbols, true, false).unwrap();
        render(&simplify(tokens).unwrap())
    }

    #[test]
    fn test_folds_constant_expression() {
        let symbols = SymbolTable::new();
        assert_eq!(simplified("2 + 3 * 4", &symbols), "NUMBER[14.0]");
        assert_eq!(simplified("-3^2", &symbols), "NUMBER[-9.0]");
        assert_eq!(simplified("pow(2, 3) + sqrt(16)", &symbols), "NUMBER[12.0]");
    }

    #[test]
    fn test_partial_folding() {
        let symbols = SymbolTable::new().with_variables(["x"]);
        assert_eq!(
            simplified("x * 2 + 3 * 4", &symbols),
            "VARIABLE[x] NUMBER[2.0] OPERATOR[*] NUMBER[12.0] OPERATOR[+]"
        );
        assert_eq!(
            simplified("2 * 3 + x", &symbols),
            "NUMBER[6.0] VARIABLE[x] OPERATOR[+]"
        );
        assert_eq!(
            simplified("pow(x, 1 + 1)", &symbols),
            "VARIABLE[x] NUMBER[2.0] FUNCTION[pow]"
        );
    }

    #[test]
    fn test_operand_below_unfolded_expression_stays() {
        // 7 sits below an unfolded sub-expression and must not be combined with it
        let symbols = SymbolTable::new().with_variables(["x"]);
        assert_eq!(
            simplified("7 + x * 3", &symbols),
            "NUMBER[7.0] VARIABLE[x] NUMBER[3.0] OPERATOR[*] OPERATOR[+]"
        );
    }

    #[test]
    fn test_non_deterministic_function_is_kept() {
        let symbols = SymbolTable::new()
            .with_function(Function::with_determinism("noise", 1, false, |args| Ok(args[0])));
        assert_eq!(
            simplified("noise(1 + 1) * 2", &symbols),
            "NUMBER[2.0] FUNCTION[noise] NUMBER[2.0] OPERATOR[*]"
        );
    }

    #[test]
    fn test_deterministic_zero_argument_function_folds() {
        let symbols = SymbolTable::new().with_function(Function::new("seven", 0, |_| Ok(7.0)));
        assert_eq!(simplified("seven() + 1", &symbols), "NUMBER[8.0]");
    }

    #[test]
    fn test_idempotent() {
        let symbols = SymbolTable::new().with_variables(["x", "y"]);
        for expression in ["x * (2 + 3) - y / 4", "sin(x) + cos(0) * y", "2^x^(1 + 1)"] {
            let once = simplify(convert_to_rpn(expression, &symbols, true, false).unwrap()).unwrap();
            let twice = simplify(once.clone()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_division_by_zero_fails_eagerly() {
        let symbols = SymbolTable::new();
        let tokens = convert_to_rpn("1 / 0", &symbols, true, false).unwrap();
        assert_eq!(
            simplify(tokens),
            Err(ExpressionError::Arithmetic("Division by zero!".to_string()))
        );
    }

    #[test]
    fn test_malformed_sequence_is_left_alone() {
        let tokens = vec![Token::Number(1.0), Token::Operator(crate::operator::multiplication())];
        assert_eq!(simplify(tokens.clone()).unwrap(), tokens);
    }
}
