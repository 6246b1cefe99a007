use crate::error::{ExpressionError, Result};
use crate::simplifier;
use crate::symbols::SymbolTable;
use crate::token::Token;
use crate::tokenizer::Tokenizer;
use log::debug;

/// Converts an infix expression into a postfix token sequence.
///
/// Functions ride the operator stack so their arguments reach the output
/// before the function itself, which is emitted at its closing parenthesis.
/// With `simplify` set, constant sub-expressions are folded before returning.
pub fn convert_to_rpn(
    expression: &str,
    symbols: &SymbolTable,
    implicit_multiplication: bool,
    simplify: bool,
) -> Result<Vec<Token>> {
    debug!("Converting expression: {}", expression);
    let tokenizer = Tokenizer::new(expression, symbols).implicit_multiplication(implicit_multiplication);
    let mut output: Vec<Token> = Vec::new();
    let mut stack: Vec<Token> = Vec::new();

    for token in tokenizer {
        let token = token?;
        match token {
            Token::Number(_) | Token::Variable(_) => output.push(token),
            Token::Function(_) | Token::ParenOpen => stack.push(token),
            Token::Separator => {
                while let Some(top) = stack.last() {
                    if matches!(top, Token::ParenOpen) {
                        break;
                    }
                    output.extend(stack.pop());
                }
                if stack.is_empty() {
                    return Err(ExpressionError::MisplacedSeparator);
                }
            }
            Token::Operator(ref o1) => {
                while let Some(Token::Operator(o2)) = stack.last() {
                    // a prefix operator never releases a pending binary one
                    if o1.is_unary() && !o2.is_unary() {
                        break;
                    }
                    if (o1.is_left_associative() && o1.precedence() <= o2.precedence())
                        || o1.precedence() < o2.precedence()
                    {
                        output.extend(stack.pop());
                    } else {
                        break;
                    }
                }
                stack.push(token);
            }
            Token::ParenClose => {
                loop {
                    match stack.pop() {
                        Some(Token::ParenOpen) => break,
                        Some(top) => output.push(top),
                        None => return Err(ExpressionError::MismatchedParentheses),
                    }
                }
                if matches!(stack.last(), Some(Token::Function(_))) {
                    output.extend(stack.pop());
                }
            }
        }
    }

    while let Some(token) = stack.pop() {
        match token {
            Token::ParenOpen | Token::ParenClose => {
                return Err(ExpressionError::MismatchedParentheses)
            }
            _ => output.push(token),
        }
    }

    debug!("Postfix: {}", render(&output));
    if simplify {
        let simplified = simplifier::simplify(output)?;
        debug!("Simplified: {}", render(&simplified));
        Ok(simplified)
    } else {
        Ok(output)
    }
}

pub(crate) fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
