use crate::error::{ExpressionError, Result};
use crate::operator::{builtin_operator, is_allowed_operator_char, multiplication, Operator};
use crate::symbols::SymbolTable;
use crate::token::Token;
use log::debug;

/// Single pass, forward-only lexer over an infix expression.
///
/// Positions reported in errors are 0-based character offsets.
pub struct Tokenizer<'a> {
    expression: &'a str,
    chars: Vec<char>,
    pos: usize,
    symbols: &'a SymbolTable,
    implicit_multiplication: bool,
    last_token: Option<Token>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(expression: &'a str, symbols: &'a SymbolTable) -> Self {
        Self {
            expression,
            chars: expression.chars().collect(),
            pos: 0,
            symbols,
            implicit_multiplication: true,
            last_token: None,
            failed: false,
        }
    }

    pub fn implicit_multiplication(mut self, enabled: bool) -> Self {
        self.implicit_multiplication = enabled;
        self
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let position = self.pos;

        if ch.is_ascii_digit() || ch == '.' {
            if matches!(self.last_token, Some(Token::Number(_))) {
                return Err(ExpressionError::AmbiguousAdjacency { position });
            }
            if let Some(token) = self.implied_multiplication(position)? {
                return Ok(Some(token));
            }
            return self.parse_number().map(Some);
        }

        if ch == ',' {
            self.pos += 1;
            return Ok(Some(Token::Separator));
        }

        if is_open_paren(ch) {
            if let Some(token) = self.implied_multiplication(position)? {
                return Ok(Some(token));
            }
            self.pos += 1;
            return Ok(Some(Token::ParenOpen));
        }

        if is_close_paren(ch) {
            self.pos += 1;
            return Ok(Some(Token::ParenClose));
        }

        if is_allowed_operator_char(ch) {
            return self.parse_operator().map(Some);
        }

        if ch.is_alphabetic() || ch == '_' {
            if let Some(token) = self.implied_multiplication(position)? {
                return Ok(Some(token));
            }
            return self.parse_function_or_variable().map(Some);
        }

        Err(ExpressionError::UnexpectedCharacter { ch, position })
    }

    /// A `*` when the previous token closed an operand and another one starts
    /// at `position`.
    fn implied_multiplication(&self, position: usize) -> Result<Option<Token>> {
        match &self.last_token {
            Some(last) if last.ends_operand() => {
                if self.implicit_multiplication {
                    Ok(Some(Token::Operator(multiplication())))
                } else {
                    Err(ExpressionError::AmbiguousAdjacency { position })
                }
            }
            _ => Ok(None),
        }
    }

    fn parse_number(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut end = start;
        while end < self.chars.len() && (self.chars[end].is_ascii_digit() || self.chars[end] == '.') {
            end += 1;
        }

        if let Some(exponent_end) = self.exponent_end(end) {
            end = exponent_end;
            if let Some(second_end) = self.exponent_end(end) {
                return Err(ExpressionError::MalformedNumber {
                    literal: self.chars[start..second_end].iter().collect(),
                    position: start,
                });
            }
        }

        let literal: String = self.chars[start..end].iter().collect();
        let value = literal
            .parse::<f64>()
            .map_err(|_| ExpressionError::MalformedNumber {
                literal: literal.clone(),
                position: start,
            })?;
        self.pos = end;
        Ok(Token::Number(value))
    }

    /// End index of an exponent `[eE][+-]?digits` starting at `index`.
    /// A bare `e` is left alone so it can start an identifier.
    fn exponent_end(&self, index: usize) -> Option<usize> {
        if !matches!(self.chars.get(index), Some('e' | 'E')) {
            return None;
        }
        let mut i = index + 1;
        if matches!(self.chars.get(i), Some('+' | '-')) {
            i += 1;
        }
        let digits_start = i;
        while self.chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        (i > digits_start).then_some(i)
    }

    fn parse_operator(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut end = start;
        while end < self.chars.len() && is_allowed_operator_char(self.chars[end]) {
            end += 1;
        }

        // longest registered symbol wins
        for candidate_end in (start + 1..=end).rev() {
            let symbol: String = self.chars[start..candidate_end].iter().collect();
            if let Some(operator) = self.operator(&symbol) {
                self.pos = candidate_end;
                return Ok(Token::Operator(operator));
            }
        }

        Err(ExpressionError::UnknownOperator {
            symbol: self.chars[start..end].iter().collect(),
            position: start,
        })
    }

    fn operator(&self, symbol: &str) -> Option<Operator> {
        if let Some(operator) = self.symbols.user_operator(symbol) {
            return Some(operator);
        }
        let mut chars = symbol.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let arity = if self.expects_operand() { 1 } else { 2 };
        builtin_operator(ch, arity).or_else(|| builtin_operator(ch, 3 - arity))
    }

    /// Whether the next operator has to be a prefix operator.
    fn expects_operand(&self) -> bool {
        match &self.last_token {
            None | Some(Token::ParenOpen) | Some(Token::Separator) | Some(Token::Function(_)) => true,
            // a postfix operator (unary, left associative) completes its operand
            Some(Token::Operator(operator)) => !operator.is_unary() || !operator.is_left_associative(),
            _ => false,
        }
    }

    fn parse_function_or_variable(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut end = start;
        while end < self.chars.len() && is_identifier_char(self.chars[end]) {
            end += 1;
        }

        let mut name = String::new();
        let mut longest: Option<(usize, Token)> = None;
        for (offset, ch) in self.chars[start..end].iter().enumerate() {
            name.push(*ch);
            let candidate_end = start + offset + 1;
            if let Some(function) = self.symbols.function(&name) {
                if self.next_non_whitespace(candidate_end).is_some_and(is_open_paren) {
                    longest = Some((candidate_end, Token::Function(function)));
                    continue;
                }
            }
            if self.symbols.is_variable(&name) {
                longest = Some((candidate_end, Token::variable(&name)));
            }
        }

        match longest {
            Some((candidate_end, token)) => {
                self.pos = candidate_end;
                Ok(token)
            }
            None => Err(ExpressionError::UnknownFunctionOrVariable {
                token: self.chars[start..end].iter().collect(),
                position: start,
                expression: self.expression.to_string(),
            }),
        }
    }

    fn next_non_whitespace(&self, from: usize) -> Option<char> {
        self.chars[from..].iter().copied().find(|ch| !ch.is_whitespace())
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                debug!("token: {}", token);
                self.last_token = Some(token.clone());
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

fn is_open_paren(ch: char) -> bool {
    matches!(ch, '(' | '{' | '[')
}

fn is_close_paren(ch: char) -> bool {
    matches!(ch, ')' | '}' | ']')
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
