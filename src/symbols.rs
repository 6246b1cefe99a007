use crate::function::Function;
use crate::functions::builtin_function;
use crate::operator::Operator;
use std::collections::{HashMap, HashSet};

/// The names the tokenizer resolves identifiers and operator symbols against.
///
/// User functions shadow built-in functions of the same name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    variables: HashSet<String>,
    functions: HashMap<String, Function>,
    operators: HashMap<String, Operator>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.insert(function.name().to_string(), function);
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operators.insert(operator.symbol().to_string(), operator);
        self
    }

    pub fn is_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn variables(&self) -> &HashSet<String> {
        &self.variables
    }

    pub fn function(&self, name: &str) -> Option<Function> {
        self.functions
            .get(name)
            .cloned()
            .or_else(|| builtin_function(name))
    }

    pub fn user_operator(&self, symbol: &str) -> Option<Operator> {
        self.operators.get(symbol).cloned()
    }

    pub fn user_function_names(&self) -> HashSet<String> {
        self.functions.keys().cloned().collect()
    }
}
