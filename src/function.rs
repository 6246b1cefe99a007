use crate::operator::ApplyFn;
use std::fmt;
use std::sync::Arc;

/// A named function with a fixed number of arguments.
///
/// Functions flagged as non-deterministic (random draws, clocks) are never
/// folded into constants by the simplifier.
#[derive(Clone)]
pub struct Function {
    name: String,
    arity: usize,
    deterministic: bool,
    apply: ApplyFn,
}

impl Function {
    pub fn new<F>(name: &str, arity: usize, apply: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Self::with_determinism(name, arity, true, apply)
    }

    pub fn with_determinism<F>(name: &str, arity: usize, deterministic: bool, apply: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            arity,
            deterministic,
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn apply(&self, args: &[f64]) -> Result<f64, String> {
        (self.apply)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("deterministic", &self.deterministic)
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arity == other.arity
            && self.deterministic == other.deterministic
    }
}

/// A letter or `_`, followed by letters, digits or `_`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}
