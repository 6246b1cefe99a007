mod exponential;
mod rounding;
mod trigonometric;

use crate::function::Function;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUILTIN_FUNCTIONS: Lazy<HashMap<String, Function>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    trigonometric::register(&mut registry);
    exponential::register(&mut registry);
    rounding::register(&mut registry);
    registry
});

fn register_function(registry: &mut HashMap<String, Function>, function: Function) {
    registry.insert(function.name().to_string(), function);
}

/// Looks up one of the functions every expression can call.
pub fn builtin_function(name: &str) -> Option<Function> {
    BUILTIN_FUNCTIONS.get(name).cloned()
}

pub fn is_builtin_function(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains_key(name)
}
