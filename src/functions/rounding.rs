use super::register_function;
use crate::function::Function;
use shuntix_macros::shuntix_fn;
use std::collections::HashMap;

pub fn register(registry: &mut HashMap<String, Function>) {
    register_function(registry, abs());
    register_function(registry, ceil());
    register_function(registry, floor());
    register_function(registry, signum());
}

#[shuntix_fn]
fn abs(a: f64) -> Result<f64, String> {
    Ok(a.abs())
}

#[shuntix_fn]
fn ceil(a: f64) -> Result<f64, String> {
    Ok(a.ceil())
}

#[shuntix_fn]
fn floor(a: f64) -> Result<f64, String> {
    Ok(a.floor())
}

// f64::signum maps 0.0 to 1.0; zero and NaN map to themselves here.
#[shuntix_fn]
fn signum(a: f64) -> Result<f64, String> {
    if a > 0.0 {
        Ok(1.0)
    } else if a < 0.0 {
        Ok(-1.0)
    } else {
        Ok(a)
    }
}
