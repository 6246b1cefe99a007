use super::register_function;
use crate::function::Function;
use shuntix_macros::shuntix_fn;
use std::collections::HashMap;

pub fn register(registry: &mut HashMap<String, Function>) {
    register_function(registry, sin());
    register_function(registry, cos());
    register_function(registry, tan());
    register_function(registry, cot());
    register_function(registry, sec());
    register_function(registry, csc());
    register_function(registry, sinh());
    register_function(registry, cosh());
    register_function(registry, tanh());
    register_function(registry, coth());
    register_function(registry, sech());
    register_function(registry, csch());
    register_function(registry, asin());
    register_function(registry, acos());
    register_function(registry, atan());
    register_function(registry, toradian());
    register_function(registry, todegree());
}

fn reciprocal(value: f64, name: &str) -> Result<f64, String> {
    if value == 0.0 {
        Err(format!("Division by zero in {}!", name))
    } else {
        Ok(1.0 / value)
    }
}

#[shuntix_fn]
fn sin(a: f64) -> Result<f64, String> {
    Ok(a.sin())
}

#[shuntix_fn]
fn cos(a: f64) -> Result<f64, String> {
    Ok(a.cos())
}

#[shuntix_fn]
fn tan(a: f64) -> Result<f64, String> {
    Ok(a.tan())
}

#[shuntix_fn]
fn cot(a: f64) -> Result<f64, String> {
    reciprocal(a.tan(), "cotangent")
}

#[shuntix_fn]
fn sec(a: f64) -> Result<f64, String> {
    reciprocal(a.cos(), "secant")
}

#[shuntix_fn]
fn csc(a: f64) -> Result<f64, String> {
    reciprocal(a.sin(), "cosecant")
}

#[shuntix_fn]
fn sinh(a: f64) -> Result<f64, String> {
    Ok(a.sinh())
}

#[shuntix_fn]
fn cosh(a: f64) -> Result<f64, String> {
    Ok(a.cosh())
}

#[shuntix_fn]
fn tanh(a: f64) -> Result<f64, String> {
    Ok(a.tanh())
}

#[shuntix_fn]
fn coth(a: f64) -> Result<f64, String> {
    reciprocal(a.tanh(), "hyperbolic cotangent")
}

#[shuntix_fn]
fn sech(a: f64) -> Result<f64, String> {
    reciprocal(a.cosh(), "hyperbolic secant")
}

#[shuntix_fn]
fn csch(a: f64) -> Result<f64, String> {
    reciprocal(a.sinh(), "hyperbolic cosecant")
}

#[shuntix_fn]
fn asin(a: f64) -> Result<f64, String> {
    Ok(a.asin())
}

#[shuntix_fn]
fn acos(a: f64) -> Result<f64, String> {
    Ok(a.acos())
}

#[shuntix_fn]
fn atan(a: f64) -> Result<f64, String> {
    Ok(a.atan())
}

#[shuntix_fn]
fn toradian(a: f64) -> Result<f64, String> {
    Ok(a.to_radians())
}

#[shuntix_fn]
fn todegree(a: f64) -> Result<f64, String> {
    Ok(a.to_degrees())
}
