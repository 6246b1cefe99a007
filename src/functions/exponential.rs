use super::register_function;
use crate::function::Function;
use shuntix_macros::shuntix_fn;
use std::collections::HashMap;

pub fn register(registry: &mut HashMap<String, Function>) {
    register_function(registry, log());
    register_function(registry, log2());
    register_function(registry, log10());
    register_function(registry, log1p());
    register_function(registry, logb());
    register_function(registry, exp());
    register_function(registry, expm1());
    register_function(registry, pow());
    register_function(registry, sqrt());
    register_function(registry, cbrt());
}

#[shuntix_fn]
fn log(a: f64) -> Result<f64, String> {
    Ok(a.ln())
}

#[shuntix_fn]
fn log2(a: f64) -> Result<f64, String> {
    Ok(a.log2())
}

#[shuntix_fn]
fn log10(a: f64) -> Result<f64, String> {
    Ok(a.log10())
}

#[shuntix_fn]
fn log1p(a: f64) -> Result<f64, String> {
    Ok(a.ln_1p())
}

/// `logb(base, value)`
#[shuntix_fn]
fn logb(base: f64, value: f64) -> Result<f64, String> {
    Ok(value.ln() / base.ln())
}

#[shuntix_fn]
fn exp(a: f64) -> Result<f64, String> {
    Ok(a.exp())
}

#[shuntix_fn]
fn expm1(a: f64) -> Result<f64, String> {
    Ok(a.exp_m1())
}

#[shuntix_fn]
fn pow(base: f64, exponent: f64) -> Result<f64, String> {
    Ok(base.powf(exponent))
}

#[shuntix_fn]
fn sqrt(a: f64) -> Result<f64, String> {
    Ok(a.sqrt())
}

#[shuntix_fn]
fn cbrt(a: f64) -> Result<f64, String> {
    Ok(a.cbrt())
}
