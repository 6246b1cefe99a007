//! Named constants every compiled expression starts out with.

pub const PI: f64 = std::f64::consts::PI;
pub const E: f64 = std::f64::consts::E;
pub const PHI: f64 = 1.61803398874;

pub const CONSTANT_NAMES: [&str; 4] = ["pi", "π", "e", "φ"];

pub fn builtin_constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "π" => Some(PI),
        "e" => Some(E),
        "φ" => Some(PHI),
        _ => None,
    }
}
