use shuntix_rs::{shuntix_fn, ExpressionBuilder, Operator};

#[shuntix_fn]
fn clamp(value: f64, low: f64, high: f64) -> Result<f64, String> {
    if low > high {
        return Err(format!("Invalid clamp range [{}, {}]", low, high));
    }
    Ok(value.clamp(low, high))
}

fn main() {
    pretty_env_logger::init();

    let greater = Operator::new(">", 2, true, 400, |args| Ok((args[0] > args[1]) as i32 as f64));

    let mut expression = ExpressionBuilder::new("clamp(price, 0, 150) > 100 & volume < 5000")
        .variables(["price", "volume"])
        .function(clamp())
        .operator(greater)
        .operator(Operator::new("<", 2, true, 400, |args| {
            Ok((args[0] < args[1]) as i32 as f64)
        }))
        .simplify(true)
        .build()
        .expect("Failed to compile");

    println!("Postfix: {}", expression);

    let validation = expression.validate_default();
    for error in validation.errors() {
        println!("Not ready yet: {}", error);
    }

    expression
        .set_variable("price", 120.0)
        .and_then(|expression| expression.set_variable("volume", 3000.0))
        .expect("Failed to bind variables");

    match expression.evaluate() {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
