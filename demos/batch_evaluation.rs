use shuntix_rs::ExpressionBuilder;
use std::collections::HashMap;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
        HashMap::from([("price".to_string(), 95.5), ("volume".to_string(), 0.0)]),
    ];

    let mut expression = ExpressionBuilder::new("price * volume / (volume - 3000)")
        .variables(["price", "volume"])
        .build()
        .expect("Failed to compile");

    for (i, result) in expression.evaluate_batch(&contexts).iter().enumerate() {
        match result {
            Ok(value) => println!("Result {}: {}", i, value),
            Err(err) => println!("Result {}: error: {}", i, err),
        }
    }

    expression
        .set_variables(&contexts[1])
        .expect("Failed to bind variables");
    match expression.evaluate_async().await {
        Ok(value) => println!("Async result: {}", value),
        Err(err) => println!("Async error: {}", err),
    }
}
