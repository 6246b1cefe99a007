use super::Expression;
use crate::error::{ExpressionError, Result};
use log::debug;
use rayon::prelude::*;
use std::collections::HashMap;

impl Expression {
    /// Evaluates a snapshot of the expression on tokio's blocking pool.
    pub async fn evaluate_async(&self) -> Result<f64> {
        let expression = self.clone();
        tokio::task::spawn_blocking(move || expression.evaluate())
            .await
            .map_err(|err| ExpressionError::Async(err.to_string()))?
    }

    /// Evaluates the expression once per binding set, in parallel.
    ///
    /// Each binding set works on its own copy, so `self` is left untouched.
    pub fn evaluate_batch(&self, bindings: &[HashMap<String, f64>]) -> Vec<Result<f64>> {
        debug!("Evaluating {} binding sets of {}", bindings.len(), self);
        bindings
            .par_iter()
            .map(|values| {
                let mut expression = self.clone();
                expression.set_variables(values)?;
                expression.evaluate()
            })
            .collect()
    }
}
