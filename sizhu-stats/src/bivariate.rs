//! Pearson correlation

use sizhu_plugin::prelude::*;
use crate::helpers::{extract_two_lists, mean};

/// Pearson correlation coefficient in [-1, 1].
///
/// Returns 0 when the series differ in length, are empty, or either one
/// has zero variance.
pub fn correlate(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }

    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

// ============ Correlate ============

pub struct Correlate;

static CORRELATE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "List<Number>", "First variable"),
    ArgMeta::required("y", "List<Number>", "Second variable, same length as x"),
];

static CORRELATE_EXAMPLES: [&str; 2] = [
    "correlate([1,2,3], [2,4,6]) → 1",
    "correlate([1,2,3], [1,2]) → 0",
];

static CORRELATE_RELATED: [&str; 2] = ["correlate_elements", "summarize"];

impl FunctionPlugin for Correlate {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "correlate",
            description: "Pearson correlation; 0 for mismatched, empty or constant input",
            usage: "correlate(x, y)",
            args: &CORRELATE_ARGS,
            returns: "Number",
            examples: &CORRELATE_EXAMPLES,
            category: "stats/basic",
            related: &CORRELATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_two_lists("correlate", args) {
            Ok((x, y)) => Value::Number(correlate(&x, &y)),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_perfect_positive_and_negative() {
        assert!((correlate(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((correlate(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let x = [1.0, 5.0, 2.0, 8.0, 3.0];
        let y = [2.0, 3.0, 1.0, 9.0, 4.0];
        assert_eq!(correlate(&x, &y), correlate(&y, &x));
    }

    #[test]
    fn test_self_correlation() {
        let x = [0.5, 7.0, -3.0, 2.25];
        assert!((correlate(&x, &x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(correlate(&[], &[]), 0.0);
        assert_eq!(correlate(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(correlate(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_plugin_arg_count() {
        let ctx = EvalContext::new(Arc::new(PluginRegistry::new()));
        let result = Correlate.call(&[Value::from(vec![1.0])], &ctx);
        match result {
            Value::Error(e) => assert_eq!(e.code, codes::ARG_COUNT),
            other => panic!("expected error, got {:?}", other),
        }

        let result = Correlate.call(&[Value::from(vec![1.0, 2.0]), Value::from(vec![2.0, 1.0])], &ctx);
        assert!((result.as_number().unwrap() + 1.0).abs() < 1e-12);
    }
}
