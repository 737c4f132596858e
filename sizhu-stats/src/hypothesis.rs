//! Simplified chi-square goodness-of-fit test
//!
//! Significance is read from a fixed table of critical values at the 0.05
//! level, and the reported p-value is a two-valued proxy (0.01 when
//! significant, 0.5 otherwise). This is a known approximation, not a
//! distribution-based p-value.

use sizhu_plugin::prelude::*;
use crate::helpers::extract_two_lists;
use serde::{Deserialize, Serialize};

/// Chi-square critical values at alpha = 0.05 for df = 1..=10
pub const CHI_SQUARE_CRITICAL_05: [f64; 10] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307,
];

/// Proxy p-value reported for a significant result
pub const SIGNIFICANT_P_VALUE: f64 = 0.01;
/// Proxy p-value reported for a non-significant result
pub const NOT_SIGNIFICANT_P_VALUE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareResult {
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    pub critical_value: f64,
    /// Two-valued proxy, see module docs
    pub p_value: f64,
    pub significant: bool,
}

/// Critical value at 0.05; linear extrapolation `3.84 + df * 2` past df 10
pub fn critical_value(df: usize) -> f64 {
    let df = df.max(1);
    match CHI_SQUARE_CRITICAL_05.get(df - 1) {
        Some(v) => *v,
        None => 3.84 + df as f64 * 2.0,
    }
}

/// Goodness of fit of `observed` against `expected`.
///
/// Buckets with zero expectation are skipped. Only the overlapping prefix
/// of the two slices is compared; degrees of freedom are `len - 1`, at
/// least 1.
pub fn chi_square_test(observed: &[f64], expected: &[f64]) -> ChiSquareResult {
    let chi_square: f64 = observed
        .iter()
        .zip(expected)
        .filter(|(_, e)| **e != 0.0)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum();

    let degrees_of_freedom = observed.len().min(expected.len()).saturating_sub(1).max(1);
    let critical_value = critical_value(degrees_of_freedom);
    let significant = chi_square > critical_value;

    ChiSquareResult {
        chi_square,
        degrees_of_freedom,
        critical_value,
        p_value: if significant { SIGNIFICANT_P_VALUE } else { NOT_SIGNIFICANT_P_VALUE },
        significant,
    }
}

// ============ ChiSquareTest ============

pub struct ChiSquareTest;

static CHI_SQUARE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("observed", "List<Number>", "Observed counts"),
    ArgMeta::required("expected", "List<Number>", "Expected counts"),
];

static CHI_SQUARE_EXAMPLES: [&str; 1] = [
    "chi_square_test([30, 10], [20, 20]) → {chi_square: 10, significant: true, p_value: 0.01}",
];

static CHI_SQUARE_RELATED: [&str; 1] = ["correlate"];

impl FunctionPlugin for ChiSquareTest {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "chi_square_test",
            description: "Chi-square goodness of fit against a 0.05 critical-value table (coarse p-value)",
            usage: "chi_square_test(observed, expected)",
            args: &CHI_SQUARE_ARGS,
            returns: "Object",
            examples: &CHI_SQUARE_EXAMPLES,
            category: "stats/basic",
            related: &CHI_SQUARE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_two_lists("chi_square_test", args) {
            Ok((observed, expected)) => Value::from_serialize(&chi_square_test(&observed, &expected)),
            Err(e) => Value::Error(e),
        }
    }
}
