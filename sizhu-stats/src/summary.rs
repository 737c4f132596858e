//! Descriptive summary: mean, median, mode, spread, shape, quartiles

use sizhu_plugin::prelude::*;
use crate::helpers::{extract_numbers, median_sorted, sorted};
use serde::{Deserialize, Serialize};

/// Quartiles by plain index selection (no interpolation)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    /// Always equal to the median
    pub q2: f64,
    pub q3: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Every value tied for the highest frequency, ascending
    pub mode: Vec<f64>,
    /// Population variance
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Third standardized moment
    pub skewness: f64,
    /// Fourth standardized moment minus 3 (excess)
    pub kurtosis: f64,
    pub quartiles: Quartiles,
}

/// Summarize a sample. An empty slice yields the all-zero summary.
pub fn summarize(values: &[f64]) -> StatisticalSummary {
    if values.is_empty() {
        return StatisticalSummary::default();
    }

    let sorted = sorted(values);
    let n = sorted.len();
    let nf = n as f64;

    let mean = sorted.iter().sum::<f64>() / nf;
    let median = median_sorted(&sorted);
    let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / nf;
    let std_dev = variance.sqrt();

    let (skewness, kurtosis) = if std_dev == 0.0 {
        (0.0, 0.0)
    } else {
        let m3 = sorted.iter().map(|x| ((x - mean) / std_dev).powi(3)).sum::<f64>() / nf;
        let m4 = sorted.iter().map(|x| ((x - mean) / std_dev).powi(4)).sum::<f64>() / nf;
        (m3, m4 - 3.0)
    };

    let min = sorted[0];
    let max = sorted[n - 1];

    StatisticalSummary {
        count: n,
        mean,
        median,
        mode: modes_sorted(&sorted),
        variance,
        std_dev,
        min,
        max,
        range: max - min,
        skewness,
        kurtosis,
        quartiles: Quartiles {
            q1: sorted[(nf * 0.25).floor() as usize],
            q2: median,
            q3: sorted[(nf * 0.75).floor() as usize],
        },
    }
}

/// Values tied for the longest run in a sorted slice
fn modes_sorted(sorted: &[f64]) -> Vec<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &x in sorted {
        match runs.last_mut() {
            Some((value, count)) if *value == x => *count += 1,
            _ => runs.push((x, 1)),
        }
    }

    let best = runs.iter().map(|(_, c)| *c).max().unwrap_or(0);
    runs.into_iter()
        .filter(|(_, c)| *c == best)
        .map(|(v, _)| v)
        .collect()
}

// ============ Summarize ============

pub struct Summarize;

static SUMMARIZE_ARGS: [ArgMeta; 1] = [ArgMeta::required(
    "values",
    "List<Number> | Number...",
    "Numbers to summarize",
)];

static SUMMARIZE_EXAMPLES: [&str; 2] = [
    "summarize(1, 2, 2, 3, 10) → {mean: 3.6, median: 2, mode: [2], ...}",
    "summarize([]) → all fields zero",
];

static SUMMARIZE_RELATED: [&str; 2] = ["correlate", "analyze_trend"];

impl FunctionPlugin for Summarize {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "summarize",
            description: "Mean, median, mode, variance, skewness, excess kurtosis and quartiles",
            usage: "summarize(values)",
            args: &SUMMARIZE_ARGS,
            returns: "Object",
            examples: &SUMMARIZE_EXAMPLES,
            category: "stats/basic",
            related: &SUMMARIZE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_numbers(args) {
            Ok(numbers) => Value::from_serialize(&summarize(&numbers)),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_zeroed() {
        let s = summarize(&[]);
        assert_eq!(s, StatisticalSummary::default());
        assert_eq!(s.count, 0);
        assert!(s.mode.is_empty());
    }

    #[test]
    fn test_basic_fields() {
        let s = summarize(&[3.0, 1.0, 2.0, 2.0, 10.0]);
        assert_eq!(s.count, 5);
        assert!(approx(s.mean, 3.6));
        assert_eq!(s.median, 2.0);
        assert_eq!(s.mode, vec![2.0]);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 10.0);
        assert_eq!(s.range, 9.0);
        // sorted [1, 2, 2, 3, 10]: floor(1.25) = 1, floor(3.75) = 3
        assert_eq!(s.quartiles.q1, 2.0);
        assert_eq!(s.quartiles.q3, 3.0);
        assert!(s.skewness > 0.0);
    }

    #[test]
    fn test_q2_is_median() {
        for values in [vec![1.0], vec![4.0, 1.0], vec![5.0, 3.0, 9.0, 1.0, 7.0, 2.0]] {
            let s = summarize(&values);
            assert_eq!(s.quartiles.q2, s.median);
        }
    }

    #[test]
    fn test_multimodal() {
        let s = summarize(&[1.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(s.mode, vec![1.0, 2.0]);
    }

    #[test]
    fn test_constant_series_has_flat_shape() {
        let s = summarize(&[4.0, 4.0, 4.0]);
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.kurtosis, 0.0);
    }

    #[test]
    fn test_kurtosis_is_excess() {
        // Two-point symmetric distribution: kurtosis 1, excess -2
        let s = summarize(&[-1.0, 1.0, -1.0, 1.0]);
        assert!(approx(s.kurtosis, -2.0));
        assert!(approx(s.skewness, 0.0));
    }

    #[test]
    fn test_plugin_call() {
        let ctx = EvalContext::new(Arc::new(PluginRegistry::new()));
        let result = Summarize.call(&[Value::from(vec![1.0, 2.0, 3.0])], &ctx);
        assert_eq!(result.get("mean").as_number(), Some(2.0));
        assert_eq!(result.get("quartiles").get("q2").as_number(), Some(2.0));

        let result = Summarize.call(&[Value::from("nope")], &ctx);
        assert!(result.is_error());
    }
}
