//! Trend classification and short linear forecast

use sizhu_plugin::prelude::*;
use crate::helpers::{extract_numbers, extract_texts, mean, variance_p};
use serde::{Deserialize, Serialize};

/// Mean step size beyond which a series counts as moving
pub const TREND_THRESHOLD: f64 = 0.1;
/// Number of forecast steps
pub const FORECAST_STEPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    Fluctuating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trend: Trend,
    /// Mean change per step
    pub change_rate: f64,
    pub forecast: Vec<f64>,
    /// 0..=100
    pub confidence: f64,
    /// "<first label> ~ <last label>"
    pub period: String,
}

/// Classify a series and extrapolate it three steps.
///
/// Only the first and last label are used. Fewer than two values give a
/// stable trend with no forecast and zero confidence.
pub fn analyze_trend<S: AsRef<str>>(values: &[f64], labels: &[S]) -> TrendAnalysis {
    let period = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => format!("{} ~ {}", first.as_ref(), last.as_ref()),
        _ => String::new(),
    };

    if values.len() < 2 {
        return TrendAnalysis {
            trend: Trend::Stable,
            change_rate: 0.0,
            forecast: Vec::new(),
            confidence: 0.0,
            period,
        };
    }

    let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let avg_change = mean(&changes);
    let change_variance = variance_p(&changes);

    let trend = if change_variance > avg_change.abs() * 2.0 {
        Trend::Fluctuating
    } else if avg_change > TREND_THRESHOLD {
        Trend::Increasing
    } else if avg_change < -TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let last = values[values.len() - 1];
    let forecast = (1..=FORECAST_STEPS)
        .map(|step| last + avg_change * step as f64)
        .collect();

    TrendAnalysis {
        trend,
        change_rate: avg_change,
        forecast,
        confidence: (100.0 - change_variance * 10.0).clamp(0.0, 100.0),
        period,
    }
}

// ============ AnalyzeTrend ============

pub struct AnalyzeTrend;

static ANALYZE_TREND_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("values", "List<Number>", "Series in time order"),
    ArgMeta::optional("labels", "List<Text>", "Period labels, one per value", "[]"),
];

static ANALYZE_TREND_EXAMPLES: [&str; 1] = [
    "analyze_trend([1, 2, 3], [\"2021\", \"2022\", \"2023\"]) → {trend: increasing, forecast: [4, 5, 6]}",
];

static ANALYZE_TREND_RELATED: [&str; 1] = ["summarize"];

impl FunctionPlugin for AnalyzeTrend {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "analyze_trend",
            description: "Trend direction, mean change, confidence and a 3-step linear forecast",
            usage: "analyze_trend(values, labels?)",
            args: &ANALYZE_TREND_ARGS,
            returns: "Object",
            examples: &ANALYZE_TREND_EXAMPLES,
            category: "stats/trend",
            related: &ANALYZE_TREND_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(SizhuError::arg_count("analyze_trend", 2, args.len()));
        }

        let values = match extract_numbers(&args[0..1]) {
            Ok(v) => v,
            Err(e) => return Value::Error(e),
        };

        let labels = match args.get(1) {
            Some(arg) => match extract_texts(std::slice::from_ref(arg)) {
                Ok(l) => l,
                Err(e) => return Value::Error(e),
            },
            None => Vec::new(),
        };

        Value::from_serialize(&analyze_trend(&values, &labels))
    }
}
