//! Correlation of per-chart element counts with an external attribute

use serde::{Deserialize, Serialize};
use sizhu_core::{ChartResult, Element};
use sizhu_stats::{correlate, NOT_SIGNIFICANT_P_VALUE, SIGNIFICANT_P_VALUE};

pub const STRONG_CORRELATION: f64 = 0.7;
pub const MODERATE_CORRELATION: f64 = 0.4;
pub const WEAK_CORRELATION: f64 = 0.2;

/// One observation of the external attribute (e.g. an outcome score)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributePoint {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    None,
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    pub fn classify(correlation: f64) -> Self {
        let r = correlation.abs();
        if r >= STRONG_CORRELATION {
            CorrelationStrength::Strong
        } else if r >= MODERATE_CORRELATION {
            CorrelationStrength::Moderate
        } else if r >= WEAK_CORRELATION {
            CorrelationStrength::Weak
        } else {
            CorrelationStrength::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub element: Element,
    pub correlation: f64,
    pub strength: CorrelationStrength,
    /// Two-valued proxy: 0.01 at moderate or stronger, otherwise 0.5
    pub p_value: f64,
    pub sample_size: usize,
}

/// Correlate each element's per-chart count with `attributes`.
///
/// The attribute values are taken in the order given and must line up with
/// `charts`; a length mismatch yields zero correlation for every element.
pub fn correlate_elements(charts: &[ChartResult], attributes: &[AttributePoint]) -> Vec<CorrelationResult> {
    let outcome: Vec<f64> = attributes.iter().map(|a| a.value).collect();
    let per_chart: Vec<[usize; 5]> = charts.iter().map(ChartResult::element_counts).collect();

    Element::ALL
        .into_iter()
        .map(|element| {
            let counts: Vec<f64> = per_chart.iter().map(|c| c[element.index()] as f64).collect();
            let correlation = correlate(&counts, &outcome);
            let strength = CorrelationStrength::classify(correlation);
            CorrelationResult {
                element,
                correlation,
                strength,
                p_value: if strength >= CorrelationStrength::Moderate {
                    SIGNIFICANT_P_VALUE
                } else {
                    NOT_SIGNIFICANT_P_VALUE
                },
                sample_size: charts.len(),
            }
        })
        .collect()
}
