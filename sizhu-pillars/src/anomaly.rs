//! Anomaly detection for a single chart
//!
//! Four independent rules add to a raw score, which is clamped to 0..=1
//! only after the anomaly flag has been decided.

use crate::population::PopulationStats;
use serde::{Deserialize, Serialize};
use sizhu_core::{Branch, ChartResult, Element};
use std::collections::BTreeMap;

/// Element tally at or above which a concentration is extreme
pub const EXTREME_ELEMENT_COUNT: usize = 7;
pub const EXTREME_ELEMENT_WEIGHT: f64 = 0.3;
/// Missing elements needed before absence counts
pub const MISSING_ELEMENT_COUNT: usize = 2;
pub const MISSING_ELEMENT_WEIGHT: f64 = 0.2;
/// Day-master population share below which it is rare
pub const RARE_DAY_MASTER_SHARE: f64 = 0.05;
pub const RARE_DAY_MASTER_WEIGHT: f64 = 0.15;
/// Repeats of one branch across the four pillars that count as a triple
pub const TRIPLE_BRANCH_COUNT: usize = 3;
pub const TRIPLE_BRANCH_WEIGHT: f64 = 0.2;

/// Raw score above which a chart is flagged
pub const ANOMALY_THRESHOLD: f64 = 0.5;

pub const VERY_UNUSUAL: f64 = 0.7;
pub const SLIGHTLY_UNUSUAL: f64 = 0.3;

pub const VERY_UNUSUAL_EXPLANATION: &str = "Very unusual chart: several features rarely seen together";
pub const UNUSUAL_EXPLANATION: &str = "Unusual chart with clearly atypical features";
pub const SLIGHTLY_UNUSUAL_EXPLANATION: &str = "Slightly unusual chart with a few atypical features";
pub const TYPICAL_EXPLANATION: &str = "Typical chart within the normal range of the population";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDetection {
    pub is_anomaly: bool,
    /// Clamped to 0..=1
    pub anomaly_score: f64,
    pub anomalous_features: Vec<String>,
    pub explanation: String,
}

pub fn anomaly_explanation(score: f64) -> &'static str {
    if score > VERY_UNUSUAL {
        VERY_UNUSUAL_EXPLANATION
    } else if score > ANOMALY_THRESHOLD {
        UNUSUAL_EXPLANATION
    } else if score > SLIGHTLY_UNUSUAL {
        SLIGHTLY_UNUSUAL_EXPLANATION
    } else {
        TYPICAL_EXPLANATION
    }
}

pub fn detect_anomaly(chart: &ChartResult, population: &PopulationStats) -> AnomalyDetection {
    let counts = chart.element_counts();
    let mut raw = 0.0;
    let mut features = Vec::new();

    for element in Element::ALL {
        let count = counts[element.index()];
        if count >= EXTREME_ELEMENT_COUNT {
            raw += EXTREME_ELEMENT_WEIGHT;
            features.push(format!("extreme {} concentration ({}/8)", element, count));
        }
    }

    let missing: Vec<&str> = Element::ALL
        .iter()
        .filter(|e| counts[e.index()] == 0)
        .map(|e| e.name())
        .collect();
    if missing.len() >= MISSING_ELEMENT_COUNT {
        raw += MISSING_ELEMENT_WEIGHT * missing.len() as f64;
        features.push(format!("missing elements: {}", missing.join(", ")));
    }

    // No reference point without a population
    if population.day_master_distribution.total > 0 {
        let day_master = chart.day_master();
        let share = population.day_master_share(day_master).unwrap_or(0.0);
        if share < RARE_DAY_MASTER_SHARE {
            raw += RARE_DAY_MASTER_WEIGHT;
            features.push(format!("rare day-master ({})", day_master.symbol()));
        }
    }

    let mut branch_counts: BTreeMap<Branch, usize> = BTreeMap::new();
    for branch in chart.branches() {
        *branch_counts.entry(branch).or_insert(0) += 1;
    }
    for (branch, count) in branch_counts {
        if count >= TRIPLE_BRANCH_COUNT {
            raw += TRIPLE_BRANCH_WEIGHT;
            features.push(format!("triple branch ({})", branch.symbol()));
        }
    }

    let anomaly_score = f64::clamp(raw, 0.0, 1.0);
    AnomalyDetection {
        is_anomaly: raw > ANOMALY_THRESHOLD,
        anomaly_score,
        anomalous_features: features,
        explanation: anomaly_explanation(anomaly_score).to_string(),
    }
}
