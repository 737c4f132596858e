//! Pillar combination frequency, one ranking per pillar position

use serde::{Deserialize, Serialize};
use sizhu_core::{ChartResult, Pillar};
use sizhu_stats::{rank_frequency, FrequencyAnalysis};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarFrequency {
    pub year: Vec<FrequencyAnalysis>,
    pub month: Vec<FrequencyAnalysis>,
    pub day: Vec<FrequencyAnalysis>,
    pub hour: Vec<FrequencyAnalysis>,
}

impl PillarFrequency {
    /// Keep only the `n` highest-ranked combinations per position
    pub fn truncated(mut self, n: usize) -> Self {
        self.year.truncate(n);
        self.month.truncate(n);
        self.day.truncate(n);
        self.hour.truncate(n);
        self
    }
}

fn rank_position(charts: &[ChartResult], pick: impl Fn(&ChartResult) -> Pillar) -> Vec<FrequencyAnalysis> {
    let tokens: Vec<String> = charts.iter().map(|c| pick(c).token()).collect();
    rank_frequency(&tokens)
}

/// Rank stem+branch tokens such as "甲子" separately for each position
pub fn pillar_frequency(charts: &[ChartResult]) -> PillarFrequency {
    PillarFrequency {
        year: rank_position(charts, |c| c.year),
        month: rank_position(charts, |c| c.month),
        day: rank_position(charts, |c| c.day),
        hour: rank_position(charts, |c| c.hour),
    }
}
