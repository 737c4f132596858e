//! Population profile: distributions plus demographic histograms

use crate::distribution::{
    branch_distribution, day_master_distribution, element_distribution, stem_distribution,
    yin_yang_ratio, BranchDistribution, ElementDistribution, StemDistribution, YinYangRatio,
};
use serde::{Deserialize, Serialize};
use sizhu_core::{ChartResult, Gender, Stem};
use std::collections::BTreeMap;

/// Aggregate snapshot of a reference population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub total_samples: usize,
    pub element_distribution: ElementDistribution,
    pub stem_distribution: StemDistribution,
    pub branch_distribution: BranchDistribution,
    pub day_master_distribution: StemDistribution,
    pub yin_yang_ratio: YinYangRatio,
    /// Birth month 1..=12; charts without a month are not counted
    pub month_distribution: BTreeMap<u8, usize>,
    /// Birth hour 0..=23; charts without an hour are not counted
    pub hour_distribution: BTreeMap<u8, usize>,
    pub gender_distribution: BTreeMap<Gender, usize>,
}

impl PopulationStats {
    /// Share of the population whose day master is `stem`, `None` when the
    /// stem never occurs or the population is empty
    pub fn day_master_share(&self, stem: Stem) -> Option<f64> {
        let total = self.day_master_distribution.total;
        let count = self.day_master_distribution.count(stem);
        if total == 0 || count == 0 {
            return None;
        }
        Some(count as f64 / total as f64)
    }
}

impl Default for PopulationStats {
    fn default() -> Self {
        population_stats(&[])
    }
}

pub fn population_stats(charts: &[ChartResult]) -> PopulationStats {
    let mut month_distribution: BTreeMap<u8, usize> = (1..=12).map(|m| (m, 0)).collect();
    let mut hour_distribution: BTreeMap<u8, usize> = (0..=23).map(|h| (h, 0)).collect();
    let mut gender_distribution: BTreeMap<Gender, usize> =
        Gender::ALL.iter().map(|g| (*g, 0)).collect();

    for chart in charts {
        if let Some(month) = chart.birth_month() {
            *month_distribution.entry(month).or_insert(0) += 1;
        }
        if let Some(hour) = chart.birth_hour() {
            *hour_distribution.entry(hour).or_insert(0) += 1;
        }
        if let Some(gender) = chart.gender() {
            *gender_distribution.entry(gender).or_insert(0) += 1;
        }
    }

    PopulationStats {
        total_samples: charts.len(),
        element_distribution: element_distribution(charts),
        stem_distribution: stem_distribution(charts),
        branch_distribution: branch_distribution(charts),
        day_master_distribution: day_master_distribution(charts),
        yin_yang_ratio: yin_yang_ratio(charts),
        month_distribution,
        hour_distribution,
        gender_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_profile() {
        let charts = vec![
            ChartResult::parse("甲子", "丙寅", "戊辰", "庚午")
                .unwrap()
                .with_demographics(2, 5, Gender::Male),
            ChartResult::parse("乙丑", "丁卯", "戊辰", "辛未")
                .unwrap()
                .with_demographics(2, 23, Gender::Female),
            ChartResult::parse("壬申", "癸酉", "甲戌", "乙亥").unwrap(),
        ];
        let stats = population_stats(&charts);

        assert_eq!(stats.total_samples, 3);
        assert_eq!(stats.element_distribution.total, 24);
        assert_eq!(stats.month_distribution.len(), 12);
        assert_eq!(stats.month_distribution[&2], 2);
        assert_eq!(stats.hour_distribution.len(), 24);
        assert_eq!(stats.hour_distribution[&23], 1);
        assert_eq!(stats.gender_distribution[&Gender::Female], 1);
        assert_eq!(stats.gender_distribution[&Gender::Other], 0);

        assert_eq!(stats.day_master_share(Stem::Wu), Some(2.0 / 3.0));
        assert_eq!(stats.day_master_share(Stem::Gui), None);
    }

    #[test]
    fn test_empty_population() {
        let stats = PopulationStats::default();
        assert_eq!(stats.total_samples, 0);
        assert_eq!(stats.day_master_share(Stem::Jia), None);
        assert_eq!(stats.gender_distribution.len(), 3);
    }

    #[test]
    fn test_serializes_with_symbol_keys() {
        let charts = vec![ChartResult::parse("甲子", "丙寅", "戊辰", "庚午").unwrap()];
        let json = serde_json::to_value(population_stats(&charts)).unwrap();
        assert_eq!(json["day_master_distribution"]["counts"]["戊"], 1);
        assert_eq!(json["gender_distribution"]["male"], 0);
    }
}
