//! Statistics report: every analysis over one population, plus optional
//! scoring of a target chart

use crate::anomaly::{detect_anomaly, AnomalyDetection};
use crate::cluster::{cluster, ClusterAnalysis};
use crate::frequency::{pillar_frequency, PillarFrequency};
use crate::population::{population_stats, PopulationStats};
use crate::rarity::{score_rarity, RarityScore};
use serde::{Deserialize, Serialize};
use sizhu_core::{ChartResult, EngineConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub population_stats: PopulationStats,
    pub frequency_analysis: PillarFrequency,
    pub cluster_analysis: Vec<ClusterAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_rarity: Option<RarityScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_anomaly: Option<AnomalyDetection>,
    pub insights: Vec<String>,
}

pub fn generate_report(
    charts: &[ChartResult],
    target: Option<&ChartResult>,
    config: &EngineConfig,
) -> StatisticsReport {
    let span = tracing::info_span!("generate_report", samples = charts.len(), target = target.is_some());
    let _enter = span.enter();

    let population = population_stats(charts);

    let mut frequency_analysis = pillar_frequency(charts);
    if let Some(n) = config.frequency_top_n {
        frequency_analysis = frequency_analysis.truncated(n);
    }

    let cluster_analysis = cluster(charts, config.cluster_count);
    let target_rarity = target.map(|chart| score_rarity(chart, &population));
    let target_anomaly = target.map(|chart| detect_anomaly(chart, &population));
    let insights = insights(&population, &cluster_analysis);

    tracing::info!(
        clusters = cluster_analysis.len(),
        insights = insights.len(),
        "report generated"
    );

    StatisticsReport {
        population_stats: population,
        frequency_analysis,
        cluster_analysis,
        target_rarity,
        target_anomaly,
        insights,
    }
}

/// Narrative summary lines. Empty for an empty population.
pub fn insights(population: &PopulationStats, clusters: &[ClusterAnalysis]) -> Vec<String> {
    if population.total_samples == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();

    let elements = &population.element_distribution;
    if let Some(element) = elements.dominant() {
        lines.push(format!(
            "Dominant element: {} ({:.1}% of all element slots)",
            element,
            elements.share(element) * 100.0
        ));
    }

    let day_masters = &population.day_master_distribution;
    if let Some((stem, _)) = day_masters.most_common() {
        lines.push(format!(
            "Most common day master: {} ({:.1}% of charts)",
            stem,
            day_masters.share(stem) * 100.0
        ));
    }

    let ratio = &population.yin_yang_ratio;
    lines.push(format!(
        "Yin/yang ratio: {} yin to {} yang ({:.1}% yin)",
        ratio.yin,
        ratio.yang,
        ratio.yin_share() * 100.0
    ));

    // Earliest cluster wins ties
    let largest = clusters
        .iter()
        .fold(None::<&ClusterAnalysis>, |best, c| match best {
            Some(b) if b.size >= c.size => Some(b),
            _ => Some(c),
        });
    if let Some(c) = largest {
        lines.push(format!(
            "Largest cluster ({} charts, {:.1}%): {}",
            c.size,
            c.percentage,
            c.characteristics.join(", ")
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(pillars: [&str; 4]) -> ChartResult {
        ChartResult::parse(pillars[0], pillars[1], pillars[2], pillars[3]).unwrap()
    }

    fn population() -> Vec<ChartResult> {
        vec![
            chart(["甲寅", "乙卯", "甲寅", "乙卯"]),
            chart(["甲寅", "乙卯", "甲寅", "乙卯"]),
            chart(["甲子", "丙寅", "戊辰", "庚午"]),
            chart(["乙丑", "丁卯", "己巳", "辛未"]),
        ]
    }

    #[test]
    fn test_empty_population() {
        let report = generate_report(&[], None, &EngineConfig::default());
        assert_eq!(report.population_stats.total_samples, 0);
        assert!(report.cluster_analysis.is_empty());
        assert!(report.frequency_analysis.year.is_empty());
        assert!(report.insights.is_empty());
        assert!(report.target_rarity.is_none());
        assert!(report.target_anomaly.is_none());
    }

    #[test]
    fn test_target_scored_against_population() {
        let charts = population();
        let target = chart(["甲子", "丙子", "戊子", "庚子"]);
        let report = generate_report(&charts, Some(&target), &EngineConfig::default());

        let rarity = report.target_rarity.unwrap();
        assert_eq!(rarity, score_rarity(&target, &report.population_stats));
        let anomaly = report.target_anomaly.unwrap();
        assert!(anomaly.anomalous_features.iter().any(|f| f.starts_with("triple branch")));
    }

    #[test]
    fn test_insights_in_order() {
        let report = generate_report(&population(), None, &EngineConfig::default());
        assert_eq!(report.insights.len(), 4);
        // wood: 8 + 8 + 2 + 2 = 20 of 32 slots
        assert_eq!(report.insights[0], "Dominant element: wood (62.5% of all element slots)");
        assert_eq!(report.insights[1], "Most common day master: 甲 (50.0% of charts)");
        assert_eq!(report.insights[2], "Yin/yang ratio: 1 yin to 3 yang (25.0% yin)");
        assert!(report.insights[3].starts_with("Largest cluster (2 charts, 50.0%)"));
    }

    #[test]
    fn test_config_drives_clusters_and_truncation() {
        let config = EngineConfig::default().with_cluster_count(1).with_frequency_top_n(1);
        let report = generate_report(&population(), None, &config);

        assert_eq!(report.cluster_analysis.len(), 1);
        assert_eq!(report.cluster_analysis[0].size, 4);
        assert_eq!(report.frequency_analysis.year.len(), 1);
        assert_eq!(report.frequency_analysis.year[0].item, "甲寅");
        assert_eq!(report.frequency_analysis.year[0].count, 2);
    }

    #[test]
    fn test_deterministic() {
        let charts = population();
        let config = EngineConfig::default();
        assert_eq!(
            generate_report(&charts, charts.first(), &config),
            generate_report(&charts, charts.first(), &config)
        );
    }
}
