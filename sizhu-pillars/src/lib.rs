//! Sizhu Pillars
//!
//! Population statistics over four-pillar charts: element, stem, branch and
//! day-master distributions, pillar frequency, element correlation, k-means
//! clustering, rarity scoring, anomaly detection and a combined report.
//!
//! Every analysis is a pure function of its input. The same analyses are
//! registered by name through [`load_pillars_library`].

mod distribution;
mod frequency;
mod population;
mod correlation;
mod cluster;
mod rarity;
mod anomaly;
mod report;
mod functions;

pub use distribution::{
    element_distribution, stem_distribution, branch_distribution, day_master_distribution,
    yin_yang_ratio, ElementDistribution, StemDistribution, BranchDistribution, YinYangRatio,
};
pub use frequency::{pillar_frequency, PillarFrequency};
pub use population::{population_stats, PopulationStats};
pub use correlation::{
    correlate_elements, AttributePoint, CorrelationResult, CorrelationStrength,
    STRONG_CORRELATION, MODERATE_CORRELATION, WEAK_CORRELATION,
};
pub use cluster::{cluster, characterize, ClusterAnalysis, KMEANS_ITERATIONS};
pub use rarity::{score_rarity, rarity_description, RarityScore};
pub use anomaly::{detect_anomaly, anomaly_explanation, AnomalyDetection, ANOMALY_THRESHOLD};
pub use report::{generate_report, insights, StatisticsReport};

use sizhu_plugin::PluginRegistry;

/// Load chart statistics functions into registry
pub fn load_pillars_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::ElementOfFn)
        .with_function(functions::YinYangOfFn)
        .with_function(functions::ElementDistributionFn)
        .with_function(functions::StemDistributionFn)
        .with_function(functions::BranchDistributionFn)
        .with_function(functions::DayMasterDistributionFn)
        .with_function(functions::YinYangRatioFn)
        .with_function(functions::PillarFrequencyFn)
        .with_function(functions::PopulationStatsFn)
        .with_function(functions::CorrelateElementsFn)
        .with_function(functions::ClusterFn)
        .with_function(functions::ScoreRarityFn)
        .with_function(functions::DetectAnomalyFn)
        .with_function(functions::GenerateReportFn)
}
