//! Sizhu Statistics Plugin
//!
//! Domain-agnostic statistics over plain numbers and labels: descriptive
//! summaries, Pearson correlation, a simplified chi-square test, frequency
//! ranking and trend analysis. Every function is total; degenerate input
//! gives zeroed or empty results rather than errors.

mod helpers;
mod summary;
mod bivariate;
mod hypothesis;
mod frequency;
mod trend;

pub use summary::{summarize, StatisticalSummary, Quartiles};
pub use bivariate::correlate;
pub use hypothesis::{
    chi_square_test, critical_value, ChiSquareResult,
    CHI_SQUARE_CRITICAL_05, SIGNIFICANT_P_VALUE, NOT_SIGNIFICANT_P_VALUE,
};
pub use frequency::{rank_frequency, FrequencyAnalysis};
pub use trend::{analyze_trend, Trend, TrendAnalysis, TREND_THRESHOLD, FORECAST_STEPS};
pub use helpers::{extract_numbers, extract_texts};

use sizhu_plugin::PluginRegistry;

/// Load statistics functions into registry
pub fn load_stats_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(summary::Summarize)
        .with_function(bivariate::Correlate)
        .with_function(hypothesis::ChiSquareTest)
        .with_function(frequency::RankFrequency)
        .with_function(trend::AnalyzeTrend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_stats_library() {
        let registry = load_stats_library(PluginRegistry::new());

        assert!(registry.get_function("summarize").is_some());
        assert!(registry.get_function("correlate").is_some());
        assert!(registry.get_function("chi_square_test").is_some());
        assert!(registry.get_function("rank_frequency").is_some());
        assert!(registry.get_function("analyze_trend").is_some());
        assert_eq!(registry.len(), 5);
    }
}
