//! Sizhu - four-pillar population statistics
//!
//! The typed analyses live in `sizhu-stats` and `sizhu-pillars` and are
//! re-exported here. [`Sizhu`] bundles the named-function registry with an
//! [`EngineConfig`] for callers that work with dynamic [`Value`]s.

mod logging;

pub use logging::{init_logging, log_level, DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};

pub use sizhu_core::*;
pub use sizhu_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
pub use sizhu_pillars::*;
pub use sizhu_stats::{
    analyze_trend, chi_square_test, correlate, rank_frequency, summarize, ChiSquareResult,
    FrequencyAnalysis, Quartiles, StatisticalSummary, Trend, TrendAnalysis,
};

use std::sync::Arc;

/// Registry with every statistics and chart function
pub fn standard_registry() -> PluginRegistry {
    let registry = sizhu_stats::load_stats_library(PluginRegistry::new());
    sizhu_pillars::load_pillars_library(registry)
}

/// Main Sizhu engine
pub struct Sizhu {
    registry: Arc<PluginRegistry>,
    config: EngineConfig,
}

impl Sizhu {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: EngineConfig::default(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Standard library with configuration read from the environment
    pub fn from_env() -> Result<Self, SizhuError> {
        Ok(Self::with_standard_library().with_config(EngineConfig::from_env()?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Call a registered function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        let ctx = EvalContext::new(self.registry.clone()).with_config(self.config.clone());
        let result = ctx.call(name, args);
        if let Value::Error(e) = &result {
            tracing::debug!(function = name, code = %e.code, "call failed");
        }
        result
    }

    /// Typed report with this engine's configuration
    pub fn generate_report(&self, charts: &[ChartResult], target: Option<&ChartResult>) -> StatisticsReport {
        sizhu_pillars::generate_report(charts, target, &self.config)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Sizhu {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charts() -> Vec<ChartResult> {
        vec![
            ChartResult::parse("甲寅", "乙卯", "甲寅", "乙卯").unwrap(),
            ChartResult::parse("甲子", "丙寅", "戊辰", "庚午")
                .unwrap()
                .with_demographics(4, 9, Gender::Male),
            ChartResult::parse("乙丑", "丁卯", "己巳", "辛未")
                .unwrap()
                .with_demographics(11, 22, Gender::Female),
        ]
    }

    #[test]
    fn test_standard_registry() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 19);
        assert!(registry.get_function("summarize").is_some());
        assert!(registry.get_function("generate_report").is_some());
    }

    #[test]
    fn test_call_by_name() {
        let sizhu = Sizhu::default();
        let summary = sizhu.call("summarize", &[Value::from(vec![1.0, 2.0, 3.0, 4.0])]);
        assert_eq!(summary.get("mean").as_number(), Some(2.5));

        assert_eq!(sizhu.call("element_of", &[Value::from("庚")]).as_text(), Some("metal"));

        match sizhu.call("score", &[]) {
            Value::Error(e) => {
                assert_eq!(e.code, codes::UNDEFINED_FUNC);
                assert!(e.suggestion.unwrap().contains("score_rarity"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_reaches_functions() {
        let sizhu = Sizhu::with_standard_library()
            .with_config(EngineConfig::default().with_cluster_count(1).with_frequency_top_n(1));
        let charts = Value::List(charts().into_iter().map(Value::from).collect());

        let clusters = sizhu.call("cluster", &[charts.clone()]);
        assert_eq!(clusters.as_list().map(|l| l.len()), Some(1));

        let report = sizhu.call("generate_report", &[charts]);
        assert_eq!(report.get("frequency_analysis").get("day").as_list().map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_typed_report_matches_named_call() {
        let sizhu = Sizhu::default();
        let charts = charts();
        let target = charts[0].clone();

        let report = sizhu.generate_report(&charts, Some(&target));
        assert_eq!(report.population_stats.total_samples, 3);
        assert_eq!(report.population_stats.month_distribution[&4], 1);
        assert_eq!(report.population_stats.gender_distribution[&Gender::Female], 1);

        let dynamic = sizhu.call(
            "generate_report",
            &[Value::List(charts.into_iter().map(Value::from).collect()), Value::from(target)],
        );
        assert_eq!(
            dynamic.get("target_rarity").get("overall").as_number(),
            report.target_rarity.map(|r| r.overall)
        );
        assert_eq!(
            dynamic.get("insights").as_list().map(|l| l.len()),
            Some(report.insights.len())
        );
    }

    #[test]
    fn test_help_and_listing() {
        let sizhu = Sizhu::default();
        let help = sizhu.help(Some("score_rarity"));
        assert_eq!(help.get("category").as_text(), Some("pillars/scoring"));

        let scoring = sizhu.list_functions(Some("pillars/scoring"));
        assert_eq!(scoring.as_list().map(|l| l.len()), Some(2));

        let general = sizhu.help(None);
        assert!(general.get("functions").get("stats/basic").as_list().is_some());
    }
}
