//! Chart analyses: element correlation, clustering, rarity, anomalies, reports

use super::{extract_attributes, extract_chart, extract_charts, extract_count, extract_population};
use crate::anomaly::detect_anomaly;
use crate::cluster::cluster;
use crate::correlation::correlate_elements;
use crate::rarity::score_rarity;
use crate::report::generate_report;
use sizhu_plugin::prelude::*;

// ============================================================================
// correlate_elements(charts, attributes) → List<Object>
// ============================================================================

pub struct CorrelateElementsFn;

static CORRELATE_ELEMENTS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("charts", "List<Chart>", "Charts to correlate"),
    ArgMeta::required(
        "attributes",
        "List<Number | {index, value}>",
        "External attribute per chart, in chart order",
    ),
];
static CORRELATE_ELEMENTS_EXAMPLES: [&str; 1] =
    ["correlate_elements(charts, [72, 85, 64]) → [{element: \"wood\", correlation: 0.81, strength: \"strong\", ...}, ...]"];
static CORRELATE_ELEMENTS_RELATED: [&str; 1] = ["correlate"];

impl FunctionPlugin for CorrelateElementsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "correlate_elements",
            description: "Pearson correlation of each element's count with an external attribute",
            usage: "correlate_elements(charts, attributes)",
            args: &CORRELATE_ELEMENTS_ARGS,
            returns: "List<Object>",
            examples: &CORRELATE_ELEMENTS_EXAMPLES,
            category: "pillars/correlation",
            related: &CORRELATE_ELEMENTS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(SizhuError::arg_count("correlate_elements", 2, args.len()));
        }
        let charts = match extract_charts("correlate_elements", &args[0]) {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };
        let attributes = match extract_attributes("correlate_elements", &args[1]) {
            Ok(a) => a,
            Err(e) => return Value::Error(e),
        };
        Value::from_serialize(&correlate_elements(&charts, &attributes))
    }
}

// ============================================================================
// cluster(charts, k?) → List<Object>
// ============================================================================

pub struct ClusterFn;

static CLUSTER_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("charts", "List<Chart>", "Charts to group"),
    ArgMeta::optional("k", "Number", "Number of seed centroids", "cluster_count from the engine config"),
];
static CLUSTER_EXAMPLES: [&str; 2] = [
    "cluster(charts) → groups by element make-up with the configured k",
    "cluster(charts, 3) → at most 3 non-empty clusters",
];
static CLUSTER_RELATED: [&str; 2] = ["element_distribution", "generate_report"];

impl FunctionPlugin for ClusterFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cluster",
            description: "k-means over element counts; empty clusters are dropped",
            usage: "cluster(charts, k?)",
            args: &CLUSTER_ARGS,
            returns: "List<Object>",
            examples: &CLUSTER_EXAMPLES,
            category: "pillars/cluster",
            related: &CLUSTER_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(SizhuError::arg_count("cluster", 2, args.len()));
        }
        let charts = match extract_charts("cluster", &args[0]) {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };
        let k = match args.get(1) {
            Some(arg) => match extract_count("cluster", "k", arg) {
                Ok(k) => k,
                Err(e) => return Value::Error(e),
            },
            None => ctx.config.cluster_count,
        };
        Value::from_serialize(&cluster(&charts, k))
    }
}

// ============================================================================
// score_rarity(chart, population) → Object
// ============================================================================

pub struct ScoreRarityFn;

static TARGET_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("chart", "Chart", "Chart to score"),
    ArgMeta::required(
        "population",
        "Object | List<Chart>",
        "Result of population_stats(), or the reference charts themselves",
    ),
];
static SCORE_RARITY_EXAMPLES: [&str; 1] =
    ["score_rarity(\"甲子 丙寅 戊辰 庚午\", population_stats(charts)) → {overall: 3.75, description: \"Common chart: ...\", ...}"];
static SCORE_RARITY_RELATED: [&str; 2] = ["detect_anomaly", "population_stats"];

fn target_and_population(
    func: &str,
    args: &[Value],
) -> Result<(ChartResult, crate::population::PopulationStats), SizhuError> {
    if args.len() != 2 {
        return Err(SizhuError::arg_count(func, 2, args.len()));
    }
    Ok((extract_chart(func, &args[0])?, extract_population(func, &args[1])?))
}

impl FunctionPlugin for ScoreRarityFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "score_rarity",
            description: "Rarity of one chart against a population, 0 (common) to 100 (very rare)",
            usage: "score_rarity(chart, population)",
            args: &TARGET_ARGS,
            returns: "Object",
            examples: &SCORE_RARITY_EXAMPLES,
            category: "pillars/scoring",
            related: &SCORE_RARITY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match target_and_population("score_rarity", args) {
            Ok((chart, population)) => Value::from_serialize(&score_rarity(&chart, &population)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// detect_anomaly(chart, population) → Object
// ============================================================================

pub struct DetectAnomalyFn;

static DETECT_ANOMALY_EXAMPLES: [&str; 1] =
    ["detect_anomaly(\"甲子 丙子 戊子 庚子\", charts) → {is_anomaly: false, anomalous_features: [\"triple branch (子)\"], ...}"];
static DETECT_ANOMALY_RELATED: [&str; 2] = ["score_rarity", "population_stats"];

impl FunctionPlugin for DetectAnomalyFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "detect_anomaly",
            description: "Flag a chart whose features are atypical for the population",
            usage: "detect_anomaly(chart, population)",
            args: &TARGET_ARGS,
            returns: "Object",
            examples: &DETECT_ANOMALY_EXAMPLES,
            category: "pillars/scoring",
            related: &DETECT_ANOMALY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match target_and_population("detect_anomaly", args) {
            Ok((chart, population)) => Value::from_serialize(&detect_anomaly(&chart, &population)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// generate_report(charts, target?) → Object
// ============================================================================

pub struct GenerateReportFn;

static GENERATE_REPORT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("charts", "List<Chart>", "Population to analyse"),
    ArgMeta::optional("target", "Chart", "Chart to score against the population", "none"),
];
static GENERATE_REPORT_EXAMPLES: [&str; 1] =
    ["generate_report(charts, \"甲子 丙寅 戊辰 庚午\").insights → [\"Dominant element: ...\", ...]"];
static GENERATE_REPORT_RELATED: [&str; 4] = ["population_stats", "pillar_frequency", "cluster", "score_rarity"];

impl FunctionPlugin for GenerateReportFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "generate_report",
            description: "Population profile, pillar frequency, clusters, target scoring and insights in one object",
            usage: "generate_report(charts, target?)",
            args: &GENERATE_REPORT_ARGS,
            returns: "Object",
            examples: &GENERATE_REPORT_EXAMPLES,
            category: "pillars/report",
            related: &GENERATE_REPORT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.is_empty() || args.len() > 2 {
            return Value::Error(SizhuError::arg_count("generate_report", 2, args.len()));
        }
        let charts = match extract_charts("generate_report", &args[0]) {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };
        let target = match args.get(1) {
            Some(Value::Null) | None => None,
            Some(arg) => match extract_chart("generate_report", arg) {
                Ok(chart) => Some(chart),
                Err(e) => return Value::Error(e),
            },
        };
        Value::from_serialize(&generate_report(&charts, target.as_ref(), &ctx.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn charts() -> Value {
        Value::List(vec![
            Value::from("甲寅 乙卯 甲寅 乙卯"),
            Value::from("甲子 丙寅 戊辰 庚午"),
            Value::from("乙丑 丁卯 己巳 辛未"),
            Value::from("壬子 癸亥 壬子 癸亥"),
        ])
    }

    #[test]
    fn test_correlate_elements() {
        let result = CorrelateElementsFn.call(&[charts(), Value::from(vec![90.0, 50.0, 55.0, 10.0])], &ctx());
        let list = result.as_list().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].get("element").as_text(), Some("wood"));
        assert_eq!(list[0].get("sample_size").as_number(), Some(4.0));
        assert!(list[0].get("correlation").as_number().unwrap() > 0.7);
        assert_eq!(list[0].get("strength").as_text(), Some("strong"));
    }

    #[test]
    fn test_cluster_uses_config_default() {
        let ctx = ctx().with_config(EngineConfig::default().with_cluster_count(1));
        let result = ClusterFn.call(&[charts()], &ctx);
        assert_eq!(result.as_list().map(|l| l.len()), Some(1));

        let result = ClusterFn.call(&[charts(), Value::from(4.0)], &ctx);
        assert_eq!(result.as_list().map(|l| l.len()), Some(4));

        assert!(ClusterFn.call(&[charts(), Value::from(2.5)], &ctx).is_error());
    }

    #[test]
    fn test_scoring_accepts_both_population_forms() {
        let ctx = ctx();
        let target = Value::from("甲子 丙子 戊子 庚子");

        let from_list = DetectAnomalyFn.call(&[target.clone(), charts()], &ctx);
        let features = from_list.get("anomalous_features");
        assert!(features
            .as_list()
            .unwrap()
            .iter()
            .any(|f| f.as_text() == Some("triple branch (子)")));

        let population = crate::population::population_stats(&extract_charts("t", &charts()).unwrap());
        let from_object = ScoreRarityFn.call(&[target.clone(), Value::from_serialize(&population)], &ctx);
        let from_list = ScoreRarityFn.call(&[target, charts()], &ctx);
        assert_eq!(
            from_object.get("overall").as_number(),
            from_list.get("overall").as_number()
        );
        assert!(ScoreRarityFn.call(&[Value::from("甲子")], &ctx).is_error());
    }

    #[test]
    fn test_generate_report() {
        let ctx = ctx();
        let report = GenerateReportFn.call(&[charts()], &ctx);
        assert_eq!(report.get("population_stats").get("total_samples").as_number(), Some(4.0));
        assert_eq!(report.get("insights").as_list().map(|l| l.len()), Some(4));
        assert!(report.get("target_rarity").is_error());

        let report = GenerateReportFn.call(&[charts(), Value::from("甲子 丙寅 戊辰 庚午")], &ctx);
        assert!(report.get("target_rarity").get("overall").as_number().is_some());
        assert!(report.get("target_anomaly").get("is_anomaly").as_bool().is_some());
    }
}
