//! Population-wide tables: distributions, pillar frequency, population profile

use super::extract_charts;
use crate::distribution::{
    branch_distribution, day_master_distribution, element_distribution, stem_distribution,
    yin_yang_ratio,
};
use crate::frequency::pillar_frequency;
use crate::population::population_stats;
use serde::Serialize;
use sizhu_plugin::prelude::*;

static CHARTS_ARGS: [ArgMeta; 1] = [ArgMeta::required(
    "charts",
    "List<Chart>",
    "Charts as chart values, objects or \"甲子 丙寅 戊辰 庚午\" text",
)];

/// Shared body: one list of charts in, one serialisable table out
fn over_charts<T: Serialize>(func: &str, args: &[Value], f: impl Fn(&[ChartResult]) -> T) -> Value {
    if args.len() != 1 {
        return Value::Error(SizhuError::arg_count(func, 1, args.len()));
    }
    match extract_charts(func, &args[0]) {
        Ok(charts) => Value::from_serialize(&f(&charts)),
        Err(e) => Value::Error(e),
    }
}

// ============================================================================
// element_distribution(charts) → Object
// ============================================================================

pub struct ElementDistributionFn;

static ELEMENT_DISTRIBUTION_EXAMPLES: [&str; 1] =
    ["element_distribution([\"甲子 丙寅 戊辰 庚午\"]) → {wood: 2, fire: 2, earth: 2, metal: 1, water: 1, total: 8}"];
static ELEMENT_DISTRIBUTION_RELATED: [&str; 2] = ["population_stats", "element_of"];

impl FunctionPlugin for ElementDistributionFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "element_distribution",
            description: "Element counts over all eight stem and branch slots of every chart",
            usage: "element_distribution(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &ELEMENT_DISTRIBUTION_EXAMPLES,
            category: "pillars/distribution",
            related: &ELEMENT_DISTRIBUTION_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("element_distribution", args, element_distribution)
    }
}

// ============================================================================
// stem_distribution(charts) → Object
// ============================================================================

pub struct StemDistributionFn;

static STEM_DISTRIBUTION_RELATED: [&str; 2] = ["branch_distribution", "day_master_distribution"];

impl FunctionPlugin for StemDistributionFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "stem_distribution",
            description: "Count of each of the ten stems over all four pillars",
            usage: "stem_distribution(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &[],
            category: "pillars/distribution",
            related: &STEM_DISTRIBUTION_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("stem_distribution", args, stem_distribution)
    }
}

// ============================================================================
// branch_distribution(charts) → Object
// ============================================================================

pub struct BranchDistributionFn;

static BRANCH_DISTRIBUTION_RELATED: [&str; 1] = ["stem_distribution"];

impl FunctionPlugin for BranchDistributionFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "branch_distribution",
            description: "Count of each of the twelve branches over all four pillars",
            usage: "branch_distribution(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &[],
            category: "pillars/distribution",
            related: &BRANCH_DISTRIBUTION_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("branch_distribution", args, branch_distribution)
    }
}

// ============================================================================
// day_master_distribution(charts) → Object
// ============================================================================

pub struct DayMasterDistributionFn;

static DAY_MASTER_DISTRIBUTION_RELATED: [&str; 2] = ["stem_distribution", "score_rarity"];

impl FunctionPlugin for DayMasterDistributionFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "day_master_distribution",
            description: "Count of each stem as day master, one per chart",
            usage: "day_master_distribution(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &[],
            category: "pillars/distribution",
            related: &DAY_MASTER_DISTRIBUTION_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("day_master_distribution", args, day_master_distribution)
    }
}

// ============================================================================
// yin_yang_ratio(charts) → Object
// ============================================================================

pub struct YinYangRatioFn;

static YIN_YANG_RATIO_EXAMPLES: [&str; 1] = ["yin_yang_ratio(charts) → {yin: 4, yang: 6}"];
static YIN_YANG_RATIO_RELATED: [&str; 1] = ["yin_yang_of"];

impl FunctionPlugin for YinYangRatioFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "yin_yang_ratio",
            description: "Yin and yang counts, classified by each chart's day stem",
            usage: "yin_yang_ratio(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &YIN_YANG_RATIO_EXAMPLES,
            category: "pillars/distribution",
            related: &YIN_YANG_RATIO_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("yin_yang_ratio", args, yin_yang_ratio)
    }
}

// ============================================================================
// pillar_frequency(charts) → Object
// ============================================================================

pub struct PillarFrequencyFn;

static PILLAR_FREQUENCY_EXAMPLES: [&str; 1] =
    ["pillar_frequency(charts).year → [{item: \"甲子\", count: 3, percentage: 30, rank: 1}, ...]"];
static PILLAR_FREQUENCY_RELATED: [&str; 1] = ["rank_frequency"];

impl FunctionPlugin for PillarFrequencyFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "pillar_frequency",
            description: "Ranked stem-branch combinations for each pillar position",
            usage: "pillar_frequency(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &PILLAR_FREQUENCY_EXAMPLES,
            category: "pillars/frequency",
            related: &PILLAR_FREQUENCY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("pillar_frequency", args, pillar_frequency)
    }
}

// ============================================================================
// population_stats(charts) → Object
// ============================================================================

pub struct PopulationStatsFn;

static POPULATION_STATS_RELATED: [&str; 3] = ["score_rarity", "detect_anomaly", "generate_report"];

impl FunctionPlugin for PopulationStatsFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "population_stats",
            description: "Population profile: all distributions plus month, hour and gender histograms",
            usage: "population_stats(charts)",
            args: &CHARTS_ARGS,
            returns: "Object",
            examples: &[],
            category: "pillars/population",
            related: &POPULATION_STATS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        over_charts("population_stats", args, population_stats)
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
            Value::from("甲子 丙寅 戊辰 庚午"),
            Value::from("乙丑 丁卯 己巳 辛未"),
        ])
    }

    #[test]
    fn test_element_distribution() {
        let result = ElementDistributionFn.call(&[charts()], &ctx());
        assert_eq!(result.get("total").as_number(), Some(16.0));
        assert_eq!(result.get("wood").as_number(), Some(4.0));
    }

    #[test]
    fn test_symbol_keyed_tables() {
        let ctx = ctx();
        let stems = StemDistributionFn.call(&[charts()], &ctx);
        assert_eq!(stems.get("counts").get("甲").as_number(), Some(1.0));
        assert_eq!(stems.get("counts").get("癸").as_number(), Some(0.0));

        let branches = BranchDistributionFn.call(&[charts()], &ctx);
        assert_eq!(branches.get("total").as_number(), Some(8.0));

        let masters = DayMasterDistributionFn.call(&[charts()], &ctx);
        assert_eq!(masters.get("counts").get("己").as_number(), Some(1.0));

        let ratio = YinYangRatioFn.call(&[charts()], &ctx);
        assert_eq!(ratio.get("yin").as_number(), Some(1.0));
        assert_eq!(ratio.get("yang").as_number(), Some(1.0));
    }

    #[test]
    fn test_frequency_and_population() {
        let ctx = ctx();
        let freq = PillarFrequencyFn.call(&[charts()], &ctx);
        assert_eq!(freq.get("year").as_list().map(|l| l.len()), Some(2));

        let stats = PopulationStatsFn.call(&[charts()], &ctx);
        assert_eq!(stats.get("total_samples").as_number(), Some(2.0));
    }

    #[test]
    fn test_bad_arguments() {
        let ctx = ctx();
        assert!(ElementDistributionFn.call(&[], &ctx).is_error());
        assert!(StemDistributionFn.call(&[charts(), charts()], &ctx).is_error());
        let bad = Value::List(vec![Value::from("甲子 丙寅")]);
        match PopulationStatsFn.call(&[bad], &ctx) {
            Value::Error(e) => assert_eq!(e.code, codes::INVALID_CHART),
            other => panic!("expected error, got {:?}", other),
        }
    }
}
