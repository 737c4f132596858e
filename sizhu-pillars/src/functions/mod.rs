//! Registry wrappers for the chart statistics
//!
//! Charts arrive as `Value::Chart`, JSON-shaped objects or four-pillar text;
//! a population is either a list of charts or the object returned by
//! `population_stats`.

mod symbols;
mod distribution;
mod analysis;

pub use symbols::{ElementOfFn, YinYangOfFn};
pub use distribution::{
    ElementDistributionFn, StemDistributionFn, BranchDistributionFn, DayMasterDistributionFn,
    YinYangRatioFn, PillarFrequencyFn, PopulationStatsFn,
};
pub use analysis::{CorrelateElementsFn, ClusterFn, ScoreRarityFn, DetectAnomalyFn, GenerateReportFn};

use crate::correlation::AttributePoint;
use crate::population::{population_stats, PopulationStats};
use sizhu_core::{ChartResult, SizhuError, Value};

/// One chart, or a list of them
pub(crate) fn extract_charts(func: &str, arg: &Value) -> Result<Vec<ChartResult>, SizhuError> {
    match arg {
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.to_chart()
                    .map_err(|e| e.in_origin(format!("{}: charts[{}]", func, i)))
            })
            .collect(),
        Value::Error(e) => Err(e.clone()),
        other => Ok(vec![other.to_chart().map_err(|e| e.in_origin(func))?]),
    }
}

pub(crate) fn extract_chart(func: &str, arg: &Value) -> Result<ChartResult, SizhuError> {
    arg.to_chart().map_err(|e| e.in_origin(func))
}

/// A list of charts is profiled on the spot; an object is read back as
/// `PopulationStats`
pub(crate) fn extract_population(func: &str, arg: &Value) -> Result<PopulationStats, SizhuError> {
    match arg {
        Value::Object(_) => {
            let json = arg.to_json()?;
            serde_json::from_value(json).map_err(|e| {
                SizhuError::arg_type(func, "population", "PopulationStats", "Object")
                    .with_suggestion(format!("Pass the result of population_stats() or a list of charts ({})", e))
            })
        }
        _ => Ok(population_stats(&extract_charts(func, arg)?)),
    }
}

/// Attribute values in chart order, as bare numbers or {index, value} objects
pub(crate) fn extract_attributes(func: &str, arg: &Value) -> Result<Vec<AttributePoint>, SizhuError> {
    let items = match arg {
        Value::List(items) => items,
        Value::Error(e) => return Err(e.clone()),
        other => return Err(SizhuError::arg_type(func, "attributes", "List", other.type_name())),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Number(value) => Ok(AttributePoint { index, value: *value }),
            Value::Object(_) => {
                let json = item.to_json()?;
                serde_json::from_value(json).map_err(|_| {
                    SizhuError::arg_type(func, "attributes", "{index, value}", "Object")
                })
            }
            Value::Error(e) => Err(e.clone()),
            other => Err(SizhuError::arg_type(func, "attributes", "Number", other.type_name())),
        })
        .collect()
}

/// Non-negative whole number argument
pub(crate) fn extract_count(func: &str, arg_name: &str, arg: &Value) -> Result<usize, SizhuError> {
    match arg {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
        Value::Number(n) => Err(SizhuError::domain_error(format!(
            "{}: {} must be a non-negative integer, got {}",
            func, arg_name, n
        ))),
        Value::Error(e) => Err(e.clone()),
        other => Err(SizhuError::arg_type(func, arg_name, "Number", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_charts_forms() {
        let chart = ChartResult::parse("甲子", "丙寅", "戊辰", "庚午").unwrap();
        let list = Value::List(vec![
            Value::from(chart.clone()),
            Value::from_serialize(&chart),
            Value::from("甲子 丙寅 戊辰 庚午"),
        ]);
        let charts = extract_charts("f", &list).unwrap();
        assert_eq!(charts, vec![chart.clone(), chart.clone(), chart.clone()]);

        assert_eq!(extract_charts("f", &Value::from(chart.clone())).unwrap().len(), 1);

        let err = extract_charts("f", &Value::List(vec![Value::from(1.0)])).unwrap_err();
        assert_eq!(err.origin.as_deref(), Some("f: charts[0]"));
    }

    #[test]
    fn test_extract_population_from_object() {
        let charts = vec![ChartResult::parse("甲子", "丙寅", "戊辰", "庚午").unwrap(); 3];
        let stats = population_stats(&charts);
        let back = extract_population("f", &Value::from_serialize(&stats)).unwrap();
        assert_eq!(back, stats);
        assert_eq!(extract_population("f", &Value::from(charts[0].clone())).unwrap().total_samples, 1);
    }

    #[test]
    fn test_extract_attributes_and_count() {
        let attrs = extract_attributes("f", &Value::from(vec![1.5, 2.0])).unwrap();
        assert_eq!(attrs[1], AttributePoint { index: 1, value: 2.0 });
        assert!(extract_attributes("f", &Value::from(1.0)).is_err());

        assert_eq!(extract_count("f", "k", &Value::from(3.0)).unwrap(), 3);
        assert!(extract_count("f", "k", &Value::from(-1.0)).is_err());
        assert!(extract_count("f", "k", &Value::from(1.5)).is_err());
    }
}
