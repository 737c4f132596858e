//! Frequency ranking of categorical items

use sizhu_plugin::prelude::*;
use crate::helpers::extract_texts;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAnalysis {
    pub item: String,
    pub count: usize,
    /// Share of all items, 0..=100, unrounded
    pub percentage: f64,
    /// 1-based
    pub rank: usize,
}

/// Count occurrences and rank by descending count.
///
/// The sort is stable, so tied items keep the order in which they were
/// first seen.
pub fn rank_frequency<S: AsRef<str>>(items: &[S]) -> Vec<FrequencyAnalysis> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let key = item.as_ref();
        let count = counts.entry(key).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let mut tallies: Vec<(&str, usize)> = order
        .into_iter()
        .map(|key| (key, counts.get(key).copied().unwrap_or(0)))
        .collect();
    tallies.sort_by(|a, b| b.1.cmp(&a.1));

    let total = items.len() as f64;
    tallies
        .into_iter()
        .enumerate()
        .map(|(i, (item, count))| FrequencyAnalysis {
            item: item.to_string(),
            count,
            percentage: count as f64 / total * 100.0,
            rank: i + 1,
        })
        .collect()
}

// ============ RankFrequency ============

pub struct RankFrequency;

static RANK_FREQUENCY_ARGS: [ArgMeta; 1] = [ArgMeta::required(
    "items",
    "List<Text> | Text...",
    "Categorical items to count",
)];

static RANK_FREQUENCY_EXAMPLES: [&str; 1] = [
    "rank_frequency(\"A\", \"A\", \"B\") → [{item: A, count: 2, rank: 1}, {item: B, count: 1, rank: 2}]",
];

static RANK_FREQUENCY_RELATED: [&str; 1] = ["pillar_frequency"];

impl FunctionPlugin for RankFrequency {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "rank_frequency",
            description: "Occurrence counts ranked by frequency, ties in first-seen order",
            usage: "rank_frequency(items)",
            args: &RANK_FREQUENCY_ARGS,
            returns: "List<Object>",
            examples: &RANK_FREQUENCY_EXAMPLES,
            category: "stats/frequency",
            related: &RANK_FREQUENCY_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_texts(args) {
            Ok(items) => Value::from_serialize(&rank_frequency(&items)),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_two_items() {
        let ranked = rank_frequency(&["A", "A", "B"]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item, "A");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[0].rank, 1);
        assert!((ranked[0].percentage - 66.666_666).abs() < 1e-3);
        assert_eq!(ranked[1].item, "B");
        assert_eq!(ranked[1].rank, 2);
        assert!((ranked[1].percentage - 33.333_333).abs() < 1e-3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let ranked = rank_frequency(&["c", "b", "a", "b", "c"]);
        let items: Vec<&str> = ranked.iter().map(|f| f.item.as_str()).collect();
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_empty() {
        let empty: [&str; 0] = [];
        assert!(rank_frequency(&empty).is_empty());
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let items: Vec<String> = (0..17).map(|i| format!("k{}", i % 5)).collect();
        let total: f64 = rank_frequency(&items).iter().map(|f| f.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }
}
