//! Rarity of a single chart against a population profile

use crate::population::PopulationStats;
use serde::{Deserialize, Serialize};
use sizhu_core::ChartResult;
use std::collections::HashSet;

pub const ELEMENT_WEIGHT: f64 = 0.3;
pub const STEM_WEIGHT: f64 = 0.2;
pub const BRANCH_WEIGHT: f64 = 0.2;
pub const COMBINATION_WEIGHT: f64 = 0.3;

/// Self-tally at which one element counts as an extreme concentration
pub const EXTREME_CONCENTRATION: usize = 6;
pub const EXTREME_CONCENTRATION_BONUS: f64 = 30.0;
/// Absent elements needed for the missing-elements bonus
pub const MISSING_ELEMENTS: usize = 2;
pub const MISSING_ELEMENTS_BONUS: f64 = 20.0;

pub const VERY_RARE: f64 = 80.0;
pub const SOMEWHAT_RARE: f64 = 60.0;
pub const AVERAGE: f64 = 40.0;

pub const VERY_RARE_DESCRIPTION: &str = "Very rare chart: a combination seldom seen in the population";
pub const SOMEWHAT_RARE_DESCRIPTION: &str = "Somewhat rare chart with several uncommon traits";
pub const AVERAGE_DESCRIPTION: &str = "Average rarity: a fairly typical combination";
pub const COMMON_DESCRIPTION: &str = "Common chart: a frequently seen combination";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityScore {
    /// Weighted blend of the sub-scores, 0..=100
    pub overall: f64,
    pub element_rarity: f64,
    pub stem_rarity: f64,
    pub branch_rarity: f64,
    pub combination_rarity: f64,
    pub description: String,
}

pub fn rarity_description(overall: f64) -> &'static str {
    if overall >= VERY_RARE {
        VERY_RARE_DESCRIPTION
    } else if overall >= SOMEWHAT_RARE {
        SOMEWHAT_RARE_DESCRIPTION
    } else if overall >= AVERAGE {
        AVERAGE_DESCRIPTION
    } else {
        COMMON_DESCRIPTION
    }
}

/// Spread between the chart's most and least frequent element. Only
/// elements present in the chart take part; absent ones are scored by the
/// combination term instead.
fn element_rarity(counts: &[usize; 5]) -> f64 {
    let present = || counts.iter().copied().filter(|c| *c > 0);
    let max = present().max().unwrap_or(0);
    let min = present().min().unwrap_or(0);
    (max - min) as f64 / 8.0 * 100.0
}

/// How uncommon the day master is in the population
fn stem_rarity(chart: &ChartResult, population: &PopulationStats) -> f64 {
    let total = population.day_master_distribution.total;
    let share = population
        .day_master_share(chart.day_master())
        .unwrap_or(if total == 0 { 1.0 } else { 1.0 / total as f64 });
    (1.0 - share) * 100.0
}

/// Repetition among the four branches. Jumps by 50 as soon as any branch
/// repeats.
fn branch_rarity(chart: &ChartResult) -> f64 {
    let distinct = chart.branches().iter().collect::<HashSet<_>>().len();
    let repeated = if distinct == 4 { 0.0 } else { 50.0 };
    (4 - distinct) as f64 / 3.0 * 50.0 + repeated
}

fn combination_rarity(counts: &[usize; 5]) -> f64 {
    let mut score = 0.0;
    if counts.iter().any(|c| *c >= EXTREME_CONCENTRATION) {
        score += EXTREME_CONCENTRATION_BONUS;
    }
    if counts.iter().filter(|c| **c == 0).count() >= MISSING_ELEMENTS {
        score += MISSING_ELEMENTS_BONUS;
    }
    score
}

pub fn score_rarity(chart: &ChartResult, population: &PopulationStats) -> RarityScore {
    let counts = chart.element_counts();

    let element_rarity = element_rarity(&counts);
    let stem_rarity = stem_rarity(chart, population);
    let branch_rarity = branch_rarity(chart);
    let combination_rarity = combination_rarity(&counts);

    let overall = (element_rarity * ELEMENT_WEIGHT
        + stem_rarity * STEM_WEIGHT
        + branch_rarity * BRANCH_WEIGHT
        + combination_rarity * COMBINATION_WEIGHT)
        .clamp(0.0, 100.0);

    RarityScore {
        overall,
        element_rarity,
        stem_rarity,
        branch_rarity,
        combination_rarity,
        description: rarity_description(overall).to_string(),
    }
}
