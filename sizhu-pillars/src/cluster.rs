//! k-means clustering over five-element count vectors
//!
//! Lloyd's algorithm with a fixed iteration count and deterministic seeding
//! (the first k charts), so the same input always yields the same clusters.

use serde::{Deserialize, Serialize};
use sizhu_core::{ChartResult, Element};
use std::collections::BTreeMap;

/// Lloyd iterations; there is no convergence check
pub const KMEANS_ITERATIONS: usize = 10;
/// Mean count above which an element is tagged dominant
pub const DOMINANT_MEAN: f64 = 3.0;
/// Mean count below which an element is tagged deficient
pub const DEFICIENT_MEAN: f64 = 1.0;
/// Largest distance from the per-element average still called balanced
pub const BALANCED_SPREAD: f64 = 1.0;

type Features = [f64; 5];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    /// Index of the seed centroid; ids of empty clusters are skipped
    pub cluster_id: usize,
    /// Mean element count of the members
    pub centroid: BTreeMap<Element, f64>,
    pub members: Vec<ChartResult>,
    pub characteristics: Vec<String>,
    pub size: usize,
    /// Share of all clustered charts, 0..=100
    pub percentage: f64,
}

fn features(chart: &ChartResult) -> Features {
    chart.element_counts().map(|c| c as f64)
}

fn distance(a: &Features, b: &Features) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}

/// Nearest centroid; the first strictly smaller distance wins
fn nearest(point: &Features, centroids: &[Features]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = distance(point, centroid);
        if d < best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

/// Descriptive tags for a centroid
pub fn characterize(centroid: &[f64; 5]) -> Vec<String> {
    let mut tags = Vec::new();

    let mut strongest = Element::Wood;
    let mut weakest = Element::Wood;
    for element in Element::ALL {
        if centroid[element.index()] > centroid[strongest.index()] {
            strongest = element;
        }
        if centroid[element.index()] < centroid[weakest.index()] {
            weakest = element;
        }
    }

    if centroid[strongest.index()] > DOMINANT_MEAN {
        tags.push(format!("{} dominant", strongest));
    }
    if centroid[weakest.index()] < DEFICIENT_MEAN {
        tags.push(format!("{} deficient", weakest));
    }

    let average = centroid.iter().sum::<f64>() / centroid.len() as f64;
    if centroid.iter().all(|v| (v - average).abs() <= BALANCED_SPREAD) {
        tags.push("balanced".to_string());
    }

    if tags.is_empty() {
        tags.push("general".to_string());
    }
    tags
}

/// Cluster charts into at most `k` groups by element make-up.
///
/// Empty clusters are dropped, so fewer than `k` results may come back.
/// An empty input or `k == 0` returns no clusters.
pub fn cluster(charts: &[ChartResult], k: usize) -> Vec<ClusterAnalysis> {
    if charts.is_empty() || k == 0 {
        return Vec::new();
    }

    let points: Vec<Features> = charts.iter().map(features).collect();
    let mut centroids: Vec<Features> = points.iter().take(k).copied().collect();
    let mut assignment = vec![0usize; points.len()];

    for iteration in 0..KMEANS_ITERATIONS {
        for (slot, point) in assignment.iter_mut().zip(&points) {
            *slot = nearest(point, &centroids);
        }

        let mut sums = vec![[0.0f64; 5]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for (point, &cluster_id) in points.iter().zip(&assignment) {
            counts[cluster_id] += 1;
            for (sum, x) in sums[cluster_id].iter_mut().zip(point) {
                *sum += x;
            }
        }

        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                *centroid = sum.map(|s| s / count as f64);
            }
        }

        tracing::trace!(iteration, ?counts, "k-means iteration");
    }

    let total = charts.len() as f64;
    let clusters: Vec<ClusterAnalysis> = centroids
        .iter()
        .enumerate()
        .filter_map(|(cluster_id, centroid)| {
            let members: Vec<ChartResult> = charts
                .iter()
                .zip(&assignment)
                .filter(|(_, assigned)| **assigned == cluster_id)
                .map(|(chart, _)| chart.clone())
                .collect();
            if members.is_empty() {
                return None;
            }
            let size = members.len();
            Some(ClusterAnalysis {
                cluster_id,
                centroid: Element::ALL.iter().map(|e| (*e, centroid[e.index()])).collect(),
                characteristics: characterize(centroid),
                members,
                size,
                percentage: size as f64 / total * 100.0,
            })
        })
        .collect();

    tracing::debug!(charts = charts.len(), k, clusters = clusters.len(), "clustered charts");
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(pillars: [&str; 4]) -> ChartResult {
        ChartResult::parse(pillars[0], pillars[1], pillars[2], pillars[3]).unwrap()
    }

    fn mixed() -> Vec<ChartResult> {
        vec![
            chart(["甲寅", "乙卯", "甲寅", "乙卯"]), // all wood
            chart(["丙午", "丁巳", "丙午", "丁巳"]), // all fire
            chart(["甲寅", "乙卯", "甲寅", "丙午"]), // wood heavy
            chart(["丙午", "丁巳", "丙午", "甲寅"]), // fire heavy
            chart(["甲子", "丙寅", "戊辰", "庚午"]), // mixed
            chart(["壬子", "癸亥", "壬子", "癸亥"]), // all water
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster(&[], 5).is_empty());
        assert!(cluster(&mixed(), 0).is_empty());
    }

    #[test]
    fn test_identical_charts_form_one_cluster() {
        let charts = vec![chart(["甲子", "丙寅", "戊辰", "庚午"]); 10];
        let clusters = cluster(&charts, 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size, 10);
        assert_eq!(clusters[0].percentage, 100.0);
        assert_eq!(clusters[0].cluster_id, 0);
    }

    #[test]
    fn test_sizes_cover_all_charts() {
        let charts = mixed();
        for k in 1..=8 {
            let clusters = cluster(&charts, k);
            assert!(clusters.len() <= k);
            assert!(clusters.iter().all(|c| c.size >= 1 && c.size == c.members.len()));
            assert_eq!(clusters.iter().map(|c| c.size).sum::<usize>(), charts.len());
        }
    }

    #[test]
    fn test_deterministic() {
        let charts = mixed();
        assert_eq!(cluster(&charts, 3), cluster(&charts, 3));
    }

    #[test]
    fn test_wood_cluster_characteristics() {
        let charts = vec![chart(["甲寅", "乙卯", "甲寅", "乙卯"]); 3];
        let clusters = cluster(&charts, 2);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].characteristics, vec!["wood dominant", "fire deficient"]);
        assert_eq!(clusters[0].centroid[&Element::Wood], 8.0);
    }

    #[test]
    fn test_characterize_balanced_and_general() {
        assert_eq!(characterize(&[2.0, 2.0, 2.0, 1.0, 1.0]), vec!["balanced"]);
        assert_eq!(characterize(&[3.0, 3.0, 1.0, 1.0, 0.0]).last().map(String::as_str), Some("water deficient"));
        assert_eq!(characterize(&[3.0, 2.6, 1.2, 1.2, 0.0]), vec!["water deficient"]);
        assert_eq!(characterize(&[2.9, 2.9, 1.1, 1.1, 0.0]), vec!["water deficient"]);
        assert_eq!(characterize(&[2.5, 0.7, 2.0, 1.4, 1.4]), vec!["fire deficient", "balanced"]);
        assert_eq!(characterize(&[3.0, 3.0, 1.0, 1.0, 1.0]), vec!["general"]);
    }
}
