//! Element, stem, branch and day-master distributions over a set of charts
//!
//! Each builder is a single independent pass over the charts.

use serde::{Deserialize, Serialize};
use sizhu_core::{Branch, ChartResult, Element, Polarity, Stem};
use std::collections::BTreeMap;

/// Element occurrences over all eight slots of every chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDistribution {
    pub wood: usize,
    pub fire: usize,
    pub earth: usize,
    pub metal: usize,
    pub water: usize,
    pub total: usize,
}

impl ElementDistribution {
    pub fn from_counts(counts: [usize; 5]) -> Self {
        Self {
            wood: counts[0],
            fire: counts[1],
            earth: counts[2],
            metal: counts[3],
            water: counts[4],
            total: counts.iter().sum(),
        }
    }

    /// Counts indexed by `Element::index`
    pub fn counts(&self) -> [usize; 5] {
        [self.wood, self.fire, self.earth, self.metal, self.water]
    }

    pub fn count(&self, element: Element) -> usize {
        self.counts()[element.index()]
    }

    pub fn share(&self, element: Element) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(element) as f64 / self.total as f64
    }

    /// Most frequent element, earliest in canonical order on ties
    pub fn dominant(&self) -> Option<Element> {
        if self.total == 0 {
            return None;
        }
        let counts = self.counts();
        let mut best = Element::Wood;
        for element in Element::ALL {
            if counts[element.index()] > counts[best.index()] {
                best = element;
            }
        }
        Some(best)
    }
}

/// Occurrences per stem; all ten stems are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemDistribution {
    pub counts: BTreeMap<Stem, usize>,
    pub total: usize,
}

impl Default for StemDistribution {
    fn default() -> Self {
        Self {
            counts: Stem::ALL.iter().map(|s| (*s, 0)).collect(),
            total: 0,
        }
    }
}

impl StemDistribution {
    fn add(&mut self, stem: Stem) {
        *self.counts.entry(stem).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, stem: Stem) -> usize {
        self.counts.get(&stem).copied().unwrap_or(0)
    }

    pub fn share(&self, stem: Stem) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(stem) as f64 / self.total as f64
    }

    /// Most frequent stem, earliest in canonical order on ties
    pub fn most_common(&self) -> Option<(Stem, usize)> {
        if self.total == 0 {
            return None;
        }
        let mut best = (Stem::Jia, self.count(Stem::Jia));
        for stem in Stem::ALL {
            let count = self.count(stem);
            if count > best.1 {
                best = (stem, count);
            }
        }
        Some(best)
    }
}

/// Occurrences per branch; all twelve branches are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDistribution {
    pub counts: BTreeMap<Branch, usize>,
    pub total: usize,
}

impl Default for BranchDistribution {
    fn default() -> Self {
        Self {
            counts: Branch::ALL.iter().map(|b| (*b, 0)).collect(),
            total: 0,
        }
    }
}

impl BranchDistribution {
    fn add(&mut self, branch: Branch) {
        *self.counts.entry(branch).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, branch: Branch) -> usize {
        self.counts.get(&branch).copied().unwrap_or(0)
    }
}

/// Day-stem polarity counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YinYangRatio {
    pub yin: usize,
    pub yang: usize,
}

impl YinYangRatio {
    pub fn total(&self) -> usize {
        self.yin + self.yang
    }

    pub fn yin_share(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.yin as f64 / self.total() as f64
    }

    pub fn yang_share(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.yang as f64 / self.total() as f64
    }
}

pub fn element_distribution(charts: &[ChartResult]) -> ElementDistribution {
    let mut counts = [0usize; 5];
    for chart in charts {
        for (slot, n) in counts.iter_mut().zip(chart.element_counts()) {
            *slot += n;
        }
    }
    ElementDistribution::from_counts(counts)
}

pub fn stem_distribution(charts: &[ChartResult]) -> StemDistribution {
    let mut dist = StemDistribution::default();
    for stem in charts.iter().flat_map(|c| c.stems()) {
        dist.add(stem);
    }
    dist
}

pub fn branch_distribution(charts: &[ChartResult]) -> BranchDistribution {
    let mut dist = BranchDistribution::default();
    for branch in charts.iter().flat_map(|c| c.branches()) {
        dist.add(branch);
    }
    dist
}

pub fn day_master_distribution(charts: &[ChartResult]) -> StemDistribution {
    let mut dist = StemDistribution::default();
    for chart in charts {
        dist.add(chart.day_master());
    }
    dist
}

/// Yin/yang split classified by the day pillar's stem only
pub fn yin_yang_ratio(charts: &[ChartResult]) -> YinYangRatio {
    let mut ratio = YinYangRatio::default();
    for chart in charts {
        match chart.day.stem.polarity() {
            Polarity::Yin => ratio.yin += 1,
            Polarity::Yang => ratio.yang += 1,
        }
    }
    ratio
}
