//! Pillars and four-pillar charts
//!
//! Charts are produced by an external chart generator and are read-only
//! here. Caller-specific fields ride along in the `extra` bag; the
//! demographic accessors read the few keys the population statistics use.

use crate::{Branch, Element, SymbolError, Stem};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

/// Extension key holding the birth month (1-12)
pub const BIRTH_MONTH_KEY: &str = "birth_month";
/// Extension key holding the birth hour (0-23)
pub const BIRTH_HOUR_KEY: &str = "birth_hour";
/// Extension key holding the gender
pub const GENDER_KEY: &str = "gender";

/// A stem and branch pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Stem and branch symbols concatenated, e.g. "甲子"
    pub fn token(&self) -> String {
        format!("{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Pillar {
    type Err = SymbolError;

    /// Accepts "甲子", "jia zi" or "jia-zi"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SymbolError::Empty);
        }

        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() == 2 {
            return Ok(Pillar::new(parts[0].parse()?, parts[1].parse()?));
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(stem), Some(branch), None) => Ok(Pillar::new(
                stem.to_string().parse()?,
                branch.to_string().parse()?,
            )),
            _ => Err(SymbolError::MalformedPillar(s.to_string())),
        }
    }
}

/// Recorded gender, as far as the population histograms care
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

impl FromStr for Gender {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Gender::Male),
            "female" | "f" | "女" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "" => Err(SymbolError::Empty),
            other => Err(SymbolError::Unknown(other.to_string())),
        }
    }
}

/// A four-pillar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,

    /// Cached copy of `day.stem`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_master: Option<Stem>,

    /// Caller-specific fields
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ChartResult {
    pub fn new(year: Pillar, month: Pillar, day: Pillar, hour: Pillar) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            day_master: Some(day.stem),
            extra: Map::new(),
        }
    }

    /// Build a chart from four pillar strings such as "甲子"
    pub fn parse(year: &str, month: &str, day: &str, hour: &str) -> Result<Self, SymbolError> {
        Ok(Self::new(year.parse()?, month.parse()?, day.parse()?, hour.parse()?))
    }

    /// Builder: attach an extension field
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builder: attach birth month, hour and gender
    pub fn with_demographics(self, month: u8, hour: u8, gender: Gender) -> Self {
        let gender = match gender {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        self.with_extra(BIRTH_MONTH_KEY, month)
            .with_extra(BIRTH_HOUR_KEY, hour)
            .with_extra(GENDER_KEY, gender)
    }

    /// Pillars in year, month, day, hour order
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn stems(&self) -> [Stem; 4] {
        [self.year.stem, self.month.stem, self.day.stem, self.hour.stem]
    }

    pub fn branches(&self) -> [Branch; 4] {
        [self.year.branch, self.month.branch, self.day.branch, self.hour.branch]
    }

    /// The day stem, preferring the cached value when present
    pub fn day_master(&self) -> Stem {
        self.day_master.unwrap_or(self.day.stem)
    }

    /// Element tally over all eight stem and branch slots, indexed by
    /// `Element::index`. Always sums to 8.
    pub fn element_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for pillar in self.pillars() {
            counts[pillar.stem.element().index()] += 1;
            counts[pillar.branch.element().index()] += 1;
        }
        counts
    }

    pub fn element_count(&self, element: Element) -> usize {
        self.element_counts()[element.index()]
    }

    pub fn birth_month(&self) -> Option<u8> {
        self.extra_u8(BIRTH_MONTH_KEY).filter(|m| (1..=12).contains(m))
    }

    pub fn birth_hour(&self) -> Option<u8> {
        self.extra_u8(BIRTH_HOUR_KEY).filter(|h| *h <= 23)
    }

    pub fn gender(&self) -> Option<Gender> {
        self.extra
            .get(GENDER_KEY)
            .and_then(JsonValue::as_str)
            .and_then(|s| s.parse().ok())
    }

    fn extra_u8(&self, key: &str) -> Option<u8> {
        let value = self.extra.get(key)?;
        let n = match value {
            JsonValue::Number(n) => n.as_u64()?,
            JsonValue::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        u8::try_from(n).ok()
    }
}
