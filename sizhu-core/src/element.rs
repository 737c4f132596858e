//! Stems, branches and the five elements
//!
//! Every stem and branch is bound to one element and one polarity by a
//! fixed table. The string resolvers (`element_of`, `yin_yang_of`) accept
//! either the Chinese character or its romanised name and fall back to
//! earth / yang for anything they do not recognise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for symbol parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Unknown symbol: {0}")]
    Unknown(String),

    #[error("Empty symbol")]
    Empty,

    #[error("Malformed pillar: {0}")]
    MalformedPillar(String),
}

/// One of the five elements, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// Position in canonical order, usable as an array index
    pub const fn index(self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Yin/yang polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yin,
    Yang,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Yin => f.write_str("yin"),
            Polarity::Yang => f.write_str("yang"),
        }
    }
}

// ============ Heavenly Stems ============

/// The ten heavenly stems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia, Stem::Yi, Stem::Bing, Stem::Ding, Stem::Wu,
        Stem::Ji, Stem::Geng, Stem::Xin, Stem::Ren, Stem::Gui,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Stem::Jia => "甲",
            Stem::Yi => "乙",
            Stem::Bing => "丙",
            Stem::Ding => "丁",
            Stem::Wu => "戊",
            Stem::Ji => "己",
            Stem::Geng => "庚",
            Stem::Xin => "辛",
            Stem::Ren => "壬",
            Stem::Gui => "癸",
        }
    }

    pub const fn romanized(self) -> &'static str {
        match self {
            Stem::Jia => "jia",
            Stem::Yi => "yi",
            Stem::Bing => "bing",
            Stem::Ding => "ding",
            Stem::Wu => "wu",
            Stem::Ji => "ji",
            Stem::Geng => "geng",
            Stem::Xin => "xin",
            Stem::Ren => "ren",
            Stem::Gui => "gui",
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Stem::Jia | Stem::Bing | Stem::Wu | Stem::Geng | Stem::Ren => Polarity::Yang,
            Stem::Yi | Stem::Ding | Stem::Ji | Stem::Xin | Stem::Gui => Polarity::Yin,
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Stem {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SymbolError::Empty);
        }
        let lower = s.to_lowercase();
        Stem::ALL
            .into_iter()
            .find(|stem| stem.symbol() == s || stem.romanized() == lower)
            .ok_or_else(|| SymbolError::Unknown(s.to_string()))
    }
}

// ============ Earthly Branches ============

/// The twelve earthly branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi, Branch::Chou, Branch::Yin, Branch::Mao, Branch::Chen, Branch::Si,
        Branch::Wu, Branch::Wei, Branch::Shen, Branch::You, Branch::Xu, Branch::Hai,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Branch::Zi => "子",
            Branch::Chou => "丑",
            Branch::Yin => "寅",
            Branch::Mao => "卯",
            Branch::Chen => "辰",
            Branch::Si => "巳",
            Branch::Wu => "午",
            Branch::Wei => "未",
            Branch::Shen => "申",
            Branch::You => "酉",
            Branch::Xu => "戌",
            Branch::Hai => "亥",
        }
    }

    pub const fn romanized(self) -> &'static str {
        match self {
            Branch::Zi => "zi",
            Branch::Chou => "chou",
            Branch::Yin => "yin",
            Branch::Mao => "mao",
            Branch::Chen => "chen",
            Branch::Si => "si",
            Branch::Wu => "wu",
            Branch::Wei => "wei",
            Branch::Shen => "shen",
            Branch::You => "you",
            Branch::Xu => "xu",
            Branch::Hai => "hai",
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Zi | Branch::Hai => Element::Water,
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Branch::Zi | Branch::Yin | Branch::Chen | Branch::Wu | Branch::Shen | Branch::Xu => {
                Polarity::Yang
            }
            Branch::Chou | Branch::Mao | Branch::Si | Branch::Wei | Branch::You | Branch::Hai => {
                Polarity::Yin
            }
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Branch {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SymbolError::Empty);
        }
        let lower = s.to_lowercase();
        Branch::ALL
            .into_iter()
            .find(|branch| branch.symbol() == s || branch.romanized() == lower)
            .ok_or_else(|| SymbolError::Unknown(s.to_string()))
    }
}

// ============ String Resolvers ============

/// Element of a stem or branch symbol.
///
/// Stems are tried before branches, so the romanised "wu" resolves to the
/// stem 戊 (earth) rather than the branch 午. Unknown symbols map to
/// earth instead of failing.
pub fn element_of(symbol: &str) -> Element {
    if let Ok(stem) = symbol.parse::<Stem>() {
        return stem.element();
    }
    if let Ok(branch) = symbol.parse::<Branch>() {
        return branch.element();
    }
    tracing::debug!(symbol, "unknown symbol, defaulting element to earth");
    Element::Earth
}

/// Polarity of a stem or branch symbol, yang for unknown symbols
pub fn yin_yang_of(symbol: &str) -> Polarity {
    if let Ok(stem) = symbol.parse::<Stem>() {
        return stem.polarity();
    }
    if let Ok(branch) = symbol.parse::<Branch>() {
        return branch.polarity();
    }
    tracing::debug!(symbol, "unknown symbol, defaulting polarity to yang");
    Polarity::Yang
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_table() {
        assert_eq!(Stem::Jia.element(), Element::Wood);
        assert_eq!(Stem::Jia.polarity(), Polarity::Yang);
        assert_eq!(Stem::Gui.element(), Element::Water);
        assert_eq!(Stem::Gui.polarity(), Polarity::Yin);
        let yang = Stem::ALL.iter().filter(|s| s.polarity() == Polarity::Yang).count();
        assert_eq!(yang, 5);
    }

    #[test]
    fn test_branch_table() {
        let earth = Branch::ALL.iter().filter(|b| b.element() == Element::Earth).count();
        assert_eq!(earth, 4);
        assert_eq!(Branch::Zi.element(), Element::Water);
        assert_eq!(Branch::Wu.element(), Element::Fire);
        assert_eq!(Branch::Hai.polarity(), Polarity::Yin);
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("丙".parse::<Stem>().unwrap(), Stem::Bing);
        assert_eq!("Geng".parse::<Stem>().unwrap(), Stem::Geng);
        assert_eq!("酉".parse::<Branch>().unwrap(), Branch::You);
        assert_eq!(" shen ".parse::<Branch>().unwrap(), Branch::Shen);
        assert_eq!("".parse::<Stem>(), Err(SymbolError::Empty));
        assert!(matches!("子".parse::<Stem>(), Err(SymbolError::Unknown(_))));
    }

    #[test]
    fn test_element_of() {
        assert_eq!(element_of("甲"), Element::Wood);
        assert_eq!(element_of("午"), Element::Fire);
        assert_eq!(element_of("wu"), Element::Earth);
        assert_eq!(element_of("申"), Element::Metal);
    }

    #[test]
    fn test_unknown_symbol_defaults() {
        assert_eq!(element_of("X"), Element::Earth);
        assert_eq!(element_of(""), Element::Earth);
        assert_eq!(yin_yang_of("??"), Polarity::Yang);
        assert_eq!(yin_yang_of("乙"), Polarity::Yin);
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Stem::Xin).unwrap();
        assert_eq!(json, "\"辛\"");
        let branch: Branch = serde_json::from_str("\"卯\"").unwrap();
        assert_eq!(branch, Branch::Mao);
        assert_eq!(serde_json::to_string(&Element::Metal).unwrap(), "\"metal\"");
    }
}
