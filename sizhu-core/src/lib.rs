//! Sizhu Core - Fundamental types
//!
//! This crate provides the core types used throughout Sizhu:
//! - `Stem`, `Branch`, `Element`, `Polarity`: the fixed symbol tables
//! - `Pillar`, `ChartResult`: four-pillar charts as read by the engine
//! - `Value`: runtime values for the function registry
//! - `SizhuError`: structured errors for the engine boundary
//! - `EngineConfig`: caller-facing settings

mod element;
mod chart;
mod value;
mod error;
mod config;

pub use element::{Element, Polarity, Stem, Branch, SymbolError, element_of, yin_yang_of};
pub use chart::{Pillar, ChartResult, Gender, BIRTH_MONTH_KEY, BIRTH_HOUR_KEY, GENDER_KEY};
pub use value::Value;
pub use error::{SizhuError, Severity, codes};
pub use config::{EngineConfig, DEFAULT_CLUSTER_COUNT, CLUSTER_COUNT_ENV, FREQUENCY_TOP_N_ENV};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Element, Polarity, Stem, Branch, Pillar, ChartResult, Gender,
        Value, SizhuError, Severity, EngineConfig,
    };
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SizhuError::unknown_symbol("X");
        let text = err.to_string();
        assert!(text.starts_with("[UNKNOWN_SYMBOL] Unknown stem or branch: X"));
        assert!(text.contains("suggestion"));
    }

    #[test]
    fn test_error_from_symbol_error() {
        let err: SizhuError = SymbolError::Empty.into();
        assert_eq!(err.code, codes::PARSE_ERROR);
        let err: SizhuError = SymbolError::Unknown("Q".into()).into();
        assert_eq!(err.code, codes::UNKNOWN_SYMBOL);
    }

    #[test]
    fn test_error_serializes_for_callers() {
        let err = SizhuError::config_error("cluster_count", "bad");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["severity"], "fatal");
        assert_eq!(json["origin"], "cluster_count");
        assert!(json.get("suggestion").is_none());
    }
}
