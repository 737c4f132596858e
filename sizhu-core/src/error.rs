//! Structured errors
//!
//! The statistics themselves never fail. Errors only appear at the edges:
//! parsing symbols, loading configuration, and extracting plugin arguments.
//! They are values that carry a machine-readable code and a suggestion.

use crate::SymbolError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_SYMBOL: &str = "UNKNOWN_SYMBOL";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const INVALID_CHART: &str = "INVALID_CHART";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation continued with degraded result
    Warning,
    /// This call failed
    Error,
    /// The engine cannot be used as configured
    Fatal,
}

/// Structured error returned at the engine boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizhuError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Function or config key the error belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl SizhuError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            origin: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: record where the error came from
    pub fn in_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn unknown_symbol(symbol: &str) -> Self {
        Self::new(codes::UNKNOWN_SYMBOL, format!("Unknown stem or branch: {}", symbol))
            .with_suggestion("Use a heavenly stem (甲..癸 / jia..gui) or earthly branch (子..亥 / zi..hai)")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions() to see what is registered")
    }

    pub fn undefined_field(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("Undefined field: {}", name))
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
            .with_suggestion(format!("Pass a {} value", expected))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn invalid_chart(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_CHART, format!("Invalid chart: {}", details.into()))
            .with_suggestion("A chart needs year, month, day and hour pillars with stem and branch")
    }

    pub fn config_error(key: &str, details: impl Into<String>) -> Self {
        Self::new(codes::CONFIG_ERROR, format!("Invalid configuration: {}", details.into()))
            .in_origin(key)
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for SizhuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for SizhuError {}

impl From<SymbolError> for SizhuError {
    fn from(err: SymbolError) -> Self {
        match err {
            SymbolError::Unknown(s) => Self::unknown_symbol(&s),
            SymbolError::Empty => Self::parse_error("empty symbol"),
            SymbolError::MalformedPillar(s) => {
                Self::parse_error(format!("'{}' is not a stem followed by a branch", s))
            }
        }
    }
}

impl From<serde_json::Error> for SizhuError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}
