//! Symbol lookups: element_of, yin_yang_of

use sizhu_plugin::prelude::*;
use sizhu_core::{element_of, yin_yang_of};

fn extract_symbol(func: &str, args: &[Value]) -> Result<String, SizhuError> {
    if args.len() != 1 {
        return Err(SizhuError::arg_count(func, 1, args.len()));
    }
    match &args[0] {
        Value::Text(s) => Ok(s.clone()),
        Value::Error(e) => Err(e.clone()),
        other => Err(SizhuError::arg_type(func, "symbol", "Text", other.type_name())),
    }
}

// ============================================================================
// element_of(symbol) → Text
// ============================================================================

pub struct ElementOfFn;

static ELEMENT_OF_ARGS: [ArgMeta; 1] = [ArgMeta::required(
    "symbol",
    "Text",
    "Stem or branch, as a character (甲) or romanised name (jia)",
)];
static ELEMENT_OF_EXAMPLES: [&str; 3] = [
    "element_of(\"甲\") → \"wood\"",
    "element_of(\"hai\") → \"water\"",
    "element_of(\"?\") → \"earth\"",
];
static ELEMENT_OF_RELATED: [&str; 2] = ["yin_yang_of", "element_distribution"];

impl FunctionPlugin for ElementOfFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "element_of",
            description: "Element of a stem or branch; unknown symbols resolve to earth",
            usage: "element_of(symbol)",
            args: &ELEMENT_OF_ARGS,
            returns: "Text",
            examples: &ELEMENT_OF_EXAMPLES,
            category: "pillars/symbols",
            related: &ELEMENT_OF_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_symbol("element_of", args) {
            Ok(symbol) => Value::from(element_of(&symbol).name()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============================================================================
// yin_yang_of(symbol) → Text
// ============================================================================

pub struct YinYangOfFn;

static YIN_YANG_OF_ARGS: [ArgMeta; 1] = [ArgMeta::required(
    "symbol",
    "Text",
    "Stem or branch, as a character or romanised name",
)];
static YIN_YANG_OF_EXAMPLES: [&str; 2] = ["yin_yang_of(\"乙\") → \"yin\"", "yin_yang_of(\"子\") → \"yang\""];
static YIN_YANG_OF_RELATED: [&str; 2] = ["element_of", "yin_yang_ratio"];

impl FunctionPlugin for YinYangOfFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "yin_yang_of",
            description: "Polarity of a stem or branch; unknown symbols resolve to yang",
            usage: "yin_yang_of(symbol)",
            args: &YIN_YANG_OF_ARGS,
            returns: "Text",
            examples: &YIN_YANG_OF_EXAMPLES,
            category: "pillars/symbols",
            related: &YIN_YANG_OF_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match extract_symbol("yin_yang_of", args) {
            Ok(symbol) => Value::from(yin_yang_of(&symbol).to_string()),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    #[test]
    fn test_element_of() {
        let ctx = ctx();
        assert_eq!(ElementOfFn.call(&[Value::from("丙")], &ctx).as_text(), Some("fire"));
        assert_eq!(ElementOfFn.call(&[Value::from("Shen")], &ctx).as_text(), Some("metal"));
        assert_eq!(ElementOfFn.call(&[Value::from("?")], &ctx).as_text(), Some("earth"));
        assert!(ElementOfFn.call(&[Value::from(1.0)], &ctx).is_error());
        assert!(ElementOfFn.call(&[], &ctx).is_error());
    }

    #[test]
    fn test_yin_yang_of() {
        let ctx = ctx();
        assert_eq!(YinYangOfFn.call(&[Value::from("乙")], &ctx).as_text(), Some("yin"));
        assert_eq!(YinYangOfFn.call(&[Value::from("亥")], &ctx).as_text(), Some("yin"));
        assert_eq!(YinYangOfFn.call(&[Value::from("unknown")], &ctx).as_text(), Some("yang"));
    }
}
