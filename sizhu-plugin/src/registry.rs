//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use sizhu_core::{SizhuError, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Most names offered in an "unknown function" suggestion
const MAX_SUGGESTIONS: usize = 5;

/// Name → function table
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        match self.get_function(name) {
            Some(f) => f.call(args, ctx),
            None => {
                let similar = self.find_similar_functions(name);
                let mut err = SizhuError::undefined_func(name);
                if !similar.is_empty() {
                    err = err.with_suggestion(format!("Did you mean: {}?", similar.join(", ")));
                }
                Value::Error(err)
            }
        }
    }

    /// Registered names resembling `name`, best match first
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let query = name.to_lowercase();
        let mut scored: Vec<(&String, usize)> = self
            .functions
            .keys()
            .map(|candidate| (candidate, Self::similarity_score(&query, candidate)))
            .filter(|(_, score)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        if query.is_empty() {
            return 0;
        }

        let mut score = if candidate.starts_with(query) {
            100
        } else if candidate.contains(query) {
            50
        } else if query.contains(candidate) {
            30
        } else {
            0
        };

        // Shared words in snake_case names count for a lot
        let query_words: HashSet<&str> = query.split('_').filter(|w| w.len() > 2).collect();
        let shared_words = candidate
            .split('_')
            .filter(|w| query_words.contains(w))
            .count();
        score += shared_words * 20;

        score
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.get_function(name) {
            Some(f) => Value::from_serialize(&f.meta()),
            None => Value::Error(
                SizhuError::new("NOT_FOUND", format!("No function named '{}'", name))
                    .with_suggestion("Call help() for the full list"),
            ),
        }
    }

    fn general_help(&self) -> Value {
        let mut by_category: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for (name, f) in &self.functions {
            by_category.entry(f.meta().category).or_default().push(name.clone());
        }

        let functions = by_category
            .into_iter()
            .map(|(category, mut names)| {
                names.sort();
                (category.to_string(), Value::List(names.into_iter().map(Value::Text).collect()))
            })
            .collect();

        let mut help = HashMap::new();
        help.insert("functions".to_string(), Value::Object(functions));
        help.insert(
            "usage".to_string(),
            Value::Text("Call help('function_name') for detailed help.".to_string()),
        );
        Value::Object(help)
    }

    /// Name, description, usage and category of every function, sorted by name
    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let mut metas: Vec<FunctionMeta> = self
            .functions
            .values()
            .map(|f| f.meta())
            .filter(|meta| category.map_or(true, |c| meta.category == c))
            .collect();
        metas.sort_by_key(|meta| meta.name);

        Value::List(
            metas
                .into_iter()
                .map(|meta| {
                    let mut obj = HashMap::new();
                    obj.insert("name".to_string(), Value::from(meta.name));
                    obj.insert("description".to_string(), Value::from(meta.description));
                    obj.insert("usage".to_string(), Value::from(meta.usage));
                    obj.insert("category".to_string(), Value::from(meta.category));
                    Value::Object(obj)
                })
                .collect(),
        )
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;

    struct CountArgs;

    static COUNT_ARGS_ARGS: [ArgMeta; 1] = [ArgMeta::required("values", "Any...", "Anything")];

    impl FunctionPlugin for CountArgs {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "count_args",
                description: "Number of arguments",
                usage: "count_args(a, b, ...)",
                args: &COUNT_ARGS_ARGS,
                returns: "Number",
                examples: &[],
                category: "test",
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            Value::Number(args.len() as f64)
        }
    }

    fn registry() -> Arc<PluginRegistry> {
        Arc::new(PluginRegistry::new().with_function(CountArgs))
    }

    #[test]
    fn test_call_registered() {
        let registry = registry();
        let ctx = EvalContext::new(registry.clone());
        let result = registry.call_function("COUNT_ARGS", &[Value::Null, Value::Null], &ctx);
        assert_eq!(result.as_number(), Some(2.0));
        assert_eq!(ctx.call("count_args", &[]).as_number(), Some(0.0));
    }

    #[test]
    fn test_unknown_function_suggests() {
        let registry = registry();
        let ctx = EvalContext::new(registry.clone());
        match registry.call_function("count", &[], &ctx) {
            Value::Error(e) => {
                assert_eq!(e.code, sizhu_core::codes::UNDEFINED_FUNC);
                assert!(e.suggestion.unwrap().contains("count_args"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_help_and_listing() {
        let registry = registry();
        let help = registry.help(Some("count_args"));
        assert_eq!(help.get("name").as_text(), Some("count_args"));
        assert!(registry.help(Some("nope")).is_error());

        let general = registry.help(None);
        assert!(general.get("functions").get("test").as_list().is_some());

        assert_eq!(registry.list_functions(Some("test")).as_list().map(|l| l.len()), Some(1));
        assert_eq!(registry.list_functions(Some("other")).as_list().map(|l| l.len()), Some(0));
    }
}
