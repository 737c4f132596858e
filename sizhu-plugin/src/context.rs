//! Evaluation Context

use sizhu_core::{EngineConfig, Value};
use crate::PluginRegistry;
use std::sync::Arc;

/// Context passed to every function call
pub struct EvalContext {
    pub config: EngineConfig,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            config: EngineConfig::default(),
            registry,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Call another registered function with this context
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.registry.call_function(name, args, self)
    }
}
