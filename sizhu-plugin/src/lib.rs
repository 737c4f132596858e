//! Sizhu Plugin System
//!
//! Every engine entry point is also reachable by name through a
//! `PluginRegistry`, taking and returning dynamic `Value`s.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::EvalContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext};
    pub use sizhu_core::prelude::*;
}
