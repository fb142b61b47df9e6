//! Tool Registry port
//!
//! Maps capability names to invocable [`Capability`] objects. Names are
//! resolved once per plan, before anything runs; an unknown name is a fatal
//! planning error rather than a per-call failure.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use wavefront_domain::{Arguments, ToolDefinition, ToolError, ToolSpec};

/// A registered invocable behind a tool name.
///
/// Implementations report failures as [`ToolError`]; use
/// [`ToolError::transient`] for failures worth retrying.
#[async_trait]
pub trait Capability: Send + Sync {
    async fn invoke(&self, arguments: Arguments) -> Result<Value, ToolError>;
}

/// Port for capability lookup
///
/// Implementations (adapters) live in the infrastructure layer.
pub trait ToolRegistryPort: Send + Sync {
    /// Get the specification of all available capabilities
    fn tool_spec(&self) -> &ToolSpec;

    /// Look up a capability by canonical name or alias
    fn resolve(&self, name: &str) -> Option<Arc<dyn Capability>>;

    /// Check if a capability is available (canonical name or alias)
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().resolve(name).is_some()
    }

    /// Get the definition of a capability (canonical name or alias)
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available capabilities, sorted
    fn available_tools(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tool_spec().names().collect();
        names.sort_unstable();
        names
    }
}
