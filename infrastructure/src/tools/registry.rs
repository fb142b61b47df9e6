//! Tool Registry
//!
//! The [`ToolRegistry`] maps capability names to [`Capability`] objects and
//! implements [`ToolRegistryPort`]. Each registration adds a
//! [`ToolDefinition`] to the registry's [`ToolSpec`], so lookups and
//! definitions can never disagree.
//!
//! # Usage
//!
//! ```ignore
//! use wavefront_infrastructure::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::new()
//!     .with_builtin_tools()
//!     .register_alias("cat", "read_file");
//!
//! assert!(registry.has_tool("cat"));
//! let capability = registry.resolve("read_file").unwrap();
//! ```
//!
//! Registering a name twice replaces the earlier capability; the last
//! registration wins.

use std::collections::HashMap;
use std::sync::Arc;

use wavefront_application::{Capability, ToolRegistryPort};
use wavefront_domain::{ToolDefinition, ToolSpec};

use super::{builtin, file};

/// In-memory registry of capabilities
#[derive(Clone, Default)]
pub struct ToolRegistry {
    /// Canonical name -> capability
    capabilities: HashMap<String, Arc<dyn Capability>>,
    /// Definitions and aliases
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under its definition's name
    pub fn register<C: Capability + 'static>(
        self,
        definition: ToolDefinition,
        capability: C,
    ) -> Self {
        self.register_arc(definition, Arc::new(capability))
    }

    /// Register a capability (Arc version)
    pub fn register_arc(
        mut self,
        definition: ToolDefinition,
        capability: Arc<dyn Capability>,
    ) -> Self {
        if self.capabilities.contains_key(&definition.name) {
            tracing::warn!(tool = %definition.name, "Replacing registered capability");
        } else {
            tracing::debug!(tool = %definition.name, "Registered capability");
        }
        self.capabilities.insert(definition.name.clone(), capability);
        self.tool_spec = self.tool_spec.register(definition);
        self
    }

    /// Make `alias` resolve to the canonical capability name
    pub fn register_alias(
        mut self,
        alias: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        let alias = alias.into();
        let canonical = canonical.into();
        tracing::trace!(alias = %alias, canonical = %canonical, "Registered alias");
        self.tool_spec = self.tool_spec.register_alias(alias, canonical);
        self
    }

    /// Install the builtin demo capabilities
    pub fn with_builtin_tools(self) -> Self {
        self.register(builtin::echo_definition(), builtin::echo())
            .register(builtin::concat_definition(), builtin::concat())
            .register(builtin::sleep_definition(), builtin::sleep())
            .register(builtin::fail_definition(), builtin::fail())
            .register(file::read_file_definition(), file::ReadFileCapability)
    }

    /// Number of registered capabilities (aliases excluded)
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl ToolRegistryPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    fn resolve(&self, name: &str) -> Option<Arc<dyn Capability>> {
        let canonical = self.tool_spec.resolve(name)?;
        self.capabilities.get(canonical).cloned()
    }
}
