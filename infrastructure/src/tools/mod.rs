//! Capability implementations and the in-memory tool registry
//!
//! - `builtin`: demo capabilities (echo, concat, sleep, fail)
//! - `file`: read_file
//! - [`ToolRegistry`]: name → capability lookup implementing
//!   [`ToolRegistryPort`](wavefront_application::ToolRegistryPort)

pub mod builtin;
pub mod file;

mod registry;

pub use builtin::FnCapability;
pub use file::ReadFileCapability;
pub use registry::ToolRegistry;
