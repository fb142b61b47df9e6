//! File capability: read_file

use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::Path;
use wavefront_application::Capability;
use wavefront_domain::{Arguments, ArgumentsExt, ToolDefinition, ToolError, ToolParameter};

pub const READ_FILE: &str = "read_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(READ_FILE, "Read the contents of a UTF-8 file")
        .with_parameter(
            ToolParameter::new("path", "Path to the file to read", true).with_type("path"),
        )
        .with_parameter(
            ToolParameter::new(
                "offset",
                "Line number to start reading from (0-indexed)",
                false,
            )
            .with_type("number"),
        )
        .with_parameter(
            ToolParameter::new("limit", "Maximum number of lines to read", false)
                .with_type("number"),
        )
}

/// Reads a file and returns `{ "path", "content", "bytes" }`.
///
/// `offset` and `limit` select a line range; the payload then only carries
/// those lines.
pub struct ReadFileCapability;

#[async_trait]
impl Capability for ReadFileCapability {
    async fn invoke(&self, arguments: Arguments) -> Result<Value, ToolError> {
        let path_str = arguments
            .require_string("path")
            .map_err(ToolError::invalid_argument)?;
        let path = Path::new(path_str);

        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::not_found(path_str));
            }
            Err(e) => {
                return Err(ToolError::execution_failed(format!(
                    "Failed to get file metadata: {}",
                    e
                )));
            }
        };

        if !metadata.is_file() {
            return Err(ToolError::invalid_argument(format!(
                "'{}' is not a file",
                path_str
            )));
        }

        if metadata.len() > MAX_READ_SIZE {
            return Err(ToolError::invalid_argument(format!(
                "File too large ({} bytes). Maximum size is {} bytes",
                metadata.len(),
                MAX_READ_SIZE
            )));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to read file: {}", e)))?;

        let offset = arguments.get_u64("offset").unwrap_or(0) as usize;
        let limit = arguments.get_u64("limit").map(|l| l as usize);

        let content = if offset > 0 || limit.is_some() {
            let lines: Vec<&str> = content.lines().collect();
            let start = offset.min(lines.len());
            let end = match limit {
                Some(l) => start.saturating_add(l).min(lines.len()),
                None => lines.len(),
            };
            lines[start..end].join("\n")
        } else {
            content
        };

        Ok(json!({
            "path": path_str,
            "bytes": content.len(),
            "content": content,
        }))
    }
}
