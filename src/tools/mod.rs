//! Tools module
//!
//! Tool implementations behind the MCP server.

pub mod meals;
pub mod statistics;
pub mod status;

use thiserror::Error;

/// Failure of a tool call, split by who has to act on it
#[derive(Debug, Error)]
pub enum ToolError {
    /// The request itself is wrong (bad value, bad bounds)
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Storage(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
