//! Error types for log entry parsing
//!
//! Every failure a captured log entry can produce. None of these reach the
//! rendering layer directly: the degrading `parse` entry point logs them and
//! hands back an empty document instead.

use thiserror::Error;

/// Errors that can occur while parsing a captured log entry
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input is blank
    #[error("日志内容为空")]
    EmptyInput,

    /// No recognizable marker anywhere in the input
    #[error("无效的日志格式: {0}")]
    MalformedInput(String),

    /// Request body marker absent or followed only by whitespace
    #[error("无法找到请求体内容")]
    MissingRequestBody,

    /// Request body is not JSON, or not a JSON object
    #[error("JSON 格式无效: {0}")]
    InvalidJson(String),
}

impl ParseError {
    /// Create a MalformedInput error
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an InvalidJson error
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::InvalidJson(msg.into())
    }

    /// Blank input is legitimately empty rather than a parse failure
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
