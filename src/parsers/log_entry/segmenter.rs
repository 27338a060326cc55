//! Block segmentation of raw log text
//!
//! Purely textual: locates markers and slices the entry into blocks. No JSON
//! is interpreted here.

use log::debug;

use super::markers::LogMarkers;
use crate::parsers::ParseError;

/// Detected shape of a captured log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Request Body / Response Body split
    RequestResponse,
    /// Lines opened by role markers
    RoleBlocks,
}

/// A span of text attributed to one role marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub role: String,
    /// Unparsed block text, lines joined with `\n`
    pub content: String,
}

impl RawBlock {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Segmented log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segments<'a> {
    RoleBlocks(Vec<RawBlock>),
    RequestResponse {
        /// Everything before the last response marker
        request: &'a str,
        /// Everything after it, trimmed
        response: &'a str,
    },
}

/// Probe which shape a log entry has
///
/// The request body marker wins over role markers, since a request body can
/// itself contain text that looks like a role line.
pub fn detect_format(text: &str, markers: &LogMarkers) -> Option<LogFormat> {
    if text.contains(markers.request_body.as_str()) {
        Some(LogFormat::RequestResponse)
    } else if text.lines().any(|line| markers.role_for_line(line).is_some()) {
        Some(LogFormat::RoleBlocks)
    } else {
        None
    }
}

/// Split a role-marker entry into blocks
///
/// Lines before the first marker are dropped. The trailing block is kept
/// only when it has non-blank content.
pub fn split_role_blocks(text: &str, markers: &LogMarkers) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((label, rest)) = markers.role_for_line(line) {
            if let Some((role, lines)) = current.take() {
                blocks.push(RawBlock::new(role, lines.join("\n")));
            }
            current = Some((label, vec![rest]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((role, lines)) = current {
        let content = lines.join("\n");
        if !content.trim().is_empty() {
            blocks.push(RawBlock::new(role, content));
        }
    }

    blocks
}

/// Split an entry on the last response marker
///
/// Returns the request part and the trimmed response part.
pub fn split_request_response<'a>(
    text: &'a str,
    markers: &LogMarkers,
) -> Result<(&'a str, &'a str), ParseError> {
    let marker = markers.response_body.as_str();
    let index = text
        .rfind(marker)
        .ok_or_else(|| ParseError::malformed_input(format!("缺少标记 {}", marker)))?;

    let request = &text[..index];
    let response = text[index + marker.len()..].trim();
    Ok((request, response))
}

/// Detect the entry's shape and segment it accordingly
pub fn segment<'a>(text: &'a str, markers: &LogMarkers) -> Result<Segments<'a>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let format = detect_format(text, markers)
        .ok_or_else(|| ParseError::malformed_input("未找到任何日志标记"))?;
    debug!("Detected log entry format: {:?}", format);

    match format {
        LogFormat::RequestResponse => {
            let (request, response) = split_request_response(text, markers)?;
            Ok(Segments::RequestResponse { request, response })
        }
        LogFormat::RoleBlocks => Ok(Segments::RoleBlocks(split_role_blocks(text, markers))),
    }
}

#[cfg(test)]
#[path = "segmenter_tests.rs"]
mod tests;
