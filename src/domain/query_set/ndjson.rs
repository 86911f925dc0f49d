//! Bulk query upload parsing (newline-delimited JSON)
//!
//! Every non-blank line of an upload must hold one JSON object with string
//! `queryText` and `referenceAnswer` members. Parsing reports every malformed
//! line, numbered from 1 by physical line, so the user can fix the whole file
//! in one go.

use std::iter::Enumerate;
use std::str::Lines;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::QueryRecord;

const QUERY_TEXT_KEY: &str = "queryText";
const REFERENCE_ANSWER_KEY: &str = "referenceAnswer";

/// Written by some editors at the start of UTF-8 files
const BYTE_ORDER_MARK: char = '\u{feff}';

/// A malformed line of an upload
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("Line {line}: {message}")]
pub struct LineError {
    /// 1-based physical line number
    pub line: usize,
    pub message: String,
}

impl LineError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// All malformed lines of an upload
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{} malformed line(s) in query upload", .errors.len())]
pub struct BulkParseError {
    pub errors: Vec<LineError>,
}

impl BulkParseError {
    /// Line numbers of every malformed line, ascending
    pub fn lines(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.line).collect()
    }
}

/// Lazy, restartable iterator over the records of an upload
#[derive(Debug, Clone)]
pub struct NdjsonQueries<'a> {
    content: &'a str,
    lines: Enumerate<Lines<'a>>,
}

impl<'a> NdjsonQueries<'a> {
    pub fn new(content: &'a str) -> Self {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        Self {
            content,
            lines: content.lines().enumerate(),
        }
    }

    /// Start over from the first line
    pub fn restart(&mut self) {
        self.lines = self.content.lines().enumerate();
    }
}

impl Iterator for NdjsonQueries<'_> {
    type Item = Result<QueryRecord, LineError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(parse_line(index + 1, trimmed));
        }
        None
    }
}

/// Parse an upload, collecting every line error before failing
pub fn parse_queries(content: &str) -> Result<Vec<QueryRecord>, BulkParseError> {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for item in NdjsonQueries::new(content) {
        match item {
            Ok(record) => records.push(record),
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(BulkParseError { errors })
    }
}

fn parse_line(line: usize, text: &str) -> Result<QueryRecord, LineError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| LineError::new(line, format!("invalid JSON ({})", e)))?;

    let Value::Object(object) = value else {
        return Err(LineError::new(line, "expected a JSON object"));
    };

    let query_text = required_string(&object, QUERY_TEXT_KEY, line)?;
    if query_text.trim().is_empty() {
        return Err(LineError::new(line, format!("'{}' must not be empty", QUERY_TEXT_KEY)));
    }
    let reference_answer = required_string(&object, REFERENCE_ANSWER_KEY, line)?;

    Ok(QueryRecord::new(query_text, reference_answer))
}

fn required_string(object: &Map<String, Value>, key: &str, line: usize) -> Result<String, LineError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(LineError::new(line, format!("'{}' must be a string", key))),
        None => Err(LineError::new(line, format!("missing required field '{}'", key))),
    }
}

/// Read-only view of the first records of an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPreview {
    pub records: Vec<QueryRecord>,
    pub total: usize,
}

impl QueryPreview {
    pub fn new(queries: &[QueryRecord], limit: usize) -> Self {
        Self {
            records: queries.iter().take(limit).cloned().collect(),
            total: queries.len(),
        }
    }

    /// Whether records were left out of the preview
    pub fn is_truncated(&self) -> bool {
        self.records.len() < self.total
    }
}
