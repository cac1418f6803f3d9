use std::collections::HashMap;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use serde_json::value::RawValue;

use super::StoreError;
use crate::models::{QuestionId, QuestionRecord};

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Read the raw question document: a JSON array of objects.
pub fn read_document(path: &Path) -> Result<Vec<Value>, StoreError> {
    let json_content = read_text(path)?;
    serde_json::from_str(&json_content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn a raw document into validated records, numbering them by position.
pub fn parse_records(path: &Path, document: &[Value]) -> Result<Vec<QuestionRecord>, StoreError> {
    document
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut record =
                QuestionRecord::deserialize(value).map_err(|source| StoreError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            record.id = QuestionId(index);
            record
                .validate()
                .map_err(|reason| StoreError::InvalidRecord { index, reason })?;
            Ok(record)
        })
        .collect()
}

/// Flip `marked` on the record at `index` and write the file back.
///
/// Only the flag's literal is rewritten; every other byte of the file is kept.
/// A record without a `marked` key gets one appended as its last field.
pub fn toggle_marked_in_place(path: &Path, index: usize) -> Result<bool, StoreError> {
    let text = read_text(path)?;
    let (span, replacement, marked) = plan_toggle(path, &text, index)?;

    let mut output = String::with_capacity(text.len() + replacement.len());
    output.push_str(&text[..span.start]);
    output.push_str(&replacement);
    output.push_str(&text[span.end..]);

    fs::write(path, output).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(marked)
}

/// Byte range to replace, its replacement, and the resulting flag.
fn plan_toggle(
    path: &Path,
    text: &str,
    index: usize,
) -> Result<(Range<usize>, String, bool), StoreError> {
    let records: Vec<&RawValue> = serde_json::from_str(text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let record = records
        .get(index)
        .ok_or(StoreError::UnknownQuestion(QuestionId(index)))?;

    let fields: HashMap<String, &RawValue> =
        serde_json::from_str(record.get()).map_err(|_| StoreError::InvalidRecord {
            index,
            reason: "record is not an object".to_string(),
        })?;

    match fields.get("marked") {
        Some(raw) => {
            let current: bool =
                serde_json::from_str(raw.get()).map_err(|_| StoreError::InvalidRecord {
                    index,
                    reason: format!("marked is not a boolean: {}", raw.get()),
                })?;
            let start = offset_in(text, raw.get());
            Ok((start..start + raw.get().len(), (!current).to_string(), !current))
        }
        None => {
            let body = record.get();
            let close = body.rfind('}').unwrap_or(body.len());
            let content = body[..close].trim_end();
            let separator = if content.ends_with('{') { "" } else { ", " };
            let at = offset_in(text, body) + content.len();
            Ok((at..at, format!("{}\"marked\": true", separator), true))
        }
    }
}

// `part` is always a borrowed slice of `text`.
fn offset_in(text: &str, part: &str) -> usize {
    part.as_ptr() as usize - text.as_ptr() as usize
}
