//! To-do records, the ordered store, and the single-row edit cursor.
//!
//! DESIGN
//! ======
//! All transitions here are synchronous and pure: validation runs before any
//! mutation, so a rejected input never leaves a partially applied change.
//! Persistence and notifications are layered on top by `controller`.

#[cfg(test)]
#[path = "todos_test.rs"]
mod todos_test;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    /// Creation-time derived identifier, unique within the store.
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Missing in payloads written by older builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("task text is empty")]
    EmptyText,
    #[error("task text is {len} characters, limit is {max}")]
    TextTooLong { len: usize, max: usize },
    #[error("payload could not be decoded: {0}")]
    ImportDecode(String),
    #[error("payload is not a list of tasks")]
    ImportNotSequence,
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("duplicate task id {0}")]
    DuplicateId(i64),
    #[error("tasks could not be encoded: {0}")]
    Encode(String),
    #[error("no task ids left after {0}")]
    IdsExhausted(i64),
}

/// Trim `raw` and check it against the non-empty / length invariant.
///
/// Length counts Unicode scalar values, not bytes.
pub fn validate_text(raw: &str, max_len: usize) -> Result<String, TodoError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(TodoError::EmptyText);
    }
    if len > max_len {
        return Err(TodoError::TextTooLong { len, max: max_len });
    }
    Ok(trimmed.to_owned())
}

/// Counts shown in the stats strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// One visual row, either read-only or open for editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub editing: bool,
}

/// Ordered record store plus the edit cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    records: Vec<TodoRecord>,
    editing: Option<usize>,
    last_id: i64,
}

impl TodoState {
    /// Build a store from already-decoded records, enforcing the text and
    /// id-uniqueness invariants. Text is normalized to its trimmed form.
    pub fn from_records(records: Vec<TodoRecord>, max_len: usize) -> Result<Self, TodoError> {
        let records = validate_records(records, max_len)?;
        let last_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Ok(Self { records, editing: None, last_id })
    }

    pub fn records(&self) -> &[TodoRecord] {
        &self.records
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new active record created at `now` and return its id.
    ///
    /// Fails without touching the store when the text is invalid or the id
    /// space above the highest known id is used up.
    pub fn add(&mut self, raw: &str, max_len: usize, now: DateTime<Utc>) -> Result<i64, TodoError> {
        let text = validate_text(raw, max_len)?;
        let id = self.next_id(now.timestamp_millis())?;
        self.records.push(TodoRecord { id, text, completed: false, created_at: Some(now) });
        self.editing = None;
        Ok(id)
    }

    /// Flip completion on `index`. Returns the new flag, or `None` when the
    /// index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let record = self.records.get_mut(index)?;
        record.completed = !record.completed;
        Some(record.completed)
    }

    /// Open `index` for editing. Out-of-range indices are ignored.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.editing = Some(index);
        true
    }

    /// Replace the text of `index` and close the editor.
    ///
    /// Returns `Ok(false)` when the index is out of range. On validation
    /// failure both the record and the cursor are left untouched.
    pub fn commit_edit(&mut self, index: usize, raw: &str, max_len: usize) -> Result<bool, TodoError> {
        if index >= self.records.len() {
            return Ok(false);
        }
        let text = validate_text(raw, max_len)?;
        self.records[index].text = text;
        self.editing = None;
        Ok(true)
    }

    /// Close the editor without touching any record. Returns whether a row
    /// was being edited.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Remove the record at `index`, clearing the cursor if it pointed at or
    /// past the removed row.
    pub fn remove(&mut self, index: usize) -> Option<TodoRecord> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);
        if self.editing.is_some_and(|cursor| cursor >= index) {
            self.editing = None;
        }
        Some(removed)
    }

    /// Swap in a validated record list wholesale (import).
    pub fn replace_all(&mut self, next: TodoState) {
        let last_id = self.last_id.max(next.last_id);
        *self = Self { last_id, ..next };
    }

    /// Drop every record. Ids keep increasing past the cleared ones.
    pub fn clear(&mut self) {
        self.records.clear();
        self.editing = None;
    }

    pub fn stats(&self) -> TodoStats {
        let total = self.records.len();
        let completed = self.records.iter().filter(|r| r.completed).count();
        TodoStats { total, active: total - completed, completed }
    }

    /// Rows in display order, with the cursor row flagged for edit mode.
    pub fn rows(&self) -> Vec<RowView> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, r)| RowView {
                index,
                id: r.id,
                text: r.text.clone(),
                completed: r.completed,
                editing: self.editing == Some(index),
            })
            .collect()
    }

    /// Pretty JSON array of every record, in order.
    pub fn export_json(&self) -> Result<String, TodoError> {
        serde_json::to_string_pretty(&self.records).map_err(|e| TodoError::Encode(e.to_string()))
    }

    fn next_id(&mut self, now_ms: i64) -> Result<i64, TodoError> {
        let floor = self.last_id.checked_add(1).ok_or(TodoError::IdsExhausted(self.last_id))?;
        let id = now_ms.max(floor);
        self.last_id = id;
        Ok(id)
    }
}

/// Decode a payload that must be a JSON array of records.
pub fn decode_records(raw: &str, max_len: usize) -> Result<TodoState, TodoError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| TodoError::ImportDecode(e.to_string()))?;
    if !value.is_array() {
        return Err(TodoError::ImportNotSequence);
    }
    let records: Vec<TodoRecord> = serde_json::from_value(value).map_err(|e| TodoError::ImportDecode(e.to_string()))?;
    TodoState::from_records(records, max_len)
}

fn validate_records(records: Vec<TodoRecord>, max_len: usize) -> Result<Vec<TodoRecord>, TodoError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            record.text = validate_text(&record.text, max_len)
                .map_err(|e| TodoError::InvalidRecord { index, reason: e.to_string() })?;
            if !seen.insert(record.id) {
                return Err(TodoError::DuplicateId(record.id));
            }
            Ok(record)
        })
        .collect()
}
