//! The single mutation entry point for the widget.
//!
//! DESIGN
//! ======
//! `TodoListController` owns the record store, the edit cursor (inside
//! `TodoState`), the theme and the persistence adapter. Every operation
//! validates first, mutates second, writes the whole list third, and reports
//! what happened as an `Outcome` the UI layer turns into banners and a
//! re-render.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures come back as warning notices with nothing changed.
//! Out-of-range indices are silent no-ops. Persistence failures are logged
//! and attached to the outcome but never undo the in-memory mutation.

use chrono::{DateTime, Utc};

use crate::config::WidgetConfig;
use crate::state::notifications::Notice;
use crate::state::todos::{TodoError, TodoState, decode_records};
use crate::state::ui::Theme;
use crate::util::dark_mode;
use crate::util::storage::{KeyValueStore, LoadOutcome, PersistError, Persistence};

/// What a controller operation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// True when visible state changed and the list must be redrawn.
    pub changed: bool,
    /// Banner to show, if any.
    pub notice: Option<Notice>,
    /// Result of the write-through, `None` when nothing was written.
    pub persist: Option<Result<(), PersistError>>,
}

impl Outcome {
    fn noop() -> Self {
        Self::default()
    }

    fn rejected(notice: Notice) -> Self {
        Self { changed: false, notice: Some(notice), persist: None }
    }

    fn rerender() -> Self {
        Self { changed: true, notice: None, persist: None }
    }
}

/// Owns the to-do list for one mounted widget.
#[derive(Debug)]
pub struct TodoListController {
    config: WidgetConfig,
    state: TodoState,
    theme: Theme,
    persistence: Persistence,
    load_error: Option<PersistError>,
    last_persist_error: Option<PersistError>,
}

impl TodoListController {
    /// Hydrate from `store`. A missing or unusable payload starts empty.
    pub fn new(config: WidgetConfig, store: Box<dyn KeyValueStore>) -> Self {
        let persistence = Persistence::new(store, config.storage_key.clone(), config.theme_key.clone());
        let LoadOutcome { state, error } = persistence.load(config.max_text_len);
        let theme = persistence
            .load_theme()
            .or_else(dark_mode::system_preference)
            .unwrap_or_default();
        log::debug!("controller ready: backend={} tasks={} theme={}", persistence.backend(), state.len(), theme.as_str());
        Self { config, state, theme, persistence, load_error: error, last_persist_error: None }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Why the stored list was discarded at startup, if it was.
    pub fn load_error(&self) -> Option<&PersistError> {
        self.load_error.as_ref()
    }

    /// Failure from the most recent write, cleared by the next success.
    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    pub fn add(&mut self, text: &str) -> Outcome {
        self.add_at(text, Utc::now())
    }

    /// `add` with an explicit creation time.
    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Outcome {
        if let Err(err) = self.state.add(text, self.config.max_text_len, now) {
            return Outcome::rejected(Notice::from(&err));
        }
        self.committed(Notice::success("Task added successfully! 🎉"))
    }

    pub fn toggle_complete(&mut self, index: usize) -> Outcome {
        let Some(completed) = self.state.toggle(index) else {
            return Outcome::noop();
        };
        let notice = if completed {
            Notice::info("Task completed! 🎉")
        } else {
            Notice::info("Task marked as active")
        };
        self.committed(notice)
    }

    pub fn begin_edit(&mut self, index: usize) -> Outcome {
        if self.state.begin_edit(index) { Outcome::rerender() } else { Outcome::noop() }
    }

    pub fn commit_edit(&mut self, index: usize, text: &str) -> Outcome {
        match self.state.commit_edit(index, text, self.config.max_text_len) {
            Ok(true) => self.committed(Notice::success("Task updated successfully!")),
            Ok(false) => Outcome::noop(),
            Err(TodoError::EmptyText) => Outcome::rejected(Notice::warning("Task cannot be empty!")),
            Err(err) => Outcome::rejected(Notice::from(&err)),
        }
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        if self.state.cancel_edit() { Outcome::rerender() } else { Outcome::noop() }
    }

    pub fn remove(&mut self, index: usize) -> Outcome {
        if self.state.remove(index).is_none() {
            return Outcome::noop();
        }
        self.committed(Notice::danger("Task deleted successfully!"))
    }

    /// Pretty JSON of the whole list, suitable for `export_filename`.
    pub fn export_all(&self) -> Result<String, TodoError> {
        self.state.export_json()
    }

    /// Replace the whole list from a backup payload. The payload must be a
    /// JSON array of valid records; anything else leaves the list untouched.
    pub fn import_all(&mut self, raw: &str) -> Outcome {
        let imported = match decode_records(raw, self.config.max_text_len) {
            Ok(imported) => imported,
            Err(err) => {
                log::warn!("rejected import: {err}");
                return Outcome::rejected(Notice::from(&err));
            }
        };
        let count = imported.len();
        self.state.replace_all(imported);
        let noun = if count == 1 { "task" } else { "tasks" };
        self.committed(Notice::success(format!("Imported {count} {noun}.")))
    }

    /// Empty the list. Requires `confirmed`, which the UI obtains from the
    /// user before calling.
    pub fn clear_all(&mut self, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::noop();
        }
        self.state.clear();
        self.committed(Notice::info("All tasks cleared"))
    }

    /// Flip light/dark and persist the preference.
    pub fn toggle_theme(&mut self) -> Outcome {
        self.theme = self.theme.toggled();
        log::info!("theme switched to {}", self.theme.as_str());
        let persist = self.persistence.save_theme(self.theme);
        Outcome { changed: true, notice: None, persist: Some(persist) }
    }

    fn committed(&mut self, notice: Notice) -> Outcome {
        let persist = self.persistence.save(&self.state);
        self.last_persist_error = persist.clone().err();
        Outcome { changed: true, notice: Some(notice), persist: Some(persist) }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
