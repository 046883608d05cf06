use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::TimeZone;

use super::*;
use crate::state::notifications::Severity;
use crate::util::storage::MemoryStore;

/// Store handle the test keeps a clone of, to inspect what was written.
#[derive(Clone, Default)]
struct SharedStore(Arc<Mutex<HashMap<String, String>>>);

impl SharedStore {
    fn raw(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.0.lock().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "shared"
    }
}

struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Write("QuotaExceededError".to_owned()))
    }

    fn backend(&self) -> &'static str {
        "full"
    }
}

fn controller() -> TodoListController {
    TodoListController::new(WidgetConfig::default(), Box::new(MemoryStore::default()))
}

fn controller_with(texts: &[&str]) -> TodoListController {
    let mut c = controller();
    for text in texts {
        assert!(c.add(text).changed);
    }
    c
}

fn texts(c: &TodoListController) -> Vec<String> {
    c.state().records().iter().map(|r| r.text.clone()).collect()
}

fn severity(outcome: &Outcome) -> Option<Severity> {
    outcome.notice.as_ref().map(|n| n.severity)
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn new_starts_empty_with_light_theme() {
    let c = controller();
    assert!(c.state().is_empty());
    assert_eq!(c.theme(), Theme::Light);
    assert!(c.load_error().is_none());
}

#[test]
fn new_hydrates_from_previous_session() {
    let store = SharedStore::default();
    {
        let mut first = TodoListController::new(WidgetConfig::default(), Box::new(store.clone()));
        first.add("Buy milk");
        first.toggle_complete(0);
        first.toggle_theme();
    }
    let second = TodoListController::new(WidgetConfig::default(), Box::new(store));
    assert_eq!(texts(&second), vec!["Buy milk"]);
    assert!(second.state().records()[0].completed);
    assert_eq!(second.theme(), Theme::Dark);
}

#[test]
fn new_with_corrupt_payload_starts_empty_and_reports() {
    let mut store = SharedStore::default();
    store.set("todos", "not json").unwrap();
    let c = TodoListController::new(WidgetConfig::default(), Box::new(store));
    assert!(c.state().is_empty());
    assert!(matches!(c.load_error(), Some(PersistError::Decode(_))));
}

#[test]
fn new_honors_configured_keys() {
    let mut store = SharedStore::default();
    store.set("custom", r#"[{"id": 1, "text": "from custom key"}]"#).unwrap();
    let config = WidgetConfig { storage_key: "custom".to_owned(), ..WidgetConfig::default() };
    let c = TodoListController::new(config, Box::new(store));
    assert_eq!(texts(&c), vec!["from custom key"]);
}

// =============================================================
// add
// =============================================================

#[test]
fn add_valid_text_persists_and_notifies_success() {
    let store = SharedStore::default();
    let mut c = TodoListController::new(WidgetConfig::default(), Box::new(store.clone()));

    let outcome = c.add("  Buy milk  ");
    assert!(outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Success));
    assert_eq!(outcome.persist, Some(Ok(())));
    assert_eq!(texts(&c), vec!["Buy milk"]);

    let raw = store.raw("todos").unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["text"], serde_json::json!("Buy milk"));
    assert_eq!(value[0]["completed"], serde_json::json!(false));
}

#[test]
fn add_empty_text_warns_without_mutation() {
    let mut c = controller_with(&["a"]);
    let outcome = c.add("    ");
    assert!(!outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Warning));
    assert_eq!(outcome.persist, None);
    assert_eq!(c.state().len(), 1);
}

#[test]
fn add_overlong_text_warns_without_mutation() {
    let mut c = controller();
    let outcome = c.add(&"x".repeat(101));
    assert!(!outcome.changed);
    assert!(outcome.notice.unwrap().message.contains("too long"));
    assert!(c.state().is_empty());
}

#[test]
fn add_respects_configured_limit() {
    let config = WidgetConfig { max_text_len: 5, ..WidgetConfig::default() };
    let mut c = TodoListController::new(config, Box::new(MemoryStore::default()));
    assert!(!c.add("sixsix").changed);
    assert!(c.add("five!").changed);
}

#[test]
fn add_at_records_creation_time() {
    let mut c = controller();
    let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    c.add_at("dated", now);
    let record = &c.state().records()[0];
    assert_eq!(record.created_at, Some(now));
    assert_eq!(record.id, now.timestamp_millis());
}

// =============================================================
// toggle_complete
// =============================================================

#[test]
fn toggle_complete_reports_new_state() {
    let mut c = controller_with(&["a", "b"]);

    let done = c.toggle_complete(1);
    assert_eq!(severity(&done), Some(Severity::Info));
    assert!(done.notice.unwrap().message.contains("completed"));
    assert!(c.state().records()[1].completed);
    assert!(!c.state().records()[0].completed);

    let undone = c.toggle_complete(1);
    assert!(undone.notice.unwrap().message.contains("active"));
    assert!(!c.state().records()[1].completed);
}

#[test]
fn toggle_complete_out_of_range_is_silent() {
    let mut c = controller_with(&["a"]);
    assert_eq!(c.toggle_complete(9), Outcome::default());
}

// =============================================================
// edit
// =============================================================

#[test]
fn begin_edit_rerenders_without_persisting() {
    let mut c = controller_with(&["a"]);
    let outcome = c.begin_edit(0);
    assert!(outcome.changed);
    assert!(outcome.notice.is_none());
    assert!(outcome.persist.is_none());
    assert_eq!(c.state().editing(), Some(0));
}

#[test]
fn begin_edit_out_of_range_is_silent() {
    let mut c = controller_with(&["a"]);
    assert_eq!(c.begin_edit(4), Outcome::default());
    assert_eq!(c.state().editing(), None);
}

#[test]
fn commit_edit_empty_warns_and_keeps_cursor() {
    let mut c = controller_with(&["original"]);
    c.begin_edit(0);
    let outcome = c.commit_edit(0, "   ");
    assert_eq!(outcome.notice, Some(Notice::warning("Task cannot be empty!")));
    assert_eq!(texts(&c), vec!["original"]);
    assert_eq!(c.state().editing(), Some(0));
}

#[test]
fn commit_edit_overlong_warns_and_keeps_cursor() {
    let mut c = controller_with(&["original"]);
    c.begin_edit(0);
    let outcome = c.commit_edit(0, &"y".repeat(101));
    assert_eq!(severity(&outcome), Some(Severity::Warning));
    assert_eq!(texts(&c), vec!["original"]);
    assert_eq!(c.state().editing(), Some(0));
}

#[test]
fn commit_edit_valid_updates_and_clears_cursor() {
    let mut c = controller_with(&["a", "b"]);
    c.begin_edit(0);
    let outcome = c.commit_edit(0, "alpha");
    assert_eq!(severity(&outcome), Some(Severity::Success));
    assert_eq!(outcome.persist, Some(Ok(())));
    assert_eq!(texts(&c), vec!["alpha", "b"]);
    assert_eq!(c.state().editing(), None);
}

#[test]
fn cancel_edit_leaves_text() {
    let mut c = controller_with(&["a"]);
    c.begin_edit(0);
    assert!(c.cancel_edit().changed);
    assert_eq!(c.state().editing(), None);
    assert_eq!(texts(&c), vec!["a"]);
    assert!(!c.cancel_edit().changed);
}

// =============================================================
// remove
// =============================================================

#[test]
fn remove_deletes_exact_record_with_danger_notice() {
    let mut c = controller_with(&["a", "b", "c"]);
    let outcome = c.remove(1);
    assert_eq!(severity(&outcome), Some(Severity::Danger));
    assert_eq!(texts(&c), vec!["a", "c"]);
}

#[test]
fn remove_clears_cursor_at_or_after_index() {
    let mut c = controller_with(&["a", "b", "c"]);
    c.begin_edit(2);
    c.remove(0);
    assert_eq!(c.state().editing(), None);
}

#[test]
fn remove_out_of_range_is_silent() {
    let mut c = controller_with(&["a"]);
    assert_eq!(c.remove(1), Outcome::default());
    assert_eq!(c.state().len(), 1);
}

// =============================================================
// export / import / clear
// =============================================================

#[test]
fn export_then_import_reproduces_store() {
    let mut source = controller_with(&["one", "two", "three"]);
    source.toggle_complete(2);
    let payload = source.export_all().unwrap();

    let mut target = controller_with(&["stale"]);
    let outcome = target.import_all(&payload);
    assert!(outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Success));
    assert_eq!(outcome.notice.unwrap().message, "Imported 3 tasks.");
    assert_eq!(target.state().records(), source.state().records());
}

#[test]
fn import_non_sequence_reports_failure_and_keeps_store() {
    let mut c = controller_with(&["keep me"]);
    let outcome = c.import_all(r#"{"id": 1, "text": "single object"}"#);
    assert!(!outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Danger));
    assert_eq!(texts(&c), vec!["keep me"]);
}

#[test]
fn import_malformed_payload_keeps_store() {
    let mut c = controller_with(&["keep me"]);
    assert!(!c.import_all("not json at all").changed);
    assert!(!c.import_all(r#"[{"id": 1, "text": ""}]"#).changed);
    assert_eq!(texts(&c), vec!["keep me"]);
}

#[test]
fn import_persists_replacement() {
    let store = SharedStore::default();
    let mut c = TodoListController::new(WidgetConfig::default(), Box::new(store.clone()));
    c.import_all(r#"[{"id": 5, "text": "restored"}]"#);
    assert!(store.raw("todos").unwrap().contains("restored"));
}

#[test]
fn add_after_importing_max_id_warns_without_mutation() {
    let mut c = controller();
    assert!(c.import_all(r#"[{"id": 9223372036854775807, "text": "x", "completed": false}]"#).changed);

    let outcome = c.add("next");
    assert!(!outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Warning));
    assert_eq!(outcome.persist, None);
    assert_eq!(texts(&c), vec!["x"]);
}

#[test]
fn clear_all_requires_confirmation() {
    let mut c = controller_with(&["a", "b"]);
    assert_eq!(c.clear_all(false), Outcome::default());
    assert_eq!(c.state().len(), 2);

    let outcome = c.clear_all(true);
    assert!(outcome.changed);
    assert!(c.state().is_empty());
    assert_eq!(c.state().stats().total, 0);
}

// =============================================================
// Persistence failures
// =============================================================

#[test]
fn persistence_failure_never_blocks_mutation() {
    let mut c = TodoListController::new(WidgetConfig::default(), Box::new(FullStore));
    let outcome = c.add("still works");
    assert!(outcome.changed);
    assert_eq!(severity(&outcome), Some(Severity::Success));
    assert_eq!(outcome.persist, Some(Err(PersistError::Write("QuotaExceededError".to_owned()))));
    assert_eq!(texts(&c), vec!["still works"]);
    assert!(c.last_persist_error().is_some());
}

#[test]
fn theme_toggle_survives_write_failure() {
    let mut c = TodoListController::new(WidgetConfig::default(), Box::new(FullStore));
    let outcome = c.toggle_theme();
    assert!(matches!(outcome.persist, Some(Err(_))));
    assert_eq!(c.theme(), Theme::Dark);
}

// =============================================================
// Scenario
// =============================================================

#[test]
fn scenario_add_toggle_edit_delete() {
    let mut c = controller();
    c.add("Buy milk");
    assert_eq!(texts(&c), vec!["Buy milk"]);
    assert!(!c.state().records()[0].completed);

    c.toggle_complete(0);
    assert!(c.state().records()[0].completed);

    c.begin_edit(0);
    c.commit_edit(0, "Buy oat milk");
    assert_eq!(texts(&c), vec!["Buy oat milk"]);
    assert!(c.state().records()[0].completed);

    c.remove(0);
    assert!(c.state().is_empty());
    assert_eq!(c.state().stats().total, 0);
}
