//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the list chrome and rows while reading/writing the
//! shared `TodoHandle` from Leptos context.

pub mod notification_stack;
pub mod stats_bar;
pub mod todo_form;
pub mod todo_item;
pub mod toolbar;
