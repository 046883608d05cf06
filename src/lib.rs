//! # todo-widget
//!
//! Leptos + WASM to-do list widget: add, complete, edit and delete tasks,
//! transient notification banners, best-effort `localStorage` persistence,
//! JSON backup export/import and a light/dark theme toggle.
//!
//! `state` and `controller` are plain Rust and run natively under
//! `cargo test`; browser access lives in `util` behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod pages;
pub mod state;
pub mod util;
