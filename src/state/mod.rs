//! Application state modules.
//!
//! ARCHITECTURE
//! ============
//! Plain data plus synchronous transitions. Nothing here touches the
//! browser, so every module is unit-tested natively.

pub mod notifications;
pub mod todos;
pub mod ui;
