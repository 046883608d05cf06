//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns screen-level layout and delegates rendering details
//! to `components`.

pub mod todos;
