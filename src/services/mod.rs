//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the operations and their error types so route
//! handlers can stay focused on protocol translation.

pub mod ai;
pub mod compute;
pub mod dispatch;
