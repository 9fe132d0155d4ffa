//! Digital Journey: Screen Navigation bounded context.
//!
//! Responsible for resolving which screen the user sees, computing where
//! "advance" leads, persisting the cursor, and restarting the journey.

pub mod application;
pub mod domain;
