//! Digital Journey Core: shared abstractions.
//!
//! This crate defines the types and traits that the catalog, navigation,
//! gate and playback crates all depend on. It contains no infrastructure code.

pub mod advisory;
pub mod audio;
pub mod busy;
pub mod clock;
pub mod command;
pub mod error;
pub mod screen_id;
pub mod store;
