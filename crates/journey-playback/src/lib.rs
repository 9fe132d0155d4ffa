//! Playback: background music toggle.
//!
//! The toggle never decides whether music is playing; it asks the shared
//! audio resource and mirrors the events the resource reports.

pub mod application;
pub mod domain;
