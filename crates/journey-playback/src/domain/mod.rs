//! Domain layer for the Playback context.

pub mod commands;
pub mod state;
