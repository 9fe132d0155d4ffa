//! Application layer for the Playback context.

pub mod toggle;
