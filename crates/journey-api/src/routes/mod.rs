//! Route modules organized by bounded context.

pub mod gate;
pub mod health;
pub mod journey;
pub mod playback;
pub mod screens;
