//! Domain layer for the Gate context.

pub mod commands;
pub mod secret;
