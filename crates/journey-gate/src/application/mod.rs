//! Application layer for the Gate context.

pub mod command_handlers;
