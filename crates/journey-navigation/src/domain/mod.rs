//! Navigation domain types.

pub mod commands;
pub mod cursor;
pub mod navigator;
