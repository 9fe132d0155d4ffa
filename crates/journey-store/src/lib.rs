//! Key-value stores for journey progress.
//!
//! [`memory_store::MemoryStore`] lives for the process; [`json_file_store::JsonFileStore`]
//! survives restarts by keeping every key in one JSON object on disk.

pub mod json_file_store;
pub mod memory_store;
