//! Shared test doubles and builders for the Digital Journey service.

mod audio;
mod catalog;
mod clock;
mod store;

pub use audio::{AudioRequest, ScriptedAudio};
pub use catalog::{GappySource, linear_catalog, screen_record};
pub use clock::FixedClock;
pub use store::{FailingStore, RecordingStore, StoreOp};
