//! Digital Journey: Screen Catalog bounded context.
//!
//! Responsible for the immutable, ordered table of screens: parsing the
//! bundled YAML asset, validating id contiguity and successor links, and
//! versioning the asset by hash.

pub mod application;
pub mod domain;
