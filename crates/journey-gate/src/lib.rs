//! Gate: the secret-code check in front of the journey.

pub mod application;
pub mod domain;
