//! Loads the catalog bundled with the binary.

use journey_core::error::JourneyError;
use tracing::info;

use crate::domain::catalog::{ScreenCatalog, ScreenSource};

/// The catalog asset compiled into the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../assets/screens.yaml");

/// Parses and validates the bundled catalog.
///
/// Called once at startup; the result is shared read-only for the life of
/// the process.
///
/// # Errors
///
/// Returns `JourneyError::Catalog` if the bundled asset is invalid.
pub fn load_bundled() -> Result<ScreenCatalog, JourneyError> {
    let catalog = ScreenCatalog::from_yaml(BUNDLED_CATALOG)?;
    info!(
        screens = catalog.max_screen(),
        version = catalog.version(),
        version_hash = %catalog.version_hash(),
        "screen catalog loaded"
    );
    Ok(catalog)
}
