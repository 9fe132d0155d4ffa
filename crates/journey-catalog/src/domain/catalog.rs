//! The validated, immutable screen catalog.

use std::collections::HashSet;
use std::fmt::Write as _;

use journey_core::error::JourneyError;
use journey_core::screen_id::ScreenId;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::records::ScreenRecord;

/// Read-only lookup over an ordered set of screens.
///
/// Navigation resolves screens through this trait rather than through
/// [`ScreenCatalog`] directly, so it never depends on how records are stored.
pub trait ScreenSource: Send + Sync {
    /// Highest screen id in the journey.
    fn max_screen(&self) -> u32;

    /// Finds the record with the given id.
    fn find(&self, id: ScreenId) -> Option<&ScreenRecord>;
}

/// A rule the catalog asset breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogViolation {
    /// The asset lists no screens.
    #[error("catalog contains no screens")]
    Empty,

    /// Two records share an id.
    #[error("screen id {0} appears more than once")]
    DuplicateId(u32),

    /// Ids do not run contiguously from 1.
    #[error("screen ids are not contiguous: expected {expected}, found {found}")]
    Gap {
        /// The id that should have come next.
        expected: u32,
        /// The id that did.
        found: u32,
    },

    /// A `suggested_next` points outside the catalog.
    #[error(
        "screen {id} suggests screen {next}, which is neither a catalog id nor the completion sentinel {sentinel}"
    )]
    DanglingSuccessor {
        /// The offending record.
        id: u32,
        /// Its suggested successor.
        next: u32,
        /// The completion sentinel (`max + 1`).
        sentinel: u32,
    },

    /// A record has a blank title.
    #[error("screen {0} has an empty title")]
    EmptyTitle(u32),

    /// An image is not referenced by absolute URL.
    #[error("screen {id} image {path:?} is not an absolute URL")]
    RelativeImage {
        /// The offending record.
        id: u32,
        /// The image reference.
        path: String,
    },
}

impl From<CatalogViolation> for JourneyError {
    fn from(violation: CatalogViolation) -> Self {
        Self::Catalog(violation.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    version: u32,
    screens: Vec<ScreenRecord>,
}

/// Ordered table of screens, validated once and never mutated.
#[derive(Debug, Clone)]
pub struct ScreenCatalog {
    version: u32,
    version_hash: String,
    max_screen: u32,
    screens: Vec<ScreenRecord>,
}

impl ScreenCatalog {
    /// Parses and validates a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Catalog` if the document is malformed or breaks
    /// a catalog invariant.
    pub fn from_yaml(source: &str) -> Result<Self, JourneyError> {
        let document: CatalogDocument = serde_yaml::from_str(source)
            .map_err(|e| JourneyError::Catalog(format!("catalog parse failed: {e}")))?;
        let mut catalog = Self::from_records(document.version, document.screens)?;
        catalog.version_hash = sha256_hex(source.as_bytes());
        Ok(catalog)
    }

    /// Builds a catalog from records, sorting them by id.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Catalog` if the records break a catalog
    /// invariant.
    pub fn from_records(version: u32, mut screens: Vec<ScreenRecord>) -> Result<Self, JourneyError> {
        let max_screen = validate(&mut screens)?;
        let version_hash = hash_records(&screens);
        Ok(Self {
            version,
            version_hash,
            max_screen,
            screens,
        })
    }

    /// Asset version declared in the document.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// SHA-256 of the catalog source, hex encoded.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// Number of screens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Always `false` for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Screens in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ScreenRecord> {
        self.screens.iter()
    }
}

impl ScreenSource for ScreenCatalog {
    fn max_screen(&self) -> u32 {
        self.max_screen
    }

    fn find(&self, id: ScreenId) -> Option<&ScreenRecord> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.screens.get(index).filter(|record| record.id == id)
    }
}

/// Checks every catalog invariant and returns the highest screen id.
fn validate(screens: &mut [ScreenRecord]) -> Result<u32, CatalogViolation> {
    if screens.is_empty() {
        return Err(CatalogViolation::Empty);
    }

    let mut seen = HashSet::with_capacity(screens.len());
    for record in screens.iter() {
        if !seen.insert(record.id) {
            return Err(CatalogViolation::DuplicateId(record.id.get()));
        }
    }

    screens.sort_by_key(|record| record.id);
    let mut expected = 1_u32;
    for record in screens.iter() {
        if record.id.get() != expected {
            return Err(CatalogViolation::Gap {
                expected,
                found: record.id.get(),
            });
        }
        expected += 1;
    }

    // `expected` is now max + 1, the completion sentinel.
    let sentinel = expected;
    for record in screens.iter() {
        let id = record.id.get();
        if record.title.trim().is_empty() {
            return Err(CatalogViolation::EmptyTitle(id));
        }
        if let Some(next) = record.suggested_next.filter(|next| next.get() > sentinel) {
            return Err(CatalogViolation::DanglingSuccessor {
                id,
                next: next.get(),
                sentinel,
            });
        }
        if let Some(path) = record.image_path.as_ref().filter(|path| !is_absolute_url(path)) {
            return Err(CatalogViolation::RelativeImage {
                id,
                path: path.clone(),
            });
        }
    }

    Ok(sentinel - 1)
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}

fn hash_records(screens: &[ScreenRecord]) -> String {
    let mut hasher = Sha256::new();
    for record in screens {
        hasher.update(record.id.get().to_be_bytes());
        hasher.update(record.title.as_bytes());
        hasher.update(record.content.as_bytes());
    }
    to_hex(&hasher.finalize())
}

fn sha256_hex(bytes: &[u8]) -> String {
    to_hex(&Sha256::digest(bytes))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
