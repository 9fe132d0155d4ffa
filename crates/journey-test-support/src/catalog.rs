//! Catalog builders.

use journey_catalog::domain::catalog::{ScreenCatalog, ScreenSource};
use journey_catalog::domain::records::{Icon, ScreenRecord};
use journey_core::screen_id::ScreenId;

/// A minimal record with the given id and optional successor.
///
/// # Panics
///
/// Panics if `id` or `next` is zero.
#[must_use]
pub fn screen_record(id: u32, next: Option<u32>) -> ScreenRecord {
    ScreenRecord {
        id: ScreenId::new(id).unwrap(),
        title: format!("Screen {id}"),
        content: format!("Line one of screen {id}\nLine two of screen {id}"),
        image_path: None,
        image_alt: None,
        style: None,
        suggested_next: next.map(|n| ScreenId::new(n).unwrap()),
        icon: if id % 2 == 0 { Icon::Star } else { Icon::Heart },
        effects: Vec::new(),
    }
}

/// A validated catalog of `count` screens with no suggested successors.
///
/// # Panics
///
/// Panics if `count` is zero.
#[must_use]
pub fn linear_catalog(count: u32) -> ScreenCatalog {
    let records = (1..=count).map(|id| screen_record(id, None)).collect();
    ScreenCatalog::from_records(1, records).unwrap()
}

/// A source that claims the catalog's full range but has lost one record.
///
/// A validated catalog cannot have gaps; this double exercises the
/// data-integrity path anyway.
#[derive(Debug)]
pub struct GappySource {
    catalog: ScreenCatalog,
    missing: u32,
}

impl GappySource {
    /// Wraps `catalog`, hiding the record with id `missing`.
    #[must_use]
    pub fn without(catalog: ScreenCatalog, missing: u32) -> Self {
        Self { catalog, missing }
    }
}

impl ScreenSource for GappySource {
    fn max_screen(&self) -> u32 {
        self.catalog.max_screen()
    }

    fn find(&self, id: ScreenId) -> Option<&ScreenRecord> {
        if id.get() == self.missing {
            None
        } else {
            self.catalog.find(id)
        }
    }
}
