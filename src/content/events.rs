//! Invalidation events raised by the content pipeline.

use serde::{Deserialize, Serialize};

use super::CultureCode;

/// Something changed upstream; the matching regions must be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvalidationEvent {
    /// A content item was saved or published.
    ContentSaved {
        content_type_id: i32,
        #[serde(default)]
        content_id: Option<i64>,
        #[serde(default)]
        culture: Option<CultureCode>,
    },
    /// A content type's schema changed; its cached items are meaningless.
    ContentTypeChanged { content_type_id: i32 },
    /// A culture was removed from the site.
    CultureRemoved { culture: CultureCode },
    /// Empty every region, keep them allocated.
    RefreshAll,
    /// Drop every region.
    Rebuild,
}

/// What an event touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InvalidationOutcome {
    pub regions_cleared: usize,
    pub regions_removed: usize,
    pub items_evicted: usize,
}
