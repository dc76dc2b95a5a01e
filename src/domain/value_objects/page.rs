//! Offset pagination window for list queries.

use serde::Deserialize;

/// Hard cap on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Requested slice of a list. `limit: None` means "everything".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: i64) -> Self {
        Self { limit, offset }.normalized()
    }

    /// Clamp the limit to `1..=MAX_PAGE_SIZE` and the offset to be non-negative.
    pub fn normalized(self) -> Self {
        Self {
            limit: self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE)),
            offset: self.offset.max(0),
        }
    }

    /// Apply the window to an in-memory iterator.
    pub fn apply<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let skipped = items.skip(self.offset as usize);
        match self.limit {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }

    /// Value for SQL `LIMIT`; `None` binds as `LIMIT NULL` (no limit) in PostgreSQL.
    pub fn sql_limit(&self) -> Option<i64> {
        self.limit
    }
}
