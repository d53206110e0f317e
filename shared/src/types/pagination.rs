//! Offset/limit window for directory listings

use serde::{Deserialize, Serialize};

/// A resolved listing window.
///
/// `None` on either side means unbounded on that side. A window is only
/// produced from non-negative bounds; see [`PageWindow::from_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageWindow {
    /// Number of leading items to skip
    pub offset: Option<u64>,

    /// Maximum number of items to return
    pub limit: Option<u64>,
}

impl PageWindow {
    /// Window that returns everything
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Resolve caller supplied bounds.
    ///
    /// Returns `None` when either bound is negative, meaning the listing is
    /// empty.
    pub fn from_bounds(offset: Option<i64>, limit: Option<i64>) -> Option<Self> {
        let offset = match offset {
            Some(o) if o < 0 => return None,
            Some(o) => Some(o as u64),
            None => None,
        };
        let limit = match limit {
            Some(l) if l < 0 => return None,
            Some(l) => Some(l as u64),
            None => None,
        };
        Some(Self { offset, limit })
    }

    /// Apply the window to an already ordered iterator
    pub fn apply<I, T>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let skipped = items
            .into_iter()
            .skip(self.offset.unwrap_or(0).min(usize::MAX as u64) as usize);
        match self.limit {
            Some(limit) => skipped.take(limit.min(usize::MAX as u64) as usize).collect(),
            None => skipped.collect(),
        }
    }

    /// Offset for SQL `LIMIT ? OFFSET ?` clauses
    pub fn sql_offset(&self) -> i64 {
        self.offset.map(clamp_i64).unwrap_or(0)
    }

    /// Limit for SQL `LIMIT ? OFFSET ?` clauses.
    ///
    /// MySQL has no "no limit" keyword, so an unbounded window uses the
    /// largest signed value.
    pub fn sql_limit(&self) -> i64 {
        self.limit.map(clamp_i64).unwrap_or(i64::MAX)
    }
}

fn clamp_i64(value: u64) -> i64 {
    value.min(i64::MAX as u64) as i64
}
