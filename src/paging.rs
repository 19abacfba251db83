//! Pagination primitives: duplicate filtering and offset tracking
//!
//! The upstream feeds are sorted by a key that keeps moving while the
//! client pages through them (new blocks arrive between polls), so a
//! later page can re-deliver records an earlier page already produced.
//! Overlap is detected by identity key, never by structural equality,
//! and the cursor compensates for it in two separate steps around the
//! commit.

use std::collections::HashSet;
use std::hash::Hash;

/// Partition an incoming page against an already-held collection.
///
/// Returns the items whose key is not yet present, in their received
/// order, together with the number of items that were dropped as
/// duplicates.
pub fn dedup_by_key<T, K, F>(incoming: Vec<T>, existing: &[T], key: F) -> (Vec<T>, usize)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let held: HashSet<K> = existing.iter().map(&key).collect();

    let total = incoming.len();
    let new_items: Vec<T> = incoming
        .into_iter()
        .filter(|item| !held.contains(&key(item)))
        .collect();
    let duplicate_count = total - new_items.len();

    (new_items, duplicate_count)
}

/// Phase of one list's fetch cycle.
///
/// A new trigger is accepted only in `Idle`; the other phases act as a
/// busy flag against overlapping cycles. `Enriching` is entered by the
/// block list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Idle,
    Fetching,
    Enriching,
    Committing,
}

/// Counters accumulated across a pager's lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagerStats {
    pub pages_fetched: u64,
    pub duplicates_skipped: u64,
    pub records_appended: u64,
    pub enrichment_failures: u64,
}

/// Per-list pagination cursor.
///
/// `offset` tracks how many upstream records have been consumed, which is
/// not the number of records kept once duplicates are skipped. It only
/// ever grows, except through an explicit [`Cursor::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub limit: usize,
}

impl Cursor {
    pub fn new(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Step 1 of the advance: skip exactly the overlap reported by the
    /// deduplicator, so the next raw fetch does not re-request records
    /// already consumed.
    pub fn skip_duplicates(&mut self, duplicate_count: usize) {
        self.offset += duplicate_count;
    }

    /// Step 2 of the advance, applied only after a batch is committed:
    /// move past the page that was just consumed.
    pub fn advance_page(&mut self) {
        self.offset += self.limit;
    }

    /// Rewind to the beginning of the feed (refresh / parent switch).
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
