//! Transaction list pagination for one block
//!
//! Same fetch/dedup/offset machinery as the block list, minus the
//! enrichment stage: survivors of the duplicate filter are appended
//! directly and the cursor advances past the page right after the
//! append. A pager is bound to a single block level; switching blocks
//! means a reset (or a fresh pager).

use crate::api::ApiService;
use crate::error::{ExplorerError, Result};
use crate::model::Transaction;
use crate::paging::{dedup_by_key, Cursor, PagerState, PagerStats};
use tracing::{debug, info, warn};

/// Incrementally fetches the transaction feed of one block.
pub struct TransactionPager {
    api: ApiService,
    level: i64,
    transactions: Vec<Transaction>,
    cursor: Cursor,
    state: PagerState,
    stats: PagerStats,
    last_error: Option<ExplorerError>,
}

impl TransactionPager {
    pub fn new(api: ApiService, level: i64) -> Self {
        let limit = api.config().page_limit;
        Self {
            api,
            level,
            transactions: Vec::new(),
            cursor: Cursor::new(limit),
            state: PagerState::Idle,
            stats: PagerStats::default(),
            last_error: None,
        }
    }

    /// Block level this list is bound to.
    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn stats(&self) -> PagerStats {
        self.stats
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn last_error(&self) -> Option<&ExplorerError> {
        self.last_error.as_ref()
    }

    /// Run one fetch cycle and return the number of rows appended.
    pub async fn fetch_more(&mut self) -> Result<usize> {
        if self.state != PagerState::Idle {
            debug!("transaction fetch trigger ignored, cycle in flight");
            return Ok(0);
        }

        self.state = PagerState::Fetching;
        let page = match self
            .api
            .fetch_transactions(self.level, self.cursor.offset, self.cursor.limit)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(
                    "Failed to fetch transactions for level {} at offset {}: {}",
                    self.level, self.cursor.offset, e
                );
                self.last_error = Some(e.clone());
                self.state = PagerState::Idle;
                return Err(e);
            }
        };
        self.stats.pages_fetched += 1;

        let (new_transactions, duplicates) =
            dedup_by_key(page, &self.transactions, |tx| tx.id);
        self.cursor.skip_duplicates(duplicates);
        self.stats.duplicates_skipped += duplicates as u64;

        self.state = PagerState::Committing;
        let appended = new_transactions.len();
        self.transactions.extend(new_transactions);
        self.cursor.advance_page();
        self.stats.records_appended += appended as u64;
        info!(
            "Committed {} new transactions for level {} ({} visible, offset now {})",
            appended,
            self.level,
            self.transactions.len(),
            self.cursor.offset
        );

        self.state = PagerState::Idle;
        Ok(appended)
    }

    /// Forget everything held and rewind to the start of the feed. Used
    /// before re-fetching for a different parent block or on an explicit
    /// refresh.
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.cursor.reset();
    }

    /// Reset, then run one normal fetch cycle from the empty state.
    pub async fn refresh(&mut self) -> Result<usize> {
        self.reset();
        self.fetch_more().await
    }
}
