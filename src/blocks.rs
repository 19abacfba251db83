//! Block list pagination with transaction-count enrichment
//!
//! One `fetch_more` call runs a complete cycle: fetch a page of the
//! block feed, drop the overlap with the rows already held, fan out one
//! count lookup per surviving block, join them all, then append the
//! enriched batch in a single step. The visible rows and the cursor are
//! owned exclusively by the pager; a failed page fetch leaves both
//! untouched.

use crate::api::ApiService;
use crate::error::{ExplorerError, Result};
use crate::model::Block;
use crate::paging::{dedup_by_key, Cursor, PagerState, PagerStats};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Sentinel count for a block whose enrichment lookup failed.
pub const COUNT_UNAVAILABLE: i64 = -1;

/// Incrementally fetches the newest-first block feed.
pub struct BlockPager {
    api: ApiService,
    blocks: Vec<Block>,
    cursor: Cursor,
    state: PagerState,
    stats: PagerStats,
    last_error: Option<ExplorerError>,
}

impl BlockPager {
    pub fn new(api: ApiService) -> Self {
        let limit = api.config().page_limit;
        Self {
            api,
            blocks: Vec::new(),
            cursor: Cursor::new(limit),
            state: PagerState::Idle,
            stats: PagerStats::default(),
            last_error: None,
        }
    }

    /// Rows available for rendering. Every row has a defined
    /// transaction count.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
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

    /// Most recent failure observed by this list, including non-fatal
    /// enrichment failures.
    pub fn last_error(&self) -> Option<&ExplorerError> {
        self.last_error.as_ref()
    }

    /// Run one fetch cycle and return the number of rows appended.
    ///
    /// A trigger arriving while a cycle is already in flight is ignored.
    /// A page-fetch failure aborts the cycle with rows and cursor
    /// unchanged; the error is recorded and returned.
    pub async fn fetch_more(&mut self) -> Result<usize> {
        if self.state != PagerState::Idle {
            debug!("block fetch trigger ignored, cycle in flight");
            return Ok(0);
        }

        self.state = PagerState::Fetching;
        let page = match self
            .api
            .fetch_blocks(self.cursor.offset, self.cursor.limit)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch block page at offset {}: {}", self.cursor.offset, e);
                self.last_error = Some(e.clone());
                self.state = PagerState::Idle;
                return Err(e);
            }
        };
        self.stats.pages_fetched += 1;

        let (new_blocks, duplicates) = dedup_by_key(page, &self.blocks, |b| b.level);
        self.cursor.skip_duplicates(duplicates);
        self.stats.duplicates_skipped += duplicates as u64;

        self.state = PagerState::Enriching;
        let enriched = self.enrich(new_blocks).await;

        self.state = PagerState::Committing;
        let appended = enriched.len();
        self.blocks.extend(enriched);
        self.cursor.advance_page();
        self.stats.records_appended += appended as u64;
        info!(
            "Committed {} new blocks ({} visible, offset now {})",
            appended,
            self.blocks.len(),
            self.cursor.offset
        );

        self.state = PagerState::Idle;
        Ok(appended)
    }

    /// Fan out one count lookup per block and join them all before
    /// returning. Results land in the slot of the block that requested
    /// them, so completion order cannot reorder the batch. A failed
    /// lookup degrades that block to [`COUNT_UNAVAILABLE`] instead of
    /// aborting the batch.
    async fn enrich(&mut self, mut new_blocks: Vec<Block>) -> Vec<Block> {
        let lookups = new_blocks
            .iter()
            .map(|block| self.api.fetch_transaction_count(block.level));
        let counts = join_all(lookups).await;

        for (block, count) in new_blocks.iter_mut().zip(counts) {
            match count {
                Ok(count) => block.transaction_count = Some(count),
                Err(e) => {
                    warn!(
                        "Failed to fetch transaction count for level {}: {}",
                        block.level, e
                    );
                    block.transaction_count = Some(COUNT_UNAVAILABLE);
                    self.stats.enrichment_failures += 1;
                    self.last_error = Some(e);
                }
            }
        }

        new_blocks
    }
}
