//! Integration tests for the pagination and enrichment cycles
//!
//! Each test drives a pager through full fetch cycles against the mock
//! transport and checks the visible collection, the cursor, and the
//! recorded errors afterwards.

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tzkt_explorer::api::ApiService;
use tzkt_explorer::blocks::{BlockPager, COUNT_UNAVAILABLE};
use tzkt_explorer::config::ApiConfig;
use tzkt_explorer::error::ExplorerError;
use tzkt_explorer::mock::MockTransport;
use tzkt_explorer::model::{Account, Block, Transaction};
use tzkt_explorer::transactions::TransactionPager;

const BASE: &str = "https://api.tzkt.io";

/// Helper to build a block as the feed would deliver it
fn feed_block(level: i64) -> Block {
    Block {
        level,
        timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 9, 4, 31).unwrap(),
        proposer: Account {
            alias: Some("Test Baker".to_string()),
            address: format!("tz1proposer{}", level),
        },
        transaction_count: None,
    }
}

/// Helper to build a transaction as the feed would deliver it
fn feed_tx(id: i64) -> Transaction {
    Transaction {
        id,
        sender: Account {
            alias: None,
            address: format!("tz1sender{}", id),
        },
        receiver: Account {
            alias: None,
            address: format!("tz1target{}", id),
        },
        amount: 1_000_000,
        status: "applied".to_string(),
    }
}

fn test_api(mock: Arc<MockTransport>) -> ApiService {
    let config = ApiConfig {
        base_url: BASE.to_string(),
        ..ApiConfig::default()
    };
    ApiService::new(config, mock)
}

fn blocks_url(offset: usize) -> String {
    format!("{}/v1/blocks?sort.desc=level&offset={}&limit=10", BASE, offset)
}

fn count_url(level: i64) -> String {
    format!("{}/v1/operations/transactions/count?level={}", BASE, level)
}

fn tx_url(level: i64, offset: usize) -> String {
    format!(
        "{}/v1/operations/transactions?level={}&offset={}&limit=10",
        BASE, level, offset
    )
}

// Scenario A: fresh list, one full page, no overlap.
#[tokio::test]
async fn test_fresh_block_page_commits_fully_enriched() {
    let mock = Arc::new(MockTransport::new());
    let page: Vec<Block> = (0..5).map(|i| feed_block(500 - i)).collect();
    mock.stub_json(&blocks_url(0), &page);
    for block in &page {
        mock.stub(&count_url(block.level), block.level.to_string());
    }

    let mut pager = BlockPager::new(test_api(mock.clone()));
    let appended = pager.fetch_more().await.expect("cycle should succeed");

    assert_eq!(appended, 5);
    assert_eq!(pager.stats().duplicates_skipped, 0);
    assert_eq!(pager.cursor().offset, 10);

    // Every visible block carries a defined count.
    for block in pager.blocks() {
        assert_eq!(block.transaction_count, Some(block.level));
    }
}

// Scenario B: the dataset grew between polls and the next page
// re-delivers a record already held.
#[tokio::test]
async fn test_overlapping_page_skips_duplicates_and_adjusts_offset() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_json(&blocks_url(0), &vec![feed_block(5)]);
    mock.stub_json(&blocks_url(10), &vec![feed_block(5), feed_block(4)]);
    mock.stub(&count_url(5), "2");
    mock.stub(&count_url(4), "8");

    let mut pager = BlockPager::new(test_api(mock.clone()));
    pager.fetch_more().await.expect("first cycle should succeed");
    let offset_before = pager.cursor().offset;

    let appended = pager.fetch_more().await.expect("second cycle should succeed");

    assert_eq!(appended, 1);
    let levels: Vec<i64> = pager.blocks().iter().map(|b| b.level).collect();
    assert_eq!(levels, vec![5, 4]);
    // One duplicate skipped, then one page consumed.
    assert_eq!(pager.cursor().offset, offset_before + 1 + 10);
    // No identity key appears twice.
    let mut seen = levels.clone();
    seen.dedup();
    assert_eq!(seen, levels);
}

// Scenario C: one enrichment lookup fails; the batch still commits with
// the sentinel in the failing slot.
#[tokio::test]
async fn test_enrichment_failure_is_non_fatal() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_json(&blocks_url(0), &vec![feed_block(5), feed_block(4)]);
    mock.stub(&count_url(5), "3");
    mock.stub_error(
        &count_url(4),
        ExplorerError::Transport("connection reset by peer".to_string()),
    );

    let mut pager = BlockPager::new(test_api(mock.clone()));
    let appended = pager.fetch_more().await.expect("cycle should still succeed");

    assert_eq!(appended, 2);
    assert_eq!(pager.blocks()[0].transaction_count, Some(3));
    assert_eq!(pager.blocks()[1].transaction_count, Some(COUNT_UNAVAILABLE));
    assert!(pager.last_error().is_some());
    assert_eq!(pager.cursor().offset, 10);
}

// Scenario D: the page fetch itself fails; nothing moves.
#[tokio::test]
async fn test_page_fetch_failure_aborts_cycle_only() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_error(
        &blocks_url(0),
        ExplorerError::Transport("dns failure".to_string()),
    );

    let mut pager = BlockPager::new(test_api(mock.clone()));
    let result = pager.fetch_more().await;

    assert!(matches!(result, Err(ExplorerError::Transport(_))));
    assert!(pager.blocks().is_empty());
    assert_eq!(pager.cursor().offset, 0);
    assert!(pager.last_error().is_some());

    // A later trigger retries from the same offset.
    mock.stub_json(&blocks_url(0), &vec![feed_block(9)]);
    mock.stub(&count_url(9), "1");
    let appended = pager.fetch_more().await.expect("retry should succeed");
    assert_eq!(appended, 1);
}

// Scenario E: reset mid-session, then refetch from the beginning.
#[tokio::test]
async fn test_reset_clears_list_and_rewinds_offset() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_json(&tx_url(123, 0), &vec![feed_tx(1), feed_tx(2)]);

    let mut pager = TransactionPager::new(test_api(mock.clone()), 123);
    pager.fetch_more().await.expect("first cycle should succeed");
    assert_eq!(pager.transactions().len(), 2);
    assert_eq!(pager.cursor().offset, 10);

    pager.reset();
    assert!(pager.transactions().is_empty());
    assert_eq!(pager.cursor().offset, 0);

    // The next trigger fetches from the beginning again.
    mock.stub_json(&tx_url(123, 0), &vec![feed_tx(3), feed_tx(1)]);
    let appended = pager.fetch_more().await.expect("refetch should succeed");
    assert_eq!(appended, 2);
    let ids: Vec<i64> = pager.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

// Order preservation: the committed batch keeps the raw page order even
// though the count lookups complete in arbitrary order.
#[tokio::test]
async fn test_committed_order_matches_page_order() {
    let mock = Arc::new(MockTransport::new());
    let page: Vec<Block> = (0..10).map(|i| feed_block(1000 - i)).collect();
    mock.stub_json(&blocks_url(0), &page);
    for block in &page {
        mock.stub(&count_url(block.level), "0");
    }

    let mut pager = BlockPager::new(test_api(mock.clone()));
    pager.fetch_more().await.expect("cycle should succeed");

    let levels: Vec<i64> = pager.blocks().iter().map(|b| b.level).collect();
    let expected: Vec<i64> = (0..10).map(|i| 1000 - i).collect();
    assert_eq!(levels, expected);
}

// The enrichment step issues exactly one count lookup per new block and
// none for duplicates.
#[tokio::test]
async fn test_enrichment_fans_out_once_per_new_block() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_json(&blocks_url(0), &vec![feed_block(7), feed_block(6)]);
    mock.stub_json(&blocks_url(10), &vec![feed_block(6), feed_block(5)]);
    for level in [7, 6, 5] {
        mock.stub(&count_url(level), "1");
    }

    let mut pager = BlockPager::new(test_api(mock.clone()));
    pager.fetch_more().await.expect("first cycle should succeed");
    pager.fetch_more().await.expect("second cycle should succeed");

    let count_requests: Vec<String> = mock
        .requests()
        .into_iter()
        .filter(|url| url.contains("/count?"))
        .collect();
    assert_eq!(count_requests.len(), 3);
    // Level 6 was only enriched once, in the cycle that first saw it.
    assert_eq!(
        count_requests
            .iter()
            .filter(|url| url.ends_with("level=6"))
            .count(),
        1
    );
}

// Offset monotonicity across a run of mixed cycles.
#[tokio::test]
async fn test_offset_never_decreases_across_cycles() {
    let mock = Arc::new(MockTransport::new());
    mock.stub_json(&blocks_url(0), &vec![feed_block(3)]);
    mock.stub(&count_url(3), "0");
    mock.stub_json(&blocks_url(10), &vec![feed_block(3), feed_block(2)]);
    mock.stub(&count_url(2), "0");
    mock.stub_error(
        &blocks_url(21),
        ExplorerError::Transport("flaky".to_string()),
    );

    let mut pager = BlockPager::new(test_api(mock.clone()));
    let mut previous = pager.cursor().offset;

    for _ in 0..3 {
        let _ = pager.fetch_more().await;
        assert!(pager.cursor().offset >= previous);
        previous = pager.cursor().offset;
    }
}
