//! Data model for the TzKT explorer feeds
//!
//! Records mirror the wire shapes of the `/v1/blocks` and
//! `/v1/operations/transactions` endpoints. Equality is identity-based:
//! two blocks with the same level are the same entity even when their
//! auxiliary fields differ (the server record has no transaction count,
//! the stored record does).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Tezos account as embedded in blocks and transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub alias: Option<String>,
    pub address: String,
}

impl Account {
    /// Display name for the account, falling back to "Unknown" when the
    /// account carries no alias.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or("Unknown")
    }
}

/// One block from the `/v1/blocks` feed.
///
/// `transaction_count` is never present on the wire; the enrichment step
/// fills it in (with `-1` standing for a failed count lookup) before the
/// block is appended to a visible collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub level: i64,
    pub timestamp: DateTime<Utc>,
    pub proposer: Account,
    #[serde(rename = "transactionCount", default)]
    pub transaction_count: Option<i64>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
    }
}

impl Eq for Block {}

/// One transaction from the `/v1/operations/transactions` feed.
///
/// The wire names the receiving side `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub sender: Account,
    #[serde(rename = "target")]
    pub receiver: Account,
    pub amount: i64,
    pub status: String,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}
