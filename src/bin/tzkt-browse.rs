#![forbid(unsafe_code)]
//! Browse Tezos blocks and transactions from the terminal

use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use std::sync::Arc;
use tzkt_explorer::api::ApiService;
use tzkt_explorer::blocks::{BlockPager, COUNT_UNAVAILABLE};
use tzkt_explorer::config::load_config;
use tzkt_explorer::format::{block_datetime, short_address, tez_amount};
use tzkt_explorer::transactions::TransactionPager;
use tzkt_explorer::transport::ReqwestTransport;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of pages to fetch (each page is one look-ahead trigger)
    #[arg(long, default_value_t = 1)]
    pages: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows the latest blocks with their transaction counts
    Blocks,
    /// Shows the transactions of one block
    Transactions {
        /// The block level to list transactions for
        level: i64,
        /// Reset and refetch once before listing, as a pull-to-refresh would
        #[arg(long)]
        refresh: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = load_config()?;
    let transport = Arc::new(ReqwestTransport::new(config.api.request_timeout_secs)?);
    let api = ApiService::new(config.api, transport);

    match cli.command {
        Commands::Blocks => browse_blocks(api, cli.pages).await?,
        Commands::Transactions { level, refresh } => {
            browse_transactions(api, level, cli.pages, refresh).await?
        }
    }

    Ok(())
}

async fn browse_blocks(
    api: ApiService,
    pages: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pager = BlockPager::new(api);

    // Each iteration plays the role of the last visible row coming into
    // view: one trigger, one committed page.
    for _ in 0..pages {
        pager.fetch_more().await?;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Level")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Timestamp")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Proposed By")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Address")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Transactions")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

    for block in pager.blocks() {
        let count = match block.transaction_count {
            Some(COUNT_UNAVAILABLE) => Cell::new("unavailable").fg(TableColor::Red),
            Some(count) => Cell::new(count.to_string()),
            None => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(block.level.to_string()).fg(TableColor::Yellow),
            Cell::new(block_datetime(&block.timestamp)),
            Cell::new(block.proposer.display_name()),
            Cell::new(short_address(&block.proposer.address)),
            count,
        ]);
    }

    println!("{table}");

    let stats = pager.stats();
    println!(
        "{}",
        format!(
            "📦 {} blocks across {} pages ({} duplicates skipped)",
            stats.records_appended, stats.pages_fetched, stats.duplicates_skipped
        )
        .cyan()
    );
    if let Some(error) = pager.last_error() {
        eprintln!("{}", format!("⚠️  Last error: {}", error).yellow());
    }

    Ok(())
}

async fn browse_transactions(
    api: ApiService,
    level: i64,
    pages: usize,
    refresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pager = TransactionPager::new(api, level);

    for _ in 0..pages {
        pager.fetch_more().await?;
    }
    if refresh {
        pager.refresh().await?;
    }

    if pager.transactions().is_empty() {
        println!(
            "{}",
            format!("📭 No transactions in block {}", level).yellow()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Sender")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Receiver")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Amount")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("Status")
                .fg(TableColor::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

    for tx in pager.transactions() {
        let status = match tx.status.as_str() {
            "applied" => Cell::new(&tx.status).fg(TableColor::Green),
            _ => Cell::new(&tx.status).fg(TableColor::Red),
        };
        table.add_row(vec![
            Cell::new(tx.id.to_string()),
            Cell::new(format!(
                "{} ({})",
                tx.sender.display_name(),
                short_address(&tx.sender.address)
            )),
            Cell::new(format!(
                "{} ({})",
                tx.receiver.display_name(),
                short_address(&tx.receiver.address)
            )),
            Cell::new(tez_amount(tx.amount)),
            status,
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        format!(
            "💸 {} transactions in block {}",
            pager.transactions().len(),
            level
        )
        .cyan()
    );

    Ok(())
}
