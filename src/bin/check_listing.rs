//! Local smoke check: fetch the board, show what would be mailed, send nothing.

use anyhow::Context;
use clap::Parser;
use scholarship_digest::core::digest::preview;
use scholarship_digest::utils::logger;
use scholarship_digest::{CliConfig, NoticeExtractor};
use std::sync::Arc;

const SAMPLE_SIZE: usize = 3;
const PREVIEW_CHARS: usize = 400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose, cli.log_json);

    let config = Arc::new(
        cli.build_digest_config()
            .context("invalid configuration")?,
    );
    let extractor = NoticeExtractor::new(config.clone())?;

    eprintln!(
        "[{}] Fetching {}",
        config.now().format("%Y-%m-%d %H:%M:%S"),
        config.listing_url
    );
    let scan = extractor
        .scan_list()
        .await
        .context("listing fetch failed")?;

    if cli.log_json {
        println!("{}", scan.to_json_pretty()?);
        return Ok(());
    }

    println!("Matching notices: {}", scan.records.len());
    println!(
        "Row selector: {}",
        scan.matched_selector.as_deref().unwrap_or("(none matched)")
    );
    if !scan.rejected_categories.is_empty() {
        let rejected: Vec<&str> = scan.rejected_categories.iter().map(String::as_str).collect();
        println!("Other categories: {}", rejected.join(", "));
    }

    for (idx, record) in scan.records.iter().take(SAMPLE_SIZE).enumerate() {
        println!("\n[{}] {} - {}", idx + 1, record.category, record.title);
        println!("URL: {}", record.url);
        match extractor.try_fetch_detail(&record.url).await {
            Ok(text) => {
                println!("Preview:");
                println!("{}", preview(&text, PREVIEW_CHARS));
            }
            Err(e) => println!("Detail fetch failed: {}", e),
        }
    }

    Ok(())
}
