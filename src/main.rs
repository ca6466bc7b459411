use clap::Parser;
use scholarship_digest::utils::logger;
use scholarship_digest::{CliConfig, DigestEngine, EnvSettings, NoticePipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let cli = CliConfig::parse();
    logger::init_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting scholarship-digest");
    tracing::debug!("CLI args: {:?}", cli);

    let config = match cli.build_digest_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Board: {} | prefixes: {} | window: {} days",
        config.listing_url,
        config.category_prefixes.join(", "),
        config.recency_window_days + 1
    );

    let pipeline = NoticePipeline::new(config, EnvSettings)?;
    let engine = DigestEngine::new(pipeline);

    let outcome = if cli.dry_run {
        tracing::info!("🔍 DRY RUN - the digest is printed, not sent");
        engine.preview().await.map(|digest| {
            println!("Subject: {}\n", digest.subject);
            println!("{}", digest.body);
        })
    } else {
        engine.run().await.map(|summary| {
            println!(
                "✅ Digest sent: {} ({} notices)",
                summary.subject, summary.notice_count
            );
        })
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Digest run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}
