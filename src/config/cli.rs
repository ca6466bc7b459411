use crate::config::toml_config::TomlConfig;
use crate::config::DigestConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scholarship-digest")]
#[command(about = "Mails a digest of recent scholarship notices from the university board")]
pub struct CliConfig {
    /// Optional TOML file layered over the built-in defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board listing page
    #[arg(long, env = "SCHOLARSHIP_URL")]
    pub listing_url: Option<String>,

    /// Category prefixes to keep, comma separated
    #[arg(long, value_delimiter = ',')]
    pub prefixes: Vec<String>,

    /// Days before today still included in the digest
    #[arg(long)]
    pub window_days: Option<u32>,

    /// Skip fetching detail pages
    #[arg(long)]
    pub no_details: bool,

    /// Print the digest instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then flags. The result is validated.
    pub fn build_digest_config(&self) -> Result<DigestConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?.into_digest_config()
            }
            None => DigestConfig::default(),
        };

        if let Some(url) = &self.listing_url {
            config.listing_url = url.clone();
        }
        if !self.prefixes.is_empty() {
            config.category_prefixes = self.prefixes.clone();
        }
        if let Some(days) = self.window_days {
            config.recency_window_days = days;
        }
        if self.no_details {
            config.fetch_details = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn flags_override_file_and_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[listing]
url = "https://file.example.com/list.do"
category_prefixes = ["from_file_"]

[digest]
preview_chars = 300
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "scholarship-digest",
            "--config",
            file.path().to_str().unwrap(),
            "--listing-url",
            "https://flag.example.com/list.do",
            "--window-days",
            "2",
            "--no-details",
        ]);

        let config = cli.build_digest_config().unwrap();
        assert_eq!(config.listing_url, "https://flag.example.com/list.do");
        assert_eq!(config.category_prefixes, vec!["from_file_".to_string()]);
        assert_eq!(config.recency_window_days, 2);
        assert_eq!(config.preview_chars, 300);
        assert!(!config.fetch_details);
    }

    #[test]
    fn prefixes_flag_splits_on_commas() {
        let cli = CliConfig::parse_from(["scholarship-digest", "--prefixes", "공통_,교외_"]);
        let config = cli.build_digest_config().unwrap();
        assert_eq!(config.category_prefixes, vec!["공통_", "교외_"]);
    }

    #[test]
    fn invalid_flag_value_is_rejected() {
        let cli = CliConfig::parse_from(["scholarship-digest", "--listing-url", "ftp://board"]);
        assert!(cli.build_digest_config().is_err());
    }
}
