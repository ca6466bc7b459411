use crate::config::{DigestConfig, SelectorConfig};
use crate::utils::error::{DigestError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Optional overrides read from a TOML file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub listing: Option<ListingSection>,
    pub http: Option<HttpSection>,
    pub digest: Option<DigestSection>,
    pub selectors: Option<SelectorSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingSection {
    pub url: Option<String>,
    pub category_prefixes: Option<Vec<String>>,
    pub placeholder_category: Option<String>,
    pub default_menu_no: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestSection {
    pub recency_window_days: Option<u32>,
    pub utc_offset_hours: Option<i32>,
    pub preview_chars: Option<usize>,
    pub fetch_details: Option<bool>,
    pub institution: Option<String>,
    pub board_label: Option<String>,
    pub summary_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorSection {
    pub rows: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub content: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DigestError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DigestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are an error.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DigestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(DigestError::ConfigValidationError {
                field: "environment".to_string(),
                message: format!("Unset variables referenced: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }

    /// Layers the file's values over `base`.
    pub fn apply_to(&self, base: DigestConfig) -> DigestConfig {
        let mut config = base;

        if let Some(listing) = &self.listing {
            override_with(&mut config.listing_url, &listing.url);
            override_with(&mut config.category_prefixes, &listing.category_prefixes);
            override_with(&mut config.placeholder_category, &listing.placeholder_category);
            override_with(&mut config.default_menu_no, &listing.default_menu_no);
        }

        if let Some(http) = &self.http {
            if let Some(secs) = http.timeout_seconds {
                config.request_timeout = Duration::from_secs(secs);
            }
            override_with(&mut config.user_agent, &http.user_agent);
        }

        if let Some(digest) = &self.digest {
            override_with(&mut config.recency_window_days, &digest.recency_window_days);
            override_with(&mut config.utc_offset_hours, &digest.utc_offset_hours);
            override_with(&mut config.preview_chars, &digest.preview_chars);
            override_with(&mut config.fetch_details, &digest.fetch_details);
            override_with(&mut config.institution, &digest.institution);
            override_with(&mut config.board_label, &digest.board_label);
            override_with(&mut config.summary_label, &digest.summary_label);
        }

        if let Some(selectors) = &self.selectors {
            let SelectorConfig {
                rows,
                category,
                content,
            } = &mut config.selectors;
            override_with(rows, &selectors.rows);
            override_with(category, &selectors.category);
            override_with(content, &selectors.content);
        }

        config
    }

    pub fn into_digest_config(self) -> DigestConfig {
        self.apply_to(DigestConfig::default())
    }
}

fn override_with<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
