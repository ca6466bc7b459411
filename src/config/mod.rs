#[cfg(feature = "cli")]
pub mod cli;
pub mod mail;
pub mod toml_config;

use crate::utils::error::{DigestError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_positive_number,
    validate_range, validate_url, Validate,
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use scraper::Selector;
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str =
    "https://janghak.khu.ac.kr/janghak/user/bbs/BMSR00040/list.do";
pub const DEFAULT_MENU_NO: &str = "12300032";
pub const PLACEHOLDER_CATEGORY: &str = "공지";

/// CSS selectors tried in order; the first one that matches wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub rows: Vec<String>,
    pub category: Vec<String>,
    pub content: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            rows: strings(&["tbody#boardList tr", "table tbody tr", "tr"]),
            category: strings(&[".bbs_cate", ".board_cate", ".category"]),
            content: strings(&[
                ".bbs_cont",
                ".view_cnt",
                ".board_view",
                ".bd_content",
                ".contents",
            ]),
        }
    }
}

/// Settings for one digest run. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestConfig {
    pub listing_url: String,
    pub category_prefixes: Vec<String>,
    pub placeholder_category: String,
    pub default_menu_no: String,
    pub request_timeout: Duration,
    pub user_agent: String,
    /// Days before today still considered recent; 4 gives a 5-day window.
    pub recency_window_days: u32,
    pub utc_offset_hours: i32,
    pub preview_chars: usize,
    pub fetch_details: bool,
    pub institution: String,
    pub board_label: String,
    pub summary_label: String,
    pub selectors: SelectorConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            category_prefixes: strings(&["공통_", "국제_"]),
            placeholder_category: PLACEHOLDER_CATEGORY.to_string(),
            default_menu_no: DEFAULT_MENU_NO.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "khu-scholarship-agent/1.0".to_string(),
            recency_window_days: 4,
            utc_offset_hours: 9,
            preview_chars: 1200,
            fetch_details: true,
            institution: "경희대".to_string(),
            board_label: "장학 공지".to_string(),
            summary_label: "장학 공지 요약".to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl DigestConfig {
    /// The board's civil-time zone. Falls back to UTC+9 for an out-of-range offset.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .or_else(|| FixedOffset::east_opt(9 * 3600))
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset())
    }

    pub fn matches_prefix(&self, category: &str) -> bool {
        self.category_prefixes
            .iter()
            .any(|prefix| category.starts_with(prefix.as_str()))
    }

    pub fn is_placeholder(&self, category: &str) -> bool {
        category == self.placeholder_category
    }
}

impl Validate for DigestConfig {
    fn validate(&self) -> Result<()> {
        validate_url("listing_url", &self.listing_url)?;
        validate_non_empty_list("category_prefixes", &self.category_prefixes)?;
        validate_non_empty_string("default_menu_no", &self.default_menu_no)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        validate_range("request_timeout", self.request_timeout.as_secs(), 1, 300)?;
        validate_range("recency_window_days", self.recency_window_days, 0, 365)?;
        validate_range("utc_offset_hours", self.utc_offset_hours, -12, 14)?;
        validate_positive_number("preview_chars", self.preview_chars, 1)?;

        validate_non_empty_list("selectors.rows", &self.selectors.rows)?;
        validate_non_empty_list("selectors.category", &self.selectors.category)?;
        validate_non_empty_list("selectors.content", &self.selectors.content)?;
        for selector in self
            .selectors
            .rows
            .iter()
            .chain(&self.selectors.category)
            .chain(&self.selectors.content)
        {
            compile_selector(selector)?;
        }

        tracing::debug!("Digest configuration validation passed");
        Ok(())
    }
}

pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DigestError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

pub fn compile_selectors(selectors: &[String]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| compile_selector(s)).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DigestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn prefix_match_is_exact_and_case_sensitive() {
        let config = DigestConfig {
            category_prefixes: vec!["Intl_".to_string()],
            ..DigestConfig::default()
        };
        assert!(config.matches_prefix("Intl_Exchange"));
        assert!(!config.matches_prefix("intl_Exchange"));
        assert!(!config.matches_prefix(" Intl_Exchange"));
    }

    #[test]
    fn broken_selector_fails_validation() {
        let mut config = DigestConfig::default();
        config.selectors.rows.push("tr[".to_string());

        match config.validate() {
            Err(DigestError::SelectorError { selector, .. }) => assert_eq!(selector, "tr["),
            other => panic!("expected selector error, got {:?}", other),
        }
    }

    #[test]
    fn empty_prefix_list_fails_validation() {
        let config = DigestConfig {
            category_prefixes: vec![],
            ..DigestConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
