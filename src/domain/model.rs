use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One retained row of the notice board, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeRecord {
    pub title: String,
    pub category: String,
    /// Always absolute.
    pub url: String,
    /// `YYYY-MM-DD` as shown on the board, or empty.
    pub posted_at: String,
    /// Detail-page text, or a failure placeholder once enrichment ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl NoticeRecord {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
        posted_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            url: url.into(),
            posted_at: posted_at.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Why rows were left out of a listing scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub header: usize,
    pub no_link: usize,
    pub no_cells: usize,
    pub no_category: usize,
    pub unresolved_link: usize,
    pub rejected_category: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.header
            + self.no_link
            + self.no_cells
            + self.no_category
            + self.unresolved_link
            + self.rejected_category
    }
}

/// Result of parsing one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingScan {
    pub records: Vec<NoticeRecord>,
    /// The row selector that produced matches, if any did.
    pub matched_selector: Option<String>,
    pub rejected_categories: BTreeSet<String>,
    pub skipped: SkipCounts,
}

impl ListingScan {
    /// The whole scan as one pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
    pub notice_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}
