use crate::config::DigestConfig;
use crate::core::detail::DetailParser;
use crate::core::listing::ListingParser;
use crate::domain::model::{ListingScan, NoticeRecord};
use crate::utils::error::{DigestError, Result};
use reqwest::Client;
use std::sync::Arc;

/// Stored in place of the detail text when a detail page can't be loaded.
pub const DETAIL_FAILURE_PREFIX: &str = "내용을 가져오지 못했습니다: ";

/// Fetches the board listing and detail pages.
pub struct NoticeExtractor {
    config: Arc<DigestConfig>,
    client: Client,
    listing: ListingParser,
    detail: DetailParser,
}

impl NoticeExtractor {
    pub fn new(config: Arc<DigestConfig>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(DigestError::ClientError)?;

        Ok(Self {
            listing: ListingParser::new(config.clone())?,
            detail: DetailParser::new(&config)?,
            client,
            config,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| DigestError::FetchError {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(DigestError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| DigestError::FetchError {
            url: url.to_string(),
            source,
        })
    }

    /// Listing records plus skip diagnostics.
    pub async fn scan_list(&self) -> Result<ListingScan> {
        let html = self.fetch_page(&self.config.listing_url).await?;
        let scan = self.listing.scan(&html);

        tracing::info!(
            "Listing parsed: {} kept, {} skipped (selector: {})",
            scan.records.len(),
            scan.skipped.total(),
            scan.matched_selector.as_deref().unwrap_or("none")
        );
        if !scan.rejected_categories.is_empty() {
            tracing::debug!(
                "Categories outside {:?}: {}",
                self.config.category_prefixes,
                scan.rejected_categories
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        tracing::debug!("Skipped rows: {:?}", scan.skipped);

        Ok(scan)
    }

    pub async fn fetch_list(&self) -> Result<Vec<NoticeRecord>> {
        Ok(self.scan_list().await?.records)
    }

    pub async fn try_fetch_detail(&self, url: &str) -> Result<String> {
        let html = self.fetch_page(url).await?;
        Ok(self.detail.extract_text(&html))
    }

    /// Never fails; a fetch error becomes placeholder text.
    pub async fn fetch_detail(&self, url: &str) -> String {
        match self.try_fetch_detail(url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Detail fetch failed for {}: {}", url, e);
                format!("{}{}", DETAIL_FAILURE_PREFIX, e)
            }
        }
    }
}
