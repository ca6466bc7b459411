use crate::domain::model::{Digest, NoticeRecord, OutgoingMail};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key/value lookup for settings that live outside `DigestConfig` (mail credentials).
pub trait SettingsSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}

#[async_trait]
pub trait DigestPipeline: Send + Sync {
    /// Listing fetch, category filter and recency window.
    async fn extract(&self) -> Result<Vec<NoticeRecord>>;
    /// Detail enrichment and formatting.
    async fn transform(&self, records: Vec<NoticeRecord>) -> Result<Digest>;
    async fn load(&self, digest: &Digest) -> Result<()>;
}
