use crate::config::DigestConfig;
use crate::core::digest::DigestFormatter;
use crate::core::extractor::NoticeExtractor;
use crate::core::notifier::Notifier;
use crate::core::recency::{today_in, RecencyWindow};
use crate::domain::model::{Digest, NoticeRecord};
use crate::domain::ports::{DigestPipeline, SettingsSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Board listing → recent notices → digest mail.
pub struct NoticePipeline<S: SettingsSource> {
    config: Arc<DigestConfig>,
    extractor: NoticeExtractor,
    formatter: DigestFormatter,
    notifier: Notifier<S>,
}

impl<S: SettingsSource> NoticePipeline<S> {
    pub fn new(config: Arc<DigestConfig>, mail_settings: S) -> Result<Self> {
        Ok(Self {
            extractor: NoticeExtractor::new(config.clone())?,
            formatter: DigestFormatter::new(config.clone()),
            notifier: Notifier::new(mail_settings, config.request_timeout),
            config,
        })
    }
}

#[async_trait]
impl<S: SettingsSource> DigestPipeline for NoticePipeline<S> {
    async fn extract(&self) -> Result<Vec<NoticeRecord>> {
        let records = self.extractor.fetch_list().await?;

        let today = today_in(self.config.offset(), Utc::now());
        let window = RecencyWindow::new(self.config.recency_window_days);
        let total = records.len();
        let recent = window.retain(records, today);
        tracing::info!(
            "{} of {} notices posted on or after {}",
            recent.len(),
            total,
            window.cutoff(today)
        );

        Ok(recent)
    }

    async fn transform(&self, records: Vec<NoticeRecord>) -> Result<Digest> {
        let mut enriched = Vec::with_capacity(records.len());
        for mut record in records {
            if self.config.fetch_details {
                record.detail = Some(self.extractor.fetch_detail(&record.url).await);
            }
            enriched.push(record);
        }

        Ok(self.formatter.build(&enriched, self.config.now()))
    }

    async fn load(&self, digest: &Digest) -> Result<()> {
        self.notifier.dispatch(&digest.body, &digest.subject).await
    }
}
