use crate::domain::model::Digest;
use crate::domain::ports::DigestPipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub notice_count: usize,
    pub subject: String,
}

pub struct DigestEngine<P: DigestPipeline> {
    pipeline: P,
}

impl<P: DigestPipeline> DigestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and transform only; nothing is sent.
    pub async fn preview(&self) -> Result<Digest> {
        tracing::info!("Fetching notice listing...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} notices", records.len());

        tracing::info!("Building digest...");
        let digest = self.pipeline.transform(records).await?;
        tracing::info!("Digest ready: {} notices", digest.notice_count);

        Ok(digest)
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let digest = self.preview().await?;

        tracing::info!("Sending digest...");
        self.pipeline.load(&digest).await?;
        tracing::info!("Digest sent: {}", digest.subject);

        Ok(RunSummary {
            notice_count: digest.notice_count,
            subject: digest.subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NoticeRecord;
    use crate::utils::error::DigestError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedPipeline {
        fail_load: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl DigestPipeline for ScriptedPipeline {
        async fn extract(&self) -> Result<Vec<NoticeRecord>> {
            self.calls.lock().unwrap().push("extract");
            Ok(vec![NoticeRecord::new(
                "t",
                "공통_x",
                "https://example.com/1",
                "",
            )])
        }

        async fn transform(&self, records: Vec<NoticeRecord>) -> Result<Digest> {
            self.calls.lock().unwrap().push("transform");
            Ok(Digest {
                subject: "subject".to_string(),
                body: "body".to_string(),
                notice_count: records.len(),
            })
        }

        async fn load(&self, _digest: &Digest) -> Result<()> {
            self.calls.lock().unwrap().push("load");
            if self.fail_load {
                return Err(DigestError::MissingMailSettings {
                    keys: vec!["EMAIL_HOST".to_string()],
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn run_executes_stages_in_order() {
        let engine = DigestEngine::new(ScriptedPipeline::default());

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.notice_count, 1);
        assert_eq!(summary.subject, "subject");
        assert_eq!(
            *engine.pipeline().calls.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[tokio::test]
    async fn preview_never_loads() {
        let engine = DigestEngine::new(ScriptedPipeline::default());

        let digest = engine.preview().await.unwrap();

        assert_eq!(digest.body, "body");
        assert_eq!(
            *engine.pipeline().calls.lock().unwrap(),
            vec!["extract", "transform"]
        );
    }

    #[tokio::test]
    async fn load_failure_propagates() {
        let engine = DigestEngine::new(ScriptedPipeline {
            fail_load: true,
            ..Default::default()
        });

        let err = engine.run().await.unwrap_err();
        assert!(err.is_config_error());
    }
}
