pub mod detail;
pub mod digest;
pub mod etl;
pub mod extractor;
pub mod html_text;
pub mod listing;
pub mod notifier;
pub mod pipeline;
pub mod recency;
pub mod url_resolver;

pub use crate::domain::model::{Digest, ListingScan, NoticeRecord};
pub use crate::domain::ports::{DigestPipeline, Mailer, SettingsSource};
pub use crate::utils::error::Result;
