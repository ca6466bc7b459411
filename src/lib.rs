pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::mail::{EnvSettings, MailSettings};
pub use config::DigestConfig;
pub use core::{
    digest::DigestFormatter, etl::DigestEngine, extractor::NoticeExtractor,
    notifier::Notifier, pipeline::NoticePipeline,
};
pub use domain::model::{Digest, ListingScan, NoticeRecord};
pub use utils::error::{DigestError, Result};
