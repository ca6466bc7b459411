use crate::adapters::smtp::SmtpMailer;
use crate::config::mail::MailSettings;
use crate::domain::model::OutgoingMail;
use crate::domain::ports::{Mailer, SettingsSource};
use crate::utils::error::Result;
use std::time::Duration;

/// Sends the digest mail using settings resolved at send time.
pub struct Notifier<S: SettingsSource> {
    settings: S,
    timeout: Duration,
}

impl<S: SettingsSource> Notifier<S> {
    pub fn new(settings: S, timeout: Duration) -> Self {
        Self { settings, timeout }
    }

    /// Fails with every missing mail setting named before touching the network.
    pub async fn dispatch(&self, body: &str, subject: &str) -> Result<()> {
        let settings = MailSettings::from_source(&self.settings)?;
        let mailer = SmtpMailer::new(&settings, self.timeout)?;
        deliver(&mailer, &settings, body, subject).await
    }
}

pub async fn deliver<M: Mailer + ?Sized>(
    mailer: &M,
    settings: &MailSettings,
    body: &str,
    subject: &str,
) -> Result<()> {
    let mail = OutgoingMail {
        from: settings.from.clone(),
        to: settings.recipients().into_iter().map(String::from).collect(),
        subject: subject.to_string(),
        body: body.to_string(),
    };

    tracing::info!(
        "Sending '{}' to {} recipient(s) via {}:{}",
        mail.subject,
        mail.to.len(),
        settings.host,
        settings.port
    );
    mailer.send(&mail).await
}
