use crate::config::mail::MailSettings;
use crate::domain::model::OutgoingMail;
use crate::domain::ports::Mailer;
use crate::utils::error::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;

/// SMTP submission over STARTTLS with username/password auth.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings, timeout: Duration) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = build_message(mail)?;
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP server replied {}", response.code());
        Ok(())
    }
}

pub fn build_message(mail: &OutgoingMail) -> Result<Message> {
    let mut builder = Message::builder()
        .from(mail.from.parse::<Mailbox>()?)
        .subject(mail.subject.clone());
    for recipient in &mail.to {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    Ok(builder
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DigestError;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "Digest Bot <bot@example.com>".to_string(),
            to: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            subject: "[경희대] 장학 공지 요약 (2024-01-15)".to_string(),
            body: "총 0건".to_string(),
        }
    }

    #[test]
    fn message_carries_every_recipient() {
        let message = build_message(&mail()).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("bot@example.com"));
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("text/plain; charset=utf-8"));
        assert_eq!(message.envelope().to().len(), 2);
    }

    #[test]
    fn invalid_sender_is_rejected() {
        let mut mail = mail();
        mail.from = "not an address".to_string();

        assert!(matches!(
            build_message(&mail),
            Err(DigestError::MailAddressError(_))
        ));
    }
}
