use crate::domain::ports::SettingsSource;
use crate::utils::error::{DigestError, Result};
use std::collections::HashMap;
use std::env;

pub const EMAIL_HOST: &str = "EMAIL_HOST";
pub const EMAIL_PORT: &str = "EMAIL_PORT";
pub const EMAIL_USERNAME: &str = "EMAIL_USERNAME";
pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
pub const EMAIL_FROM: &str = "EMAIL_FROM";
pub const EMAIL_TO: &str = "EMAIL_TO";

pub const REQUIRED_MAIL_KEYS: [&str; 6] = [
    EMAIL_HOST,
    EMAIL_PORT,
    EMAIL_USERNAME,
    EMAIL_PASSWORD,
    EMAIL_FROM,
    EMAIL_TO,
];

/// Reads settings from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub to: String,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl MailSettings {
    /// Collects all six settings, reporting every missing key at once.
    /// Blank values count as missing.
    pub fn from_source<S: SettingsSource + ?Sized>(source: &S) -> Result<Self> {
        let lookup = |key: &str| source.get(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_MAIL_KEYS
            .into_iter()
            .filter(|key| lookup(key).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(DigestError::MissingMailSettings { keys: missing });
        }

        let required = |key: &str| {
            lookup(key).ok_or_else(|| DigestError::MissingMailSettings {
                keys: vec![key.to_string()],
            })
        };

        let port_value = required(EMAIL_PORT)?;
        let port = port_value
            .trim()
            .parse::<u16>()
            .map_err(|e| DigestError::InvalidConfigValueError {
                field: EMAIL_PORT.to_string(),
                value: port_value.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            host: required(EMAIL_HOST)?.trim().to_string(),
            port,
            username: required(EMAIL_USERNAME)?,
            password: required(EMAIL_PASSWORD)?,
            from: required(EMAIL_FROM)?.trim().to_string(),
            to: required(EMAIL_TO)?.trim().to_string(),
        })
    }

    /// `EMAIL_TO` may list several comma-separated recipients.
    pub fn recipients(&self) -> Vec<&str> {
        self.to
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings() -> HashMap<String, String> {
        [
            (EMAIL_HOST, "smtp.example.com"),
            (EMAIL_PORT, "587"),
            (EMAIL_USERNAME, "digest-bot"),
            (EMAIL_PASSWORD, "hunter2"),
            (EMAIL_FROM, "bot@example.com"),
            (EMAIL_TO, "a@example.com, b@example.com"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn all_missing_keys_are_named() {
        let err = MailSettings::from_source(&HashMap::<String, String>::new()).unwrap_err();
        match err {
            DigestError::MissingMailSettings { keys } => {
                assert_eq!(keys, REQUIRED_MAIL_KEYS.map(String::from).to_vec());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut source = full_settings();
        source.insert(EMAIL_PASSWORD.to_string(), "   ".to_string());
        source.remove(EMAIL_TO);

        let err = MailSettings::from_source(&source).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required email settings: EMAIL_PASSWORD, EMAIL_TO"
        );
    }

    #[test]
    fn parses_complete_settings() {
        let settings = MailSettings::from_source(&full_settings()).unwrap();
        assert_eq!(settings.port, 587);
        assert_eq!(settings.recipients(), vec!["a@example.com", "b@example.com"]);
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let mut source = full_settings();
        source.insert(EMAIL_PORT.to_string(), "submission".to_string());

        match MailSettings::from_source(&source) {
            Err(DigestError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, EMAIL_PORT)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
