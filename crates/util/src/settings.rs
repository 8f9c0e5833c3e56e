use super::*;
use std::borrow::Cow;
use std::time::Duration;

/// How account numbers are rendered in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privacy {
    /// Only the last two characters are shown, and none for short accounts.
    #[default]
    Masked,
    /// Account numbers are logged verbatim.
    Plain,
}

impl Privacy {
    pub fn mask<'a>(&self, account: &'a str) -> Cow<'a, str> {
        match self {
            Self::Plain => Cow::Borrowed(account),
            Self::Masked => {
                let n = account.chars().count();
                match n > 2 {
                    true => Cow::Owned(format!(
                        "***{}",
                        account.chars().skip(n - 2).collect::<String>()
                    )),
                    false => Cow::Borrowed("***"),
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is not a duration: {value:?}")]
    Duration { var: &'static str, value: String },
    #[error("{var} is not a boolean: {value:?}")]
    Flag { var: &'static str, value: String },
    #[error("{var} is not a positive integer: {value:?}")]
    Number { var: &'static str, value: String },
}

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_url: String,
    pub bind_addr: String,
    pub schema: String,
    pub statement_timeout: Duration,
    pub connect_timeout: Duration,
    pub privacy: Privacy,
    pub expose_errors: bool,
    pub workers: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let duration = |key: &'static str, default: &str| {
            let value = var(key).unwrap_or_else(|| default.to_string());
            parse_duration(&value).ok_or(SettingsError::Duration { var: key, value })
        };
        let flag = |key: &'static str| match var(key) {
            None => Ok(false),
            Some(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(SettingsError::Flag { var: key, value }),
            },
        };
        let workers = match var("SERVER_WORKERS") {
            None => 6,
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(SettingsError::Number { var: "SERVER_WORKERS", value })?,
        };
        Ok(Self {
            db_url: var("DB_URL").ok_or(SettingsError::Missing("DB_URL"))?,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            schema: var("BILLING_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            statement_timeout: duration("STATEMENT_TIMEOUT", "30s")?,
            connect_timeout: duration("CONNECT_TIMEOUT", "10s")?,
            privacy: match flag("LOG_ACCOUNTS")? {
                true => Privacy::Plain,
                false => Privacy::Masked,
            },
            expose_errors: flag("EXPOSE_ERRORS")?,
            workers,
        })
    }
}
