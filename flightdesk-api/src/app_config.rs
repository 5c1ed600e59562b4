use serde::Deserialize;
use std::env;
use axum::http::HeaderValue;
use flightdesk_notify::{MailConfig, NotifierConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }

/// Where clients land after a dispatch attempt.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RedirectConfig {
    pub status_page: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { status_page: "index.html".to_string() }
    }
}

impl RedirectConfig {
    pub fn location(&self, status: &str) -> String {
        let separator = if self.status_page.contains('?') { '&' } else { '?' };
        format!("{}{}status={}", self.status_page, separator, status)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Machine-local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `FLIGHTDESK__MAIL__SMTP__PASSWORD=...`
            .add_source(config::Environment::with_prefix("FLIGHTDESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Rejects settings that would otherwise only fail once a booking arrives.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.notifier.validate()?;
        for status in ["success", "error"] {
            let location = self.redirect.location(status);
            HeaderValue::from_str(&location)
                .map_err(|_| anyhow::anyhow!("redirect.status_page produces an invalid Location header: {:?}", location))?;
        }
        Ok(())
    }
}
