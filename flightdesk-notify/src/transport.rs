use async_trait::async_trait;
use lettre::message::{header::{self, ContentType}, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSendmailTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use flightdesk_shared::Masked;
use crate::sender::{DispatchFailure, EmailSender, OutgoingEmail, Sent};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Smtp,
    Sendmail,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Implicit TLS (usually port 465)
    Tls,
    #[default]
    StartTls,
    /// Plain text, for a relay on localhost or a trusted network
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub username: Option<String>,
    pub password: Option<Masked<String>>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            security: SmtpSecurity::StartTls,
            username: None,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendmailConfig {
    /// Binary to invoke; lettre's default `sendmail` lookup when unset
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub transport: TransportKind,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub sendmail: SendmailConfig,
}

pub(crate) fn parse_mailbox(address: &str) -> Result<Mailbox, DispatchFailure> {
    address.parse().map_err(|source| DispatchFailure::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

/// Builds the MIME message: single `text/html; charset=utf-8` part. lettre adds `MIME-Version: 1.0`.
pub fn build_message(email: &OutgoingEmail) -> Result<Message, DispatchFailure> {
    let message = Message::builder()
        .from(parse_mailbox(&email.from)?)
        .reply_to(parse_mailbox(&email.reply_to)?)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.as_str())
        .header(header::MIME_VERSION_1_0)
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone())?;

    Ok(message)
}

pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpSender {
    pub fn new(config: &SmtpConfig) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        };

        let mut builder = builder.port(config.port);
        if let Some(username) = &config.username {
            let password = config
                .password
                .as_ref()
                .map(|p| p.expose().clone())
                .unwrap_or_default();
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            security = ?config.security,
            authenticated = config.username.is_some(),
            "SMTP transport configured"
        );

        Ok(Self { transport: builder.build() })
    }
}

#[async_trait]
impl EmailSender for SmtpSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<Sent, DispatchFailure> {
        let message = build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DispatchFailure::Transport {
                transport: "smtp",
                reason: e.to_string(),
            })?;

        Ok(Sent::now("smtp", Some(response.code().to_string())))
    }
}

/// Hands messages to the host's local mail facility.
pub struct SendmailSender {
    transport: AsyncSendmailTransport<Tokio1Executor>,
}

impl SendmailSender {
    pub fn new(config: &SendmailConfig) -> Self {
        let transport = match &config.command {
            Some(command) => AsyncSendmailTransport::<Tokio1Executor>::new_with_command(command.as_str()),
            None => AsyncSendmailTransport::<Tokio1Executor>::new(),
        };
        tracing::info!(command = ?config.command, "Sendmail transport configured");
        Self { transport }
    }
}

#[async_trait]
impl EmailSender for SendmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<Sent, DispatchFailure> {
        let message = build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| DispatchFailure::Transport {
                transport: "sendmail",
                reason: e.to_string(),
            })?;

        Ok(Sent::now("sendmail", None))
    }
}

/// Picks the lettre-backed [`EmailSender`] named by `mail.transport`.
pub fn build_sender(config: &MailConfig) -> Result<Arc<dyn EmailSender>, lettre::transport::smtp::Error> {
    let sender: Arc<dyn EmailSender> = match config.transport {
        TransportKind::Smtp => Arc::new(SmtpSender::new(&config.smtp)?),
        TransportKind::Sendmail => Arc::new(SendmailSender::new(&config.sendmail)),
    };
    Ok(sender)
}
