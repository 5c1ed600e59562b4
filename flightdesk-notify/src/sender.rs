use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A fully rendered notification, ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
}

/// Receipt for a message the transport accepted.
#[derive(Debug, Clone, Serialize)]
pub struct Sent {
    /// Transport that accepted the message ("smtp", "sendmail", ...)
    pub transport: &'static str,
    pub accepted_at: DateTime<Utc>,
    /// Transport reply, when it gives one (SMTP status code)
    pub detail: Option<String>,
}

impl Sent {
    pub fn now(transport: &'static str, detail: Option<String>) -> Self {
        Self {
            transport,
            accepted_at: Utc::now(),
            detail,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchFailure {
    #[error("invalid mailbox '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("{transport} transport rejected message: {reason}")]
    Transport {
        transport: &'static str,
        reason: String,
    },
}

/// Capability to deliver one email. Implementations must not retry.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<Sent, DispatchFailure>;
}
