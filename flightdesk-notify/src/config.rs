use serde::{Deserialize, Serialize};
use crate::sender::DispatchFailure;
use crate::transport::parse_mailbox;

/// Colours used by the notification email template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrandPalette {
    /// Start of the header gradient
    pub primary: String,

    /// End of the header gradient and the call-to-action button
    pub accent: String,

    /// Middle of the header gradient
    pub secondary: String,

    /// Page background
    pub background: String,

    /// Card background
    pub card: String,

    /// Label text
    pub muted: String,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            primary: "#0f172a".to_string(),
            accent: "#12b981".to_string(),
            secondary: "#38bdf8".to_string(),
            background: "#f6f9fc".to_string(),
            card: "#ffffff".to_string(),
            muted: "#64748b".to_string(),
        }
    }
}

/// Who receives booking notifications, who they appear to come from, and how they look.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotifierConfig {
    /// Operator mailbox every booking request is sent to
    pub recipient: String,

    pub subject: String,

    /// Display "From" identity, e.g. `Name <address>`
    pub from: String,

    pub reply_to: String,

    pub company_name: String,

    pub website: String,

    /// Number behind the "Call Customer Support" button
    pub support_phone: String,

    pub brand: BrandPalette,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            recipient: "info@boomingplacetravelsandtours.com".to_string(),
            subject: "New Flight Booking Request".to_string(),
            from: "Booming Place Travels <no-reply@boomingplacetravelsandtours.com>".to_string(),
            reply_to: "Booming Place Travels <no-reply@boomingplacetravelsandtours.com>".to_string(),
            company_name: "Booming Place Travels & Tours".to_string(),
            website: "www.boomingplacetravelsandtours.com".to_string(),
            support_phone: "+2349065212188".to_string(),
            brand: BrandPalette::default(),
        }
    }
}

impl NotifierConfig {
    /// Checks that every configured mailbox parses, so a bad address fails at start-up rather than per request.
    pub fn validate(&self) -> Result<(), DispatchFailure> {
        parse_mailbox(&self.recipient)?;
        parse_mailbox(&self.from)?;
        parse_mailbox(&self.reply_to)?;
        Ok(())
    }
}
