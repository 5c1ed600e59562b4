pub mod config;
pub mod notifier;
pub mod sender;
pub mod template;
pub mod transport;

pub use config::{BrandPalette, NotifierConfig};
pub use notifier::{NotificationOutcome, Notifier};
pub use sender::{DispatchFailure, EmailSender, OutgoingEmail, Sent};
pub use transport::{build_sender, MailConfig, SendmailSender, SmtpSender, SmtpSecurity, TransportKind};
