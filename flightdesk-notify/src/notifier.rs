use std::sync::Arc;
use flightdesk_core::ValidatedBooking;
use flightdesk_shared::mask_tail;
use crate::config::NotifierConfig;
use crate::sender::{EmailSender, OutgoingEmail};
use crate::template::render_booking_email;

/// Binary result of a dispatch attempt. The cause of a failure is logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed,
}

impl NotificationOutcome {
    /// Value for the status page's `status` query parameter.
    pub fn redirect_status(&self) -> &'static str {
        match self {
            NotificationOutcome::Sent => "success",
            NotificationOutcome::Failed => "error",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent)
    }
}

/// Renders validated bookings and hands them to the configured transport.
pub struct Notifier {
    config: NotifierConfig,
    sender: Arc<dyn EmailSender>,
}

impl Notifier {
    pub fn new(config: NotifierConfig, sender: Arc<dyn EmailSender>) -> Self {
        Self { config, sender }
    }

    pub fn compose(&self, booking: &ValidatedBooking) -> OutgoingEmail {
        OutgoingEmail {
            to: self.config.recipient.clone(),
            from: self.config.from.clone(),
            reply_to: self.config.reply_to.clone(),
            subject: self.config.subject.clone(),
            html_body: render_booking_email(booking, &self.config),
        }
    }

    /// Sends one notification. No retry: a failed send is reported once and dropped.
    pub async fn notify(&self, booking: &ValidatedBooking) -> NotificationOutcome {
        let email = self.compose(booking);
        let form = booking.submission();

        match self.sender.send(&email).await {
            Ok(sent) => {
                tracing::info!(
                    transport = sent.transport,
                    detail = ?sent.detail,
                    route = %format!("{} -> {}", form.from, form.to),
                    phone = %mask_tail(&form.phone, 3),
                    "Booking notification dispatched"
                );
                NotificationOutcome::Sent
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    recipient = %email.to,
                    "Booking notification dispatch failed"
                );
                NotificationOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::{DispatchFailure, Sent};
    use async_trait::async_trait;
    use flightdesk_core::{validate, BookingSubmission};
    use std::sync::Mutex;

    struct RecordingSender {
        fail: bool,
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl RecordingSender {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self { fail, sent: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send(&self, email: &OutgoingEmail) -> Result<Sent, DispatchFailure> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail {
                Err(DispatchFailure::Transport {
                    transport: "test",
                    reason: "connection refused".to_string(),
                })
            } else {
                Ok(Sent::now("test", None))
            }
        }
    }

    fn booking() -> ValidatedBooking {
        validate(BookingSubmission {
            trip_type: "oneway".to_string(),
            from: "Lagos".to_string(),
            to: "Abuja".to_string(),
            departure_date: "2025-01-01".to_string(),
            adults: "1".to_string(),
            phone: "08000000000".to_string(),
            ..Default::default()
        })
        .expect("valid booking")
    }

    #[tokio::test]
    async fn test_successful_dispatch() {
        let sender = RecordingSender::new(false);
        let notifier = Notifier::new(NotifierConfig::default(), sender.clone());

        let outcome = notifier.notify(&booking()).await;
        assert_eq!(outcome, NotificationOutcome::Sent);
        assert_eq!(outcome.redirect_status(), "success");

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "info@boomingplacetravelsandtours.com");
        assert_eq!(sent[0].subject, "New Flight Booking Request");
        assert_eq!(sent[0].from, sent[0].reply_to);
        assert!(sent[0].html_body.contains("Lagos"));
    }

    #[tokio::test]
    async fn test_failed_dispatch_is_not_retried() {
        let sender = RecordingSender::new(true);
        let notifier = Notifier::new(NotifierConfig::default(), sender.clone());

        let outcome = notifier.notify(&booking()).await;
        assert_eq!(outcome, NotificationOutcome::Failed);
        assert_eq!(outcome.redirect_status(), "error");
        assert!(!outcome.is_sent());
        assert_eq!(sender.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_compose_uses_configured_identity() {
        let config = NotifierConfig {
            recipient: "ops@example.com".to_string(),
            subject: "Booking".to_string(),
            from: "Desk <desk@example.com>".to_string(),
            reply_to: "Replies <replies@example.com>".to_string(),
            ..Default::default()
        };
        let notifier = Notifier::new(config, RecordingSender::new(false));

        let email = notifier.compose(&booking());
        assert_eq!(email.to, "ops@example.com");
        assert_eq!(email.subject, "Booking");
        assert_eq!(email.from, "Desk <desk@example.com>");
        assert_eq!(email.reply_to, "Replies <replies@example.com>");
    }
}
