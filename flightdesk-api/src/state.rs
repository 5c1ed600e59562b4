use std::sync::Arc;
use flightdesk_notify::Notifier;
use crate::app_config::RedirectConfig;

#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<Notifier>,
    pub redirect: RedirectConfig,
}
