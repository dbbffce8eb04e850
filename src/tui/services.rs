use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::auth::CredentialGate;
use crate::core::remember;
use crate::core::seed::SeedData;

use super::events::{AppEvent, Notification, NotificationLevel};

/// Handle to the console's backing data and login gate.
///
/// Created once at startup and passed by reference to views.
pub struct Services {
    /// Records seeded at startup; pages copy what they own on mount.
    pub data: SeedData,
    pub gate: CredentialGate,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize services from config.
    pub fn init(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let data = SeedData::load(config.data.seed_file.as_deref());
        log::info!(
            "Seeded {} subscriptions and {} payments",
            data.subscriptions.len(),
            data.payments.len()
        );

        let store = remember::open(config.auth.remember_backend);
        log::info!("Remember store: {:?}", config.auth.remember_backend);

        Self::new(data, CredentialGate::new(store), event_tx)
    }

    pub fn new(
        data: SeedData,
        gate: CredentialGate,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            data,
            gate,
            event_tx,
        }
    }

    /// Queue a notification for the overlay.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self.event_tx.send(AppEvent::Notification(Notification {
            id: 0, // Assigned by AppState
            message: message.into(),
            level,
            ttl_ticks: 30,
        }));
    }
}
