use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::api::{AnalyticsApi, HttpAnalyticsClient};
use crate::core::embed::EmbedSurface;
use crate::core::error::ApiError;
use crate::core::request::StalePolicy;

use super::events::{AppEvent, Notification, NotificationLevel};

/// Centralized handle to everything the views talk to.
///
/// Created once at startup and passed by reference to views. Each view still
/// owns its own form state and request controller.
pub struct Services {
    pub api: Arc<dyn AnalyticsApi>,
    pub surface: EmbedSurface,
    /// Open newly mounted scatter documents right away.
    pub auto_open: bool,
    pub stale_policy: StalePolicy,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Build the HTTP client and embedding surface from config.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, ApiError> {
        let base_url = config.base_url();
        let api = HttpAnalyticsClient::new(base_url, config.request_timeout())?;
        log::info!("Analytics service at {base_url}");

        let viz_dir = config.viz_dir();
        log::info!("Scatter documents mount under {}", viz_dir.display());

        Ok(Self::new(
            Arc::new(api),
            EmbedSurface::new(viz_dir),
            config.viz.auto_open,
            config.api.stale_responses,
            event_tx,
        ))
    }

    pub fn new(
        api: Arc<dyn AnalyticsApi>,
        surface: EmbedSurface,
        auto_open: bool,
        stale_policy: StalePolicy,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            api,
            surface,
            auto_open,
            stale_policy,
            event_tx,
        }
    }

    /// Queue an overlay notification for the next loop iteration.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) {
        let _ = self
            .event_tx
            .send(AppEvent::Notification(Notification::new(message, level)));
    }
}
