//! Test doubles for the analytics service.
//!
//! `MockApi` is a mockall double for call-count and argument checks.
//! `Harness` wires any [`AnalyticsApi`] into a [`Services`] backed by a
//! temporary embedding directory.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use tempfile::TempDir;
use tokio::sync::mpsc;

use crate::core::api::AnalyticsApi;
use crate::core::embed::EmbedSurface;
use crate::core::error::Result;
use crate::core::metrics::{PredictionMetrics, PredictionResult};
use crate::core::params::{PredictionParameters, VisualizationSelection};
use crate::core::request::StalePolicy;
use crate::tui::events::{AppEvent, Notification};
use crate::tui::services::Services;

mock! {
    pub Api {}

    #[async_trait]
    impl AnalyticsApi for Api {
        async fn predict(&self, params: &PredictionParameters) -> Result<PredictionResult>;
        async fn scatter_html(&self, selection: &VisualizationSelection) -> Result<String>;
    }
}

/// A successful prediction as the service would return it.
pub fn sample_prediction() -> PredictionResult {
    PredictionResult {
        status: "success".to_string(),
        message: "Prediction completed".to_string(),
        data: PredictionMetrics {
            co_perc: 20.5,
            co2_perc: 10.25,
            ch4_perc: 3.0,
            o2_perc: 0.4,
            h2_perc: 12.3456,
            calorific_value: 9.87654,
        },
    }
}

pub struct Harness {
    pub services: Services,
    pub events: mpsc::UnboundedReceiver<AppEvent>,
    /// Holds the embedding directory alive for the test.
    pub dir: TempDir,
}

impl Harness {
    pub fn new(api: impl AnalyticsApi + 'static) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let (tx, events) = mpsc::unbounded_channel();
        let services = Services::new(
            Arc::new(api),
            EmbedSurface::new(dir.path().join("viz")),
            false,
            StalePolicy::LastResolved,
            tx,
        );
        Self {
            services,
            events,
            dir,
        }
    }

    /// Notifications queued so far.
    pub fn notifications(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let AppEvent::Notification(n) = event {
                out.push(n);
            }
        }
        out
    }
}
