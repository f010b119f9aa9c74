use std::sync::Arc;

use airquality_core::{AirQualityService, Config, air_quality_from_config, geocoder_from_config};
use chrono::{DateTime, Utc};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<AirQualityService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: AirQualityService) -> Self {
        Self {
            service: Arc::new(service),
            started_at: Utc::now(),
        }
    }

    /// Build the provider clients and service described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let service = AirQualityService::new(
            geocoder_from_config(config)?,
            air_quality_from_config(config)?,
            config.api_keys(),
        );
        Ok(Self::new(service))
    }
}
