//! CompareSectorProfilesHandler - Relative environmental profiles of the
//! configured sector codes.

use std::sync::Arc;

use super::{NormalizationTotalsHandler, ResultConfig};
use crate::domain::analysis::{make_relative, sector_profiles, SectorProfile};
use crate::domain::foundation::Indicator;
use crate::ports::{ModelError, ModelReader};

/// Handler producing comparable sector profiles.
pub struct CompareSectorProfilesHandler {
    model: Arc<dyn ModelReader>,
}

impl CompareSectorProfilesHandler {
    pub fn new(model: Arc<dyn ModelReader>) -> Self {
        Self { model }
    }

    /// Normalizes the profiles of `config.sectors` by the configured
    /// demand's totals and scales them relative to each other for the
    /// given indicators.
    pub async fn handle(
        &self,
        config: &ResultConfig,
        indicators: &[Indicator],
    ) -> Result<Vec<SectorProfile>, ModelError> {
        if config.sectors.is_empty() {
            return Ok(Vec::new());
        }
        let totals = NormalizationTotalsHandler::new(Arc::clone(&self.model))
            .handle(config)
            .await?;
        let mut profiles = sector_profiles(
            Arc::clone(&self.model),
            &config.sectors,
            config.location.as_deref(),
            config.perspective,
            &totals,
        )
        .await?;
        make_relative(&mut profiles, indicators);
        Ok(profiles)
    }
}
