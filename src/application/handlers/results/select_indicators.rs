//! SelectIndicatorsHandler - Resolves configured indicator codes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::Indicator;
use crate::ports::{ModelError, ModelReader};

/// Indicators shown when a view configures none.
pub const DEFAULT_INDICATORS: [&str; 16] = [
    "ACID", "CCDD", "CMSW", "CRHW", "ENRG", "ETOX", "EUTR", "GHG", "HAPS", "HRSP", "HTOX",
    "LAND", "MNRL", "OZON", "SMOG", "WATR",
];

/// Handler resolving indicator codes against the model.
pub struct SelectIndicatorsHandler {
    model: Arc<dyn ModelReader>,
}

impl SelectIndicatorsHandler {
    pub fn new(model: Arc<dyn ModelReader>) -> Self {
        Self { model }
    }

    /// Returns the model indicators for the codes in the given order.
    ///
    /// Empty `codes` select [`DEFAULT_INDICATORS`]; codes the model does
    /// not know are skipped.
    pub async fn handle(&self, codes: &[String]) -> Result<Vec<Indicator>, ModelError> {
        let all = self.model.indicators().await?;
        let selected: Vec<Indicator> = if codes.is_empty() {
            resolve(&all, DEFAULT_INDICATORS.iter().copied())
        } else {
            resolve(&all, codes.iter().map(String::as_str))
        };
        debug!(requested = codes.len(), selected = selected.len(), "Selected indicators");
        Ok(selected)
    }
}

fn resolve<'a>(all: &[Indicator], codes: impl Iterator<Item = &'a str>) -> Vec<Indicator> {
    codes
        .filter_map(|code| all.iter().find(|i| i.code == code).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryModel;
    use crate::domain::foundation::IndicatorGroup;

    fn handler() -> SelectIndicatorsHandler {
        let model = InMemoryModel::new().with_indicators(vec![
            Indicator::new("GHG", "Greenhouse Gases", "kg", IndicatorGroup::ImpactPotential, 0),
            Indicator::new("WATR", "Water Use", "m3", IndicatorGroup::ResourceUse, 1),
            Indicator::new("JOBS", "Jobs Supported", "p", IndicatorGroup::EconomicSocial, 2),
        ]);
        SelectIndicatorsHandler::new(Arc::new(model))
    }

    fn codes(indicators: &[Indicator]) -> Vec<&str> {
        indicators.iter().map(|i| i.code.as_str()).collect()
    }

    #[tokio::test]
    async fn resolves_in_configured_order_and_skips_unknown() {
        let selected = handler()
            .handle(&["WATR".to_string(), "NOPE".to_string(), "JOBS".to_string()])
            .await
            .unwrap();
        assert_eq!(codes(&selected), vec!["WATR", "JOBS"]);
    }

    #[tokio::test]
    async fn empty_selection_uses_defaults() {
        let selected = handler().handle(&[]).await.unwrap();
        assert_eq!(codes(&selected), vec!["GHG", "WATR"]);
    }
}
