//! Indicator metadata of an input-output model.

use serde::{Deserialize, Serialize};

/// Display group of an indicator. Not used in any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorGroup {
    #[serde(rename = "Impact Potential")]
    ImpactPotential,
    #[serde(rename = "Resource Use")]
    ResourceUse,
    #[serde(rename = "Chemical Releases")]
    ChemicalReleases,
    #[serde(rename = "Waste Generated")]
    WasteGenerated,
    #[serde(rename = "Economic & Social", alias = "Economic/Social")]
    EconomicSocial,
    #[serde(other)]
    Other,
}

impl IndicatorGroup {
    /// Returns the display label of the group.
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorGroup::ImpactPotential => "Impact Potential",
            IndicatorGroup::ResourceUse => "Resource Use",
            IndicatorGroup::ChemicalReleases => "Chemical Releases",
            IndicatorGroup::WasteGenerated => "Waste Generated",
            IndicatorGroup::EconomicSocial => "Economic & Social",
            IndicatorGroup::Other => "Other",
        }
    }
}

/// An environmental or economic indicator of the model.
///
/// `index` is the row position of the indicator in `D`, `U` and in
/// calculation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub unit: String,
    pub group: IndicatorGroup,
    pub index: usize,
}

impl Indicator {
    /// Creates an indicator whose id equals its code.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        group: IndicatorGroup,
        index: usize,
    ) -> Self {
        let code = code.into();
        Self {
            id: code.clone(),
            code,
            name: name.into(),
            unit: unit.into(),
            group,
            index,
        }
    }
}
