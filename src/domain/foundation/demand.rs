//! Final demand vectors and their metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a final demand vector.
///
/// A `Consumption` vector covers the final demand of households,
/// government and others; a `Production` vector focuses on the production
/// of goods and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DemandType {
    #[default]
    #[serde(alias = "consumption")]
    Consumption,
    #[serde(alias = "production")]
    Production,
}

impl fmt::Display for DemandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandType::Consumption => f.write_str("Consumption"),
            DemandType::Production => f.write_str("Production"),
        }
    }
}

/// Metadata of a demand vector offered by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandInfo {
    pub id: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub demand_type: DemandType,
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub location: String,
}

/// One entry of a demand vector: an amount of final demand for a sector id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandEntry {
    pub sector: String,
    pub amount: f64,
}

impl DemandEntry {
    pub fn new(sector: impl Into<String>, amount: f64) -> Self {
        Self {
            sector: sector.into(),
            amount,
        }
    }
}

/// Partial demand description used to look up a demand vector.
///
/// Unset fields match anything; string fields compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandSpec {
    pub demand_type: Option<DemandType>,
    pub year: Option<i32>,
    pub location: Option<String>,
    pub system: Option<String>,
}

impl DemandSpec {
    /// Creates a spec matching the given demand type.
    pub fn of_type(demand_type: DemandType) -> Self {
        Self {
            demand_type: Some(demand_type),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Returns true if the given demand info matches all set fields.
    pub fn matches(&self, info: &DemandInfo) -> bool {
        if self.demand_type.is_some_and(|t| t != info.demand_type) {
            return false;
        }
        if self.year.is_some_and(|y| y != info.year) {
            return false;
        }
        if let Some(location) = &self.location {
            if !location.trim().eq_ignore_ascii_case(info.location.trim()) {
                return false;
            }
        }
        if let Some(system) = &self.system {
            if !system.trim().eq_ignore_ascii_case(info.system.trim()) {
                return false;
            }
        }
        true
    }

    /// Selects the matching demand with the latest year.
    ///
    /// When several matches share the latest year the first one in list
    /// order wins.
    pub fn find<'a>(&self, infos: &'a [DemandInfo]) -> Option<&'a DemandInfo> {
        infos
            .iter()
            .filter(|info| self.matches(info))
            .fold(None, |best: Option<&DemandInfo>, info| match best {
                Some(b) if b.year >= info.year => Some(b),
                _ => Some(info),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infos() -> Vec<DemandInfo> {
        serde_json::from_str(
            r#"[
                {"id":"2012_US_Consumption_Complete","year":2012,"type":"Consumption","system":"Complete","location":"US"},
                {"id":"2012_US_Production_Complete","year":2012,"type":"Production","system":"Complete","location":"US"},
                {"id":"2019_US_Consumption_Complete","year":2019,"type":"Consumption","system":"Complete","location":"US"},
                {"id":"2019_GA_Consumption_Complete","year":2019,"type":"Consumption","system":"Complete","location":"GA"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn finds_latest_year_by_type() {
        let infos = infos();
        let spec = DemandSpec::of_type(DemandType::Consumption).with_location("us");
        assert_eq!(spec.find(&infos).unwrap().id, "2019_US_Consumption_Complete");
    }

    #[test]
    fn honors_year_and_type() {
        let infos = infos();
        let spec = DemandSpec::of_type(DemandType::Production).with_year(2012);
        assert_eq!(spec.find(&infos).unwrap().id, "2012_US_Production_Complete");
    }

    #[test]
    fn no_match_returns_none() {
        let infos = infos();
        let spec = DemandSpec::of_type(DemandType::Production).with_year(2019);
        assert!(spec.find(&infos).is_none());
    }

    #[test]
    fn empty_spec_matches_everything() {
        let infos = infos();
        assert!(infos.iter().all(|i| DemandSpec::default().matches(i)));
    }

    #[test]
    fn demand_type_accepts_lowercase() {
        let t: DemandType = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(t, DemandType::Production);
    }
}
