//! ResultConfig - Typed settings of a result view.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::RankingQuery;
use crate::domain::foundation::{DemandSpec, DemandType, Indicator, Perspective};

/// Settings selecting what a result view shows.
///
/// Without `analysis` the view shows the plain `D` or `U` matrix; with an
/// analysis type a demand of that type is looked up (optionally by year
/// and location) and calculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultConfig {
    /// Sector codes, e.g. for profile comparison.
    pub sectors: Vec<String>,
    /// Indicator codes; empty selects the default indicators.
    pub indicators: Vec<String>,
    pub perspective: Perspective,
    pub analysis: Option<DemandType>,
    pub year: Option<i32>,
    pub location: Option<String>,
    /// Sectors per page; negative means no limit.
    pub count: i64,
    /// 1-based page.
    pub page: i64,
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            sectors: Vec::new(),
            indicators: Vec::new(),
            perspective: Perspective::default(),
            analysis: None,
            year: None,
            location: None,
            count: -1,
            page: 1,
        }
    }
}

impl ResultConfig {
    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_analysis(mut self, analysis: DemandType) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_indicators(mut self, codes: Vec<String>) -> Self {
        self.indicators = codes;
        self
    }

    pub fn with_sectors(mut self, codes: Vec<String>) -> Self {
        self.sectors = codes;
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Demand lookup for normalization totals: the analysis type
    /// (Consumption if unset) with the configured year and location.
    pub fn demand_spec(&self) -> DemandSpec {
        let mut spec = DemandSpec::of_type(self.analysis.unwrap_or_default());
        if let Some(year) = self.year {
            spec = spec.with_year(year);
        }
        if let Some(location) = &self.location {
            spec = spec.with_location(location.clone());
        }
        spec
    }

    /// Ranking query over the given indicators with the configured paging.
    pub fn ranking_query(&self, indicators: Vec<Indicator>) -> RankingQuery {
        RankingQuery::new(indicators)
            .with_count(self.count)
            .with_page(self.page)
    }
}
