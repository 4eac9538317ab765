//! Sector Ranker - Deterministic ranking and search over normalized results.

use std::cmp::Ordering;

use serde::Serialize;

use super::paging;
use super::ResultNormalizer;
use crate::domain::foundation::{Indicator, Sector};

/// Parameters of a ranking request.
///
/// Defaults: no count limit, first page, no search term, no sort
/// indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingQuery {
    pub indicators: Vec<Indicator>,
    /// Maximum number of sectors per page; negative means no limit.
    pub count: i64,
    /// 1-based page index.
    pub page: i64,
    pub search_term: Option<String>,
    pub sort_indicator: Option<Indicator>,
}

impl RankingQuery {
    /// Creates a query ranking by the combined magnitude of the indicators.
    pub fn new(indicators: Vec<Indicator>) -> Self {
        Self {
            indicators,
            count: -1,
            page: 1,
            search_term: None,
            sort_indicator: None,
        }
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Ranks by this single indicator instead of the combined magnitude.
    pub fn with_sort_indicator(mut self, indicator: Indicator) -> Self {
        self.sort_indicator = Some(indicator);
        self
    }
}

/// A sector together with its rank value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSector {
    pub sector: Sector,
    pub rank: f64,
}

/// Sector ranking functions.
pub struct SectorRanker;

impl SectorRanker {
    /// Combined rank of a sector: the Euclidean norm of the selected
    /// indicators' normalized values.
    ///
    /// A sector that is extreme on any single indicator ranks high even
    /// when it is average on the others.
    pub fn rank(normalizer: &ResultNormalizer, sector: &Sector, indicators: &[Indicator]) -> f64 {
        indicators
            .iter()
            .map(|indicator| normalizer.normalized(indicator, sector).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Ranks the sectors according to the query.
    ///
    /// # Algorithm
    /// 1. Filter by the search term (case-insensitive substring of the name)
    /// 2. Rank by the sort indicator's normalized value if set, otherwise
    ///    by the combined rank
    /// 3. Sort by rank descending, ties by name ascending (case-insensitive)
    /// 4. Select the requested page of `count` sectors
    ///
    /// Filtering happens before truncation so a matching sector is never
    /// cut off by a limit meant for unfiltered browsing.
    pub fn ranked(
        normalizer: &ResultNormalizer,
        sectors: &[Sector],
        query: &RankingQuery,
    ) -> Vec<RankedSector> {
        let mut ranks: Vec<RankedSector> = sectors
            .iter()
            .filter(|s| matches_search(&s.name, query.search_term.as_deref()))
            .map(|sector| {
                let rank = match &query.sort_indicator {
                    Some(indicator) => normalizer.normalized(indicator, sector),
                    None => Self::rank(normalizer, sector, &query.indicators),
                };
                RankedSector {
                    sector: sector.clone(),
                    rank,
                }
            })
            .collect();

        ranks.sort_by(|a, b| {
            b.rank
                .total_cmp(&a.rank)
                .then_with(|| compare_names(&a.sector.name, &b.sector.name))
        });

        paging::select(&ranks, query.count, query.page)
    }

    /// Returns the ranked sectors without their rank values.
    pub fn get_ranking(
        normalizer: &ResultNormalizer,
        sectors: &[Sector],
        indicators: &[Indicator],
        count: i64,
        search_term: Option<&str>,
        sort_indicator: Option<&Indicator>,
    ) -> Vec<Sector> {
        let mut query = RankingQuery::new(indicators.to_vec()).with_count(count);
        if let Some(term) = search_term {
            query = query.with_search_term(term);
        }
        if let Some(indicator) = sort_indicator {
            query = query.with_sort_indicator(indicator.clone());
        }
        Self::ranked(normalizer, sectors, &query)
            .into_iter()
            .map(|r| r.sector)
            .collect()
    }
}

/// Case-insensitive substring match; an empty or missing term matches all.
pub fn matches_search(name: &str, term: Option<&str>) -> bool {
    match term {
        None | Some("") => true,
        Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
    }
}

/// Case-insensitive name ordering.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
