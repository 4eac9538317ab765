//! Sector metadata of an input-output model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An industry sector of the model.
///
/// `index` is the row/column position in the matrices the sector was read
/// with. In multi-regional models the same `code` appears once per
/// region with distinct `id`s and `location`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub index: usize,
}

impl Sector {
    /// Creates a sector without location or description.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            location: None,
            description: None,
            index,
        }
    }

    /// Sets the location (region) of the sector.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Canonical single-region view of a (possibly multi-regional) sector list.
///
/// The sectors are synthetic: one per distinct sector code, indexed in
/// order of first appearance. They must never be used in API requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SingleRegionSectors {
    pub sectors: Vec<Sector>,
    pub index: HashMap<String, usize>,
}

impl SingleRegionSectors {
    /// Derives the single-region view from the full sector list.
    pub fn from_sectors(sectors: &[Sector]) -> Self {
        let mut ordered: Vec<&Sector> = sectors.iter().collect();
        ordered.sort_by_key(|s| s.index);

        let mut view = SingleRegionSectors::default();
        for sector in ordered {
            if view.index.contains_key(&sector.code) {
                continue;
            }
            let index = view.sectors.len();
            view.index.insert(sector.code.clone(), index);
            view.sectors.push(Sector {
                id: sector.code.clone(),
                code: sector.code.clone(),
                name: sector.name.clone(),
                location: None,
                description: sector.description.clone(),
                index,
            });
        }
        view
    }

    /// Returns the aggregated index of the given sector code.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }
}

/// Returns `true` if the same sector code occurs in more than one location.
pub fn has_multiple_regions(sectors: &[Sector]) -> bool {
    let mut seen: HashMap<&str, Option<&str>> = HashMap::new();
    for sector in sectors {
        let location = sector.location.as_deref();
        match seen.get(sector.code.as_str()) {
            Some(first) if *first != location => return true,
            Some(_) => {}
            None => {
                seen.insert(sector.code.as_str(), location);
            }
        }
    }
    false
}
