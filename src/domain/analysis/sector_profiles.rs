//! Sector Profiles - Side-by-side comparison of sector impact profiles.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::SectorAnalysis;
use crate::domain::foundation::numeric::{safe_div, value_at, zeros};
use crate::domain::foundation::{Indicator, Perspective, Sector};
use crate::ports::{ModelError, ModelReader};

/// Environmental profile of a sector code.
///
/// In a multi-regional model without a location filter the profile is the
/// sum over all regional sectors sharing the code; `sector` is then `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorProfile {
    pub code: String,
    pub name: String,
    /// The matched model sector when exactly one matched.
    pub sector: Option<Sector>,
    pub profile: Vec<f64>,
}

/// Computes the profiles of the requested sector codes.
///
/// Codes without a matching sector are skipped. With the `Direct`
/// perspective only direct impacts are included.
pub async fn sector_profiles(
    model: Arc<dyn ModelReader>,
    codes: &[String],
    location: Option<&str>,
    perspective: Perspective,
    totals: &[f64],
) -> Result<Vec<SectorProfile>, ModelError> {
    let all = model.sectors().await?;
    let direct_only = perspective == Perspective::Direct;

    let mut profiles = Vec::with_capacity(codes.len());
    for code in codes {
        let matched: Vec<&Sector> = all
            .iter()
            .filter(|s| &s.code == code)
            .filter(|s| location.map_or(true, |l| s.location.as_deref() == Some(l)))
            .collect();
        let Some(first) = matched.first() else {
            debug!(code = %code, "No sector for profile");
            continue;
        };

        let mut profile = zeros(totals.len());
        for sector in &matched {
            let analysis = SectorAnalysis::new((*sector).clone(), Arc::clone(&model), totals.to_vec());
            for (i, x) in analysis.environmental_profile(direct_only).await?.iter().enumerate() {
                if let Some(slot) = profile.get_mut(i) {
                    *slot += x;
                }
            }
        }

        profiles.push(SectorProfile {
            code: code.clone(),
            name: first.name.clone(),
            sector: (matched.len() == 1).then(|| (*first).clone()),
            profile,
        });
    }
    Ok(profiles)
}

/// Scales profiles for display against each other.
///
/// A single profile is divided by its maximum absolute value over the
/// selected indicators. For several profiles, each selected indicator is
/// divided by the maximum absolute value of that indicator across all
/// profiles. A zero maximum yields `0`.
pub fn make_relative(profiles: &mut [SectorProfile], indicators: &[Indicator]) {
    if let [single] = profiles {
        let max = indicators
            .iter()
            .map(|i| value_at(&single.profile, i.index).abs())
            .fold(0.0, f64::max);
        for x in single.profile.iter_mut() {
            *x = safe_div(*x, max);
        }
        return;
    }

    for indicator in indicators {
        let i = indicator.index;
        let max = profiles
            .iter()
            .map(|p| value_at(&p.profile, i).abs())
            .fold(0.0, f64::max);
        for p in profiles.iter_mut() {
            if let Some(x) = p.profile.get_mut(i) {
                *x = safe_div(*x, max);
            }
        }
    }
}
