//! Per-constellation sketch pipeline and the parallel batch over all
//! constellations.
//!
//! For each constellation:
//!
//! 1. **Extent**: mean center (0h-seam aware) and a corner-to-corner radius
//!    from the member stars.
//! 2. **Neighbors**: members, then background stars brighter than the cutoff
//!    inside the radius.
//! 3. **Projection**: stereographic projection tangent at the center, once
//!    for the members alone and once for the full selection.
//! 4. **Normalization**: fit a unit-box transform on the members, apply it to
//!    everything, clip background stars to a padded box.
//! 5. **Encoding**: integer coordinates and magnitudes plus segment indices.
//!
//! Constellations share nothing but the read-only [`StarCatalog`], so the
//! batch is a plain parallel map followed by a sequential merge.

pub mod encode;
pub mod extent;
pub mod neighbors;
pub mod normalize;
pub mod projection;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalogs::stellarium::ConstellationLines;
use crate::constellation::ConstellationSpec;
use crate::{Star, StarCatalog};

use encode::{encode_entry, Atlas, CatalogEntry};
use extent::estimate_extent;
use neighbors::select_neighbors;
use normalize::{NormalizationTransform, ProjectedPoint};
use projection::StereographicProjection;

// ── Configuration ───────────────────────────────────────────────────────────

/// Faintest background star drawn around a constellation.
pub const VMAG_CUTOFF: f64 = 6.0;

/// Background stars are kept inside a box this fraction larger than the
/// unit square, split evenly between both sides.
pub const PADDING_FRACTION: f64 = 0.2;

/// Faintest star kept while loading the catalog, so members dimmer than
/// [`VMAG_CUTOFF`] are still available. Does not affect background stars.
pub const DIMMEST_CONSTELLATION_STAR: f64 = 6.7;

/// Parameters controlling atlas generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasConfig {
    /// Background star magnitude limit. Default 6.
    pub vmag_cutoff: f64,
    /// Padding around the unit box, as a fraction of its side. Default 0.2.
    pub padding_fraction: f64,
    /// Catalog load floor for member stars. Default 6.7.
    pub dimmest_constellation_star: f64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            vmag_cutoff: VMAG_CUTOFF,
            padding_fraction: PADDING_FRACTION,
            dimmest_constellation_star: DIMMEST_CONSTELLATION_STAR,
        }
    }
}

impl AtlasConfig {
    /// Magnitude cut to apply while loading the star catalog.
    pub fn load_magnitude_limit(&self) -> f64 {
        self.dimmest_constellation_star.max(self.vmag_cutoff)
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Failure to sketch a single constellation. Never fatal for the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("No name table entry for constellation {0:?}")]
    UnknownAbbreviation(String),

    #[error("{constellation}: star {id} is not in the star catalog")]
    MissingStar { constellation: String, id: String },

    #[error("{0}: no line segments")]
    EmptyConstellation(String),

    #[error("{constellation}: star {id} cannot be projected from the constellation center")]
    Unprojectable { constellation: String, id: String },

    #[error("{constellation}: segment endpoint {id} is not a placed member star")]
    UnresolvedEndpoint { constellation: String, id: String },
}

// ── Single constellation ────────────────────────────────────────────────────

/// Run the full pipeline for one constellation.
pub fn sketch_constellation(
    spec: &ConstellationSpec,
    catalog: &StarCatalog,
    config: &AtlasConfig,
) -> Result<CatalogEntry, SketchError> {
    if spec.members.is_empty() {
        return Err(SketchError::EmptyConstellation(spec.name.clone()));
    }

    let members: Vec<&Star> = spec
        .members
        .iter()
        .map(|id| {
            catalog.get(id).ok_or_else(|| SketchError::MissingStar {
                constellation: spec.name.clone(),
                id: id.clone(),
            })
        })
        .collect::<Result<_, _>>()?;

    let member_radec: Vec<(f64, f64)> = members.iter().map(|s| (s.ra_deg, s.dec_deg)).collect();
    let extent = estimate_extent(&member_radec)
        .ok_or_else(|| SketchError::EmptyConstellation(spec.name.clone()))?;

    let selected = select_neighbors(catalog, &members, &extent, config.vmag_cutoff);
    debug!(
        "{}: center ({:.3}, {:.3}), radius {:.3} deg, {} members, {} background candidates",
        spec.name,
        extent.center_ra_deg,
        extent.center_dec_deg,
        extent.radius_deg,
        members.len(),
        selected.len() - members.len()
    );

    let projection = StereographicProjection::new(extent.center_ra_deg, extent.center_dec_deg);

    let member_xy: Vec<(f64, f64)> = projection
        .project_all(&member_radec)
        .into_iter()
        .zip(&members)
        .map(|(xy, star)| {
            xy.ok_or_else(|| SketchError::Unprojectable {
                constellation: spec.name.clone(),
                id: star.id.clone(),
            })
        })
        .collect::<Result<_, _>>()?;
    let transform = NormalizationTransform::fit(&member_xy)
        .ok_or_else(|| SketchError::EmptyConstellation(spec.name.clone()))?;

    // Members projected above, so only background stars can drop out here.
    let projected: Vec<ProjectedPoint> = selected
        .iter()
        .filter_map(|s| {
            projection
                .project(s.ra_deg, s.dec_deg)
                .map(|(x, y)| ProjectedPoint { x, y, mag: s.mag })
        })
        .collect();

    let placed = transform.apply_and_clip(&projected, members.len(), config.padding_fraction);
    debug!(
        "{}: kept {} of {} stars inside the padded box",
        spec.name,
        placed.len(),
        projected.len()
    );

    encode_entry(spec, &placed)
}

// ── Batch ───────────────────────────────────────────────────────────────────

/// A constellation that could not be sketched.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationFailure {
    pub abbreviation: String,
    pub error: SketchError,
}

/// Outcome of a batch run: the atlas of everything that succeeded plus the
/// per-constellation failures.
#[derive(Debug, Clone, Default)]
pub struct AtlasReport {
    pub atlas: Atlas,
    pub failures: Vec<ConstellationFailure>,
}

impl AtlasReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sketch every constellation in `lines` in parallel on the current rayon pool.
///
/// A failing constellation is logged and recorded in
/// [`AtlasReport::failures`]; the others are unaffected. Results are merged
/// in input order, so the report is the same for any thread count.
pub fn build_atlas(
    lines: &[ConstellationLines],
    names: &HashMap<String, String>,
    catalog: &StarCatalog,
    config: &AtlasConfig,
) -> AtlasReport {
    let total = lines.len();
    let completed = AtomicUsize::new(0);

    let results: Vec<(String, Result<(String, CatalogEntry), SketchError>)> = lines
        .par_iter()
        .map(|entry| {
            let result = ConstellationSpec::resolve(entry, names).and_then(|spec| {
                sketch_constellation(&spec, catalog, config).map(|sketch| (spec.name, sketch))
            });
            if let Ok((name, _)) = &result {
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                info!("Completed constellation {}/{}: {}", n, total, name);
            }
            (entry.abbreviation.clone(), result)
        })
        .collect();

    let mut report = AtlasReport::default();
    for (abbreviation, result) in results {
        match result {
            Ok((name, sketch)) => {
                if report.atlas.insert(name.clone(), sketch).is_some() {
                    warn!("{} ({}) replaces an earlier entry with the same name", name, abbreviation);
                }
            }
            Err(error) => {
                warn!("Skipping constellation {}: {}", abbreviation, error);
                report.failures.push(ConstellationFailure {
                    abbreviation,
                    error,
                });
            }
        }
    }

    info!(
        "Sketched {} of {} constellations ({} failed)",
        report.atlas.len(),
        total,
        report.failures.len()
    );
    report
}
