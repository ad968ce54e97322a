//! Star catalog keyed by identifier, with a spatial index for cone searches.
//!
//! `StarCatalog` stores stars in an equal-area spherical binning:
//! latitude is partitioned into `3 * nside` bins in `z = sin(dec)`, and
//! longitude into `4 * nside` bins in right ascension, for a total of
//! `12 * nside^2` cells. Each cell maps to a compact slice of star indices.
//!
//! Query flow:
//! 1. Bound the cone by a declination band and, unless it covers a pole,
//!    a right-ascension half-width `asin(sin r / cos dec0)`.
//! 2. Scan only stars in cells overlapping that box.
//! 3. Apply the exact angular test.
//!
//! Star order is the load order, and queries return indices in that order,
//! so anything built from a query is reproducible run to run.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::Vector3;
use tracing::info;

use crate::catalogs::hipparcos::HipparcosStar;
use crate::star::{angle_between, radec_to_uvec, star_from_hipparcos};
use crate::Star;

/// Index resolution used when none is given. 3072 cells, a few stars each
/// for a naked-eye catalog.
pub const DEFAULT_NSIDE: u32 = 16;

#[derive(Debug, Clone)]
pub struct StarCatalog {
    nside: u32,
    n_lat: u32,
    n_lon: u32,
    stars: Vec<Star>,
    by_id: HashMap<String, usize>,
    cell_offsets: Vec<u32>,
    star_indices: Vec<u32>,
}

impl StarCatalog {
    /// Build a catalog and spatial index from owned stars.
    ///
    /// `nside` controls resolution and must be greater than zero.
    /// If an identifier occurs more than once, the first occurrence wins.
    pub fn new(nside: u32, stars: Vec<Star>) -> Self {
        assert!(nside > 0, "nside must be > 0");
        let n_lat = 3 * nside;
        let n_lon = 4 * nside;
        let n_cells = (n_lat * n_lon) as usize;

        let mut kept = Vec::with_capacity(stars.len());
        let mut by_id = HashMap::with_capacity(stars.len());
        for star in stars {
            if by_id.contains_key(&star.id) {
                continue;
            }
            by_id.insert(star.id.clone(), kept.len());
            kept.push(star);
        }

        let mut bins: Vec<Vec<u32>> = vec![Vec::new(); n_cells];
        for (star_idx, star) in kept.iter().enumerate() {
            let cell = Self::cell_for_radec(n_lat, n_lon, star.ra_deg, star.dec_deg);
            bins[cell as usize].push(star_idx as u32);
        }

        let mut cell_offsets = Vec::with_capacity(n_cells + 1);
        let mut star_indices = Vec::with_capacity(kept.len());
        cell_offsets.push(0);
        for cell_bin in bins {
            star_indices.extend(cell_bin);
            cell_offsets.push(star_indices.len() as u32);
        }

        Self {
            nside,
            n_lat,
            n_lon,
            stars: kept,
            by_id,
            cell_offsets,
            star_indices,
        }
    }

    /// Build a catalog from Hipparcos rows, keeping only stars with
    /// magnitude `<= mag_limit`.
    pub fn from_hipparcos(hip_stars: &[HipparcosStar], mag_limit: f64) -> Self {
        let stars: Vec<Star> = hip_stars
            .iter()
            .map(star_from_hipparcos)
            .filter(|s| s.mag <= mag_limit)
            .collect();
        info!(
            "Kept {} of {} catalog stars brighter than magnitude {:.1}",
            stars.len(),
            hip_stars.len(),
            mag_limit
        );
        Self::new(DEFAULT_NSIDE, stars)
    }

    /// Return the index resolution parameter.
    pub fn nside(&self) -> u32 {
        self.nside
    }

    /// Return the total number of stars in the catalog.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    /// Return `true` when the catalog contains no stars.
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Return all catalog stars as an immutable slice, in load order.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Look up a star by identifier.
    pub fn get(&self, id: &str) -> Option<&Star> {
        self.by_id.get(id).map(|&idx| &self.stars[idx])
    }

    /// Query stars strictly closer than `radius_deg` to `(ra_deg, dec_deg)`.
    ///
    /// Returns indices into [`stars`](Self::stars), ascending.
    pub fn query_indices(&self, ra_deg: f64, dec_deg: f64, radius_deg: f64) -> Vec<usize> {
        if self.is_empty() || radius_deg <= 0.0 {
            return Vec::new();
        }
        let dir = radec_to_uvec(ra_deg, dec_deg);
        let radius = radius_deg.to_radians().min(PI);

        let mut out = Vec::new();
        if radius >= FRAC_PI_2 {
            self.collect_matches(0..self.star_indices.len(), &dir, radius, &mut out);
        } else {
            let dec0 = dec_deg.to_radians();
            let z_min = (dec0 - radius).max(-FRAC_PI_2).sin();
            let z_max = (dec0 + radius).min(FRAC_PI_2).sin();
            let covers_pole = dec0 + radius >= FRAC_PI_2 || dec0 - radius <= -FRAC_PI_2;

            let lon_step = TAU / self.n_lon as f64;
            let lon_half_span = if covers_pole {
                PI
            } else {
                (radius.sin() / dec0.cos()).clamp(-1.0, 1.0).asin() + lon_step
            };
            let phi = ra_deg.to_radians();

            for lat_bin in Self::z_bin_range(self.n_lat, z_min, z_max) {
                if lon_half_span >= PI {
                    let start = (lat_bin * self.n_lon) as usize;
                    let end = start + self.n_lon as usize;
                    self.collect_matches(
                        self.cell_offsets[start] as usize..self.cell_offsets[end] as usize,
                        &dir,
                        radius,
                        &mut out,
                    );
                    continue;
                }
                self.for_each_wrapped_lon_bin(phi - lon_half_span, phi + lon_half_span, |lon_bin| {
                    let cell = (lat_bin * self.n_lon + lon_bin) as usize;
                    self.collect_matches(
                        self.cell_offsets[cell] as usize..self.cell_offsets[cell + 1] as usize,
                        &dir,
                        radius,
                        &mut out,
                    );
                });
            }
        }

        out.sort_unstable();
        out.dedup();
        out
    }

    /// Query stars strictly closer than `radius_deg` to `(ra_deg, dec_deg)`.
    pub fn query_stars(&self, ra_deg: f64, dec_deg: f64, radius_deg: f64) -> Vec<&Star> {
        self.query_indices(ra_deg, dec_deg, radius_deg)
            .into_iter()
            .map(|idx| &self.stars[idx])
            .collect()
    }

    fn collect_matches(
        &self,
        flat: std::ops::Range<usize>,
        dir: &Vector3<f64>,
        radius: f64,
        out: &mut Vec<usize>,
    ) {
        for flat_idx in flat {
            let star_idx = self.star_indices[flat_idx] as usize;
            if angle_between(dir, &self.stars[star_idx].uvec()) < radius {
                out.push(star_idx);
            }
        }
    }

    fn for_each_wrapped_lon_bin<F>(&self, lon_min: f64, lon_max: f64, mut f: F)
    where
        F: FnMut(u32),
    {
        let start_bin = Self::phi_to_lon_bin(self.n_lon, lon_min.rem_euclid(TAU));
        let end_bin = Self::phi_to_lon_bin(self.n_lon, lon_max.rem_euclid(TAU));

        if start_bin <= end_bin {
            for lon_bin in start_bin..=end_bin {
                f(lon_bin);
            }
            return;
        }

        for lon_bin in start_bin..self.n_lon {
            f(lon_bin);
        }
        for lon_bin in 0..=end_bin {
            f(lon_bin);
        }
    }

    fn z_bin_range(n_lat: u32, z_min: f64, z_max: f64) -> std::ops::RangeInclusive<u32> {
        let start = Self::z_to_lat_bin(n_lat, z_min);
        let end = Self::z_to_lat_bin(n_lat, z_max);
        start..=end
    }

    fn cell_for_radec(n_lat: u32, n_lon: u32, ra_deg: f64, dec_deg: f64) -> u32 {
        let phi = ra_deg.to_radians().rem_euclid(TAU);
        let z = dec_deg.to_radians().sin();
        Self::z_to_lat_bin(n_lat, z) * n_lon + Self::phi_to_lon_bin(n_lon, phi)
    }

    fn z_to_lat_bin(n_lat: u32, z: f64) -> u32 {
        let u = ((z.clamp(-1.0, 1.0) + 1.0) * 0.5).clamp(0.0, 1.0);
        ((u * n_lat as f64).floor() as u32).min(n_lat - 1)
    }

    fn phi_to_lon_bin(n_lon: u32, phi: f64) -> u32 {
        let u = (phi / TAU).clamp(0.0, 1.0);
        ((u * n_lon as f64).floor() as u32).min(n_lon - 1)
    }
}
