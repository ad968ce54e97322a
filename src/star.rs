//! Generic star record and the spherical helpers shared by the pipeline.

use nalgebra::Vector3;

/// A catalog star in decimal degrees.
///
/// `id` is the catalog identifier exactly as it appears in the constellation
/// line table (for Hipparcos-based tables, the HIP number as text).
/// Smaller `mag` means brighter.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub mag: f64,
}

impl Star {
    /// Unit vector pointing to the star's position on the celestial sphere.
    pub fn uvec(&self) -> Vector3<f64> {
        radec_to_uvec(self.ra_deg, self.dec_deg)
    }

    /// Great-circle separation to `(ra_deg, dec_deg)`, in degrees.
    pub fn separation_deg(&self, ra_deg: f64, dec_deg: f64) -> f64 {
        angle_between(&self.uvec(), &radec_to_uvec(ra_deg, dec_deg)).to_degrees()
    }
}

/// Convert a Hipparcos catalog row to a generic Star.
///
/// A missing visual magnitude becomes
/// [`MISSING_MAGNITUDE`](crate::catalogs::hipparcos::MISSING_MAGNITUDE), which
/// keeps the row but puts it below every magnitude cut.
pub fn star_from_hipparcos(star: &crate::catalogs::hipparcos::HipparcosStar) -> Star {
    Star {
        id: star.hip.clone(),
        ra_deg: star.ra_deg,
        dec_deg: star.dec_deg,
        mag: star.vmag_or_sentinel(),
    }
}

/// Unit vector for a point given in degrees.
pub fn radec_to_uvec(ra_deg: f64, dec_deg: f64) -> Vector3<f64> {
    let (sin_ra, cos_ra) = ra_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Angle between two unit vectors, in radians.
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate for both tiny and
/// near-antipodal separations where `acos` of the dot product does not.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Great-circle separation between two points, all in degrees.
pub fn angular_separation_deg(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    angle_between(
        &radec_to_uvec(ra1_deg, dec1_deg),
        &radec_to_uvec(ra2_deg, dec2_deg),
    )
    .to_degrees()
}
