//! Stereographic (STG) tangent-plane projection.
//!
//! Equivalent to a FITS WCS with `CTYPE = RA---STG, DEC--STG`, `CRVAL` at the
//! constellation center, `CRPIX = [0, 0]`, `CDELT = [1, 1]` and no rotation:
//! plane coordinates are in degrees, `x` grows with right ascension and `y`
//! with declination. The projection is conformal, so shapes near the center
//! are preserved and scale grows smoothly toward the edge.
//!
//! Reference: Calabretta & Greisen (2002), FITS WCS Paper II, §5.1.4.

/// Denominator below which a point is treated as the antipode of the
/// reference point, where the projection diverges.
const ANTIPODE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereographicProjection {
    crval_ra_rad: f64,
    sin_dec0: f64,
    cos_dec0: f64,
}

impl StereographicProjection {
    /// Projection tangent at `(ra_deg, dec_deg)`.
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        let (sin_dec0, cos_dec0) = dec_deg.to_radians().sin_cos();
        Self {
            crval_ra_rad: ra_deg.to_radians(),
            sin_dec0,
            cos_dec0,
        }
    }

    /// Forward projection of `(ra_deg, dec_deg)` to plane `(x, y)` in degrees.
    ///
    /// Returns `None` at the antipode of the reference point.
    pub fn project(&self, ra_deg: f64, dec_deg: f64) -> Option<(f64, f64)> {
        let (sin_da, cos_da) = (ra_deg.to_radians() - self.crval_ra_rad).sin_cos();
        let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();

        let cos_c = sin_dec * self.sin_dec0 + cos_dec * self.cos_dec0 * cos_da;
        let denom = 1.0 + cos_c;
        if denom <= ANTIPODE_TOLERANCE {
            return None;
        }

        // R(θ) = 2 tan((90° − θ) / 2) expressed through the direction cosines.
        let k = 2.0 / denom;
        let xi = k * cos_dec * sin_da;
        let eta = k * (sin_dec * self.cos_dec0 - cos_dec * self.sin_dec0 * cos_da);
        Some((xi.to_degrees(), eta.to_degrees()))
    }

    /// Project a batch of `(ra_deg, dec_deg)` points, in order.
    pub fn project_all(&self, points: &[(f64, f64)]) -> Vec<Option<(f64, f64)>> {
        points
            .iter()
            .map(|&(ra, dec)| self.project(ra, dec))
            .collect()
    }
}
