//! Angular center and bounding radius of a constellation.

use crate::star::angular_separation_deg;

/// Where a constellation sits on the sky and how far it reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyExtent {
    /// Mean right ascension in `[0, 360)`, corrected for the 0h seam.
    pub center_ra_deg: f64,
    /// Mean declination.
    pub center_dec_deg: f64,
    /// Separation between the (min RA, min dec) and (max RA, max dec) corners.
    /// A generous bound rather than a minimal enclosing circle.
    pub radius_deg: f64,
}

/// Shift RA into `[-180, 180)` so a span across 0h becomes contiguous.
fn shift_ra(ra_deg: f64) -> f64 {
    (ra_deg + 180.0).rem_euclid(360.0) - 180.0
}

fn min_max_mean(values: impl Iterator<Item = f64>) -> (f64, f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        n += 1;
    }
    (min, max, sum / n as f64)
}

/// Estimate the center and radius of a set of `(ra_deg, dec_deg)` points.
///
/// When the raw RA range exceeds 180° the points are taken to straddle
/// 0h: the mean is computed in shifted space and mapped back into
/// `[0, 360)`. The radius corners always use the raw RA min and max.
///
/// Returns `None` for an empty slice.
pub fn estimate_extent(points: &[(f64, f64)]) -> Option<SkyExtent> {
    if points.is_empty() {
        return None;
    }

    let (ra_min, ra_max, mut ra_mean) = min_max_mean(points.iter().map(|p| p.0));
    if ra_max - ra_min > 180.0 {
        let (_, _, shifted_mean) = min_max_mean(points.iter().map(|p| shift_ra(p.0)));
        ra_mean = shifted_mean.rem_euclid(360.0);
    }
    let (dec_min, dec_max, dec_mean) = min_max_mean(points.iter().map(|p| p.1));

    Some(SkyExtent {
        center_ra_deg: ra_mean,
        center_dec_deg: dec_mean,
        radius_deg: angular_separation_deg(ra_min, dec_min, ra_max, dec_max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn simple_mean_without_wrap() {
        let extent = estimate_extent(&[(10.0, 0.0), (20.0, 10.0)]).unwrap();
        assert_abs_diff_eq!(extent.center_ra_deg, 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(extent.center_dec_deg, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            extent.radius_deg,
            angular_separation_deg(10.0, 0.0, 20.0, 10.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn center_wraps_across_zero_hours() {
        let extent = estimate_extent(&[(359.0, 0.0), (1.0, 0.0)]).unwrap();
        let ra = extent.center_ra_deg;
        assert!((0.0..=2.0).contains(&ra) || (358.0..360.0).contains(&ra), "ra = {ra}");
        assert_abs_diff_eq!(extent.radius_deg, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn wrapped_radius_uses_raw_corners() {
        let extent = estimate_extent(&[(350.0, -5.0), (355.0, 0.0), (5.0, 2.0), (10.0, 5.0)]).unwrap();
        assert_abs_diff_eq!(extent.center_ra_deg, 0.0, epsilon = 1e-9);
        // Corners (5, -5) and (355, 5), not the shifted (-10, -5) and (10, 5).
        assert_abs_diff_eq!(
            extent.radius_deg,
            angular_separation_deg(5.0, -5.0, 355.0, 5.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(extent.radius_deg, 14.1331, epsilon = 1e-3);
    }

    #[test]
    fn wrapped_mean_may_land_below_zero_hours() {
        let extent = estimate_extent(&[(340.0, 0.0), (350.0, 0.0), (2.0, 0.0)]).unwrap();
        assert_abs_diff_eq!(extent.center_ra_deg, 360.0 - 28.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn single_point_has_zero_radius() {
        let extent = estimate_extent(&[(123.0, -45.0)]).unwrap();
        assert_eq!(extent.center_ra_deg, 123.0);
        assert_eq!(extent.center_dec_deg, -45.0);
        assert_eq!(extent.radius_deg, 0.0);
        assert!(estimate_extent(&[]).is_none());
    }
}
