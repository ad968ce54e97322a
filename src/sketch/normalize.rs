//! Rescaling of projected coordinates into the unit box.
//!
//! The transform is fitted on the member stars alone: shift to the origin,
//! divide by the larger axis span (aspect preserved), then center the figure
//! inside `[0, 1] x [0, 1]`. The same transform is applied to the background
//! stars, which are then clipped to a padded box around the unit square.

/// Smallest span used as a divisor, in plane degrees. Keeps a single-star
/// or fully coincident constellation finite; its members land at (0.5, 0.5).
pub const MIN_SPAN: f64 = 1e-9;

/// A star's plane position together with its magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub mag: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationTransform {
    pub x_off: f64,
    pub y_off: f64,
    pub span: f64,
    pub dx: f64,
    pub dy: f64,
}

impl NormalizationTransform {
    /// Fit the transform on projected member coordinates.
    ///
    /// Returns `None` for an empty slice.
    pub fn fit(members: &[(f64, f64)]) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        let (x_min, x_max) = bounds(members.iter().map(|p| p.0));
        let (y_min, y_max) = bounds(members.iter().map(|p| p.1));

        let span = (x_max - x_min).max(y_max - y_min).max(MIN_SPAN);
        Some(Self {
            x_off: x_min,
            y_off: y_min,
            span,
            dx: (1.0 - (x_max - x_min) / span) / 2.0,
            dy: (1.0 - (y_max - y_min) / span) / 2.0,
        })
    }

    /// Map a plane position into unit-box coordinates.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.x_off) / self.span + self.dx,
            (y - self.y_off) / self.span + self.dy,
        )
    }

    /// Transform `points` and drop those outside the padded box.
    ///
    /// The first `member_count` points are members and are never dropped, so
    /// they keep their leading positions; the rest keep their relative order.
    pub fn apply_and_clip(
        &self,
        points: &[ProjectedPoint],
        member_count: usize,
        padding_fraction: f64,
    ) -> Vec<ProjectedPoint> {
        points
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| {
                let (x, y) = self.apply(p.x, p.y);
                let keep = idx < member_count
                    || (within_padded_box(x, padding_fraction)
                        && within_padded_box(y, padding_fraction));
                keep.then_some(ProjectedPoint { x, y, mag: p.mag })
            })
            .collect()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// `true` if `v` lies in `[-padding/2, 1 + padding/2]`.
pub fn within_padded_box(v: f64, padding_fraction: f64) -> bool {
    let margin = padding_fraction / 2.0;
    (-margin..=1.0 + margin).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint { x, y, mag: 1.0 }
    }

    #[test]
    fn wide_figure_fills_x_and_centers_y() {
        let t = NormalizationTransform::fit(&[(-2.0, 0.0), (2.0, 1.0)]).unwrap();
        assert_eq!(t.span, 4.0);
        let (x0, y0) = t.apply(-2.0, 0.0);
        let (x1, y1) = t.apply(2.0, 1.0);
        assert_abs_diff_eq!(x0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x1, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y0, 0.375, epsilon = 1e-12);
        assert_abs_diff_eq!(y1, 0.625, epsilon = 1e-12);
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let members = [(0.0, 0.0), (1.0, 0.0), (0.0, 3.0)];
        let t = NormalizationTransform::fit(&members).unwrap();
        let mapped: Vec<(f64, f64)> = members.iter().map(|&(x, y)| t.apply(x, y)).collect();
        let width = mapped[1].0 - mapped[0].0;
        let height = mapped[2].1 - mapped[0].1;
        assert_abs_diff_eq!(height / width, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mapped[0].0 + mapped[1].0, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mapped[2].1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_span_centers_members() {
        let t = NormalizationTransform::fit(&[(3.0, 4.0), (3.0, 4.0)]).unwrap();
        assert_eq!(t.span, MIN_SPAN);
        let (x, y) = t.apply(3.0, 4.0);
        assert_abs_diff_eq!(x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(y, 0.5, epsilon = 1e-12);
        assert!(x.is_finite() && y.is_finite());
        assert!(NormalizationTransform::fit(&[]).is_none());
    }

    #[test]
    fn clipping_keeps_members_and_order() {
        let t = NormalizationTransform::fit(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        let points = [
            pt(0.0, 0.0),
            pt(10.0, 10.0),
            pt(-0.9, 5.0),  // x = -0.09, inside the margin
            pt(-1.1, 5.0),  // x = -0.11, outside
            pt(5.0, 10.9),  // y = 1.09, inside
            pt(5.0, 11.5),  // y = 1.15, outside
            pt(5.0, 5.0),
        ];
        let kept = t.apply_and_clip(&points, 2, 0.2);
        let xs: Vec<f64> = kept.iter().map(|p| (p.x * 100.0).round()).collect();
        let ys: Vec<f64> = kept.iter().map(|p| (p.y * 100.0).round()).collect();
        assert_eq!(xs, vec![0.0, 100.0, -9.0, 50.0, 50.0]);
        assert_eq!(ys, vec![0.0, 100.0, 50.0, 109.0, 50.0]);
    }

    #[test]
    fn padded_box_bounds_are_inclusive() {
        assert!(within_padded_box(-0.1, 0.2));
        assert!(within_padded_box(1.1, 0.2));
        assert!(!within_padded_box(1.1000001, 0.2));
        assert!(within_padded_box(0.5, 0.0));
        assert!(!within_padded_box(-0.01, 0.0));
    }
}
