//! Selection of the stars drawn with a constellation.

use std::collections::HashSet;

use crate::{Star, StarCatalog};

use super::extent::SkyExtent;

/// Collect the stars to draw for a constellation, members first.
///
/// The first `members.len()` entries are `members`, in the given order.
/// They are included unconditionally, whatever their magnitude or distance.
/// After them come background stars with magnitude `<= vmag_cutoff` lying
/// strictly inside `extent.radius_deg` of the center, in catalog order.
/// No star appears twice.
pub fn select_neighbors<'a>(
    catalog: &'a StarCatalog,
    members: &[&'a Star],
    extent: &SkyExtent,
    vmag_cutoff: f64,
) -> Vec<&'a Star> {
    let member_ids: HashSet<&str> = members.iter().map(|s| s.id.as_str()).collect();

    let mut selected: Vec<&Star> = members.to_vec();
    selected.extend(
        catalog
            .query_stars(extent.center_ra_deg, extent.center_dec_deg, extent.radius_deg)
            .into_iter()
            .filter(|s| s.mag <= vmag_cutoff && !member_ids.contains(s.id.as_str())),
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::extent::estimate_extent;

    fn star(id: &str, ra_deg: f64, dec_deg: f64, mag: f64) -> Star {
        Star {
            id: id.to_string(),
            ra_deg,
            dec_deg,
            mag,
        }
    }

    fn catalog() -> StarCatalog {
        StarCatalog::new(
            8,
            vec![
                star("bg-bright", 101.0, 1.0, 3.0),
                star("m1", 100.0, 0.0, 2.0),
                star("bg-dim", 100.5, 0.5, 6.5),
                star("m2", 102.0, 2.0, 6.5),
                star("bg-far", 140.0, 0.0, 1.0),
                star("bg-edge", 101.0, 2.0, 5.9),
            ],
        )
    }

    #[test]
    fn members_lead_and_dim_background_is_dropped() {
        let catalog = catalog();
        let members = vec![catalog.get("m2").unwrap(), catalog.get("m1").unwrap()];
        let points: Vec<(f64, f64)> = members.iter().map(|s| (s.ra_deg, s.dec_deg)).collect();
        let extent = estimate_extent(&points).unwrap();

        let ids: Vec<&str> = select_neighbors(&catalog, &members, &extent, 6.0)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["m2", "m1", "bg-bright", "bg-edge"]);
    }

    #[test]
    fn members_survive_a_zero_radius() {
        let catalog = catalog();
        let members = vec![catalog.get("m1").unwrap()];
        let extent = estimate_extent(&[(100.0, 0.0)]).unwrap();
        assert_eq!(extent.radius_deg, 0.0);

        let selected = select_neighbors(&catalog, &members, &extent, 6.0);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "m1");
    }

    #[test]
    fn member_on_the_boundary_is_kept() {
        let catalog = catalog();
        let members = vec![catalog.get("m1").unwrap(), catalog.get("m2").unwrap()];
        // Center one corner away from the other so m2 sits exactly at the radius.
        let extent = SkyExtent {
            center_ra_deg: 100.0,
            center_dec_deg: 0.0,
            radius_deg: crate::star::angular_separation_deg(100.0, 0.0, 102.0, 2.0),
        };
        let selected = select_neighbors(&catalog, &members, &extent, 6.0);
        assert_eq!(selected[0].id, "m1");
        assert_eq!(selected[1].id, "m2");
        assert_eq!(selected.iter().filter(|s| s.id == "m2").count(), 1);
    }
}
