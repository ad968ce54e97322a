//! Shared synthetic input tables.
//!
//! Builds the three text inputs (name table, line table, VizieR star export)
//! in memory so the integration tests exercise the real parsers.

#![allow(dead_code)]

use std::collections::HashMap;

use constellation_atlas::catalogs::{hipparcos, stellarium};
use constellation_atlas::{AtlasConfig, StarCatalog};

/// Format right ascension in degrees as `"H M S"`.
pub fn ra_to_hms(ra_deg: f64) -> String {
    let total_seconds = ra_deg.rem_euclid(360.0) / 15.0 * 3600.0;
    let h = (total_seconds / 3600.0).floor();
    let m = ((total_seconds - h * 3600.0) / 60.0).floor();
    let s = total_seconds - h * 3600.0 - m * 60.0;
    format!("{:02} {:02} {:08.5}", h as u32, m as u32, s)
}

/// Format declination in degrees as `"±D M S"`.
pub fn dec_to_dms(dec_deg: f64) -> String {
    let sign = if dec_deg < 0.0 { '-' } else { '+' };
    let total_seconds = dec_deg.abs() * 3600.0;
    let d = (total_seconds / 3600.0).floor();
    let m = ((total_seconds - d * 3600.0) / 60.0).floor();
    let s = total_seconds - d * 3600.0 - m * 60.0;
    format!("{}{:02} {:02} {:07.4}", sign, d as u32, m as u32, s)
}

/// In-memory versions of the three input files.
pub struct SyntheticSky {
    names: String,
    lines: String,
    stars: String,
}

impl SyntheticSky {
    pub fn new() -> Self {
        Self {
            names: String::new(),
            lines: String::new(),
            stars: "#\n#   VizieR Astronomical Server\n#\nHIP;RAhms;DEdms;Vmag\n   ;\"h:m:s\";\"d:m:s\";mag\n------;-----------;-----------;-----\n".to_string(),
        }
    }

    /// Add a catalog row. `vmag = None` leaves the magnitude column blank.
    pub fn star(&mut self, id: &str, ra_deg: f64, dec_deg: f64, vmag: Option<f64>) -> &mut Self {
        let vmag = vmag.map(|v| format!("{:5.2}", v)).unwrap_or_default();
        self.stars.push_str(&format!(
            "{:>6};{};{};{}\n",
            id,
            ra_to_hms(ra_deg),
            dec_to_dms(dec_deg),
            vmag
        ));
        self
    }

    pub fn constellation(&mut self, abbreviation: &str, name: &str, segments: &[(&str, &str)]) -> &mut Self {
        self.names
            .push_str(&format!("{}\t\"{}\"\t_(\"{}\")\n", abbreviation, name, name));
        self.lines.push_str(&format!("{} {}", abbreviation, segments.len()));
        for (a, b) in segments {
            self.lines.push_str(&format!(" {} {}", a, b));
        }
        self.lines.push('\n');
        self
    }

    /// Add a line-table entry with no matching name.
    pub fn unnamed_lines(&mut self, abbreviation: &str, segments: &[(&str, &str)]) -> &mut Self {
        self.lines.push_str(&format!("{} {}", abbreviation, segments.len()));
        for (a, b) in segments {
            self.lines.push_str(&format!(" {} {}", a, b));
        }
        self.lines.push('\n');
        self
    }

    pub fn names(&self) -> HashMap<String, String> {
        stellarium::load_constellation_names(&self.names)
    }

    pub fn lines(&self) -> Vec<stellarium::ConstellationLines> {
        stellarium::load_constellation_lines(&self.lines)
    }

    pub fn catalog(&self, config: &AtlasConfig) -> StarCatalog {
        let rows = hipparcos::load_hipparcos_catalog(&self.stars);
        StarCatalog::from_hipparcos(&rows, config.load_magnitude_limit())
    }
}
