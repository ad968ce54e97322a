//! Reader for the Hipparcos main catalog exported from VizieR (I/239) as
//! semicolon-separated values with the columns `HIP;RAhms;DEdms;Vmag`.
//!
//! Positions come in sexagesimal form: right ascension as `"H M S"` and
//! declination as `"±D M S"`. The export carries a `#` comment preamble
//! followed by a column-name row, a units row and a dashed separator row;
//! none of those parse as a star, so they are dropped along with any other
//! malformed record.

use tracing::debug;

/// Magnitude substituted when the `Vmag` column is blank or unparseable.
pub const MISSING_MAGNITUDE: f64 = 9999.0;

/// Number of fields in a catalog record.
const RECORD_FIELDS: usize = 4;

/// A star as read from the catalog file, positions already in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct HipparcosStar {
    pub hip: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// `None` when the catalog has no usable visual magnitude.
    pub vmag: Option<f64>,
}

impl HipparcosStar {
    /// Visual magnitude, or [`MISSING_MAGNITUDE`] when the catalog has none.
    pub fn vmag_or_sentinel(&self) -> f64 {
        self.vmag.unwrap_or(MISSING_MAGNITUDE)
    }
}

/// Parse right ascension `"H M S"` into degrees.
pub fn parse_ra_hms(field: &str) -> Option<f64> {
    let mut parts = field.split_whitespace();
    let h: u32 = parts.next()?.parse().ok()?;
    let m: u32 = parts.next()?.parse().ok()?;
    let s: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let hours = h as f64 + m as f64 / 60.0 + s / 3600.0;
    Some(hours / 24.0 * 360.0)
}

/// Parse declination `"±D M S"` into degrees.
///
/// The sign is taken from the text rather than the parsed degrees so that
/// `-00 30 00` stays south of the equator.
pub fn parse_dec_dms(field: &str) -> Option<f64> {
    let field = field.trim();
    let mut parts = field.split_whitespace();
    let d: i32 = parts.next()?.parse().ok()?;
    let m: u32 = parts.next()?.parse().ok()?;
    let s: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let sign = if field.starts_with('-') { -1.0 } else { 1.0 };
    Some(sign * (d.unsigned_abs() as f64 + m as f64 / 60.0 + s / 3600.0))
}

/// Parse a single catalog record into a `HipparcosStar`.
fn parse_hipparcos_star(record: &csv::StringRecord) -> Option<HipparcosStar> {
    if record.len() != RECORD_FIELDS {
        return None;
    }
    let hip = record.get(0)?.trim();
    if hip.is_empty() {
        return None;
    }
    Some(HipparcosStar {
        hip: hip.to_string(),
        ra_deg: parse_ra_hms(record.get(1)?)?,
        dec_deg: parse_dec_dms(record.get(2)?)?,
        vmag: record.get(3)?.trim().parse().ok(),
    })
}

/// Load the Hipparcos catalog from an in-memory string.
///
/// Records with the wrong field count or unreadable coordinates are skipped.
pub fn load_hipparcos_catalog(data: &str) -> Vec<HipparcosStar> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(data.as_bytes());

    let mut stars = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        match result.ok().as_ref().and_then(parse_hipparcos_star) {
            Some(star) => stars.push(star),
            None => skipped += 1,
        }
    }
    debug!("Parsed {} catalog rows, skipped {}", stars.len(), skipped);
    stars
}

pub fn load_hipparcos_catalog_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<Vec<HipparcosStar>> {
    let data = std::fs::read_to_string(path)?;
    Ok(load_hipparcos_catalog(&data))
}
