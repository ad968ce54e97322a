//! Compact integer encoding of a sketched constellation and the JSON
//! document consumed by the rendering client.
//!
//! Field names and integer ranges are the client contract:
//!
//! ```json
//! {"Orion":{"lines":{"start":[0,1],"stop":[1,2]},"stars":{"Vmag":[5,18,2],"x":[1000,500,0],"y":[0,400,1000]}}}
//! ```
//!
//! Struct fields are declared in lexicographic order of their serialized
//! names and the top level is a `BTreeMap`, so the compact output is key
//! sorted and byte-for-byte reproducible.

use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constellation::ConstellationSpec;

use super::normalize::ProjectedPoint;
use super::SketchError;

/// Full scale of the encoded x and y axes.
pub const COORDINATE_SCALE: f64 = 1000.0;

/// Encoded magnitudes are tenths of a magnitude.
pub const MAGNITUDE_SCALE: f64 = 10.0;

/// Nudge applied before rounding so binary representation error
/// (12.9999999 for 13) cannot move a value across an integer boundary.
pub const ROUNDING_EPSILON: f64 = 1e-6;

/// Everything the client needs to draw one constellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub lines: LineIndices,
    pub stars: EncodedStars,
}

/// Segment endpoints as indices into [`EncodedStars`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineIndices {
    pub start: Vec<usize>,
    pub stop: Vec<usize>,
}

/// Column-oriented star list. Members occupy the leading indices and encode
/// into `[0, 1000]`; background stars in the padding margin fall outside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedStars {
    #[serde(rename = "Vmag")]
    pub vmag: Vec<i32>,
    pub x: Vec<i32>,
    pub y: Vec<i32>,
}

impl EncodedStars {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// The whole output document, keyed by constellation full name.
pub type Atlas = BTreeMap<String, CatalogEntry>;

/// Round half away from zero after nudging `value` outward by
/// [`ROUNDING_EPSILON`].
fn round_nudged(value: f64) -> f64 {
    (value + ROUNDING_EPSILON.copysign(value)).round()
}

/// Encode a unit-box coordinate: `round((1 - v) * 1000)`.
///
/// The axis is flipped so that east (increasing RA) is drawn to the left
/// and north to the top of a y-down canvas. Values in the padding margin
/// are not clamped: with the default padding they span `[-100, 1100]`,
/// which the client draws in its own margin.
pub fn encode_coordinate(v: f64) -> i32 {
    round_nudged((1.0 - v) * COORDINATE_SCALE) as i32
}

/// Decode an encoded coordinate back into unit-box space.
pub fn decode_coordinate(encoded: i32) -> f64 {
    1.0 - encoded as f64 / COORDINATE_SCALE
}

/// Encode a magnitude in tenths, rounding the exact decimal value of `mag`
/// half to even.
///
/// `mag * 10` can itself round onto a half-integer (0.45 becomes 4.5), so
/// the residual of the product decides which side of the tie the true value
/// lies on. Only exactly representable ties such as 1.25 go to the even
/// neighbor.
pub fn encode_magnitude(mag: f64) -> i32 {
    let scaled = mag * MAGNITUDE_SCALE;
    let residual = mag.mul_add(MAGNITUDE_SCALE, -scaled);
    let rounded = if (scaled - scaled.trunc()).abs() != 0.5 {
        scaled.round()
    } else if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded as i32
}

/// Encode normalized stars and resolve the segment endpoints of `spec`.
///
/// `points` must start with the members of `spec` in `spec.members` order.
pub fn encode_entry(
    spec: &ConstellationSpec,
    points: &[ProjectedPoint],
) -> Result<CatalogEntry, SketchError> {
    let positions = spec.member_positions();
    let index_of = |id: &str| -> Result<usize, SketchError> {
        positions
            .get(id)
            .copied()
            .filter(|&idx| idx < points.len())
            .ok_or_else(|| SketchError::UnresolvedEndpoint {
                constellation: spec.name.clone(),
                id: id.to_string(),
            })
    };

    let mut lines = LineIndices::default();
    for (start, stop) in &spec.segments {
        lines.start.push(index_of(start)?);
        lines.stop.push(index_of(stop)?);
    }

    let stars = EncodedStars {
        vmag: points.iter().map(|p| encode_magnitude(p.mag)).collect(),
        x: points.iter().map(|p| encode_coordinate(p.x)).collect(),
        y: points.iter().map(|p| encode_coordinate(p.y)).collect(),
    };

    Ok(CatalogEntry { lines, stars })
}

/// Write `atlas` as compact, key-sorted JSON.
pub fn write_atlas<W: Write>(atlas: &Atlas, writer: W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, atlas).context("Failed to serialize atlas")
}

/// Write `atlas` to `path`, replacing any existing file.
pub fn write_atlas_to_file<P: AsRef<Path>>(atlas: &Atlas, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_atlas(atlas, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}
