//! Readers for the Stellarium sky-culture tables.
//!
//! - `constellation_names.eng.fab`: one constellation per line, the
//!   abbreviation as the first token and the English name as the first
//!   double-quoted string, e.g. `Ori "Orion" _("Orion")`.
//! - `constellationship.fab`: one constellation per line, whitespace
//!   separated: abbreviation, segment count, then star identifiers consumed
//!   as consecutive (start, stop) pairs, e.g. `CMa 2 32349 33160 33160 34444`.

use std::collections::HashMap;

use tracing::warn;

/// Stick-figure segments for one constellation, as listed in the line table.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationLines {
    pub abbreviation: String,
    /// Segment count declared by the table. May disagree with `segments.len()`
    /// for hand-edited files; `segments` is authoritative.
    pub declared_segments: usize,
    pub segments: Vec<(String, String)>,
}

fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse the name table into a map from abbreviation to full name.
pub fn load_constellation_names(data: &str) -> HashMap<String, String> {
    data.lines()
        .filter(|line| !is_skippable(line))
        .filter_map(|line| {
            let abbreviation = line.split_whitespace().next()?;
            let name = line.split('"').nth(1)?;
            Some((abbreviation.to_string(), name.to_string()))
        })
        .collect()
}

fn parse_constellation_lines(line: &str) -> Option<ConstellationLines> {
    let mut tokens = line.split_whitespace();
    let abbreviation = tokens.next()?.to_string();
    let Some(declared_segments) = tokens.next().and_then(|t| t.parse::<usize>().ok()) else {
        warn!("Line table entry for {} has no segment count; skipping", abbreviation);
        return None;
    };

    let ids: Vec<&str> = tokens.collect();
    if ids.len() % 2 != 0 {
        warn!(
            "Line table entry for {} has a dangling identifier {}; ignoring it",
            abbreviation,
            ids[ids.len() - 1]
        );
    }
    let segments: Vec<(String, String)> = ids
        .chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect();

    if segments.len() != declared_segments {
        warn!(
            "Line table entry for {} declares {} segments but lists {}",
            abbreviation,
            declared_segments,
            segments.len()
        );
    }

    Some(ConstellationLines {
        abbreviation,
        declared_segments,
        segments,
    })
}

/// Parse the constellation line table, one entry per non-blank line.
pub fn load_constellation_lines(data: &str) -> Vec<ConstellationLines> {
    data.lines()
        .filter(|line| !is_skippable(line))
        .filter_map(parse_constellation_lines)
        .collect()
}

pub fn load_constellation_names_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<HashMap<String, String>> {
    let data = std::fs::read_to_string(path)?;
    Ok(load_constellation_names(&data))
}

pub fn load_constellation_lines_from_file<P: AsRef<std::path::Path>>(
    path: P,
) -> anyhow::Result<Vec<ConstellationLines>> {
    let data = std::fs::read_to_string(path)?;
    Ok(load_constellation_lines(&data))
}
