//! A constellation as the pipeline sees it: full name, member stars and the
//! stick-figure segments between them.

use std::collections::HashMap;

use crate::catalogs::stellarium::ConstellationLines;
use crate::sketch::SketchError;

#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationSpec {
    pub abbreviation: String,
    pub name: String,
    /// Distinct member identifiers, in order of first appearance in the
    /// segment list. This order fixes the members' indices in the output.
    pub members: Vec<String>,
    /// (start, stop) identifier pairs; every identifier is a member.
    pub segments: Vec<(String, String)>,
}

impl ConstellationSpec {
    /// Build a spec from explicit segments. Members are derived from the
    /// segment endpoints.
    pub fn new(
        abbreviation: impl Into<String>,
        name: impl Into<String>,
        segments: Vec<(String, String)>,
    ) -> Self {
        let mut members: Vec<String> = Vec::new();
        for (start, stop) in &segments {
            for id in [start, stop] {
                if !members.contains(id) {
                    members.push(id.clone());
                }
            }
        }
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
            members,
            segments,
        }
    }

    /// Attach the full name from the name table to a line-table entry.
    pub fn resolve(
        lines: &ConstellationLines,
        names: &HashMap<String, String>,
    ) -> Result<Self, SketchError> {
        let name = names
            .get(&lines.abbreviation)
            .ok_or_else(|| SketchError::UnknownAbbreviation(lines.abbreviation.clone()))?;
        Ok(Self::new(
            lines.abbreviation.clone(),
            name.clone(),
            lines.segments.clone(),
        ))
    }

    /// Map from member identifier to its position in [`members`](Self::members).
    pub fn member_positions(&self) -> HashMap<&str, usize> {
        self.members
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.as_str(), idx))
            .collect()
    }
}
