//! OPL-like import records
//!
//! One primitive per line. The first whitespace-delimited token is a
//! single type letter immediately followed by a decimal id; the rest of
//! the line is free-form and passed through untouched.

use crate::common::{Error, Result};

/// The three primitive types, in serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Node,
    Way,
    Relation,
}

impl RecordKind {
    /// All kinds in the fixed output order n, w, r
    pub const ALL: [RecordKind; 3] = [RecordKind::Node, RecordKind::Way, RecordKind::Relation];

    /// Map a type tag letter to a kind
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(Self::Node),
            'w' => Some(Self::Way),
            'r' => Some(Self::Relation),
            _ => None,
        }
    }
}

/// Parse the numeric id from a record line's first token
///
/// The token must be a single ASCII letter followed by base-10 digits;
/// anything else is a fatal parse error.
pub fn record_id(line: &str) -> Result<u64> {
    let token = line.split_whitespace().next().unwrap_or("");

    let mut chars = token.chars();
    let tag_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let digits = chars.as_str();

    if !tag_ok || digits.is_empty() {
        return Err(Error::Parse { line: line.to_string() });
    }

    digits.parse::<u64>().map_err(|_| Error::Parse { line: line.to_string() })
}

/// Accumulated import records, grouped by primitive type
#[derive(Debug, Default)]
pub struct RecordStore {
    nodes: Vec<String>,
    ways: Vec<String>,
    relations: Vec<String>,
}

impl RecordStore {
    /// Append a record line, grouping it by its type tag letter
    pub fn push(&mut self, line: impl Into<String>) -> Result<()> {
        let line = line.into();
        let tag = line.chars().next().unwrap_or('\0');
        let kind = RecordKind::from_tag(tag)
            .ok_or_else(|| Error::Parse { line: line.clone() })?;
        self.group_mut(kind).push(line);
        Ok(())
    }

    pub fn group(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Node => &self.nodes,
            RecordKind::Way => &self.ways,
            RecordKind::Relation => &self.relations,
        }
    }

    pub fn group_mut(&mut self, kind: RecordKind) -> &mut Vec<String> {
        match kind {
            RecordKind::Node => &mut self.nodes,
            RecordKind::Way => &mut self.ways,
            RecordKind::Relation => &mut self.relations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty() && self.relations.is_empty()
    }

    /// Sort every group ascending by numeric id, stable for ties
    pub fn sort_by_id(&mut self) -> Result<()> {
        for kind in RecordKind::ALL {
            let group = self.group_mut(kind);
            let mut keyed = Vec::with_capacity(group.len());
            for line in group.drain(..) {
                keyed.push((record_id(&line)?, line));
            }
            keyed.sort_by_key(|(id, _)| *id);
            group.extend(keyed.into_iter().map(|(_, line)| line));
        }
        Ok(())
    }
}
