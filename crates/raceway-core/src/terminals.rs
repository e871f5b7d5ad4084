//! Terminal sets: the vertices a circuit must connect.

use serde::{Deserialize, Serialize};

/// The must-connect vertices of one circuit. One terminal may be
/// distinguished as the power source for home-run routing; the remaining
/// terminals are devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSet {
    indices: Vec<usize>,
    source: Option<usize>,
}

impl TerminalSet {
    /// A terminal set with no distinguished source.
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            source: None,
        }
    }

    /// A terminal set whose first member is the power source.
    pub fn with_source(source: usize, devices: Vec<usize>) -> Self {
        let mut indices = Vec::with_capacity(devices.len() + 1);
        indices.push(source);
        for d in devices {
            if d != source {
                indices.push(d);
            }
        }
        Self {
            indices,
            source: Some(source),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.indices.contains(&vertex)
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Terminals other than the source. With no source set, all terminals.
    pub fn devices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices
            .iter()
            .copied()
            .filter(move |&t| Some(t) != self.source)
    }
}
