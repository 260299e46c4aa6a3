use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an index is significant at a given step.
///
/// The declaration order doubles as paint order for renderers: later roles win
/// when one index carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Low,
    High,
    Mid,
    Pivot,
    I,
    J,
    Swap,
    Merged,
    Left,
    Right,
    Found,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Low => "low",
            Role::High => "high",
            Role::Mid => "mid",
            Role::Pivot => "pivot",
            Role::I => "i",
            Role::J => "j",
            Role::Swap => "swap",
            Role::Merged => "merged",
            Role::Left => "left",
            Role::Right => "right",
            Role::Found => "found",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role name to the indices it tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(BTreeMap<Role, Vec<usize>>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, index: usize) {
        self.0.entry(role).or_default().push(index);
    }

    pub fn with(mut self, role: Role, index: usize) -> Self {
        self.push(role, index);
        self
    }

    pub fn get(&self, role: Role) -> Option<&[usize]> {
        self.0.get(&role).map(Vec::as_slice)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &[usize])> {
        self.0.iter().map(|(role, indices)| (*role, indices.as_slice()))
    }

    /// Every (role, index) pair, in role order.
    pub fn indices(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.iter()
            .flat_map(|(role, indices)| indices.iter().map(move |&index| (role, index)))
    }
}

/// Line number (1-based) in the algorithm's pseudocode listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceMarker(pub u16);

impl SourceMarker {
    pub fn line(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SourceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.0)
    }
}

/// One recorded instant of an algorithm run. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub snapshot: Vec<i64>,
    pub annotations: Annotations,
    pub marker: SourceMarker,
    /// Comparisons performed so far, this step included.
    pub operations: usize,
}

impl Step {
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Roles tagging `index`, in paint order.
    pub fn roles_at(&self, index: usize) -> Vec<Role> {
        self.annotations
            .indices()
            .filter(|&(_, i)| i == index)
            .map(|(role, _)| role)
            .collect()
    }
}
