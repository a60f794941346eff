#![forbid(unsafe_code)]

//! Pure chain-order computation over one owner's tabs.
//!
//! Tabs form a singly linked chain through their predecessor pointers: the
//! head carries no predecessor, every other tab names the tab directly before
//! it. The functions here never touch storage; they work on an in-memory
//! snapshot and report structural damage instead of guessing an order.

use std::collections::{BTreeMap, BTreeSet};

/// The projection of a tab the chain logic needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainEntry {
    pub id: String,
    pub predecessor: Option<String>,
}

impl ChainEntry {
    pub fn new(id: impl Into<String>, predecessor: Option<String>) -> Self {
        Self {
            id: id.into(),
            predecessor,
        }
    }
}

/// Structural damage found while ordering a snapshot. Any of these means the
/// stored chain was corrupted by a prior bug or an out-of-band write; none of
/// them can be produced by the registry's own committed operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainError {
    /// Non-empty set with no head entry; every entry sits on a cycle.
    NoHead { entries: usize },
    /// More than one entry claims to be the head.
    MultipleHeads { ids: Vec<String> },
    /// Two entries name the same predecessor; chains must not branch.
    Branch {
        predecessor: String,
        claimants: Vec<String>,
    },
    /// An entry names a predecessor that is not part of the snapshot.
    MissingPredecessor { id: String, predecessor: String },
    /// The walk from the head stalled before covering every entry; the
    /// remainder is cyclic.
    Cycle { reached: usize, entries: usize },
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHead { entries } => write!(f, "no head among {entries} entries"),
            Self::MultipleHeads { ids } => write!(f, "multiple heads: {}", ids.join(", ")),
            Self::Branch {
                predecessor,
                claimants,
            } => write!(
                f,
                "predecessor {predecessor} claimed by {}",
                claimants.join(", ")
            ),
            Self::MissingPredecessor { id, predecessor } => {
                write!(f, "{id} names missing predecessor {predecessor}")
            }
            Self::Cycle { reached, entries } => {
                write!(f, "walk stalled after {reached} of {entries} entries")
            }
        }
    }
}

impl std::error::Error for ChainError {}

/// Computes the chain order of a snapshot, head first.
///
/// An empty snapshot orders to an empty sequence; that is not an error. A
/// non-empty snapshot must contain exactly one head, no shared predecessor
/// claims, no dangling predecessor references, and a walk from the head must
/// reach every entry.
pub fn order(entries: &[ChainEntry]) -> Result<Vec<String>, ChainError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let known: BTreeSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();

    let mut heads: Vec<&str> = Vec::new();
    let mut successor: BTreeMap<&str, &str> = BTreeMap::new();
    for entry in entries {
        match entry.predecessor.as_deref() {
            None => heads.push(entry.id.as_str()),
            Some(predecessor) => {
                if !known.contains(predecessor) {
                    return Err(ChainError::MissingPredecessor {
                        id: entry.id.clone(),
                        predecessor: predecessor.to_string(),
                    });
                }
                if let Some(prior) = successor.insert(predecessor, entry.id.as_str()) {
                    let mut claimants = vec![prior.to_string(), entry.id.clone()];
                    claimants.sort();
                    return Err(ChainError::Branch {
                        predecessor: predecessor.to_string(),
                        claimants,
                    });
                }
            }
        }
    }

    if heads.is_empty() {
        return Err(ChainError::NoHead {
            entries: entries.len(),
        });
    }
    if heads.len() > 1 {
        let mut ids: Vec<String> = heads.iter().map(|id| id.to_string()).collect();
        ids.sort();
        return Err(ChainError::MultipleHeads { ids });
    }

    // Capped at the entry count so corrupt input cannot loop.
    let mut ordered = Vec::with_capacity(entries.len());
    let mut cursor = Some(heads[0]);
    while let Some(id) = cursor {
        if ordered.len() == entries.len() {
            return Err(ChainError::Cycle {
                reached: ordered.len(),
                entries: entries.len(),
            });
        }
        ordered.push(id.to_string());
        cursor = successor.get(id).copied();
    }

    if ordered.len() != entries.len() {
        return Err(ChainError::Cycle {
            reached: ordered.len(),
            entries: entries.len(),
        });
    }

    Ok(ordered)
}

/// Checks whether relinking `id` to declare `new_predecessor` would close a
/// cycle, by walking backward from `new_predecessor` along the current
/// predecessor links. The walk is capped at the entry count; exceeding the
/// cap means the snapshot is already corrupt, and the move is rejected
/// rather than looping.
pub fn would_create_cycle(id: &str, new_predecessor: &str, entries: &[ChainEntry]) -> bool {
    if new_predecessor == id {
        return true;
    }

    let by_id: BTreeMap<&str, &ChainEntry> = entries
        .iter()
        .map(|entry| (entry.id.as_str(), entry))
        .collect();

    let mut steps = 0usize;
    let mut cursor = Some(new_predecessor);
    while let Some(current) = cursor {
        if current == id {
            return true;
        }
        steps += 1;
        if steps > entries.len() {
            return true;
        }
        cursor = by_id
            .get(current)
            .and_then(|entry| entry.predecessor.as_deref());
    }
    false
}

/// Finds the entry that directly follows `id`, if any. Linear scan; fine at
/// tabs-per-owner cardinality.
pub fn successor_of<'a>(id: &str, entries: &'a [ChainEntry]) -> Option<&'a ChainEntry> {
    entries
        .iter()
        .find(|entry| entry.predecessor.as_deref() == Some(id))
}
