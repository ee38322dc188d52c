//! Item-id alias resolution.
//!
//! Vocabulary ids get renamed over time; the alias table maps historical
//! ids to their replacements so old log rows keep counting toward the
//! current id. Chains are followed to their end. A cycle terminates the
//! walk and is reported through a flag rather than an error: a miswired
//! table degrades scoring, it does not abort it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Flat mapping from a raw id to its replacement.
pub type AliasTable = HashMap<String, String>;

/// Outcome of resolving one id through the alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The id the walk ended on.
    pub canonical_id: String,
    /// Whether the walk stopped because it revisited an id.
    pub cycle_detected: bool,
}

/// Follow alias mappings from `id` until an id has no mapping or repeats.
///
/// Resolution is idempotent on canonical ids. On a cycle the walk stops at
/// the first repeated id and flags it; the returned id is still usable.
pub fn resolve(id: &str, aliases: &AliasTable) -> Resolution {
    let mut current = id.to_string();
    let mut visited: HashSet<String> = HashSet::new();

    while let Some(next) = aliases.get(&current) {
        if !visited.insert(current.clone()) {
            return Resolution {
                canonical_id: current,
                cycle_detected: true,
            };
        }
        current = next.clone();
    }

    Resolution {
        canonical_id: current,
        cycle_detected: false,
    }
}

/// Resolve and discard the cycle flag.
pub fn canonical_id(id: &str, aliases: &AliasTable) -> String {
    resolve(id, aliases).canonical_id
}

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: HashMap<String, String>,
}

/// Load an alias document of the shape `{"aliases": {"old": "new"}}`.
///
/// A missing `aliases` key reads as an empty table.
pub fn load_aliases(path: &Path) -> Result<AliasTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read alias file: {}", path.display()))?;
    let parsed: AliasFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse alias file: {}", path.display()))?;

    Ok(clean_aliases(parsed.aliases))
}

/// Trim both sides of each alias entry, dropping entries with an empty side.
pub fn clean_aliases(raw: HashMap<String, String>) -> AliasTable {
    raw.into_iter()
        .filter_map(|(from, to)| {
            let from = from.trim().to_string();
            let to = to.trim().to_string();
            (!from.is_empty() && !to.is_empty()).then_some((from, to))
        })
        .collect()
}
