//! Vocabulary catalog model.
//!
//! A catalog document is either a bare JSON array of items or an object
//! with `items` and a `tags` registry. Catalogs may be split across a
//! directory of JSON files and merged in filename order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::alias::{self, AliasTable};

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub turkish: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A registered tag. `label` is display text and may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDef {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// A vocabulary catalog: items plus the tag registry they may reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<VocabItem>,
    #[serde(default)]
    pub tags: Vec<TagDef>,
}

impl Catalog {
    /// Parse a catalog document from JSON text.
    ///
    /// A top-level array is items-only; an object may carry both `items`
    /// and `tags`, either defaulting to empty.
    pub fn parse(content: &str) -> Result<Catalog> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if value.is_array() {
            let items: Vec<VocabItem> = serde_json::from_value(value)?;
            return Ok(Catalog {
                items,
                tags: Vec::new(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a catalog from a single JSON file.
    pub fn load(path: &Path) -> Result<Catalog> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse catalog {}", path.display()))
    }

    /// Load and merge every `*.json` file in a directory, in filename order.
    ///
    /// Files that fail to load are skipped with a warning so one broken
    /// file does not take the whole catalog down.
    pub fn load_dir(dir: &Path) -> Result<Catalog> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("failed to read catalog directory {}", dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Catalog::default();
        for path in paths {
            match Catalog::load(&path) {
                Ok(part) => catalog.merge(part),
                Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
            }
        }
        Ok(catalog)
    }

    /// Load from a file or, if `path` is a directory, merge its contents.
    pub fn load_path(path: &Path) -> Result<Catalog> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load(path)
        }
    }

    /// Fold another catalog into this one.
    ///
    /// Items concatenate; tag definitions are kept only for ids not
    /// already registered, so the first definition wins.
    pub fn merge(&mut self, other: Catalog) {
        self.items.extend(other.items);
        for tag in other.tags {
            if !self.tags.iter().any(|existing| existing.id == tag.id) {
                self.tags.push(tag);
            }
        }
    }
}

/// A non-fatal problem found while checking a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The offending item, when the problem is tied to one.
    pub item_id: Option<String>,
    pub message: String,
}

/// Check a catalog and its alias table for consistency problems.
///
/// Flags empty item ids, duplicate ids, references to unregistered tags
/// (only when a registry is present at all), and alias chains that loop.
pub fn validate_catalog(catalog: &Catalog, aliases: &AliasTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let known_tags: HashSet<&str> = catalog.tags.iter().map(|tag| tag.id.as_str()).collect();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for item in &catalog.items {
        let id = item.id.trim();
        if id.is_empty() {
            warnings.push(ValidationWarning {
                item_id: None,
                message: "item with empty id".to_string(),
            });
            continue;
        }
        if !seen_ids.insert(id.to_string()) {
            warnings.push(ValidationWarning {
                item_id: Some(id.to_string()),
                message: "duplicate item id".to_string(),
            });
        }
        if !known_tags.is_empty() {
            for tag in &item.tags {
                if !known_tags.contains(tag.as_str()) {
                    warnings.push(ValidationWarning {
                        item_id: Some(id.to_string()),
                        message: format!("unknown tag '{tag}'"),
                    });
                }
            }
        }
    }

    let mut sources: Vec<&String> = aliases.keys().collect();
    sources.sort();
    for source in sources {
        let resolution = alias::resolve(source, aliases);
        if resolution.cycle_detected {
            warnings.push(ValidationWarning {
                item_id: None,
                message: format!("alias chain from '{source}' never resolves"),
            });
        }
    }

    warnings
}
