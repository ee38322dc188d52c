//! The `tekrar validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use tekrar_core::model::{validate_catalog, Catalog};

use crate::config::load_config_from;

pub fn execute(
    catalog: Option<PathBuf>,
    aliases: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let catalog_path = catalog
        .or(config.paths.catalog)
        .context("no catalog; pass --catalog or set paths.catalog in tekrar.toml")?;
    let catalog = Catalog::load_path(&catalog_path)?;
    let alias_table = super::load_alias_table(aliases, config.paths.aliases.as_deref())?;

    println!(
        "Catalog: {} item(s), {} tag(s), {} alias(es)",
        catalog.items.len(),
        catalog.tags.len(),
        alias_table.len()
    );

    let warnings = validate_catalog(&catalog, &alias_table);
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
        Ok(())
    } else {
        anyhow::bail!("{} problem(s) found", warnings.len())
    }
}
