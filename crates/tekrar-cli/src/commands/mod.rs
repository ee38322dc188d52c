//! CLI command implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;

use tekrar_core::alias::{self, AliasTable};

pub mod plan;
pub mod validate;

/// Resolve the alias table for a command.
///
/// An explicit `--aliases` path must load; a path that only comes from the
/// config file is allowed to be absent, since the alias table is optional.
pub(crate) fn load_alias_table(
    flag: Option<PathBuf>,
    configured: Option<&Path>,
) -> Result<AliasTable> {
    if let Some(path) = flag {
        return alias::load_aliases(&path);
    }
    match configured {
        Some(path) if path.exists() => alias::load_aliases(path),
        _ => Ok(AliasTable::new()),
    }
}
