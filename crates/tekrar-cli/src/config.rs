//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tekrar_core::config::ScoringConfig;

/// Top-level tekrar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TekrarConfig {
    /// Where the input documents live.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planning defaults.
    #[serde(default)]
    pub plan: PlanConfig,
    /// Scoring weights and time constants.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Input document locations. All optional; command-line flags override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub results: Option<PathBuf>,
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub aliases: Option<PathBuf>,
}

/// Defaults for the `plan` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Session size.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Scoring mode label.
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub include_tags: Vec<String>,
    #[serde(default)]
    pub exclude_tags: Vec<String>,
}

fn default_limit() -> i64 {
    30
}
fn default_mode() -> String {
    "both".to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            mode: default_mode(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `tekrar.toml` in the current directory
/// 2. `~/.config/tekrar/config.toml`
///
/// Environment variable overrides: `TEKRAR_RESULTS`, `TEKRAR_LIMIT`.
pub fn load_config_from(path: Option<&Path>) -> Result<TekrarConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tekrar.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TekrarConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TekrarConfig::default(),
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Fold `TEKRAR_RESULTS` and `TEKRAR_LIMIT` into a loaded config.
///
/// A non-numeric `TEKRAR_LIMIT` is ignored with a warning rather than
/// failing the whole invocation.
fn apply_env_overrides(config: &mut TekrarConfig) {
    if let Ok(results) = std::env::var("TEKRAR_RESULTS") {
        if !results.is_empty() {
            config.paths.results = Some(PathBuf::from(results));
        }
    }

    if let Ok(limit) = std::env::var("TEKRAR_LIMIT") {
        match limit.trim().parse::<i64>() {
            Ok(value) => config.plan.limit = value,
            Err(_) => tracing::warn!("ignoring TEKRAR_LIMIT {limit:?}: not a number"),
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tekrar"))
}
