//! Drill plan reports with JSON persistence.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::select::{ScoreMode, ScoredItem};

/// A complete drill plan: the ranked scores and the selected session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// Unique plan identifier.
    pub id: Uuid,
    /// The instant scores were evaluated at.
    pub generated_at: DateTime<Utc>,
    /// Scoring mode the plan was built with.
    pub mode: ScoreMode,
    /// Session size limit that was applied.
    pub limit: i64,
    /// Tag filters, as given.
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    /// Every scored item, in rank order.
    pub scores: Vec<ScoredItem>,
    /// Ids of the items that made the session, in rank order.
    pub selected: Vec<String>,
}

impl PlanReport {
    /// Save the plan as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize plan")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write plan to {}", path.display()))?;
        Ok(())
    }

    /// Load a plan from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan from {}", path.display()))?;
        let plan: PlanReport = serde_json::from_str(&content).context("failed to parse plan JSON")?;
        Ok(plan)
    }

    /// Format the plan as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** mode {}, limit {}, {} scored, {} selected\n\n",
            self.mode,
            self.limit,
            self.scores.len(),
            self.selected.len()
        ));

        if !self.selected.is_empty() {
            let by_id: HashMap<&str, f64> = self
                .scores
                .iter()
                .map(|item| (item.id.as_str(), item.score))
                .collect();

            md.push_str("| Rank | Item | Score |\n");
            md.push_str("|------|------|-------|\n");
            for (position, id) in self.selected.iter().enumerate() {
                let score = by_id.get(id.as_str()).copied().unwrap_or(0.0);
                md.push_str(&format!("| {} | {} | {:.3} |\n", position + 1, id, score));
            }
        }

        md
    }
}
