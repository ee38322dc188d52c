//! Item scoring and drill-list selection.
//!
//! Ties together the catalog, the grouped event histories, and the decay
//! model: filter by tags, score each item per drill direction, rank, and
//! cut the list down to the session limit.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alias::{self, AliasTable};
use crate::config::ScoringConfig;
use crate::events::EventsByKey;
use crate::model::VocabItem;
use crate::score::compute_scores;

/// Which drill directions to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMode {
    /// English prompt, Turkish answer.
    EnTr,
    /// Turkish prompt, English answer.
    TrEn,
    /// Score both directions and keep the higher one.
    Both,
}

impl ScoreMode {
    /// Read a mode from a loose label, case-insensitive.
    ///
    /// Unrecognized labels fall back to [`ScoreMode::EnTr`].
    pub fn from_label(label: &str) -> ScoreMode {
        match label.to_lowercase().as_str() {
            "both" => ScoreMode::Both,
            "tr-en" => ScoreMode::TrEn,
            "en-tr" => ScoreMode::EnTr,
            _ => ScoreMode::EnTr,
        }
    }

    /// The direction labels this mode scores.
    pub fn directions(self) -> &'static [&'static str] {
        match self {
            ScoreMode::EnTr => &["en-tr"],
            ScoreMode::TrEn => &["tr-en"],
            ScoreMode::Both => &["tr-en", "en-tr"],
        }
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreMode::EnTr => "en-tr",
            ScoreMode::TrEn => "tr-en",
            ScoreMode::Both => "both",
        };
        f.write_str(label)
    }
}

/// Everything scoring needs besides the items themselves.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOptions<'a> {
    pub mode: ScoreMode,
    /// The instant scores are evaluated at.
    pub now: DateTime<Utc>,
    pub config: &'a ScoringConfig,
    pub aliases: &'a AliasTable,
}

/// An item with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: String,
    pub score: f64,
}

/// Narrow a catalog down by tag.
///
/// An item must carry every `include` tag and none of the `exclude` tags.
/// An empty `include` set accepts everything.
pub fn filter_items<'a>(
    items: &'a [VocabItem],
    include: &HashSet<String>,
    exclude: &HashSet<String>,
) -> Vec<&'a VocabItem> {
    items
        .iter()
        .filter(|item| {
            include.iter().all(|tag| item.tags.contains(tag))
                && !item.tags.iter().any(|tag| exclude.contains(tag))
        })
        .collect()
}

/// Score every item against the grouped event histories.
///
/// Item ids are trimmed before use and trimmed-empty ids are skipped.
/// Histories are looked up under the canonical id, but the emitted entry
/// keeps the item's own (trimmed) id. Under [`ScoreMode::Both`] an item
/// takes the higher of its two direction scores, so a word drilled only
/// one way still surfaces through the other direction's novelty.
pub fn score_items(
    items: &[&VocabItem],
    events_by_key: &EventsByKey,
    options: ScoreOptions<'_>,
) -> Vec<ScoredItem> {
    let mut scored = Vec::with_capacity(items.len());

    for item in items {
        let id = item.id.trim();
        if id.is_empty() {
            tracing::debug!("skipping catalog item with empty id");
            continue;
        }
        let canonical = alias::canonical_id(id, options.aliases);
        let tau_right_days = options.config.tau_right_days_for(&item.tags);

        let mut best = f64::NEG_INFINITY;
        for direction in options.mode.directions() {
            let key = (canonical.clone(), direction.to_string());
            let attempts = events_by_key
                .get(&key)
                .map(|history| history.as_slice())
                .unwrap_or(&[]);
            let breakdown = compute_scores(attempts, options.now, options.config, tau_right_days);
            best = best.max(breakdown.score);
        }

        scored.push(ScoredItem {
            id: id.to_string(),
            score: best,
        });
    }

    scored
}

/// Order scored items by descending score, then ascending id.
///
/// The id tie-break compares code points, not locale collation, so the
/// order is identical on every machine.
pub fn rank(scored: &[ScoredItem]) -> Vec<ScoredItem> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

/// The ids of the top `limit` items, in rank order.
///
/// Negative limits read as zero; a limit past the end returns everything.
pub fn select_top_n(scored: &[ScoredItem], limit: i64) -> Vec<String> {
    rank(scored)
        .into_iter()
        .take(limit.max(0) as usize)
        .map(|item| item.id)
        .collect()
}
