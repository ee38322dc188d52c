//! The `tekrar plan` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use tekrar_core::events::{self, event_stream, group_by_key};
use tekrar_core::model::Catalog;
use tekrar_core::report::PlanReport;
use tekrar_core::results::parse_results;
use tekrar_core::select::{
    filter_items, rank, score_items, select_top_n, ScoreMode, ScoreOptions, ScoredItem,
};

use crate::config::load_config_from;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    results: Option<PathBuf>,
    catalog: Option<PathBuf>,
    aliases: Option<PathBuf>,
    limit: Option<i64>,
    mode: Option<String>,
    include_tags: Vec<String>,
    exclude_tags: Vec<String>,
    output: Option<PathBuf>,
    dry_run: bool,
    now: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let now = match now {
        Some(raw) => events::parse_timestamp(&raw)
            .with_context(|| format!("unreadable --now timestamp: {raw:?}"))?,
        None => Utc::now(),
    };

    let results_path = results
        .or(config.paths.results)
        .context("no results log; pass --results or set TEKRAR_RESULTS")?;
    let catalog_path = catalog
        .or(config.paths.catalog)
        .context("no catalog; pass --catalog or set paths.catalog in tekrar.toml")?;

    let content = std::fs::read_to_string(&results_path)
        .with_context(|| format!("failed to read results log {}", results_path.display()))?;
    let rows = match parse_results(&content) {
        Ok(rows) => rows,
        Err(e) if e.is_empty_input() => anyhow::bail!(
            "results log {} is empty; export it again before planning",
            results_path.display()
        ),
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!(
                "failed to decode results log {}",
                results_path.display()
            )))
        }
    };

    let catalog = Catalog::load_path(&catalog_path)?;
    let alias_table = super::load_alias_table(aliases, config.paths.aliases.as_deref())?;

    let limit = limit.unwrap_or(config.plan.limit);
    let mode = ScoreMode::from_label(mode.as_deref().unwrap_or(&config.plan.mode));
    let include_tags = if include_tags.is_empty() {
        config.plan.include_tags
    } else {
        include_tags
    };
    let exclude_tags = if exclude_tags.is_empty() {
        config.plan.exclude_tags
    } else {
        exclude_tags
    };
    let include_set: HashSet<String> = include_tags.iter().cloned().collect();
    let exclude_set: HashSet<String> = exclude_tags.iter().cloned().collect();

    let events = event_stream(&rows, &alias_table);
    let by_key = group_by_key(&events);

    let filtered = filter_items(&catalog.items, &include_set, &exclude_set);
    let options = ScoreOptions {
        mode,
        now,
        config: &config.scoring,
        aliases: &alias_table,
    };
    let scored = score_items(&filtered, &by_key, options);
    let ranked = rank(&scored);
    let selected = select_top_n(&scored, limit);

    eprintln!(
        "tekrar — {} events, {} of {} items after filters",
        events.len(),
        scored.len(),
        catalog.items.len()
    );
    eprintln!(
        "Planned {} item(s) (mode {}, limit {})",
        selected.len(),
        mode,
        limit
    );

    if let Some(path) = output {
        let plan = PlanReport {
            id: Uuid::new_v4(),
            generated_at: now,
            mode,
            limit,
            include_tags,
            exclude_tags,
            scores: ranked.clone(),
            selected: selected.clone(),
        };
        plan.save_json(&path)?;
        eprintln!("Plan saved to: {}", path.display());
    }

    if dry_run {
        print_scores(&ranked, selected.len());
    } else {
        for id in &selected {
            println!("{id}");
        }
    }

    Ok(())
}

fn print_scores(ranked: &[ScoredItem], selected_count: usize) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Item", "Score"]);
    for (position, item) in ranked.iter().take(selected_count.min(20)).enumerate() {
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&item.id),
            Cell::new(format!("{:.3}", item.score)),
        ]);
    }
    println!("{table}");
}
