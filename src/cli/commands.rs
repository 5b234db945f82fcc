use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::filters::{CategoryToggles, apply_filters, parse_filter};
use crate::models::{Category, SearchMatch, TimelineEvent};
use crate::repository::{CharacterRepository, RepositoryStats, Roster, load_roster};
use crate::search::{SearchConfig, SearchEngine};
use crate::theme::{Theme, ThemeStore};
use crate::timeline::{TimelineFilter, TimelineOrder, arrange_timeline};
use crate::tui::run_interactive;
use crate::utils::terminal::single_line;
use crate::utils::{format_path_with_tilde, get_default_roster_path, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "medieval-character-manager")]
#[command(version)]
#[command(about = "Search and browse a roster of medieval characters", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Roster file (.json, .jsonl) or directory of character files [default: $MCM_ROSTER]
    #[arg(long, global = true, value_name = "PATH")]
    pub roster: Option<PathBuf>,

    /// Colour theme for highlights (parchment, night)
    #[arg(long, global = true, default_value = "parchment")]
    pub theme: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search every character sheet for a substring
    Search {
        /// Text to look for (case-insensitive, at least 2 characters)
        query: String,

        /// Only show matches from this category (repeatable)
        #[arg(
            long = "category",
            short = 'c',
            value_name = "CATEGORY",
            value_parser = parse_category
        )]
        categories: Vec<Category>,

        /// Filter expression, e.g. 'character:aria category:timeline'
        #[arg(long, short = 'f', value_name = "EXPR")]
        filter: Option<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Characters of context either side of a match in long fields
        #[arg(long, value_name = "N")]
        context_radius: Option<usize>,
    },
    /// Show roster statistics
    Stats,
    /// Show a character's timeline in chronological order
    Timeline {
        /// Character id or name
        character: String,

        /// Only events carrying this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only events whose title or description contains this text
        #[arg(long)]
        text: Option<String>,

        /// Newest first
        #[arg(long)]
        reverse: bool,
    },
    /// Open the interactive search dialog
    Browse,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse::<Category>().map_err(|e| e.to_string())
}

pub fn run(cli: &Cli) -> Result<()> {
    let theme = Theme::by_name(&cli.theme)
        .ok_or_else(|| anyhow!("Unknown theme: '{}' (valid: parchment, night)", cli.theme))?;
    let roster_path = match &cli.roster {
        Some(path) => path.clone(),
        None => get_default_roster_path()?,
    };
    debug!("Using roster {}", roster_path.display());

    let roster = load_roster(&roster_path).with_context(|| {
        format!("Failed to load roster from {}", format_path_with_tilde(&roster_path))
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Search { query, categories, filter, json, context_radius } => {
            let mut config = SearchConfig::from_env();
            if let Some(radius) = context_radius {
                config = config.with_context_radius(*radius);
            }
            let engine = SearchEngine::new(config, Arc::new(theme));
            let options = SearchOptions { categories, filter: filter.as_deref(), json: *json };
            run_search(&mut out, &engine, &roster, query, &options)
        }
        Commands::Stats => show_stats(&mut out, &roster),
        Commands::Timeline { character, tag, text, reverse } => {
            let filter = TimelineFilter { text: text.clone(), tag: tag.clone() };
            let order =
                if *reverse { TimelineOrder::Reverse } else { TimelineOrder::Chronological };
            show_timeline(&mut out, &roster, character, &filter, order)
        }
        Commands::Browse => {
            drop(out);
            let engine = SearchEngine::new(SearchConfig::from_env(), Arc::new(theme.clone()));
            let target = run_interactive(roster, engine, ThemeStore::new(theme))?;
            if let Some(target) = target {
                println!(
                    "Open character {} on tab {} ({})",
                    sanitize_for_terminal(&target.character_id),
                    target.tab_index,
                    target.category
                );
            }
            Ok(())
        }
    }
}

struct SearchOptions<'a> {
    categories: &'a [Category],
    filter: Option<&'a str>,
    json: bool,
}

fn run_search<W: Write>(
    out: &mut W,
    engine: &SearchEngine,
    roster: &Roster,
    query: &str,
    options: &SearchOptions,
) -> Result<()> {
    let min_chars = engine.config().min_query_chars;
    if engine.parse_query(query).is_none() {
        writeln!(out, "Enter at least {} characters to search", min_chars)?;
        return Ok(());
    }

    let mut matches = engine.search(query, roster);
    if let Some(expr) = options.filter {
        let expr = parse_filter(expr).context("Invalid --filter expression")?;
        matches = apply_filters(matches, &expr);
    }

    let toggles = if options.categories.is_empty() {
        CategoryToggles::default()
    } else {
        CategoryToggles::only(options.categories)
    };
    let visible = toggles.apply(&matches);

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &visible)?;
        writeln!(out)?;
        return Ok(());
    }

    if visible.is_empty() {
        writeln!(out, "No results found")?;
        return Ok(());
    }

    for m in &visible {
        writeln!(out, "{}", format_match_line(m))?;
    }
    let noun = if visible.len() == 1 { "match" } else { "matches" };
    writeln!(out, "\n{} {}", visible.len(), noun)?;
    Ok(())
}

/// `Name [Category] Field: snippet` with the matched text wrapped in `**`
fn format_match_line(m: &SearchMatch) -> String {
    let s = &m.snippet;
    let mut snippet = String::new();
    if s.leading_ellipsis {
        snippet.push_str(crate::models::ELLIPSIS);
    }
    snippet.push_str(&s.before);
    if !s.matched.is_empty() {
        snippet.push_str("**");
        snippet.push_str(&s.matched);
        snippet.push_str("**");
    }
    snippet.push_str(&s.after);
    if s.trailing_ellipsis {
        snippet.push_str(crate::models::ELLIPSIS);
    }

    format!(
        "{} [{}] {}: {}",
        single_line(&m.character_name),
        m.category,
        single_line(&m.field),
        single_line(&snippet)
    )
}

fn show_stats<W: Write>(out: &mut W, roster: &Roster) -> Result<()> {
    let stats = RepositoryStats::collect(roster);

    writeln!(out, "Character Roster Statistics")?;
    writeln!(out, "===========================")?;
    writeln!(out, "Characters: {}", stats.characters)?;
    writeln!(out, "  Relationships: {}", stats.relationships)?;
    writeln!(out, "  Timeline events: {}", stats.timeline_events)?;
    writeln!(out, "  Event tags: {}", stats.tags)?;
    if let Some(source) = roster.source() {
        writeln!(out)?;
        writeln!(out, "Roster: {}", format_path_with_tilde(source))?;
    }
    Ok(())
}

fn show_timeline<W: Write>(
    out: &mut W,
    roster: &Roster,
    character: &str,
    filter: &TimelineFilter,
    order: TimelineOrder,
) -> Result<()> {
    let record = roster
        .find(character)
        .ok_or_else(|| anyhow!("Character not found: {}", single_line(character)))?;

    writeln!(out, "Timeline of {}", single_line(&record.name))?;
    let events = arrange_timeline(&record.timeline_events, filter, order);
    if events.is_empty() {
        writeln!(out, "  (no events)")?;
        return Ok(());
    }

    for event in events {
        writeln!(out, "{}", format_event_line(event))?;
        if !event.description.trim().is_empty() {
            writeln!(out, "    {}", single_line(&event.description))?;
        }
    }
    Ok(())
}

fn format_event_line(event: &TimelineEvent) -> String {
    let date = if event.date.trim().is_empty() { "(undated)" } else { event.date.trim() };
    let mut line = format!("  {:<12} {}", single_line(date), single_line(&event.title));
    if !event.tags.is_empty() {
        line.push_str(&format!(" [{}]", single_line(&event.tags.join(", "))));
    }
    line
}
