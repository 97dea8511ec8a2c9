use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use mindcards::App;
use mindcards::catalog::{Card, ExportFormat, Span, SpanStyle, render_explanation};
use mindcards::scheduler::{KnowledgeLevel, RatingSummary, Stats};
use mindcards::storage::{JsonFileStorage, Storage};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(log_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindcards")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("mindcards.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level.unwrap_or("info")))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if !config.display.color {
        colored::control::set_override(false);
    }

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  Data directory: {}", config.storage.data_dir.display());
    }

    let storage = JsonFileStorage::new(&config.storage.data_dir).context("Failed to open data directory")?;
    let mut app = App::open(storage, Utc::now()).context("Failed to load card deck")?;

    match &cli.command {
        None => handle_list_command(&app, config.effective_tag(None)),
        Some(Commands::List { tag }) => handle_list_command(&app, config.effective_tag(tag.as_deref())),
        Some(Commands::Show { name }) => handle_show_command(&app, name),
        Some(Commands::Due { tag }) => handle_due_command(&app, config.effective_tag(tag.as_deref())),
        Some(Commands::Study { tag }) => handle_study_command(&mut app, config.effective_tag(tag.as_deref())),
        Some(Commands::Rate { name, level }) => handle_rate_command(&mut app, name, level),
        Some(Commands::Stats { json }) => handle_stats_command(&app, *json),
        Some(Commands::Reset { yes }) => handle_reset_command(&mut app, *yes),
        Some(Commands::Add {
            name,
            explanation,
            tags,
        }) => handle_add_command(&mut app, name, explanation, tags),
        Some(Commands::Tags) => handle_tags_command(&app),
        Some(Commands::Export { format, output }) => handle_export_command(&app, format, output.as_deref()),
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span.style {
            SpanStyle::Plain => span.text.normal().to_string(),
            SpanStyle::Strong => span.text.bold().to_string(),
            SpanStyle::Emphasis => span.text.italic().to_string(),
            SpanStyle::Code => span.text.cyan().to_string(),
        })
        .collect()
}

fn level_colored(level: KnowledgeLevel, text: &str) -> ColoredString {
    match level.value() {
        0 => text.red(),
        1 => text.bright_red(),
        2 => text.yellow(),
        3 => text.bright_yellow(),
        4 => text.green(),
        _ => text.bright_green(),
    }
}

fn print_card_line<S: Storage>(app: &App<S>, card: &Card, now: DateTime<Utc>) {
    let badge = match app.indicator(&card.name, now) {
        Some(ind) => {
            let level = level_colored(ind.level, &format!("{}/{}", ind.level, KnowledgeLevel::MAX));
            if ind.due {
                format!("{} {}", level, "REVIEW".magenta().bold())
            } else {
                level.to_string()
            }
        }
        None => "-".dimmed().to_string(),
    };
    println!("  {:<40} {}  {}", card.name.bold(), badge, card.tags.join(", ").dimmed());
}

fn print_notification(summary: &RatingSummary) {
    println!("{}", "Progress saved!".green().bold());
    println!("  Knowledge level: {}", summary.level_name.bold());
    println!("  Next review: {}", summary.next_review_description.bold());
}

fn handle_list_command<S: Storage>(app: &App<S>, tag: Option<&str>) -> Result<()> {
    info!("Listing cards - tag: {:?}", tag);
    let now = Utc::now();
    let cards = app.catalog().filtered(tag);
    if cards.is_empty() {
        println!("{}", "No models match this filter".yellow());
        println!("  Try selecting a different tag");
        return Ok(());
    }
    for card in cards {
        print_card_line(app, card, now);
    }
    Ok(())
}

fn handle_show_command<S: Storage>(app: &App<S>, name: &str) -> Result<()> {
    info!("Showing card: {}", name);
    let card = app
        .catalog()
        .get(name)
        .ok_or_else(|| eyre!("Card not found: {}", name))?;
    print_card_line(app, card, Utc::now());
    println!();
    println!("  {}", render_spans(&render_explanation(&card.explanation)));
    Ok(())
}

fn handle_due_command<S: Storage>(app: &App<S>, tag: Option<&str>) -> Result<()> {
    info!("Listing due cards - tag: {:?}", tag);
    let now = Utc::now();
    let due = app.due(tag, now);
    if due.is_empty() {
        println!("{}", "No cards due for review!".green());
        return Ok(());
    }
    println!("{} {}", "Due for review:".cyan(), due.len());
    for card in due {
        print_card_line(app, card, now);
    }
    Ok(())
}

fn handle_study_command<S: Storage>(app: &mut App<S>, tag: Option<&str>) -> Result<()> {
    info!("Starting study mode - tag: {:?}", tag);
    let mut session = app.study(tag, Utc::now());
    println!("{}", session.activation_message().cyan());
    if session.is_finished() {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(card) = session.current().cloned() {
        if let Some((index, total)) = session.position() {
            println!();
            println!("{}", format!("Card {} of {}", index, total).dimmed());
        }
        println!("{}", card.name.bold());
        prompt("[enter] reveal, [n]ext, [p]rev, [r]andom, [q]uit: ")?;
        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "q" => break,
            "n" => {
                session.next();
                continue;
            }
            "p" => {
                session.prev();
                continue;
            }
            "r" => {
                session.shuffle();
                continue;
            }
            _ => {}
        }

        println!("  {}", render_spans(&render_explanation(&card.explanation)));
        println!("How well do you know this?");
        for level in KnowledgeLevel::all() {
            print!("  {}", level_colored(level, &format!("{} {}", level, level.name())));
        }
        println!();
        prompt("Rating (0-5, [s]kip, [q]uit): ")?;
        let Some(line) = lines.next() else { break };
        let input = line?;
        match input.trim() {
            "q" => break,
            "s" => {
                session.next();
            }
            raw => match raw.parse::<KnowledgeLevel>() {
                Ok(level) => {
                    let summary = app.rate(&card.name, level, Utc::now())?;
                    print_notification(&summary);
                    session.mark_reviewed();
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
        }
    }

    if session.is_finished() {
        println!("{}", "All due cards reviewed!".green().bold());
    }
    Ok(())
}

fn handle_rate_command<S: Storage>(app: &mut App<S>, name: &str, level: &str) -> Result<()> {
    info!("Rating card: {} at level {}", name, level);
    let level: KnowledgeLevel = level.parse()?;
    let summary = app.rate(name, level, Utc::now())?;
    print_notification(&summary);
    Ok(())
}

fn print_stats(stats: &Stats) {
    println!("{}", "Learning Progress".bold());
    println!("  Models Reviewed:     {}/{}", stats.reviewed_count, stats.total_cards);
    println!("  Avg Knowledge Level: {}", stats.average_display());
    println!("  Due for Review:      {}", stats.due_count);
    println!();
    println!("{}", "Knowledge Distribution".bold());
    for level in KnowledgeLevel::all() {
        let pct = stats.level_percentage(level);
        let width = (pct / 5.0).round() as usize;
        let bar = level_colored(level, &"█".repeat(width));
        println!(
            "  Level {} {:<20} {}",
            level,
            bar,
            stats.level_histogram[level.index()]
        );
    }
}

fn handle_stats_command<S: Storage>(app: &App<S>, json: bool) -> Result<()> {
    info!("Showing stats (json: {})", json);
    let stats = app.stats(Utc::now());
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}

fn handle_reset_command<S: Storage>(app: &mut App<S>, yes: bool) -> Result<()> {
    info!("Reset requested (confirmed: {})", yes);
    if !yes {
        prompt("Are you sure you want to reset all learning progress? [y/N] ")?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("{}", "Reset cancelled".yellow());
            return Ok(());
        }
    }
    app.reset(Utc::now())?;
    println!("{}", "Learning progress reset".red());
    Ok(())
}

fn handle_add_command<S: Storage>(
    app: &mut App<S>,
    name: &str,
    explanation: &str,
    tags: &str,
) -> Result<()> {
    info!("Adding card: {}", name);
    let card = app.add_card(name, explanation, tags, Utc::now())?;
    println!("{} {}", "New mental model saved!".green(), card.name.bold());
    Ok(())
}

fn handle_tags_command<S: Storage>(app: &App<S>) -> Result<()> {
    for tag in app.catalog().tags() {
        println!("  {}", tag);
    }
    Ok(())
}

fn handle_export_command<S: Storage>(
    app: &App<S>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format.file_name()));
    info!("Exporting deck as {} to {}", format, path.display());

    let data = app.export(format)?;
    fs::write(&path, data).context(format!("Failed to write {}", path.display()))?;
    println!("{} downloaded", path.display().to_string().green());
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Logging filter comes from RUST_LOG, else the configured level
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
