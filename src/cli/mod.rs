//! # CLI Module
//!
//! Command-line interface for the file isolator.
//!
//! ## Usage
//! ```bash
//! # Group by stems with the last 3 characters trimmed, move duplicates
//! file-isolate run ~/Downloads --chars 3
//!
//! # Trim from the front instead
//! file-isolate run ~/Downloads --chars 2 --direction front
//!
//! # See what would happen without touching anything
//! file-isolate run ~/Downloads --chars 3 --dry-run
//!
//! # JSON output
//! file-isolate run ~/Downloads --chars 3 --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use file_isolator::core::naming::Direction;
use file_isolator::core::pipeline::{Isolator, RunReport};
use file_isolator::core::IsolatePlan;
use file_isolator::error::Result;
use file_isolator::events::{Event, EventChannel, MoveEvent, RunEvent, WalkEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// File Isolator - move duplicate-named files aside, never delete them
#[derive(Parser, Debug)]
#[command(name = "file-isolate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Isolate duplicate-named files under a directory tree
    Run {
        /// Root directory to process
        path: PathBuf,

        /// Number of characters to trim from each file stem
        #[arg(short, long)]
        chars: usize,

        /// Which end of the stem to trim from
        #[arg(short, long, default_value = "back")]
        direction: DirectionArg,

        /// Name of the per-directory destination folder
        #[arg(long, default_value = "Isolated")]
        folder_name: String,

        /// Plan only; move nothing
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// Trim the end of the stem (default)
    Back,
    /// Trim the start of the stem
    Front,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Back => Direction::Back,
            DirectionArg::Front => Direction::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (moved paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    file_isolator::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            path,
            chars,
            direction,
            folder_name,
            dry_run,
            output,
            verbose,
        } => run_isolate(
            path,
            chars,
            direction.into(),
            folder_name,
            dry_run,
            output,
            verbose,
        ),
    }
}

fn run_isolate(
    path: PathBuf,
    chars: usize,
    direction: Direction,
    folder_name: String,
    dry_run: bool,
    output: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    // Caller-side validation: the core is never invoked on a bad path.
    // (The character count is already guaranteed non-negative and numeric
    // by the unsigned clap parser.)
    if !path.is_dir() {
        term.write_line(&format!(
            "{} {} is not an existing directory",
            style("error:").red().bold(),
            style(path.display()).yellow()
        ))
        .ok();
        std::process::exit(2);
    }

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("File Isolator").bold().cyan(),
            style(format!("(trim {} from {})", chars, direction)).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let isolator = Isolator::builder()
        .root(path)
        .trim_chars(chars)
        .direction(direction)
        .isolated_name(folder_name)
        .build();

    let (sender, receiver) = EventChannel::new();

    // Progress spinner for pretty output
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    // Render events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Run(RunEvent::PhaseChanged { phase }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!("{}", phase));
                    }
                }
                Event::Walk(WalkEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_message(format!(
                            "{} dirs, {} files - {}",
                            p.directories_entered,
                            p.files_examined,
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                        ));
                        pb.tick();
                    }
                }
                Event::Walk(WalkEvent::DuplicateFound { path, common_name }) => {
                    if verbose_clone {
                        if let Some(ref pb) = progress_clone {
                            pb.println(format!(
                                "  {} {} (common name {:?})",
                                style("dup").yellow(),
                                path.display(),
                                common_name
                            ));
                        }
                    }
                }
                Event::Move(MoveEvent::FileMoved { from, to, renamed }) => {
                    if verbose_clone {
                        if let Some(ref pb) = progress_clone {
                            let note = if renamed { " (renamed)" } else { "" };
                            pb.println(format!(
                                "  {} {} -> {}{}",
                                style("mv").green(),
                                from.display(),
                                to.display(),
                                note
                            ));
                        }
                    }
                }
                Event::Run(RunEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }

        if let Some(ref pb) = progress_clone {
            pb.finish_and_clear();
        }
    });

    if dry_run {
        let plan = isolator.plan_with_events(&sender);
        drop(sender);
        event_thread.join().ok();
        let plan = plan?;

        match output {
            OutputFormat::Pretty => print_pretty_plan(&term, &plan),
            OutputFormat::Json => print_json_plan(&plan),
            OutputFormat::Minimal => print_minimal_plan(&plan),
        }
        return Ok(());
    }

    let report = isolator.run_with_events(&sender);
    drop(sender);
    event_thread.join().ok();
    let report = report?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report, verbose),
        OutputFormat::Json => print_json_results(&report),
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    Ok(())
}

fn print_pretty_plan(term: &Term, plan: &IsolatePlan) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Dry Run (nothing was moved)",
        style("✓").green().bold()
    ))
    .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} directories, {} files examined",
        style(plan.directories.len()).cyan(),
        style(plan.files_examined).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} files would move into {:?} folders",
        style(plan.moves.len()).cyan(),
        plan.isolated_name
    ))
    .ok();
    if plan.hidden_skipped > 0 {
        term.write_line(&format!(
            "  {} hidden files skipped",
            style(plan.hidden_skipped).dim()
        ))
        .ok();
    }
    term.write_line("").ok();

    if plan.moves.is_empty() {
        term.write_line(&format!("  {} No duplicates found!", style("•").green()))
            .ok();
        return;
    }

    term.write_line(&format!("{}", style("Planned moves:").bold().underlined()))
        .ok();
    term.write_line("").ok();
    for mv in &plan.moves {
        let note = if mv.renamed {
            style(" (renamed)").yellow().to_string()
        } else {
            String::new()
        };
        term.write_line(&format!(
            "  {} -> {}{}",
            display_path(&mv.source),
            display_path(&mv.destination),
            note
        ))
        .ok();
    }
}

fn print_pretty_results(term: &Term, report: &RunReport, verbose: bool) {
    let summary = &report.summary;

    term.write_line("").ok();
    term.write_line(&format!("{} Run Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} directories visited in {:.1}s",
        style(summary.directories_visited).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} files examined",
        style(summary.files_examined).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} files moved",
        style(summary.files_moved).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} isolated folders created",
        style(summary.folders_created).cyan()
    ))
    .ok();
    if summary.renamed_moves > 0 {
        term.write_line(&format!(
            "  {} moves renamed to avoid a clash",
            style(summary.renamed_moves).yellow()
        ))
        .ok();
    }
    term.write_line("").ok();

    if report.plan.moves.is_empty() {
        term.write_line(&format!("  {} No duplicates found!", style("•").green()))
            .ok();
    } else if verbose {
        term.write_line(&format!("{}", style("Moved files:").bold().underlined()))
            .ok();
        term.write_line("").ok();
        for mv in &report.plan.moves {
            term.write_line(&format!(
                "  {} -> {}",
                display_path(&mv.source),
                display_path(&mv.destination)
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    term.write_line(&format!(
        "{}",
        style("Remember: files were moved, not deleted. Check the isolated folders.").dim()
    ))
    .ok();
}

fn print_json_plan(plan: &IsolatePlan) {
    let output = serde_json::json!({
        "dry_run": true,
        "plan_id": plan.id,
        "root": plan.root,
        "isolated_name": plan.isolated_name,
        "directories": plan.directories.len(),
        "files_examined": plan.files_examined,
        "hidden_skipped": plan.hidden_skipped,
        "moves": plan.moves,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_json_results(report: &RunReport) {
    let summary = &report.summary;
    let output = serde_json::json!({
        "dry_run": false,
        "plan_id": report.plan.id,
        "root": report.plan.root,
        "directories_visited": summary.directories_visited,
        "files_examined": summary.files_examined,
        "files_moved": summary.files_moved,
        "folders_created": summary.folders_created,
        "renamed_moves": summary.renamed_moves,
        "duration_ms": summary.duration_ms,
        "moves": report.plan.moves,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn print_minimal_plan(plan: &IsolatePlan) {
    for mv in &plan.moves {
        println!("{}", mv.source.display());
    }
}

fn print_minimal_results(report: &RunReport) {
    for mv in &report.plan.moves {
        println!("{}", mv.destination.display());
    }
}

/// Shorten paths under the home directory to `~/...` for display
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}
