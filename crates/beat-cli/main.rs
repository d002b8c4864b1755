//! Command line front end for the beat script parser
//!
//! # Usage
//!
//! ```bash
//! # Compile a script into a Scene Plan (stdin when no file is given)
//! beat parse episode.txt --episode-id ep-12 --pretty
//!
//! # Only report warnings, skipping the event tag check
//! beat parse episode.txt --min-severity warning --skip-rule missing_event_tag
//!
//! # Write a script skeleton for an event described in JSON
//! beat skeleton --event gala.json --coins 80 --reputation 2
//!
//! # List built-in diagnostics
//! beat rules
//! ```

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use beat_core::{
    analysis::{BuiltinRules, DiagnosticRule},
    generate_script_skeleton,
    skeleton::CharacterState,
    DiagnosticChecks, DiagnosticConfig, EventSpec, ParseOptions, ParseResult, SkeletonOptions,
    WarningSeverity,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "beat")]
#[command(version)]
#[command(about = "Compile beat-structured episode scripts into Scene Plans")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script into a Scene Plan
    Parse(ParseArgs),

    /// Generate a script skeleton for an event
    Skeleton(SkeletonArgs),

    /// List built-in diagnostics
    Rules,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full Scene Plan as JSON
    Json,
    /// One line per beat plus warnings
    Summary,
}

#[derive(Args)]
struct ParseArgs {
    /// Script file (reads stdin if omitted or `-`)
    input: Option<PathBuf>,

    /// Episode id echoed into the plan
    #[arg(long)]
    episode_id: Option<String>,

    /// Episode title echoed into the plan
    #[arg(long)]
    episode_title: Option<String>,

    /// Minimum warning severity: info or warning
    #[arg(long, default_value = "info")]
    min_severity: String,

    /// Diagnostic code to skip (repeatable)
    #[arg(long = "skip-rule", value_name = "CODE")]
    skip_rules: Vec<String>,

    /// Maximum number of warnings (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_warnings: usize,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct SkeletonArgs {
    /// Event description as JSON (missing fields use defaults)
    #[arg(long, value_name = "FILE")]
    event: Option<PathBuf>,

    /// Event name, overriding the JSON
    #[arg(long)]
    name: Option<String>,

    /// Episode intent
    #[arg(long)]
    intent: Option<String>,

    /// Current coins
    #[arg(long)]
    coins: Option<i64>,

    /// Current reputation
    #[arg(long)]
    reputation: Option<i64>,

    /// Current stress
    #[arg(long)]
    stress: Option<i64>,

    /// Leave out Prime narration
    #[arg(long)]
    no_narration: bool,

    /// Leave out animation stage directions
    #[arg(long)]
    no_animations: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse(args) => cmd_parse(&args),
        Commands::Skeleton(args) => cmd_skeleton(&args).map(|()| true),
        Commands::Rules => {
            cmd_rules();
            Ok(true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Log to stderr so stdout stays machine-readable
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read a file, or stdin for `None` / `-`
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Translate flags into parse options
fn build_parse_options(args: &ParseArgs) -> Result<ParseOptions> {
    let severity: WarningSeverity = args.min_severity.parse()?;
    let mut diagnostics = DiagnosticConfig::default()
        .with_min_severity(severity)
        .with_max_warnings(args.max_warnings);
    for code in &args.skip_rules {
        diagnostics = diagnostics.without_check(DiagnosticChecks::from_code(code)?);
    }

    let mut options = ParseOptions::default().with_diagnostics(diagnostics);
    if let Some(id) = &args.episode_id {
        options = options.with_episode_id(id.as_str());
    }
    if let Some(title) = &args.episode_title {
        options = options.with_episode_title(title.as_str());
    }
    Ok(options)
}

/// Returns `Ok(false)` when the script had nothing to parse
fn cmd_parse(args: &ParseArgs) -> Result<bool> {
    let options = build_parse_options(args)?;
    let text = read_input(args.input.as_deref())?;
    debug!(bytes = text.len(), "read script");

    let result = beat_core::parse_script(&text, &options);
    let rendered = match args.format {
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::Summary => render_summary(&result),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;

    if let Some(error) = result.error() {
        info!(error, "script produced no plan");
    }
    Ok(result.is_success())
}

/// Human-readable overview of a parse
fn render_summary(result: &ParseResult) -> String {
    let Some(plan) = result.plan() else {
        return format!("failed: {}", result.error().unwrap_or("unknown error"));
    };

    let mut lines = vec![format!(
        "{} beats, {} UI actions, {} ({:?} mode)",
        plan.metadata.total_beats,
        plan.metadata.total_ui_actions,
        plan.formatted_duration,
        plan.metadata.parse_mode,
    )];
    for beat in &plan.beats {
        lines.push(format!(
            "{:>3}. {:<28} {:>4}s  {} words, {} dialogue",
            beat.order_position, beat.title, beat.duration_seconds, beat.word_count, beat.dialogue_count
        ));
    }
    lines.extend(plan.warnings.iter().map(ToString::to_string));
    lines.join("\n")
}

/// Load the event description and apply flag overrides
fn load_event(args: &SkeletonArgs) -> Result<EventSpec> {
    let mut event = match &args.event {
        Some(path) => {
            let json = read_input(Some(path))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid event JSON in {}", path.display()))?
        }
        None => EventSpec::default(),
    };
    if let Some(name) = &args.name {
        event.name.clone_from(name);
    }
    Ok(event)
}

/// Translate flags into skeleton options
fn build_skeleton_options(args: &SkeletonArgs) -> SkeletonOptions {
    let mut options = SkeletonOptions::default()
        .with_character_state(CharacterState {
            coins: args.coins,
            reputation: args.reputation,
            stress: args.stress,
        })
        .with_narration(!args.no_narration)
        .with_animations(!args.no_animations);
    if let Some(intent) = &args.intent {
        options = options.with_intent(intent.as_str());
    }
    options
}

fn cmd_skeleton(args: &SkeletonArgs) -> Result<()> {
    let event = load_event(args)?;
    let script = generate_script_skeleton(&event, &build_skeleton_options(args));

    match &args.output {
        Some(path) => {
            fs::write(path, &script)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote skeleton");
        }
        None => writeln!(io::stdout().lock(), "{script}")?,
    }
    Ok(())
}

fn cmd_rules() {
    for rule in BuiltinRules::all_rules() {
        println!(
            "{:<28} {:<8} {}",
            rule.code(),
            rule.default_severity(),
            rule.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(extra: &[&str]) -> ParseArgs {
        let mut argv = vec!["beat", "parse"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Parse(args) => args,
            _ => unreachable!("parse subcommand"),
        }
    }

    fn skeleton_args(extra: &[&str]) -> SkeletonArgs {
        let mut argv = vec!["beat", "skeleton"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Skeleton(args) => args,
            _ => unreachable!("skeleton subcommand"),
        }
    }

    #[test]
    fn parse_flags_become_options() {
        let args = parse_args(&[
            "--episode-id",
            "ep-3",
            "--min-severity",
            "warning",
            "--skip-rule",
            "missing_login",
            "--max-warnings",
            "5",
        ]);
        let options = build_parse_options(&args).unwrap();

        assert_eq!(options.episode_id.as_deref(), Some("ep-3"));
        assert_eq!(options.diagnostics.min_severity, WarningSeverity::Warning);
        assert_eq!(options.diagnostics.max_warnings, 5);
        assert!(!options.diagnostics.checks.contains(DiagnosticChecks::LOGIN_SEQUENCE));
        assert!(options.diagnostics.checks.contains(DiagnosticChecks::EVENT_TAG));
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(build_parse_options(&parse_args(&["--min-severity", "loud"])).is_err());
        assert!(build_parse_options(&parse_args(&["--skip-rule", "nope"])).is_err());
    }

    #[test]
    fn reads_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "## BEAT: REVEAL\nPrime: \"Hi.\"").unwrap();

        let text = read_input(Some(file.path())).unwrap();
        assert!(text.starts_with("## BEAT: REVEAL"));
        assert!(read_input(Some(Path::new("/definitely/missing.txt"))).is_err());
    }

    #[test]
    fn summary_lists_beats_and_failures() {
        let ok = beat_core::parse_script("## BEAT: REVEAL\nPrime: \"Hi.\"", &ParseOptions::default());
        let summary = render_summary(&ok);
        assert!(summary.starts_with("1 beats, 0 UI actions"));
        assert!(summary.contains("Reveal"));
        assert!(summary.contains("[missing_event_tag]"));

        let failed = beat_core::parse_script("", &ParseOptions::default());
        assert_eq!(render_summary(&failed), "failed: No script content provided");
    }

    #[test]
    fn event_json_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Rooftop Gala", "prestige": 9}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = skeleton_args(&["--event", &path, "--coins", "20", "--intent", "glow_up"]);
        let event = load_event(&args).unwrap();
        assert_eq!(event.name, "Rooftop Gala");
        assert_eq!(event.prestige, 9);
        assert_eq!(event.cost_coins, 100);

        let options = build_skeleton_options(&args);
        assert_eq!(options.character_state.coins, Some(20));
        assert_eq!(options.intent.as_deref(), Some("glow_up"));
        assert!(options.include_narration);

        let renamed = load_event(&skeleton_args(&["--name", "Brunch"])).unwrap();
        assert_eq!(renamed.name, "Brunch");
    }

    #[test]
    fn skeleton_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("episode.txt");
        let args = skeleton_args(&["--output", out.to_str().unwrap(), "--no-narration"]);

        cmd_skeleton(&args).unwrap();
        let script = fs::read_to_string(&out).unwrap();
        assert!(script.contains("## BEAT: CLIFFHANGER"));
        assert!(!script.contains("Prime: "));
    }
}
