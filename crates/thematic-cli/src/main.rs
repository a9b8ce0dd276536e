//! Thematic CLI
//!
//! Command-line host for the seeded clustering engine: loads codes and theme
//! definitions from files, builds the embedder once and prints the report.

mod input;
mod render;

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use thematic_core::{
    AnalysisConfig, CachedEmbedder, LocalEmbedder, ThematicAnalyzer, code_frequencies,
};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Thematic - seeded clustering of feedback codes into researcher themes
#[derive(Parser)]
#[command(name = "thematic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cluster feedback codes into researcher-defined themes")]
#[command(long_about = "Thematic embeds short feedback codes and theme seed words with a local \
sentence-embedding model, then assigns every code to one theme with k-means started from the \
seed centroids.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster codes into themes and print the report
    Analyze {
        /// Codes file (one comma-separated codeword row per line)
        #[arg(long)]
        codes: PathBuf,
        /// Themes file (JSON or `Theme: seed, seed` lines)
        #[arg(long)]
        themes: PathBuf,
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Drop duplicate codes before clustering
        #[arg(long)]
        unique: bool,
        /// Shuffle codes with this seed before clustering
        #[arg(long)]
        shuffle_seed: Option<u64>,
        /// Iteration cap for k-means
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check a themes file without embedding anything
    Validate {
        /// Themes file
        #[arg(long)]
        themes: PathBuf,
    },

    /// Show how often each code occurs
    Counts {
        /// Codes file
        #[arg(long)]
        codes: PathBuf,
        /// Only show the top N codes
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Analyze {
            codes,
            themes,
            config,
            unique,
            shuffle_seed,
            max_iterations,
            format,
            output,
        } => {
            let mut config = load_config(config.as_deref())?;
            if shuffle_seed.is_some() {
                config.shuffle_seed = shuffle_seed;
            }
            if let Some(max) = max_iterations {
                config.max_iterations = max;
            }
            run_analyze(&codes, &themes, unique, config, format, output.as_deref())
        }
        Commands::Validate { themes } => run_validate(&themes),
        Commands::Counts { codes, top } => run_counts(&codes, top),
    }
}

/// File config (if any), then `THEMATIC_*` environment overrides
fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let base = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config in {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    Ok(base.with_overrides(|key| std::env::var(key).ok()))
}

fn run_analyze(
    codes_path: &Path,
    themes_path: &Path,
    unique: bool,
    config: AnalysisConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let themes = input::load_themes(themes_path)?;
    let codes = input::load_codes(codes_path, unique)?;
    info!(codes = codes.len(), themes = themes.len(), "Inputs loaded");

    let local = LocalEmbedder::new();
    if let Err(e) = local.init() {
        error!("Failed to initialize embedding model: {}", e);
        error!("Hint: Check FASTEMBED_CACHE_PATH or network access for the first download");
        return Err(e.into());
    }

    let embedder = CachedEmbedder::new(local, config.embedding_cache_size);
    let analyzer = ThematicAnalyzer::with_config(embedder, config)?;

    let analysis = match analyzer.analyze(&codes, &themes) {
        Ok(analysis) => analysis,
        Err(e) if e.is_insufficient_data() => {
            eprintln!("{} {}", "Not enough data yet:".yellow().bold(), e);
            eprintln!("Collect more feedback or declare fewer themes, then run again.");
            std::process::exit(2);
        }
        Err(e) => return Err(e).context("thematic clustering failed"),
    };
    let report = analysis.report()?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Json => writeln!(writer, "{}", report.to_json()?)?,
        OutputFormat::Text => render::write_text(&mut writer, &report)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        info!("Report written to {}", path.display());
    }
    Ok(())
}

fn run_validate(themes_path: &Path) -> Result<()> {
    let themes = input::load_themes(themes_path)?;
    println!("{}", "Themes OK".green().bold());
    for theme in &themes {
        println!(
            "  {} ({} seeds): {}",
            theme.name().bold(),
            theme.seeds().len(),
            theme.seeds().join(", ")
        );
    }
    Ok(())
}

fn run_counts(codes_path: &Path, top: Option<usize>) -> Result<()> {
    let codes = input::load_codes(codes_path, false)?;
    let frequencies = code_frequencies(&codes);
    let shown = top.unwrap_or(frequencies.len());

    println!("{} codes, {} distinct", codes.len(), frequencies.len());
    for (code, count) in frequencies.into_iter().take(shown) {
        println!("  {:>5}  {}", count, code);
    }
    Ok(())
}
