use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colloquy::heuristics::{analyze_segments, assign_speakers, detect_change_points};
use colloquy::{
    attribute_transcript, execute_stage3, parse_segments_file, parse_turns_file,
    AttributionConfig, Stage3Config,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Speaker attribution for timestamped transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute speakers to transcript segments and merge them into utterances
    Process {
        /// Transcript segments file (JSON)
        #[arg(short, long)]
        segments: PathBuf,

        /// Speaker turns from a diarization model (JSON); heuristics are used when absent
        #[arg(short, long)]
        turns: Option<PathBuf>,

        /// Output file for machine-readable transcript (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for human-readable transcript (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of heuristic speaker labels
        #[arg(long)]
        max_speakers: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show segment characteristics and heuristic change points without writing output
    Analyze {
        /// Transcript segments file (JSON)
        #[arg(short, long)]
        segments: PathBuf,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            segments,
            turns,
            output,
            human_readable,
            config,
            max_speakers,
            verbose,
        } => {
            setup_logging(verbose);
            let config = load_config(config.as_deref(), max_speakers)?;
            process_transcript(
                &segments,
                turns.as_deref(),
                &output,
                human_readable.as_deref(),
                &config,
            )
        }
        Commands::Analyze {
            segments,
            config,
            verbose,
        } => {
            setup_logging(verbose);
            let config = load_config(config.as_deref(), None)?;
            analyze_transcript(&segments, &config)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>, max_speakers: Option<usize>) -> Result<AttributionConfig> {
    let mut config = match path {
        Some(path) => AttributionConfig::from_file(path)?,
        None => AttributionConfig::default(),
    };

    if let Some(max_speakers) = max_speakers {
        config.heuristics.max_speakers = max_speakers;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn process_transcript(
    segments_path: &Path,
    turns_path: Option<&Path>,
    output: &Path,
    human_readable: Option<&Path>,
    config: &AttributionConfig,
) -> Result<()> {
    info!("Loading transcript segments from {:?}", segments_path);
    let segments =
        parse_segments_file(segments_path).context("Failed to parse transcript segments")?;

    let turns = match turns_path {
        Some(path) => {
            info!("Loading speaker turns from {:?}", path);
            Some(parse_turns_file(path).context("Failed to parse speaker turns")?)
        }
        None => None,
    };

    info!(
        "Loaded {} segments, {} speaker turns",
        segments.len(),
        turns.as_ref().map_or(0, Vec::len)
    );

    let result = attribute_transcript(&segments, turns.as_deref(), config);

    let title = segments_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| segments_path.display().to_string());

    let rendered = execute_stage3(
        &result,
        &title,
        Some(output),
        human_readable,
        &Stage3Config::default(),
    )?;

    info!("Output written to {:?}", rendered.machine_path);
    if let Some(human_path) = rendered.human_path {
        info!("Human-readable output written to {:?}", human_path);
    }

    info!(
        "Complete: {} utterances, {} speakers, {:.1}s",
        result.utterances.len(),
        result.speaker_count(),
        result.total_duration()
    );

    Ok(())
}

fn analyze_transcript(segments_path: &Path, config: &AttributionConfig) -> Result<()> {
    info!("Analyzing transcript from {:?}", segments_path);
    let segments =
        parse_segments_file(segments_path).context("Failed to parse transcript segments")?;

    let characteristics = analyze_segments(&segments, &config.heuristics);
    let change_points = detect_change_points(&characteristics, &config.heuristics);
    let labeled = assign_speakers(&segments, &change_points, config.heuristics.max_speakers);

    println!("Segment Analysis");
    println!("================");
    println!("Total segments: {}", segments.len());
    println!("Change points: {:?}", change_points);
    println!();

    for (c, attributed) in characteristics.iter().zip(&labeled) {
        let mut flags = Vec::new();
        if c.has_question {
            flags.push("question");
        }
        if c.has_exclamation {
            flags.push("exclamation");
        }
        if c.is_short {
            flags.push("short");
        }
        if c.is_long {
            flags.push("long");
        }
        if c.starts_with_greeting {
            flags.push("greeting");
        }
        if c.ends_with_goodbye {
            flags.push("goodbye");
        }

        let marker = if change_points.contains(&c.index) { "*" } else { " " };
        println!(
            "{}{:>4} [{:>7.2}-{:>7.2}] {} {:>3} words {:>5.2} w/s {:<30} {}",
            marker,
            c.index,
            c.start,
            c.end,
            attributed.speaker,
            c.word_count,
            c.words_per_second,
            flags.join(","),
            c.text
        );
    }

    Ok(())
}
