//! `mansion`: print generated floor plans, play a case on stdin, or replay a
//! saved input journal.

mod config;
mod external;
mod play;

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{LevelFilter, info, warn};
use mansion_core::{
    GeneratorOptions, InputJournal, Interrogator, MansionGenerator, NarrativeSource,
    OfflineInterrogator, OfflineNarrative, Session, replay_to_end,
};

use config::{DoorPolicy, LayoutSection, MansionConfig};
use external::{ExternalCommand, ExternalInterrogator, ExternalNarrative};

#[derive(Parser)]
#[command(name = "mansion")]
#[command(about = "Procedural mansion mystery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file with [layout] and [session] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered floor plan and room table
    Map {
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Play a case, reading commands from stdin
    Play {
        /// Seed for the murderer and weapon draw
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Save the recorded inputs here on exit
        #[arg(short, long)]
        journal: Option<PathBuf>,

        /// Program that prints the story JSON for the drawn murderer and weapon
        #[arg(long)]
        narrative_cmd: Option<String>,

        /// Program that answers questions put to suspects
        #[arg(long)]
        interrogator_cmd: Option<String>,
    },
    /// Rebuild a session from a saved journal and print its final state
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Number of rooms (1-9)
    #[arg(long)]
    rooms: Option<usize>,
    /// Grid width in tiles
    #[arg(long)]
    width: Option<usize>,
    /// Grid height in tiles
    #[arg(long)]
    height: Option<usize>,
    /// Placement of doors toward the room above
    #[arg(long, value_enum)]
    door_policy: Option<DoorPolicy>,
}

impl From<&LayoutArgs> for LayoutSection {
    fn from(args: &LayoutArgs) -> Self {
        Self {
            rooms: args.rooms,
            width: args.width,
            height: args.height,
            door_policy: args.door_policy,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = MansionConfig::load_optional(cli.config.as_deref())?;

    match cli.command {
        Commands::Map { layout } => print_map(&file_config, &layout),
        Commands::Play { seed, layout, journal, narrative_cmd, interrogator_cmd } => {
            let narrative = narrative_source_for(file_config.narrative_command(narrative_cmd))?;
            let interrogator =
                interrogator_for(file_config.interrogation_command(interrogator_cmd))?;
            let run = PlayRun { seed, journal_path: journal, narrative, interrogator };
            play(&file_config, &layout, run)
        }
        Commands::Replay { journal } => replay(journal),
    }
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    builder.filter_level(level);
    // RUST_LOG still refines per-module levels.
    builder.parse_default_env();
    builder.init();
}

fn print_map(file_config: &MansionConfig, layout: &LayoutArgs) -> Result<()> {
    let config = file_config.session_config(&LayoutSection::from(layout));
    let generator = MansionGenerator::new(GeneratorOptions {
        vertical_door: config.vertical_door,
        ..GeneratorOptions::default()
    });
    let mansion = generator
        .generate(config.rooms, config.width, config.height)
        .context("Failed to generate mansion")?;

    for row in mansion.rows() {
        println!("{row}");
    }
    println!();
    for (index, room) in mansion.rooms.iter().enumerate() {
        println!(
            "{index}: {:<14} cell ({}, {})  interior ({}, {})-({}, {})  center ({}, {})",
            room.name,
            room.row,
            room.column,
            room.x1,
            room.y1,
            room.x2,
            room.y2,
            room.center_x,
            room.center_y
        );
    }

    if let Some(first) = mansion.rooms.first() {
        let unreachable = mansion.unreachable_rooms(first.center());
        if !unreachable.is_empty() {
            println!("unreachable from {}: {unreachable:?}", first.name);
        }
    }
    Ok(())
}

struct PlayRun {
    seed: Option<u64>,
    journal_path: Option<PathBuf>,
    narrative: Box<dyn NarrativeSource>,
    interrogator: Box<dyn Interrogator>,
}

fn narrative_source_for(command: Option<String>) -> Result<Box<dyn NarrativeSource>> {
    Ok(match command {
        Some(line) => Box::new(ExternalNarrative::new(ExternalCommand::parse(&line)?)),
        None => Box::new(OfflineNarrative),
    })
}

fn interrogator_for(command: Option<String>) -> Result<Box<dyn Interrogator>> {
    Ok(match command {
        Some(line) => Box::new(ExternalInterrogator::new(ExternalCommand::parse(&line)?)),
        None => Box::new(OfflineInterrogator),
    })
}

fn play(file_config: &MansionConfig, layout: &LayoutArgs, run: PlayRun) -> Result<()> {
    let config = file_config.session_config(&LayoutSection::from(layout));
    let seed = file_config.seed(run.seed).unwrap_or_else(clock_seed);
    info!("starting case with seed {seed}");

    let mut session = Session::with_narrative(seed, &config, run.narrative.as_ref())
        .context("Failed to start session")?;
    let mut journal = InputJournal::new(seed, config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play::run(
        &mut session,
        &mut journal,
        run.interrogator.as_ref(),
        stdin.lock(),
        &mut stdout,
    )?;
    println!("Seed: {seed}");

    if let Some(path) = run.journal_path {
        journal
            .save(&path)
            .with_context(|| format!("Failed to save journal: {}", path.display()))?;
        info!("journal with {} inputs saved to {}", journal.inputs.len(), path.display());
    }
    Ok(())
}

fn replay(journal_path: PathBuf) -> Result<()> {
    let journal = InputJournal::load(&journal_path)
        .with_context(|| format!("Failed to load journal file: {}", journal_path.display()))?;

    let result = replay_to_end(&journal).context("Replay failed during execution")?;
    if journal.inputs.is_empty() {
        warn!("journal contains no inputs");
    }

    println!("Replay complete.");
    println!("Final Position: ({}, {})", result.final_pos.x, result.final_pos.y);
    match result.verdict {
        Some(verdict) => println!("Last Verdict: {verdict:?}"),
        None => println!("Last Verdict: none"),
    }
    println!("Solved: {}", result.solved);
    println!("Inputs Applied: {}", result.inputs_applied);
    println!("Snapshot Hash: {}", result.snapshot_hash);
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
