use anyhow::{Context, Result, bail};
use clap::Parser;
use mansion_core::{Direction, Session, SessionConfig, StepOutcome, VerticalDoorPolicy};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: u32,
    #[arg(long, default_value_t = 6)]
    rooms: usize,
    /// Cut vertical doors at the interior center instead of the fixed offset
    #[arg(long)]
    center_doors: bool,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    println!("Starting random walk on seed {} for {} steps...", args.seed, args.steps);
    let config = SessionConfig {
        rooms: args.rooms,
        vertical_door: if args.center_doors {
            VerticalDoorPolicy::InteriorCenter
        } else {
            VerticalDoorPolicy::default()
        },
        ..SessionConfig::default()
    };
    let mut session = Session::new(args.seed, &config).context("Failed to start session")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut blocked = 0u32;
    for step in 0..args.steps {
        let direction = choose(&mut rng, &Direction::ALL);
        if session.step(direction)? == StepOutcome::Blocked {
            blocked += 1;
        }

        let pos = session.player();
        if !session.mansion().is_passable(pos) {
            bail!("Invariant failed: player on impassable tile {pos:?} at step {step}");
        }
        let collected = session.weapons().iter().filter(|weapon| weapon.collected).count();
        if collected != session.inventory().len() {
            bail!("Invariant failed: inventory out of sync at step {step}");
        }
    }

    println!(
        "Walk completed: {} blocked, {} weapons, {} clues, ended at ({}, {}).",
        blocked,
        session.inventory().len(),
        session.collected_clues().len(),
        session.player().x,
        session.player().y
    );
    Ok(())
}
