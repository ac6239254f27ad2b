//! Solo deck-building game - main binary
//!
//! Runs one interactive game on stdin/stdout and emits the JSON replay
//! log when it ends.

use anyhow::Context;
use clap::Parser;
use dominion_solo::catalog;
use dominion_solo::game::{GameLoop, InteractiveProvider};

#[derive(Parser)]
#[command(name = "dominion")]
#[command(about = "Solo deck-building card game", long_about = None)]
struct Cli {
    /// Random seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Show literal deck and discard contents instead of counts
    #[arg(long)]
    cheat: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let registry = catalog::standard_registry().context("failed to build the card catalog")?;
    let mut state = catalog::starting_state();

    let mut game = GameLoop::new(&registry, &mut state).with_cheat(cli.cheat);
    if let Some(seed) = cli.seed {
        game = game.with_seed(seed);
    }

    let mut decisions = InteractiveProvider::new();
    let result = game.run(&mut decisions).context("game aborted")?;

    let log = game
        .history()
        .to_json()
        .context("failed to render the game log")?;
    println!("GAME LOG: {log}");
    println!(
        "Final score: {} points over {} turns",
        result.score, result.turns_played
    );
    Ok(())
}
