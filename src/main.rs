//! Tharsis - decision resolution harness
//!
//! Builds a session, plays one card for the first participant, and then feeds
//! answer payloads read from stdin until nothing is pending.
//!
//! ## Usage
//!
//! ```text
//! tharsis --card insulation [--players blue,red] [--seed 7] [--options game.json]
//! ```
//!
//! Every pending decision is printed as one JSON line on stdout. Answer it with
//! one line holding a JSON array of string arrays, e.g. `[["1"]]`. When the
//! session is idle the serialized participants are printed. Set `RUST_LOG` to
//! see the resolution trace on stderr.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tharsis::{
    CardName, Color, GameId, GameOptions, GameState, Player, PlayerId, Progress, play_card,
    process,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a card and answer its decisions from stdin")]
struct Args {
    /// Card to play for the first participant, by id or display name.
    #[arg(short, long)]
    card: String,

    /// Comma-separated participant ids, in turn order.
    #[arg(short, long, value_delimiter = ',', default_value = "blue,red")]
    players: Vec<String>,

    /// Deck shuffle seed. Overrides the options file.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with session options.
    #[arg(long)]
    options: Option<PathBuf>,
}

fn load_options(args: &Args) -> Result<GameOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => GameOptions::default(),
    };
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    Ok(options)
}

fn build_game(args: &Args, options: GameOptions) -> Result<GameState> {
    if args.players.is_empty() || args.players.len() > Color::ALL.len() {
        bail!("Between 1 and {} players are supported", Color::ALL.len());
    }
    let players = args
        .players
        .iter()
        .zip(Color::ALL)
        .map(|(id, color)| Player::new(PlayerId::new(id.as_str()), id.as_str(), color))
        .collect();
    Ok(GameState::new(GameId::new("cli"), players, options))
}

fn print_pending(game: &GameState, player: &PlayerId) -> Result<()> {
    let node = game
        .waiting
        .waiting_for(player)
        .ok_or_else(|| anyhow!("{player} is not waiting for anything"))?;
    let line = json!({ "player": player, "decision": node.view() });
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let card = CardName::parse(&args.card).ok_or_else(|| anyhow!("Unknown card: {}", args.card))?;
    let options = load_options(&args)?;
    let mut game = build_game(&args, options)?;

    let first = game.players[0].id.clone();
    info!(player = %first, card = card.id(), "playing card");
    let mut progress = play_card(&mut game, &first, card)?;

    let mut lines = io::stdin().lock().lines();
    while let Progress::Waiting(player) = progress {
        print_pending(&game, &player)?;
        let Some(line) = lines.next() else {
            bail!("Input ended while {player} was still deciding");
        };
        let payload: Vec<Vec<String>> =
            serde_json::from_str(&line?).context("Payload must be a JSON array of string arrays")?;

        progress = match process(&mut game, &player, &payload) {
            Ok(next) => next,
            Err(err) if game.waiting.is_waiting(&player) => {
                warn!(player = %player, "rejected: {err}");
                Progress::Waiting(player)
            }
            Err(err) => return Err(err.into()),
        };
    }

    let players: Vec<_> = game.players.iter().map(Player::serialize).collect();
    println!("{}", serde_json::to_string_pretty(&players)?);
    Ok(())
}
