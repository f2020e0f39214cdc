use std::io::{self, BufRead, Write};

use anyhow::bail;
use battleships::cli::{self, run_match, run_placement};
use battleships::{init_logging, Match, PlacementSession, Player, PlayerId, SinkPolicy};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a two-player match on this terminal.
    Play {
        #[arg(long, default_value = "Player 1")]
        player_a: String,
        #[arg(long, default_value = "Player 2")]
        player_b: String,
        #[arg(long, help = "Ships sink from a single hit")]
        one_hit_sinks: bool,
        #[arg(long, help = "Place both fleets randomly")]
        auto_place: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Print the fleet and the placement rules.
    Rules,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rules => print!("{}", cli::rules()),
        Commands::Play {
            player_a,
            player_b,
            one_hit_sinks,
            auto_place,
            seed,
        } => {
            if player_a == player_b {
                bail!("Players can't have the same name!");
            }
            let mut rng = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (game will be reproducible)", s);
                    SmallRng::seed_from_u64(s)
                }
                None => {
                    let mut seed_rng = rand::rng();
                    SmallRng::from_rng(&mut seed_rng)
                }
            };
            let sink_policy = if one_hit_sinks {
                SinkPolicy::OneHitSinks
            } else {
                SinkPolicy::AllPartsSinks
            };

            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();

            let Some(a) = arrange(PlayerId::A, player_a, auto_place, &mut input, &mut out, &mut rng)?
            else {
                return Ok(());
            };
            let Some(b) = arrange(PlayerId::B, player_b, auto_place, &mut input, &mut out, &mut rng)?
            else {
                return Ok(());
            };

            let mut game = Match::new(sink_policy, a, b)?;
            game.start(&mut rng)?;
            run_match(&mut game, &mut input, &mut out)?;
        }
    }
    Ok(())
}

/// Build one player's fleet, returning `None` if they quit.
fn arrange<R: BufRead, W: Write>(
    id: PlayerId,
    name: String,
    auto_place: bool,
    input: &mut R,
    out: &mut W,
    rng: &mut SmallRng,
) -> anyhow::Result<Option<Player>> {
    let mut session = PlacementSession::begin(id, name);
    if auto_place {
        session.place_randomly(rng)?;
    } else if !run_placement(&mut session, input, out, rng)? {
        return Ok(None);
    }
    Ok(Some(session.finalize()?))
}
