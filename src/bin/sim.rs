//! Self-play with random shots, printing a JSON summary on stdout.
//!
//! Usage: `sim <seed> [one-hit]`

use battleships::{
    init_logging, Cell, Match, MatchApi, MatchHandle, Phase, PlacementSession, PlayerId,
    SinkPolicy,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Fire random unresolved cells whenever `me` holds the turn.
async fn shooter(handle: MatchHandle, me: PlayerId, mut rng: SmallRng) -> anyhow::Result<()> {
    loop {
        if let Phase::Ended(_) = handle.phase().await? {
            return Ok(());
        }
        if handle.active_player().await? != Some(me) {
            tokio::task::yield_now().await;
            continue;
        }
        let grid = handle.grid(me.other()).await?;
        let open: Vec<(u8, u8)> = grid
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, c)| matches!(c, Cell::Water | Cell::ShipPart))
                    .map(move |(x, _)| (x as u8, y as u8))
            })
            .collect();
        if open.is_empty() {
            anyhow::bail!("no open cells left while the match is running");
        }
        let (x, y) = open[rng.random_range(0..open.len())];
        handle.fire_shot(me, x, y).await?;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [one-hit]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let sink_policy = match args.get(2).map(String::as_str) {
        Some("one-hit") => SinkPolicy::OneHitSinks,
        Some(other) => anyhow::bail!("unknown option '{}'", other),
        None => SinkPolicy::AllPartsSinks,
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut a = PlacementSession::begin(PlayerId::A, "player1");
    let mut b = PlacementSession::begin(PlayerId::B, "player2");
    a.place_randomly(&mut rng)?;
    b.place_randomly(&mut rng)?;

    let mut game = Match::new(sink_policy, a.finalize()?, b.finalize()?)?;
    let first = game.start(&mut rng)?;

    let (handle, task) = MatchHandle::spawn(game);
    let s1 = tokio::spawn(shooter(
        handle.clone(),
        PlayerId::A,
        SmallRng::seed_from_u64(seed.wrapping_add(1)),
    ));
    let s2 = tokio::spawn(shooter(
        handle.clone(),
        PlayerId::B,
        SmallRng::seed_from_u64(seed.wrapping_add(2)),
    ));
    drop(handle);
    s1.await??;
    s2.await??;
    let game = task.await?;

    let summary = |id: PlayerId| {
        let stats = game.stats(id);
        json!({
            "shots": stats.shots_fired,
            "hits": stats.shots_hit,
            "ships_left": stats.ships_left,
        })
    };
    let result = json!({
        "first": game.player(first).name(),
        "winner": game.winner().map(|w| game.player(w).name()),
        "player1": summary(PlayerId::A),
        "player2": summary(PlayerId::B),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
