use battleships::{
    Cell, Match, MatchEvent, Outcome, Phase, PlacementSession, PlayerId, SinkPolicy,
    TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_match(seed: u64, policy: SinkPolicy) -> (Match, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut a = PlacementSession::begin(PlayerId::A, "Alice");
    let mut b = PlacementSession::begin(PlayerId::B, "Bob");
    a.place_randomly(&mut rng).unwrap();
    b.place_randomly(&mut rng).unwrap();
    let mut game = Match::new(policy, a.finalize().unwrap(), b.finalize().unwrap()).unwrap();
    game.start(&mut rng).unwrap();
    (game, rng)
}

/// Play random open cells until the match ends, collecting every event.
fn play_out(game: &mut Match, rng: &mut SmallRng) -> Vec<MatchEvent> {
    let mut events = game.drain_events();
    while game.phase() == Phase::InProgress {
        let Some(active) = game.active_player() else {
            break;
        };
        let grid = game.grid(active.other());
        let open: Vec<(u8, u8)> = (0..10u8)
            .flat_map(|y| (0..10u8).map(move |x| (x, y)))
            .filter(|&(x, y)| matches!(grid[y as usize][x as usize], Cell::Water | Cell::ShipPart))
            .collect();
        let (x, y) = open[rng.random_range(0..open.len())];
        game.fire_shot(active, x, y).unwrap();
        events.extend(game.drain_events());
    }
    events
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_match_ends_with_a_winner(seed in any::<u64>()) {
        let (mut game, mut rng) = random_match(seed, SinkPolicy::AllPartsSinks);
        let events = play_out(&mut game, &mut rng);

        let winner = game.winner().unwrap();
        let loser = winner.other();
        prop_assert_eq!(game.phase(), Phase::Ended(Outcome::Winner(winner)));
        prop_assert_eq!(game.stats(winner).shots_hit as usize, TOTAL_SHIP_CELLS);
        prop_assert_eq!(game.stats(loser).ships_left, 0);
        prop_assert!(game.stats(winner).ships_left > 0);

        let endings = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::MatchEnded(_)))
            .count();
        prop_assert_eq!(endings, 1);
        prop_assert_eq!(events.last(), Some(&MatchEvent::MatchEnded(Outcome::Winner(winner))));
    }

    #[test]
    fn shots_alternate_until_the_end(seed in any::<u64>()) {
        let (mut game, mut rng) = random_match(seed, SinkPolicy::OneHitSinks);
        let first = game.active_player().unwrap();
        let events = play_out(&mut game, &mut rng);

        let firers: Vec<PlayerId> = events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::ShotResolved { firer, .. } => Some(*firer),
                _ => None,
            })
            .collect();
        for (i, firer) in firers.iter().enumerate() {
            let expected = if i % 2 == 0 { first } else { first.other() };
            prop_assert_eq!(*firer, expected);
        }
        prop_assert_eq!(firers.last().copied(), game.winner());
    }

    #[test]
    fn hits_taken_matches_hits_fired(seed in any::<u64>()) {
        let (mut game, mut rng) = random_match(seed, SinkPolicy::AllPartsSinks);
        play_out(&mut game, &mut rng);
        for id in [PlayerId::A, PlayerId::B] {
            let stats = game.stats(id);
            prop_assert_eq!(stats.hits_taken, game.stats(id.other()).shots_hit);
            prop_assert_eq!(stats.shots_hit + stats.shots_missed, stats.shots_fired);
            prop_assert_eq!(
                stats.ship_parts_left,
                TOTAL_SHIP_CELLS - stats.hits_taken as usize
            );
        }
    }
}
