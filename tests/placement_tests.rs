mod common;

use battleships::placement::{check, evaluate, legal_origins};
use battleships::{
    footprint, Board, Cell, Coord, EngineError, Orientation, Orientations, PlacementError,
    PlacementSession, PlacementState, PlacementStep, PlayerId, ShipKind, FLEET_SIZE,
    TOTAL_SHIP_CELLS,
};
use common::{place, standard_session, LAYOUT};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn board_with(ships: &[(u8, u8, usize, Orientation)]) -> Board {
    let mut board = Board::new();
    for &(x, y, size, orientation) in ships {
        board.mark_ship(check(&board, x, y, size, orientation).unwrap());
    }
    board
}

#[test]
fn test_submarine_in_corner() {
    let board = board_with(&[(0, 0, 1, Orientation::Vertical)]);
    assert_eq!(board.cell_state(0, 0).unwrap(), Cell::ShipPart);

    // on top of it and next to it
    assert!(!evaluate(&board, 0, 0, 2).any());
    assert!(!evaluate(&board, 1, 0, 2).any());
    assert!(!evaluate(&board, 0, 1, 2).any());

    // one cell of separation is enough
    assert!(evaluate(&board, 2, 0, 2).both());
}

#[test]
fn test_diagonal_contact_is_legal() {
    let board = board_with(&[(0, 0, 1, Orientation::Vertical)]);
    let fits = evaluate(&board, 1, 1, 2);
    assert!(fits.horizontal_ok);
    assert!(fits.vertical_ok);
}

#[test]
fn test_ships_separated_by_one_cell() {
    let board = board_with(&[
        (0, 0, 2, Orientation::Horizontal),
        (3, 0, 3, Orientation::Horizontal),
    ]);
    assert_eq!(board.ship_map().count_ones(), 5);

    assert_eq!(
        check(&board, 0, 1, 2, Orientation::Horizontal),
        Err(PlacementError::Adjacent)
    );
    assert_eq!(
        check(&board, 2, 0, 1, Orientation::Vertical),
        Err(PlacementError::Adjacent)
    );
    assert_eq!(
        check(&board, 4, 0, 2, Orientation::Vertical),
        Err(PlacementError::Overlap)
    );
}

#[test]
fn test_end_of_ship_is_guarded() {
    // a vertical ship ending at row 3 blocks the cell below its end
    let board = board_with(&[(5, 0, 4, Orientation::Vertical)]);
    assert_eq!(
        check(&board, 5, 4, 2, Orientation::Horizontal),
        Err(PlacementError::Adjacent)
    );
    assert!(check(&board, 6, 4, 2, Orientation::Horizontal).is_ok());
}

#[test]
fn test_ship_along_the_edge() {
    let board = Board::new();
    assert!(check(&board, 5, 9, 5, Orientation::Horizontal).is_ok());
    assert!(check(&board, 9, 5, 5, Orientation::Vertical).is_ok());
    assert_eq!(
        check(&board, 9, 6, 5, Orientation::Vertical),
        Err(PlacementError::OutOfBounds)
    );
}

#[test]
fn test_single_cell_reports_vertical_only() {
    let board = Board::new();
    assert_eq!(
        evaluate(&board, 4, 4, 1),
        Orientations {
            vertical_ok: true,
            horizontal_ok: false,
        }
    );
}

#[test]
fn test_legal_origins_on_empty_board() {
    // a carrier fits wherever x <= 5 or y <= 5
    let origins = legal_origins(&Board::new(), ShipKind::Carrier.size());
    assert_eq!(origins.count_ones(), 84);
    assert!(!origins.get(9, 9).unwrap());
}

#[test]
fn test_session_starts_with_carrier() {
    let session = PlacementSession::begin(PlayerId::A, "Alice");
    assert_eq!(session.state(), PlacementState::AwaitingOrigin);
    assert_eq!(session.next_ship(), Some(ShipKind::Carrier));
    assert_eq!(session.placed(), 0);
    assert_eq!(session.selectable_cells().count_ones(), 84);
}

#[test]
fn test_orientation_choice() {
    let mut session = PlacementSession::begin(PlayerId::A, "Alice");
    let origin = Coord { x: 0, y: 0 };
    assert_eq!(
        session.select(0, 0).unwrap(),
        PlacementStep::ChooseOrientation { origin }
    );
    assert_eq!(
        session.state(),
        PlacementState::AwaitingOrientation { origin }
    );

    let choices: Vec<_> = session.selectable_cells().cells().collect();
    assert_eq!(choices, vec![(1, 0), (0, 1)]);

    // anything else is refused and the prompt stays open
    assert_eq!(
        session.select(5, 5),
        Err(EngineError::InvalidPlacement(PlacementError::UnexpectedCell))
    );
    assert_eq!(
        session.propose_origin(2, 2),
        Err(EngineError::InvalidPlacement(PlacementError::UnexpectedCell))
    );
    assert_eq!(
        session.state(),
        PlacementState::AwaitingOrientation { origin }
    );

    match session.select(0, 1).unwrap() {
        PlacementStep::Placed { ship, next } => {
            assert_eq!(ship.kind(), ShipKind::Carrier);
            assert_eq!(ship.orientation(), Orientation::Vertical);
            assert_eq!(next, ShipKind::Battleship);
        }
        other => panic!("unexpected step {:?}", other),
    }
    assert_eq!(session.state(), PlacementState::AwaitingOrigin);
    assert_eq!(session.board().ship_map().count_ones(), 5);
}

#[test]
fn test_single_orientation_commits_at_once() {
    let mut session = PlacementSession::begin(PlayerId::A, "Alice");
    match session.select(6, 0).unwrap() {
        PlacementStep::Placed { ship, .. } => {
            assert_eq!(ship.orientation(), Orientation::Vertical);
            assert_eq!(ship.origin(), Coord { x: 6, y: 0 });
        }
        other => panic!("unexpected step {:?}", other),
    }
    assert_eq!(session.placed(), 1);
}

#[test]
fn test_rejection_reasons() {
    let mut session = PlacementSession::begin(PlayerId::A, "Alice");
    assert_eq!(
        session.select(9, 9),
        Err(EngineError::InvalidPlacement(PlacementError::OutOfBounds))
    );
    place(&mut session, 0, 0, Orientation::Horizontal);

    assert_eq!(
        session.select(0, 0),
        Err(EngineError::InvalidPlacement(PlacementError::Overlap))
    );
    assert_eq!(
        session.select(0, 1),
        Err(EngineError::InvalidPlacement(PlacementError::Adjacent))
    );
    assert_eq!(
        session.select(10, 0),
        Err(EngineError::InvalidPlacement(PlacementError::OutOfBounds))
    );
    assert_eq!(session.placed(), 1);
    assert_eq!(session.state(), PlacementState::AwaitingOrigin);
}

#[test]
fn test_submarine_never_asks_for_orientation() {
    let mut session = PlacementSession::begin(PlayerId::B, "Bob");
    for &(x, y, orientation) in &LAYOUT[..6] {
        place(&mut session, x, y, orientation);
    }
    assert_eq!(session.next_ship(), Some(ShipKind::Submarine));
    assert!(matches!(
        session.select(9, 9).unwrap(),
        PlacementStep::Placed { .. }
    ));
    assert!(matches!(
        session.select(5, 7).unwrap(),
        PlacementStep::FleetComplete { .. }
    ));
    assert_eq!(session.state(), PlacementState::FleetComplete);
}

#[test]
fn test_complete_fleet() {
    let mut session = standard_session(PlayerId::A, "Alice");
    assert_eq!(session.next_ship(), None);
    assert!(session.selectable_cells().is_empty());
    assert_eq!(
        session.select(4, 6),
        Err(EngineError::InvalidPlacement(PlacementError::FleetComplete))
    );

    let player = session.finalize().unwrap();
    assert_eq!(player.name(), "Alice");
    assert_eq!(player.id(), PlayerId::A);
    assert_eq!(player.ships().count(), FLEET_SIZE);
    assert_eq!(player.ship_parts_left(), TOTAL_SHIP_CELLS);
    assert_eq!(player.ships_left(), FLEET_SIZE);
    assert_eq!(player.fleet()[&ShipKind::Cruiser].len(), 2);
    assert_eq!(player.ship_at(3, 4).map(|s| s.kind()), Some(ShipKind::Destroyer));
}

#[test]
fn test_finalize_incomplete() {
    let mut session = PlacementSession::begin(PlayerId::A, "Alice");
    place(&mut session, 0, 0, Orientation::Horizontal);
    assert_eq!(
        session.finalize().unwrap_err(),
        EngineError::IncompleteFleet { placed: 1 }
    );
}

#[test]
fn test_reset() {
    let mut session = standard_session(PlayerId::A, "Alice");
    session.reset();
    assert_eq!(session.placed(), 0);
    assert_eq!(session.state(), PlacementState::AwaitingOrigin);
    assert!(session.board().ship_map().is_empty());
    assert!(session.fleet().is_empty());
    assert_eq!(session.next_ship(), Some(ShipKind::Carrier));
}

#[test]
fn test_place_randomly_is_reproducible() {
    let mut a = PlacementSession::begin(PlayerId::A, "Alice");
    let mut b = PlacementSession::begin(PlayerId::A, "Alice");
    a.place_randomly(&mut SmallRng::seed_from_u64(42)).unwrap();
    b.place_randomly(&mut SmallRng::seed_from_u64(42)).unwrap();
    assert!(a.is_complete());
    assert_eq!(a.board(), b.board());
    assert_eq!(a.board().ship_map().count_ones(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_place_randomly_keeps_committed_ships() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut session = PlacementSession::begin(PlayerId::A, "Alice");
    place(&mut session, 0, 0, Orientation::Horizontal);
    // leave an orientation prompt pending
    session.select(0, 2).unwrap();
    session.place_randomly(&mut rng).unwrap();

    assert!(session.is_complete());
    let carrier = footprint(0, 0, 5, Orientation::Horizontal).unwrap();
    assert_eq!(session.board().ship_map() & carrier, carrier);
    assert_eq!(
        session.place_randomly(&mut rng),
        Err(EngineError::InvalidPlacement(PlacementError::FleetComplete))
    );
}
