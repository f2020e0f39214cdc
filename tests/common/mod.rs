#![allow(dead_code)]

use battleships::{
    Cell, Coord, Match, Orientation, PlacementSession, PlacementStep, Player, PlayerId,
    SinkPolicy,
};

/// Fixed fleet used across the tests, in placement order.
pub const LAYOUT: [(u8, u8, Orientation); 8] = [
    (0, 0, Orientation::Horizontal), // Carrier
    (6, 0, Orientation::Vertical),   // Battleship
    (0, 2, Orientation::Horizontal), // Cruiser
    (8, 5, Orientation::Vertical),   // Cruiser
    (3, 3, Orientation::Vertical),   // Destroyer
    (0, 9, Orientation::Horizontal), // Destroyer
    (9, 9, Orientation::Vertical),   // Submarine
    (5, 7, Orientation::Vertical),   // Submarine
];

/// Place the next ship at (`x`, `y`), answering the orientation prompt if
/// one comes up.
pub fn place(session: &mut PlacementSession, x: u8, y: u8, orientation: Orientation) {
    match session.select(x, y).unwrap() {
        PlacementStep::ChooseOrientation { origin } => {
            let pick = match orientation {
                Orientation::Horizontal => origin.right(),
                Orientation::Vertical => origin.down(),
            }
            .unwrap();
            session.select(pick.x, pick.y).unwrap();
        }
        PlacementStep::Placed { ship, .. } | PlacementStep::FleetComplete { ship } => {
            if ship.size() > 1 {
                assert_eq!(ship.orientation(), orientation);
            }
        }
    }
}

pub fn standard_session(id: PlayerId, name: &str) -> PlacementSession {
    let mut session = PlacementSession::begin(id, name);
    for (x, y, orientation) in LAYOUT {
        place(&mut session, x, y, orientation);
    }
    assert!(session.is_complete());
    session
}

pub fn standard_player(id: PlayerId, name: &str) -> Player {
    standard_session(id, name).finalize().unwrap()
}

pub fn standard_match(policy: SinkPolicy) -> Match {
    Match::new(
        policy,
        standard_player(PlayerId::A, "Alice"),
        standard_player(PlayerId::B, "Bob"),
    )
    .unwrap()
}

/// Ship cells of `id`'s fleet, ship by ship.
pub fn ship_cells(game: &Match, id: PlayerId) -> Vec<Coord> {
    game.player(id).ships().flat_map(|s| s.cells()).collect()
}

/// Cells of `id`'s board that are still open water.
pub fn water_cells(game: &Match, id: PlayerId) -> Vec<Coord> {
    let grid = game.grid(id);
    let mut cells = Vec::new();
    for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == Cell::Water {
                cells.push(Coord {
                    x: x as u8,
                    y: y as u8,
                });
            }
        }
    }
    cells
}
