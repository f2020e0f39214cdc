use battleships::{footprint, Board, Cell, EngineError, Orientation, ShotOutcome};

fn board_with_destroyer() -> Board {
    let mut board = Board::new();
    board.mark_ship(footprint(2, 3, 2, Orientation::Vertical).unwrap());
    board
}

#[test]
fn test_new_board_is_water() {
    let board = Board::new();
    assert!(board
        .grid()
        .iter()
        .flatten()
        .all(|&c| c == Cell::Water));
}

#[test]
fn test_record_shot_hit_and_miss() {
    let mut board = board_with_destroyer();
    assert_eq!(board.cell_state(2, 3).unwrap(), Cell::ShipPart);
    assert_eq!(board.record_shot(2, 3).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.record_shot(3, 3).unwrap(), ShotOutcome::Miss);

    let grid = board.grid();
    assert_eq!(grid[3][2], Cell::Hit);
    assert_eq!(grid[3][3], Cell::Miss);
    assert_eq!(grid[4][2], Cell::ShipPart);
    assert_eq!(board.resolved().count_ones(), 2);
}

#[test]
fn test_repeated_shot_is_rejected() {
    let mut board = board_with_destroyer();
    board.record_shot(0, 0).unwrap();
    let before = board;
    assert_eq!(
        board.record_shot(0, 0).unwrap_err(),
        EngineError::CellAlreadyResolved
    );
    assert_eq!(board, before);
}

#[test]
fn test_off_board_shot() {
    let mut board = Board::new();
    assert_eq!(
        board.record_shot(10, 0).unwrap_err(),
        EngineError::OutOfBounds { x: 10, y: 0 }
    );
    assert_eq!(
        board.cell_state(0, 10).unwrap_err(),
        EngineError::OutOfBounds { x: 0, y: 10 }
    );
    assert_eq!(board, Board::new());
}

#[test]
fn test_mark_hits_only_touches_ships() {
    let mut board = board_with_destroyer();
    let mask = footprint(2, 2, 4, Orientation::Vertical).unwrap();
    board.mark_hits(mask);
    assert_eq!(board.hits().count_ones(), 2);
    assert_eq!(board.cell_state(2, 2).unwrap(), Cell::Water);
}

#[test]
fn test_clear() {
    let mut board = board_with_destroyer();
    board.record_shot(5, 5).unwrap();
    board.clear();
    assert_eq!(board, Board::new());
}
