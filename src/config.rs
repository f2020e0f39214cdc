use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;

/// Ship kinds and how many of each every player places.
pub const FLEET: [(ShipKind, usize); 5] = [
    (ShipKind::Carrier, 1),
    (ShipKind::Battleship, 1),
    (ShipKind::Cruiser, 2),
    (ShipKind::Destroyer, 2),
    (ShipKind::Submarine, 2),
];

/// Number of ships in a complete fleet.
pub const FLEET_SIZE: usize = 1 + 1 + 2 + 2 + 2;

/// Order in which ships are placed during fleet setup.
pub const PLACEMENT_ORDER: [ShipKind; FLEET_SIZE] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Cruiser,
    ShipKind::Destroyer,
    ShipKind::Destroyer,
    ShipKind::Submarine,
    ShipKind::Submarine,
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 2 * 3 + 2 * 2 + 2 * 1;

/// Rule deciding when a ship counts as destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SinkPolicy {
    /// The first hit on any part destroys the whole ship.
    OneHitSinks,
    /// Every part has to be hit.
    #[default]
    AllPartsSinks,
}
