//! Match engine: turn arbitration, shot resolution and win detection.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use rand::Rng;

use crate::board::Grid;
use crate::common::{EngineError, ShotOutcome};
use crate::config::SinkPolicy;
use crate::coord::Coord;
use crate::player::{Player, PlayerId, Stats};
use crate::ship::ShipKind;

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The player destroyed the whole enemy fleet.
    Winner(PlayerId),
    /// The player gave up.
    Forfeit(PlayerId),
}

impl Outcome {
    pub fn winner(self) -> PlayerId {
        match self {
            Outcome::Winner(p) => p,
            Outcome::Forfeit(p) => p.other(),
        }
    }

    pub fn loser(self) -> PlayerId {
        self.winner().other()
    }
}

/// Current phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended(Outcome),
}

/// The ship struck by a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipHit {
    pub kind: ShipKind,
    pub parts_left: usize,
}

/// Notifications for the presentation layer, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    MatchStarted {
        first: PlayerId,
    },
    ShotResolved {
        firer: PlayerId,
        at: Coord,
        outcome: ShotOutcome,
        ship: Option<ShipHit>,
    },
    ShipDestroyed {
        owner: PlayerId,
        ship: ShipKind,
        ships_left: usize,
    },
    MatchEnded(Outcome),
}

/// One game session between two players with complete fleets.
#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    active: Option<PlayerId>,
    sink_policy: SinkPolicy,
    phase: Phase,
    events: Vec<MatchEvent>,
}

impl Match {
    /// Seat `player_a` and `player_b` for a match under `sink_policy`.
    ///
    /// Players must come from placement sessions begun as [`PlayerId::A`]
    /// and [`PlayerId::B`] respectively and carry different names.
    pub fn new(
        sink_policy: SinkPolicy,
        player_a: Player,
        player_b: Player,
    ) -> Result<Self, EngineError> {
        if player_a.id() != PlayerId::A || player_b.id() != PlayerId::B {
            return Err(EngineError::WrongSeat);
        }
        if player_a.name() == player_b.name() {
            return Err(EngineError::DuplicateName);
        }
        Ok(Self {
            players: [player_a, player_b],
            active: None,
            sink_policy,
            phase: Phase::NotStarted,
            events: Vec::new(),
        })
    }

    /// Pick the first player at random and open the match.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> Result<PlayerId, EngineError> {
        if self.phase != Phase::NotStarted {
            return Err(EngineError::AlreadyStarted);
        }
        let first = if rng.random_bool(0.5) {
            PlayerId::A
        } else {
            PlayerId::B
        };
        self.active = Some(first);
        self.phase = Phase::InProgress;
        self.emit(MatchEvent::MatchStarted { first });
        Ok(first)
    }

    /// Fire at (`x`, `y`) on the opponent's board.
    ///
    /// The turn passes to the opponent unless the shot wins the match.
    pub fn fire_shot(&mut self, firer: PlayerId, x: u8, y: u8) -> Result<ShotOutcome, EngineError> {
        if self.phase != Phase::InProgress {
            return Err(self.reject(EngineError::MatchNotInProgress));
        }
        if self.active != Some(firer) {
            return Err(self.reject(EngineError::NotYourTurn));
        }
        let opponent = firer.other();
        let impact = match self.players[opponent.index()].receive_shot(x, y, self.sink_policy) {
            Ok(impact) => impact,
            Err(e) => return Err(self.reject(e)),
        };
        self.players[firer.index()].record_shot_fired(impact.outcome);

        let ship = impact
            .ship
            .map(|(kind, parts_left)| ShipHit { kind, parts_left });
        self.emit(MatchEvent::ShotResolved {
            firer,
            at: Coord { x, y },
            outcome: impact.outcome,
            ship,
        });
        if let Some(ShipHit {
            kind,
            parts_left: 0,
        }) = ship
        {
            self.emit(MatchEvent::ShipDestroyed {
                owner: opponent,
                ship: kind,
                ships_left: impact.ships_left,
            });
            if impact.ships_left == 0 {
                self.finish(Outcome::Winner(firer));
                return Ok(impact.outcome);
            }
        }
        self.active = Some(opponent);
        Ok(impact.outcome)
    }

    /// `player` gives up; the opponent wins whoever holds the turn.
    pub fn forfeit(&mut self, player: PlayerId) -> Result<Outcome, EngineError> {
        if self.phase != Phase::InProgress {
            return Err(self.reject(EngineError::MatchNotInProgress));
        }
        let outcome = Outcome::Forfeit(player);
        self.finish(outcome);
        Ok(outcome)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The player holding the turn. `None` before the match starts; after
    /// the end it still names whoever held the last turn.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    pub fn sink_policy(&self) -> SinkPolicy {
        self.sink_policy
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome.winner()),
            _ => None,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Cell states of `id`'s own board.
    pub fn grid(&self, id: PlayerId) -> Grid {
        self.player(id).board().grid()
    }

    pub fn stats(&self, id: PlayerId) -> Stats {
        self.player(id).stats()
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        mem::take(&mut self.events)
    }

    /// Human-readable log line for `event`.
    pub fn narrate(&self, event: &MatchEvent) -> String {
        let name = |id: PlayerId| self.player(id).name();
        match *event {
            MatchEvent::MatchStarted { first } => {
                format!("Welcome to Battleships!\n{} starts the game.", name(first))
            }
            MatchEvent::ShotResolved {
                firer, at, ship, ..
            } => match ship {
                Some(hit) => {
                    let mut msg = format!(
                        "{} fired a shot on {}...\n{}'s {} was HIT!",
                        name(firer),
                        at,
                        name(firer.other()),
                        hit.kind
                    );
                    if hit.parts_left == 1 {
                        msg.push_str(&format!(
                            "\nOne more hit and the {} will be destroyed!",
                            hit.kind
                        ));
                    }
                    msg
                }
                None => format!("{} fired a shot on {}...\nMISS!", name(firer), at),
            },
            MatchEvent::ShipDestroyed {
                ship, ships_left, ..
            } => match ships_left {
                0 => format!("{} got destroyed! No ships left!", ship),
                1 => format!("{} got destroyed! Only 1 ship left!", ship),
                2 => format!("{} got destroyed! Only 2 ships left!", ship),
                n => format!("{} got destroyed! {} ships left!", ship, n),
            },
            MatchEvent::MatchEnded(Outcome::Winner(p)) => {
                format!("{} has won the game!", name(p))
            }
            MatchEvent::MatchEnded(Outcome::Forfeit(p)) => format!(
                "{} has forfeited the game.\n{} is the winner!",
                name(p),
                name(p.other())
            ),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended(outcome);
        self.emit(MatchEvent::MatchEnded(outcome));
    }

    fn emit(&mut self, event: MatchEvent) {
        log::info!("{}", self.narrate(&event));
        self.events.push(event);
    }

    fn reject(&self, err: EngineError) -> EngineError {
        log::debug!("command rejected: {}", err);
        err
    }
}
