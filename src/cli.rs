#![cfg(feature = "std")]

//! Text front-end for hot-seat play: board rendering, input parsing and the
//! placement and match loops. The loops read from any `BufRead` and write to
//! any `Write` so they can be scripted.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use rand::Rng;

use crate::board::Grid;
use crate::common::Cell;
use crate::config::{BOARD_SIZE, FLEET};
use crate::coord::{Coord, COLUMN_LETTERS};
use crate::game::{Match, Phase};
use crate::placement::{PlacementSession, PlacementStep};
use crate::player::PlayerId;

/// A line of input during the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    Fire(Coord),
    Board,
    Stats,
    Forfeit,
    Help,
    Quit,
}

/// A line of input during fleet placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCommand {
    Select(Coord),
    Auto,
    Reset,
    Help,
    Quit,
}

pub fn parse_match_command(line: &str) -> Result<MatchCommand, String> {
    match line.trim().to_ascii_lowercase().as_str() {
        "board" | "b" => Ok(MatchCommand::Board),
        "stats" | "s" => Ok(MatchCommand::Stats),
        "forfeit" => Ok(MatchCommand::Forfeit),
        "help" | "?" => Ok(MatchCommand::Help),
        "quit" | "q" => Ok(MatchCommand::Quit),
        other => other
            .parse::<Coord>()
            .map(MatchCommand::Fire)
            .map_err(|e| e.to_string()),
    }
}

pub fn parse_placement_command(line: &str) -> Result<PlacementCommand, String> {
    match line.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(PlacementCommand::Auto),
        "reset" => Ok(PlacementCommand::Reset),
        "help" | "?" => Ok(PlacementCommand::Help),
        "quit" | "q" => Ok(PlacementCommand::Quit),
        other => other
            .parse::<Coord>()
            .map(PlacementCommand::Select)
            .map_err(|e| e.to_string()),
    }
}

fn cell_char(cell: Cell, reveal: bool) -> char {
    match cell {
        Cell::Hit => 'X',
        Cell::Miss => 'o',
        Cell::ShipPart if reveal => 'S',
        Cell::ShipPart | Cell::Water => '.',
    }
}

/// Draw a board. With `reveal` unset, unhit ship parts look like water.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    render_with(grid, |x, y| cell_char(grid[y][x], reveal))
}

/// Draw the board of a placement session, marking selectable cells with `+`.
pub fn render_placement(session: &PlacementSession) -> String {
    let grid = session.board().grid();
    let selectable = session.selectable_cells();
    render_with(&grid, |x, y| {
        if selectable.get(x, y).unwrap_or(false) {
            '+'
        } else {
            cell_char(grid[y][x], true)
        }
    })
}

fn render_with(grid: &Grid, glyph: impl Fn(usize, usize) -> char) -> String {
    let n = BOARD_SIZE as usize;
    let mut out = String::new();
    let _ = writeln!(out, "    ╔═══════════════════════╗");
    let _ = write!(out, "    ║  ");
    for letter in COLUMN_LETTERS.iter() {
        let _ = write!(out, " {}", letter);
    }
    let _ = writeln!(out, " ║");
    let _ = writeln!(out, "    ╠═══════════════════════╣");
    for (y, row) in grid.iter().enumerate().take(n) {
        let _ = write!(out, "    ║ {:2}", y + 1);
        for x in 0..row.len() {
            let _ = write!(out, " {}", glyph(x, y));
        }
        let _ = writeln!(out, " ║");
    }
    let _ = writeln!(out, "    ╚═══════════════════════╝");
    out
}

/// Fleet table and rules summary.
pub fn rules() -> String {
    let mut out = String::from("Fleet:\n");
    for (kind, count) in FLEET.iter() {
        let _ = writeln!(out, "  {}x {:<10} (size {})", count, kind.name(), kind.size());
    }
    out.push_str(
        "\nShips can't overlap or share an edge, but corners may touch.\n\
         Start each ship from its top-left cell. If both orientations fit, pick\n\
         the cell right of the origin (horizontal) or below it (vertical).\n\
         The first player to destroy every enemy ship wins. You may also forfeit.\n",
    );
    out
}

/// Read one trimmed line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Drive a placement session until the fleet is accepted (`true`) or the
/// player quits (`false`).
pub fn run_placement<R: BufRead, W: Write, G: Rng>(
    session: &mut PlacementSession,
    input: &mut R,
    out: &mut W,
    rng: &mut G,
) -> anyhow::Result<bool> {
    loop {
        if session.is_complete() {
            write!(out, "{}", render_placement(session))?;
            writeln!(
                out,
                "All battleships placed. Do you wish to proceed? [y/n] (no clears your placements)"
            )?;
            let Some(answer) = read_line(input)? else {
                return Ok(false);
            };
            if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
                return Ok(true);
            }
            session.reset();
            continue;
        }

        write!(out, "{}", render_placement(session))?;
        if let Some(kind) = session.next_ship() {
            writeln!(
                out,
                "{}, place your battleships! Now placing: {} (size {})",
                session.name(),
                kind,
                kind.size()
            )?;
        }
        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        match parse_placement_command(&line) {
            Ok(PlacementCommand::Select(c)) => match session.select(c.x, c.y) {
                Ok(PlacementStep::ChooseOrientation { origin }) => writeln!(
                    out,
                    "Both orientations fit at {}. Pick the cell to its right or below it.",
                    origin
                )?,
                Ok(PlacementStep::Placed { ship, .. } | PlacementStep::FleetComplete { ship }) => {
                    writeln!(out, "{} placed at {}.", ship.kind(), ship.origin())?
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Ok(PlacementCommand::Auto) => {
                if let Err(e) = session.place_randomly(rng) {
                    writeln!(out, "{}", e)?;
                }
            }
            Ok(PlacementCommand::Reset) => session.reset(),
            Ok(PlacementCommand::Help) => writeln!(
                out,
                "Enter a cell like A5, 'auto' to place the rest randomly, 'reset' or 'quit'."
            )?,
            Ok(PlacementCommand::Quit) => return Ok(false),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Play a started match on one terminal until it ends or a player quits.
pub fn run_match<R: BufRead, W: Write>(
    game: &mut Match,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    flush_events(game, out)?;
    while game.phase() == Phase::InProgress {
        let Some(active) = game.active_player() else {
            break;
        };
        let opponent = active.other();
        writeln!(
            out,
            "\n{}'s turn. Target board of {}:",
            game.player(active),
            game.player(opponent)
        )?;
        write!(out, "{}", render_grid(&game.grid(opponent), false))?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        match parse_match_command(&line) {
            Ok(MatchCommand::Fire(c)) => {
                if let Err(e) = game.fire_shot(active, c.x, c.y) {
                    writeln!(out, "{}", e)?;
                }
            }
            Ok(MatchCommand::Board) => write!(out, "{}", render_grid(&game.grid(active), true))?,
            Ok(MatchCommand::Stats) => writeln!(out, "{}", game.stats(active))?,
            Ok(MatchCommand::Forfeit) => {
                game.forfeit(active)?;
            }
            Ok(MatchCommand::Help) => writeln!(
                out,
                "Enter a cell like B7 to fire, or 'board', 'stats', 'forfeit', 'quit'."
            )?,
            Ok(MatchCommand::Quit) => return Ok(()),
            Err(e) => writeln!(out, "{}", e)?,
        }
        flush_events(game, out)?;
    }

    for id in [PlayerId::A, PlayerId::B] {
        writeln!(out, "\n{}:\n{}", game.player(id), game.stats(id))?;
    }
    Ok(())
}

fn flush_events<W: Write>(game: &mut Match, out: &mut W) -> anyhow::Result<()> {
    for event in game.drain_events() {
        writeln!(out, "{}", game.narrate(&event))?;
    }
    Ok(())
}
