#![cfg(feature = "std")]

//! Plain-text rendering of boards for the command line.

use std::fmt::Write;

use crate::board::{Board, GameBoard, ShipStatus};
use crate::geometry::Coord;

const WATER: char = '.';
const KNOWN_EMPTY: char = '-';
const MISS: char = 'o';
const HIT: char = 'x';
const SUNK: char = '#';
const SHIP: char = 'S';

struct Snapshot {
    ships: Vec<ShipStatus>,
    missed: Vec<Coord>,
    known_empty: Vec<Coord>,
}

impl Snapshot {
    fn of(board: &Board) -> Self {
        Snapshot {
            ships: board.ships_status(),
            missed: board.missed_attacks(),
            known_empty: board.redundant_adjacent(),
        }
    }

    /// Character shown for `coords`. Unhit ship cells are only shown when
    /// `reveal` is set, i.e. when the owner looks at their own board.
    fn cell_char(&self, coords: Coord, reveal: bool) -> char {
        if let Some(status) = self.ships.iter().find(|s| s.rect.contains(coords)) {
            if status.sunk {
                return SUNK;
            }
            if status.hits.contains(&coords) {
                return HIT;
            }
            if reveal {
                return SHIP;
            }
        }
        if self.missed.contains(&coords) {
            MISS
        } else if self.known_empty.contains(&coords) {
            KNOWN_EMPTY
        } else {
            WATER
        }
    }
}

/// Render `board` as a grid with row and column indices.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let dims = board.grid_dimensions();
    let snapshot = Snapshot::of(board);
    let mut out = String::new();
    out.push_str("   ");
    for col in 0..dims.cols() {
        let _ = write!(out, "{:>2}", col);
    }
    out.push('\n');
    for row in 0..dims.rows() {
        let _ = write!(out, "{:>2} ", row);
        for col in 0..dims.cols() {
            let _ = write!(out, " {}", snapshot.cell_char(Coord::new(row, col), reveal));
        }
        out.push('\n');
    }
    out
}

/// Print both views of a match: the player's own board and what they know of
/// the opponent's.
pub fn print_player_view(name: &str, own: &Board, opponent: &Board) {
    println!("{name}'s fleet:");
    print!("{}", render_board(own, true));
    println!("{name}'s view of the opponent:");
    print!("{}", render_board(opponent, false));
}
