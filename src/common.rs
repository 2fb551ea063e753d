//! Common types: shot results and the error taxonomy of the engine.

use alloc::string::String;
use thiserror::Error;

use crate::geometry::{Coord, Rect};

/// Outcome of a single attack on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// No ship at the target.
    Miss,
    /// A ship was hit and still floats.
    Hit,
    /// The hit sank the ship.
    SunkHit,
}

impl ShotResult {
    /// Whether the shot found a ship. A non-miss grants another shot.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Start coordinate comes after the end coordinate.
    #[error("malformed rectangle {0}, start must not come after end")]
    Malformed(Rect),
    /// Rect leaves the grid.
    #[error("ship rect {0} must lie inside the grid")]
    OutOfGrid(Rect),
    /// Rect is neither a single row nor a single column.
    #[error("ship rect {0} must be horizontal or vertical")]
    NotAxisAligned(Rect),
    /// Rect touches another ship, diagonals included.
    #[error("ship rect {0} touches or overlaps another ship")]
    Overlap(Rect),
    /// The board has already been attacked.
    #[error("ships cannot be placed or removed after the first attack")]
    AfterFirstAttack,
}

/// Why an attack target was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackRejection {
    /// Target lies off the grid.
    #[error("shot {0} is outside the grid")]
    OutOfGrid(Coord),
    /// Target was already shot at, hit or miss.
    #[error("shot {0} was attacked previously")]
    AlreadyAttacked(Coord),
    /// Target is known to be empty.
    #[error("shot {0} lies next to a known hit or sunk ship")]
    DeadZone(Coord),
}

/// Errors returned by board and fleet operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A grid needs at least one row and one column.
    #[error("board dimensions must be >= 1, given [{rows}, {cols}]")]
    InvalidDimensions { rows: i32, cols: i32 },
    /// Ships are at least one cell long.
    #[error("ship length must be >= 1")]
    InvalidShipLength,
    /// Placement was rejected; the cause says why.
    #[error("illegal placement: {0}")]
    IllegalPlacement(#[from] PlacementError),
    /// No placed ship matches the rect.
    #[error("no ship found at {0}")]
    NotFound(Rect),
    /// Attack was rejected; the cause says why.
    #[error("invalid attack: {0}")]
    InvalidAttack(#[from] AttackRejection),
    /// The ship segment was hit before.
    #[error("ship position {0} was already hit")]
    AlreadyHit(usize),
    /// Segment index past the end of the ship.
    #[error("ship position {position} is outside [0, {length})")]
    PositionOutOfRange { position: usize, length: usize },
    /// The fleet has no ship of this length.
    #[error("ship length {0} is not part of this fleet")]
    LengthNotAllowed(usize),
    /// Every ship of this length is already placed.
    #[error("no ship of length {0} left to place")]
    LengthUnavailable(usize),
    /// Random placement found no legal layout.
    #[error("no legal placement exists for the remaining fleet")]
    NoPlacement,
}

/// Errors returned by the random coordinate generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Every cell has been handed out or excluded.
    #[error("all coordinates have been consumed")]
    Exhausted,
}

/// Errors returned by the hunt/target attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttackError {
    /// The generator ran dry.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// The board rejected the shot.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Board size differs from the one the attacker was built for.
    #[error("attacker is bound to a different grid")]
    DimensionMismatch,
    /// Nothing left to try around the first hit.
    #[error("no orthogonal neighbour left to explore around the first hit")]
    NoCandidate,
    /// Direction flips hit their cap without finding a target.
    #[error("no attackable cell along the hunted ship's axis")]
    DirectionStalled,
}

/// Errors returned by match sequencing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A player still has ships to place.
    #[error("player {0} has not placed every ship")]
    FleetIncomplete(String),
    /// The match already has a winner.
    #[error("the match is already decided")]
    MatchOver,
    /// A bot is due to shoot.
    #[error("it is not a human player's turn")]
    NotHumanTurn,
    /// A human is due to shoot.
    #[error("it is not a bot's turn")]
    NotBotTurn,
    /// Bots ran past the shot limit.
    #[error("bot could not finish the match within {0} shots")]
    TooManyShots(usize),
    /// A board operation failed.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// A bot's attack failed.
    #[error(transparent)]
    Attack(#[from] AttackError),
}
