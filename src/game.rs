//! Turn sequencing between two players.
//!
//! A shot that finds a ship grants the shooter another shot; a miss passes
//! the turn. Bots shoot through a [`HuntTarget`] bound to the opponent's
//! board for the whole round.

use alloc::string::ToString;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::HuntTarget;
use crate::board::GameBoard;
use crate::common::{GameError, ShotResult};
use crate::geometry::Coord;
use crate::player::Player;

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InProgress,
    /// Index of the player who sank the opposing fleet.
    Won(usize),
}

/// A single shot and its consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub shooter: usize,
    pub coords: Coord,
    pub result: ShotResult,
    /// Who shoots next, `None` once the match is decided.
    pub next: Option<usize>,
}

/// Two players taking turns at each other's boards.
pub struct Match {
    players: [Player; 2],
    attackers: [Option<HuntTarget>; 2],
    active: usize,
    shots: [usize; 2],
    status: MatchStatus,
    rng: SmallRng,
}

impl Match {
    /// Start a match. Both fleets must be fully placed.
    pub fn new(players: [Player; 2], first: usize, mut rng: SmallRng) -> Result<Self, GameError> {
        for p in &players {
            if !p.board().is_complete() {
                return Err(GameError::FleetIncomplete(p.name().to_string()));
            }
        }
        let attackers = Self::arm(&players, &mut rng);
        log::info!(
            "match {} vs {} starts, {} shoots first",
            players[0].name(),
            players[1].name(),
            players[first % 2].name()
        );
        Ok(Match {
            players,
            attackers,
            active: first % 2,
            shots: [0; 2],
            status: MatchStatus::InProgress,
            rng,
        })
    }

    fn arm(players: &[Player; 2], rng: &mut SmallRng) -> [Option<HuntTarget>; 2] {
        let mut arm_for = |shooter: usize| {
            players[shooter].is_bot().then(|| {
                let opponent = players[1 - shooter].board();
                HuntTarget::new(opponent, SmallRng::from_rng(&mut *rng))
            })
        };
        [arm_for(0), arm_for(1)]
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Index of the player whose turn it is.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn player(&self, idx: usize) -> &Player {
        &self.players[idx % 2]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Number of shots fired by each player this round.
    pub fn shots(&self) -> [usize; 2] {
        self.shots
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.status {
            MatchStatus::Won(idx) => Some(&self.players[idx]),
            MatchStatus::InProgress => None,
        }
    }

    /// Whether the active player is a bot.
    pub fn bot_to_move(&self) -> bool {
        self.players[self.active].is_bot()
    }

    /// A human shot at `coords` on the opponent's board.
    pub fn attack(&mut self, coords: Coord) -> Result<Turn, GameError> {
        self.check_in_progress()?;
        if self.bot_to_move() {
            return Err(GameError::NotHumanTurn);
        }
        let target = 1 - self.active;
        let result = self.players[target].board_mut().receive_attack(coords)?;
        Ok(self.settle(coords, result))
    }

    /// One bot shot at the opponent's board.
    pub fn play_bot_turn(&mut self) -> Result<Turn, GameError> {
        self.check_in_progress()?;
        let shooter = self.active;
        let target = 1 - shooter;
        let [first, second] = &mut self.players;
        let opponent = if target == 0 { first } else { second };
        let attacker = self.attackers[shooter]
            .as_mut()
            .ok_or(GameError::NotBotTurn)?;
        let result = attacker.attack(opponent.board_mut())?;
        let coords = opponent
            .board()
            .board()
            .last_attack()
            .ok_or(GameError::NotBotTurn)?;
        Ok(self.settle(coords, result))
    }

    /// Let bots shoot until the match is decided or a human must move.
    pub fn play_bots(&mut self, max_shots: usize) -> Result<MatchStatus, GameError> {
        let mut fired = 0;
        while self.status == MatchStatus::InProgress && self.bot_to_move() {
            if fired == max_shots {
                return Err(GameError::TooManyShots(max_shots));
            }
            self.play_bot_turn()?;
            fired += 1;
        }
        Ok(self.status)
    }

    /// Reset both players for another round. The loser of the last round
    /// shoots first.
    pub fn rematch(&mut self, preserve_placement: bool) -> Result<(), GameError> {
        for p in self.players.iter_mut() {
            p.prepare_next_round(preserve_placement, &mut self.rng)?;
        }
        for p in &self.players {
            if !p.board().is_complete() {
                return Err(GameError::FleetIncomplete(p.name().to_string()));
            }
        }
        if let MatchStatus::Won(winner) = self.status {
            self.active = 1 - winner;
        }
        self.attackers = Self::arm(&self.players, &mut self.rng);
        self.shots = [0; 2];
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    fn check_in_progress(&self) -> Result<(), GameError> {
        match self.status {
            MatchStatus::InProgress => Ok(()),
            MatchStatus::Won(_) => Err(GameError::MatchOver),
        }
    }

    fn settle(&mut self, coords: Coord, result: ShotResult) -> Turn {
        let shooter = self.active;
        self.shots[shooter] += 1;
        if self.players[1 - shooter].board().is_fleet_sunk() {
            self.status = MatchStatus::Won(shooter);
            self.players[shooter].increase_score();
            log::info!(
                "{} wins after {} shots",
                self.players[shooter].name(),
                self.shots[shooter]
            );
            return Turn {
                shooter,
                coords,
                result,
                next: None,
            };
        }
        if !result.is_hit() {
            self.active = 1 - shooter;
        }
        Turn {
            shooter,
            coords,
            result,
            next: Some(self.active),
        }
    }
}
