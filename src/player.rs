use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::GameBoard;
use crate::common::BoardError;
use crate::config::GameConfig;
use crate::fleet::FleetBoard;
use crate::placement::place_ships_randomly;

/// Who picks a player's shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Bot,
}

/// One side of a match: a fleet board, a name and a running score.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    config: GameConfig,
    board: FleetBoard,
    score: u32,
}

impl Player {
    /// A human player with an empty board, waiting for manual placement.
    pub fn human(name: impl Into<String>, config: GameConfig) -> Self {
        let board = FleetBoard::new(config.dimensions, &config.lengths);
        Player {
            name: name.into(),
            kind: PlayerKind::Human,
            config,
            board,
            score: 0,
        }
    }

    /// A bot player; its fleet is placed at random right away.
    pub fn bot<R: Rng + ?Sized>(
        name: impl Into<String>,
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut player = Self::human(name, config);
        player.kind = PlayerKind::Bot;
        player.place_ships_randomly(rng)?;
        Ok(player)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn increase_score(&mut self) {
        self.score += 1;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &FleetBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut FleetBoard {
        &mut self.board
    }

    /// Place every ship that is still waiting, at random.
    pub fn place_ships_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        let lengths = self.board.available_lengths();
        if place_ships_randomly(&lengths, &mut self.board, rng) {
            Ok(())
        } else {
            Err(BoardError::NoPlacement)
        }
    }

    /// Swap in a fresh board for another round.
    ///
    /// With `preserve_placement` the previous ships are put back where they
    /// were; otherwise bots re-place at random and humans start empty.
    pub fn prepare_next_round<R: Rng + ?Sized>(
        &mut self,
        preserve_placement: bool,
        rng: &mut R,
    ) -> Result<(), BoardError> {
        let previous: Vec<_> = self.board.ships_coords();
        self.board = FleetBoard::new(self.config.dimensions, &self.config.lengths);
        if preserve_placement {
            for rect in previous {
                self.board.place_ship(rect)?;
            }
        } else if self.is_bot() {
            self.place_ships_randomly(rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn bot_starts_with_full_fleet() {
        let mut rng = SmallRng::seed_from_u64(4);
        let bot = Player::bot("hal", GameConfig::preset(Preset::Medium), &mut rng).unwrap();
        assert!(bot.board().is_complete());
        assert!(bot.is_bot());
    }

    #[test]
    fn next_round_keeps_or_resets_placement() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut human = Player::human("ada", GameConfig::preset(Preset::Small));
        human.place_ships_randomly(&mut rng).unwrap();
        let before = human.board().ships_coords();

        human.prepare_next_round(true, &mut rng).unwrap();
        assert_eq!(human.board().ships_coords(), before);

        human.prepare_next_round(false, &mut rng).unwrap();
        assert!(human.board().ships_coords().is_empty());
        assert_eq!(human.board().available_lengths(), alloc::vec![1, 1, 2, 4]);
    }
}
