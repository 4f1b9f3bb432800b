use rand::Rng;

use crate::{
    ai::Ai,
    direction::Direction,
    event::{tile_value, EventKind, MoveEvent},
    logic::{self, Resolution},
    spawn::RandomSpawner,
    PackedBoard,
};

/// Owns the authoritative board and advances it one move at a time.
pub struct Game<R> {
    board: PackedBoard,
    spawner: RandomSpawner<R>,
    moves: u64,
}

impl<R> Game<R>
where
    R: Rng,
{
    pub const fn new(board: PackedBoard, rng: R) -> Self {
        Self {
            board,
            spawner: RandomSpawner::new(rng),
            moves: 0,
        }
    }

    pub const fn board(&self) -> &PackedBoard {
        &self.board
    }

    pub const fn moves(&self) -> u64 {
        self.moves
    }

    /// Numeric value of the largest tile, 0 on an empty board.
    pub fn highest_tile(&self) -> u64 {
        match self.board.max_cell() {
            0 => 0,
            cell => tile_value(cell),
        }
    }

    pub fn is_over(&self) -> bool {
        !logic::has_move(self.board)
    }

    /// Clears the board and places the opening tile.
    pub fn reset(&mut self) -> Vec<MoveEvent> {
        self.board.reset();
        self.moves = 0;

        vec![MoveEvent::reset(), self.spawner.spawn_one(&mut self.board)]
    }

    /// Resolves `direction` and, if anything moved, spawns a tile. A move that changes nothing
    /// does not advance the game.
    pub fn play(&mut self, direction: Direction) -> Resolution {
        let mut resolution = logic::apply_move(&mut self.board, direction);

        if resolution.changed {
            self.moves += 1;

            let spawn = self.spawner.spawn_one(&mut self.board);
            if spawn.kind == EventKind::Over {
                log::warn!("no room to spawn after {direction:?} on move {}", self.moves);
            }

            resolution.events.push(spawn);
        }

        resolution
    }

    /// Lets `ai` pick the next move and plays it. `None` once the game is over.
    pub fn auto_step(&mut self, ai: &mut impl Ai) -> Option<Resolution> {
        let direction = ai.get_next_move(&self.board)?;

        if let Some(stats) = ai.last_stats() {
            log::info!(
                "move {}: {direction:?} {} {} {}",
                self.moves + 1,
                stats.nodes_searched,
                stats.depth_cutoffs,
                stats.probability_cutoffs,
            );
        } else {
            log::info!("move {}: {direction:?}", self.moves + 1);
        }

        Some(self.play(direction))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        ai::{ExpectimaxAi, RandomAi, SearchConfig},
        tracker::TileTracker,
    };

    fn game(seed: u64) -> Game<ChaCha8Rng> {
        Game::new(PackedBoard::standard(), ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn reset_emits_reset_then_one_spawn() {
        let mut game = game(1);

        let events = game.reset();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], MoveEvent::reset());
        assert_eq!(events[1].kind, EventKind::New);
        assert_eq!(game.board().empty_cell_count(), 15);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn no_op_move_does_not_spawn() {
        let board = PackedBoard::from_rows([
            [2, 4, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut game = Game::new(board, ChaCha8Rng::seed_from_u64(2));

        let resolution = game.play(Direction::Left);

        assert!(!resolution.changed);
        assert!(resolution.events.is_empty());
        assert_eq!(game.board(), &board);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn changed_move_ends_with_a_spawn() {
        let board = PackedBoard::from_rows([
            [2, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        let mut game = Game::new(board, ChaCha8Rng::seed_from_u64(3));

        let resolution = game.play(Direction::Left);

        assert!(resolution.changed);
        assert_eq!(resolution.events.len(), 2);
        assert_eq!(resolution.events[1].kind, EventKind::New);
        assert_eq!(game.board().empty_cell_count(), 14);
        assert_eq!(game.highest_tile(), 4);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn random_game_runs_to_completion_and_tracks_events() {
        let mut game = game(4);
        let mut ai = RandomAi::new(ChaCha8Rng::seed_from_u64(40));
        let mut tracker = TileTracker::new();
        tracker.apply_all(&game.reset()).unwrap();

        while let Some(resolution) = game.auto_step(&mut ai) {
            assert!(resolution.changed);
            tracker.apply_all(&resolution.events).unwrap();
            assert!(tracker.matches(game.board()));
        }

        assert!(game.is_over());
        assert_eq!(game.board().empty_cell_count(), 0);
        assert!(game.moves() > 0);
    }

    #[test]
    fn planner_game_is_reproducible() {
        let play = |seed| {
            let mut game = game(seed);
            let mut ai = ExpectimaxAi::new(SearchConfig {
                max_depth: 1,
                ..SearchConfig::default()
            });
            game.reset();

            for _ in 0..30 {
                if game.auto_step(&mut ai).is_none() {
                    break;
                }
            }

            game.board().state()
        };

        assert_eq!(play(5), play(5));
    }
}
