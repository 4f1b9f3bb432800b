use crate::{direction::Direction, heuristic, logic, spawn::SPAWN_OUTCOMES, PackedBoard};

use super::Ai;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Move plies searched before scoring positions directly.
    pub max_depth: u32,
    /// Branches reached with a lower cumulative probability are scored directly.
    pub min_probability: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_probability: 1e-6,
        }
    }
}

/// Counters for a single call to [`ExpectimaxAi::generate_move`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_searched: u64,
    pub depth_cutoffs: u64,
    pub probability_cutoffs: u64,
}

/// Expectimax over player moves and tile spawns.
///
/// Player nodes take the best direction, spawn nodes average every empty cell and weight
/// the two spawn values by their real probabilities. The search never touches the caller's
/// board and needs no random source, so the same board always yields the same move.
pub struct ExpectimaxAi {
    config: SearchConfig,
    stats: SearchStats,
}

impl Ai for ExpectimaxAi {
    fn get_next_move(&mut self, board: &PackedBoard) -> Option<Direction> {
        logic::has_move(*board).then(|| self.generate_move(board))
    }

    fn last_stats(&self) -> Option<SearchStats> {
        Some(self.stats)
    }
}

impl ExpectimaxAi {
    pub const fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats {
                nodes_searched: 0,
                depth_cutoffs: 0,
                probability_cutoffs: 0,
            },
        }
    }

    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best direction for `board`. Ties go to the first direction in [`Direction::ALL`];
    /// a board with no moves yields [`Direction::Up`].
    pub fn generate_move(&mut self, board: &PackedBoard) -> Direction {
        self.stats = SearchStats::default();

        let (score, best) = self.expectimax_player_move(*board, 0, 1.0);
        let direction = best.unwrap_or(Direction::Up);

        log::debug!(
            "picked {direction:?} (score {score:.1}) after {} nodes, {} depth cutoffs, {} probability cutoffs",
            self.stats.nodes_searched,
            self.stats.depth_cutoffs,
            self.stats.probability_cutoffs,
        );

        direction
    }

    /// Expected score of playing `direction` from the root, `None` if it changes nothing.
    pub fn evaluate_direction(&mut self, board: &PackedBoard, direction: Direction) -> Option<f64> {
        self.stats = SearchStats::default();

        logic::try_move(*board, direction)
            .map(|new_board| self.expectimax_opponent_move(new_board, 0, 1.0))
    }

    /// [`Self::evaluate_direction`] for each direction, indexed by `Direction as usize`.
    pub fn branch_values(&mut self, board: &PackedBoard) -> [Option<f64>; 4] {
        self.stats = SearchStats::default();

        Direction::ALL.map(|direction| {
            logic::try_move(*board, direction)
                .map(|new_board| self.expectimax_opponent_move(new_board, 0, 1.0))
        })
    }

    /// Average over every spawn the opponent can make on the moved `board`.
    fn expectimax_opponent_move(&mut self, board: PackedBoard, depth: u32, probability: f64) -> f64 {
        let slot_count = board.empty_cell_count();

        if slot_count == 0 {
            return heuristic::score(&board);
        }

        let total_score = board.empty_cells().fold(0.0, |total_score, (i, j)| {
            SPAWN_OUTCOMES
                .into_iter()
                .fold(total_score, |total_score, (cell, spawn_probability)| {
                    let mut new_board = board;
                    new_board.set_cell(i, j, cell);

                    let (score, _) = self.expectimax_player_move(
                        new_board,
                        depth + 1,
                        probability * spawn_probability,
                    );

                    score.mul_add(spawn_probability, total_score)
                })
        });

        total_score / slot_count as f64
    }

    fn expectimax_player_move(
        &mut self,
        board: PackedBoard,
        depth: u32,
        probability: f64,
    ) -> (f64, Option<Direction>) {
        self.stats.nodes_searched += 1;

        if depth >= self.config.max_depth {
            self.stats.depth_cutoffs += 1;

            return (heuristic::score(&board), None);
        }

        if probability < self.config.min_probability {
            self.stats.probability_cutoffs += 1;

            return (heuristic::score(&board), None);
        }

        super::get_all_moves(board)
            .fold(None, |best, (new_board, direction)| {
                let score = self.expectimax_opponent_move(new_board, depth, probability);

                match best {
                    Some((best_score, _)) if best_score >= score => best,
                    _ => Some((score, direction)),
                }
            })
            .map_or_else(
                || (heuristic::score(&board), None),
                |(score, direction)| (score, Some(direction)),
            )
    }
}
