use crate::{direction::Direction, logic, PackedBoard};

pub mod expectimax;
pub mod random;

pub use expectimax::{ExpectimaxAi, SearchConfig, SearchStats};
pub use random::RandomAi;

pub trait Ai {
    /// A move that changes `board`, or `None` when the game is over.
    fn get_next_move(&mut self, board: &PackedBoard) -> Option<Direction>;

    /// Counters from the most recent search, for players that search.
    fn last_stats(&self) -> Option<SearchStats> {
        None
    }
}

fn get_all_moves(board: PackedBoard) -> impl Iterator<Item = (PackedBoard, Direction)> {
    Direction::iter().filter_map(move |direction| {
        logic::try_move(board, direction).map(|new_board| (new_board, direction))
    })
}
