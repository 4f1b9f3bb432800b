use rand::Rng;

use crate::{direction::Direction, PackedBoard};

use super::Ai;

/// Baseline player: any move that changes the board, uniformly.
pub struct RandomAi<R> {
    rng: R,
}

impl<R> Ai for RandomAi<R>
where
    R: Rng,
{
    fn get_next_move(&mut self, board: &PackedBoard) -> Option<Direction> {
        let mut move_array = [Direction::Up; 4];
        let mut count = 0;

        for (_, direction) in super::get_all_moves(*board) {
            move_array[count] = direction;
            count += 1;
        }

        (count > 0).then(|| move_array[self.rng.gen_range(0..count)])
    }
}

impl<R> RandomAi<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::logic;

    #[test]
    fn only_picks_moves_that_change_the_board() {
        let mut ai = RandomAi::new(ChaCha8Rng::seed_from_u64(5));
        // Only Right and Down move anything.
        let board = PackedBoard::from_rows([
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();

        for _ in 0..100 {
            let direction = ai.get_next_move(&board).unwrap();

            assert!(logic::try_move(board, direction).is_some());
        }
    }

    #[test]
    fn stuck_board_has_no_move() {
        let mut ai = RandomAi::new(ChaCha8Rng::seed_from_u64(6));
        let board = PackedBoard::from_rows([[2, 4], [4, 2]]).unwrap();

        assert_eq!(ai.get_next_move(&board), None);
    }
}
