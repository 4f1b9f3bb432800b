use crate::{metrics, PackedBoard};

pub const CHAIN_WEIGHT: f64 = 40.0;
pub const CORNER_BONUS: f64 = 50.0;

/// Desirability of a position; larger is better and never negative.
///
/// Empty cells, total tile mass, chains of consecutive powers and a bonus for keeping the
/// largest tile in a corner.
pub fn score(board: &PackedBoard) -> f64 {
    let corner_score = if metrics::max_in_corner(board) {
        CORNER_BONUS
    } else {
        0.0
    };

    board.empty_cell_count() as f64
        + metrics::tile_mass(board)
        + CHAIN_WEIGHT * f64::from(metrics::chain_bonus(board))
        + corner_score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board() {
        // 16 empty cells, 16 * 2^0 mass, the max (0) is in every corner.
        assert_eq!(score(&PackedBoard::standard()), 16.0 + 16.0 + 50.0);
    }

    #[test]
    fn chain_and_corner() {
        let board = PackedBoard::from_rows([
            [8, 4, 2, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();

        // 13 empty, mass 8 + 4 + 2 + 13, chain 2 + 1, max in the corner.
        assert_eq!(score(&board), 13.0 + 27.0 + 40.0 * 3.0 + 50.0);
    }

    #[test]
    fn max_off_corner_loses_bonus() {
        let board = PackedBoard::from_rows([
            [0, 0, 0, 0],
            [0, 8, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();

        assert_eq!(score(&board), 15.0 + 23.0);
    }
}
