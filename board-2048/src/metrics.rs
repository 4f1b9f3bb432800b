use crate::PackedBoard;

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn neighbours(board: &PackedBoard, i: usize, j: usize) -> impl Iterator<Item = u8> + '_ {
    NEIGHBOURS.into_iter().filter_map(move |(di, dj)| {
        let x = i.checked_add_signed(di)?;
        let y = j.checked_add_signed(dj)?;

        board.contains(x, y).then(|| board.get_cell(x, y))
    })
}

/// Sum of `2^cell` over every cell. Empty cells count as `2^0`.
pub fn tile_mass(board: &PackedBoard) -> f64 {
    board
        .cells()
        .iter()
        .map(|&cell| 2f64.powi(i32::from(cell)))
        .sum()
}

/// Adds a cell's log-value once per orthogonal neighbour holding the next power up.
pub fn chain_bonus(board: &PackedBoard) -> u32 {
    board
        .positions()
        .map(|(i, j)| {
            let cell = board.get_cell(i, j);
            let links = neighbours(board, i, j)
                .filter(|&neighbour| cell.checked_add(1) == Some(neighbour))
                .count() as u32;

            u32::from(cell) * links
        })
        .sum()
}

/// The four cells probed for the corner check.
///
/// The middle two mix the row and column extents, so they are only true corners on square
/// boards. Probes falling outside the board are dropped.
pub fn corner_probes(board: &PackedBoard) -> impl Iterator<Item = (usize, usize)> + '_ {
    let (w, h) = (board.width(), board.height());

    [(0, 0), (0, w - 1), (h - 1, 0), (w - 1, h - 1)]
        .into_iter()
        .filter(move |&(i, j)| board.contains(i, j))
}

pub fn max_in_corner(board: &PackedBoard) -> bool {
    let max = board.max_cell();

    corner_probes(board).any(|(i, j)| board.get_cell(i, j) == max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_mass_counts_empty_cells_as_one() {
        let board = PackedBoard::from_rows([[2, 0], [0, 8]]).unwrap();

        assert_eq!(tile_mass(&board), 2.0 + 1.0 + 1.0 + 8.0);
    }

    #[test]
    fn chain_bonus_follows_increasing_neighbours() {
        // 2 -> 4 -> 8 along the top row; the 2 sees the 4, the 4 sees the 8.
        let board = PackedBoard::from_rows([[2, 4, 8], [0, 0, 0], [0, 0, 0]]).unwrap();
        assert_eq!(chain_bonus(&board), 1 + 2);

        // A cell adjacent to two larger neighbours is counted once for each.
        let board = PackedBoard::from_rows([[4, 8], [8, 0]]).unwrap();
        assert_eq!(chain_bonus(&board), 2 + 2);
    }

    #[test]
    fn chain_bonus_ignores_equal_and_distant_values() {
        let board = PackedBoard::from_rows([[2, 2], [8, 32]]).unwrap();

        assert_eq!(chain_bonus(&board), 0);
    }

    #[test]
    fn empty_cells_chain_into_twos() {
        // Empty cells are log-value 0 and link to 2s, but contribute 0 each time.
        let board = PackedBoard::from_rows([[0, 2], [0, 0]]).unwrap();

        assert_eq!(chain_bonus(&board), 0);
    }

    #[test]
    fn max_in_corner_on_square_board() {
        let corner = PackedBoard::from_rows([[2, 0, 0], [0, 4, 0], [0, 0, 8]]).unwrap();
        assert!(max_in_corner(&corner));

        let middle = PackedBoard::from_rows([[2, 0, 0], [0, 8, 0], [0, 0, 4]]).unwrap();
        assert!(!max_in_corner(&middle));
    }

    #[test]
    fn corner_probes_stay_on_non_square_boards() {
        let board = PackedBoard::new(4, 2).unwrap();

        assert_eq!(corner_probes(&board).collect::<Vec<_>>(), [(0, 0), (1, 0), (3, 1)]);
    }
}
