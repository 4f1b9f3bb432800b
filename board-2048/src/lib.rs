use std::fmt;

pub mod metrics;

/// Largest number of cells a board can hold. Two 64-bit words at 8 bits per cell.
pub const MAX_CELLS: usize = 16;
pub const STANDARD_SIZE: usize = 4;

const CELLS_PER_WORD: usize = 8;
const BITS_PER_CELL: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {width}x{height}")]
    Empty { width: usize, height: usize },
    #[error("a {width}x{height} board exceeds the 16 cell capacity")]
    Capacity { width: usize, height: usize },
}

/// Grid of log-values: 0 is an empty cell, `n` is a tile worth `2^n`.
///
/// Cell `(i, j)` lives at index `i + j * width`, so `i` is the column and `j` the row.
/// Cells past `width * height` are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBoard {
    width: usize,
    height: usize,
    cells: [u8; MAX_CELLS],
}

impl PackedBoard {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::Empty { width, height });
        }

        if width * height > MAX_CELLS {
            return Err(BoardError::Capacity { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: [0; MAX_CELLS],
        })
    }

    pub const fn standard() -> Self {
        Self {
            width: STANDARD_SIZE,
            height: STANDARD_SIZE,
            cells: [0; MAX_CELLS],
        }
    }

    pub fn from_state(width: usize, height: usize, s1: u64, s2: u64) -> Result<Self, BoardError> {
        let mut board = Self::new(width, height)?;
        board.set_state(s1, s2);

        Ok(board)
    }

    /// Builds a board from numeric tile values (`0`, `2`, `4`, ...), one array per row.
    pub fn from_rows<const W: usize, const H: usize>(
        rows: [[u32; W]; H],
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(W, H)?;

        for (j, row) in rows.iter().enumerate() {
            for (i, &value) in row.iter().enumerate() {
                let cell = if value == 0 { 0 } else { value.trailing_zeros() as u8 };
                board.set_cell(i, j, cell);
            }
        }

        Ok(board)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.width && j < self.height
    }

    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(self.contains(i, j), "cell ({i}, {j}) outside {}x{}", self.width, self.height);

        i + j * self.width
    }

    pub fn get_cell(&self, i: usize, j: usize) -> u8 {
        self.cells[self.index(i, j)]
    }

    pub fn set_cell(&mut self, i: usize, j: usize, value: u8) {
        let index = self.index(i, j);
        self.cells[index] = value;
    }

    /// Row-major log-values, `len()` entries.
    pub fn cells(&self) -> &[u8] {
        &self.cells[..self.len()]
    }

    /// Exports the grid as two words: cells 0-7 in the first, 8-15 in the second.
    pub fn state(&self) -> (u64, u64) {
        let pack = |cells: &[u8]| {
            cells.iter().enumerate().fold(0, |word, (k, &cell)| {
                word | (u64::from(cell) << (k * BITS_PER_CELL))
            })
        };

        let (low, high) = self.cells.split_at(CELLS_PER_WORD);

        (pack(low), pack(high))
    }

    pub fn set_state(&mut self, s1: u64, s2: u64) {
        let len = self.len();

        for (k, cell) in self.cells.iter_mut().enumerate() {
            let word = if k < CELLS_PER_WORD { s1 } else { s2 };
            let shift = (k % CELLS_PER_WORD) * BITS_PER_CELL;

            *cell = if k < len { (word >> shift) as u8 } else { 0 };
        }
    }

    pub fn reset(&mut self) {
        self.cells = [0; MAX_CELLS];
    }

    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + Clone {
        let width = self.width;

        (0..self.len()).map(move |k| (k % width, k / width))
    }

    /// Empty cells in row-major order, `i` varying fastest. Clone the iterator to rescan.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + Clone + '_ {
        self.positions()
            .filter(move |&(i, j)| self.get_cell(i, j) == 0)
    }

    pub fn empty_cell_count(&self) -> usize {
        self.cells().iter().filter(|&&cell| cell == 0).count()
    }

    pub fn max_cell(&self) -> u8 {
        self.cells().iter().copied().max().unwrap_or(0)
    }
}

impl Default for PackedBoard {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for PackedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s1, s2) = self.state();

        write!(
            f,
            "PackedBoard({}x{}, {s1:#018x}, {s2:#018x})",
            self.width, self.height
        )
    }
}

impl fmt::Display for PackedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for j in 0..self.height {
            for i in 0..self.width {
                match self.get_cell(i, j) {
                    0 => write!(f, "{:>6}", ".")?,
                    cell => write!(f, "{:>6}", 1u64 << cell.min(63))?,
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_oversized_boards() {
        assert_eq!(
            PackedBoard::new(5, 4),
            Err(BoardError::Capacity { width: 5, height: 4 })
        );
        assert_eq!(
            PackedBoard::new(0, 4),
            Err(BoardError::Empty { width: 0, height: 4 })
        );
        assert!(PackedBoard::new(8, 2).is_ok());
        assert!(PackedBoard::new(3, 3).is_ok());
    }

    #[test]
    fn set_cell_round_trips_every_value() {
        let mut board = PackedBoard::standard();

        for (i, j) in board.positions() {
            for value in [0u8, 1, 7, 16, 128, 255] {
                let before = board;
                board.set_cell(i, j, value);
                assert_eq!(board.get_cell(i, j), value);

                for (x, y) in board.positions().filter(|&pos| pos != (i, j)) {
                    assert_eq!(board.get_cell(x, y), before.get_cell(x, y));
                }
            }
        }
    }

    #[test]
    fn state_packs_eight_cells_per_word() {
        let mut board = PackedBoard::standard();
        board.set_cell(0, 0, 1);
        board.set_cell(3, 1, 0xab);
        board.set_cell(0, 2, 2);
        board.set_cell(3, 3, 0xff);

        let (s1, s2) = board.state();
        assert_eq!(s1, 0xab00_0000_0000_0001);
        assert_eq!(s2, 0xff00_0000_0000_0002);

        let restored = PackedBoard::from_state(4, 4, s1, s2).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn set_state_ignores_cells_past_the_board() {
        let board = PackedBoard::from_state(3, 3, u64::MAX, u64::MAX).unwrap();

        assert_eq!(board.cells(), &[0xff; 9]);
        assert_eq!(board.state(), (u64::MAX, 0xff));
    }

    #[test]
    fn empty_cells_scan_row_major() {
        let board = PackedBoard::from_rows([[2, 0, 4, 0], [0, 2, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0]])
            .unwrap();

        let empty = board.empty_cells();
        assert_eq!(empty.clone().collect::<Vec<_>>(), [(1, 0), (3, 0), (0, 1), (3, 3)]);
        assert_eq!(empty.count(), 4);
        assert_eq!(board.empty_cell_count(), 4);
    }

    #[test]
    fn reset_clears_cells() {
        let mut board = PackedBoard::from_rows([[2, 4], [8, 16]]).unwrap();
        assert_eq!(board.max_cell(), 4);

        board.reset();
        assert_eq!(board.state(), (0, 0));
        assert_eq!(board.empty_cell_count(), 4);
    }

    #[test]
    fn display_shows_numeric_values() {
        let board = PackedBoard::from_rows([[2, 0], [0, 1024]]).unwrap();

        assert_eq!(board.to_string(), "     2     .\n     .  1024\n");
    }
}
