use rand::Rng;

use crate::{event::MoveEvent, PackedBoard};

/// Log-values a spawn can place, with their probabilities: a 2 nine times in ten, else a 4.
pub const SPAWN_OUTCOMES: [(u8, f64); 2] = [(1, 0.9), (2, 0.1)];

pub struct RandomSpawner<R> {
    rng: R,
}

impl<R> RandomSpawner<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Places a tile on a uniformly chosen empty cell. A full board is left alone and
    /// reported as `Over`.
    pub fn spawn_one(&mut self, board: &mut PackedBoard) -> MoveEvent {
        let slot_count = board.empty_cell_count();

        if slot_count == 0 {
            return MoveEvent::over();
        }

        // One draw picks both the slot and the value.
        let roll = self.rng.gen_range(0..(slot_count * 10));

        place_roll(board, roll)
    }
}

/// Places the tile chosen by `roll`: slot `roll / 10` among the empty cells, a 4 when
/// `roll % 10 == 0`. `roll` must be below ten times the empty cell count.
fn place_roll(board: &mut PackedBoard, roll: usize) -> MoveEvent {
    let cell = if roll % 10 == 0 { 2 } else { 1 };

    let Some((i, j)) = board.empty_cells().nth(roll / 10) else {
        unreachable!(
            "roll {roll} out of range for {} empty cells",
            board.empty_cell_count()
        );
    };

    board.set_cell(i, j, cell);

    MoveEvent::spawned((i, j), cell)
}
