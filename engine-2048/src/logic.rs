use crate::{
    direction::Direction,
    event::{MoveEvent, Position},
    PackedBoard, MAX_CELLS,
};

/// Outcome of one move: whether anything changed, and what happened in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub changed: bool,
    pub events: Vec<MoveEvent>,
}

/// Slides and merges every tile towards `direction`. Does not spawn.
pub fn apply_move(board: &mut PackedBoard, direction: Direction) -> Resolution {
    let mut events = Vec::new();
    let changed = shift(board, direction, |event| events.push(event));

    Resolution { changed, events }
}

pub fn resolve(board: PackedBoard, direction: Direction) -> (PackedBoard, Resolution) {
    let mut new_board = board;
    let resolution = apply_move(&mut new_board, direction);

    (new_board, resolution)
}

/// The board after moving, or `None` if the move changes nothing.
pub fn try_move(board: PackedBoard, direction: Direction) -> Option<PackedBoard> {
    let mut new_board = board;

    shift(&mut new_board, direction, |_| {}).then_some(new_board)
}

pub fn try_all_moves(board: PackedBoard) -> [Option<PackedBoard>; 4] {
    Direction::ALL.map(|direction| try_move(board, direction))
}

pub fn has_move(board: PackedBoard) -> bool {
    Direction::iter().any(|direction| try_move(board, direction).is_some())
}

/// Source cells in resolution order: every line, starting next to the target edge and
/// walking away from it. The edge cell itself can never move.
fn scan_order(
    width: usize,
    height: usize,
    direction: Direction,
) -> impl Iterator<Item = Position> {
    let (dx, dy) = direction.delta();
    let horizontal = direction.is_horizontal();
    let (line_len, line_count) = if horizontal {
        (width, height)
    } else {
        (height, width)
    };
    let toward_end = dx + dy > 0;

    (0..line_count).flat_map(move |line| {
        (0..line_len.saturating_sub(1)).map(move |k| {
            let offset = if toward_end { line_len - 2 - k } else { k + 1 };

            if horizontal {
                (offset, line)
            } else {
                (line, offset)
            }
        })
    })
}

fn step(board: &PackedBoard, (x, y): Position, (dx, dy): (isize, isize)) -> Option<Position> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;

    board.contains(nx, ny).then_some((nx, ny))
}

fn shift(board: &mut PackedBoard, direction: Direction, mut emit: impl FnMut(MoveEvent)) -> bool {
    let mut merged = [false; MAX_CELLS];

    scan_order(board.width(), board.height(), direction).fold(false, |moved, (x, y)| {
        let tile_moved = board.get_cell(x, y) != 0
            && slide_tile(board, (x, y), direction.delta(), &mut merged, &mut emit);

        moved | tile_moved
    })
}

/// Moves one tile as far as it goes. Returns whether it left its cell.
fn slide_tile(
    board: &mut PackedBoard,
    src: Position,
    delta: (isize, isize),
    merged: &mut [bool; MAX_CELLS],
    emit: &mut impl FnMut(MoveEvent),
) -> bool {
    let cell = board.get_cell(src.0, src.1);
    let mut dst = src;

    while let Some(next) = step(board, dst, delta) {
        let neighbour = board.get_cell(next.0, next.1);

        if neighbour == 0 {
            dst = next;
            continue;
        }

        let merge_index = next.0 + next.1 * board.width();

        // A tile at u8::MAX has nowhere to grow.
        if neighbour == cell && cell < u8::MAX && !merged[merge_index] {
            board.set_cell(src.0, src.1, 0);
            board.set_cell(next.0, next.1, cell + 1);
            merged[merge_index] = true;
            emit(MoveEvent::merged(src, next, cell + 1));

            return true;
        }

        break;
    }

    if dst == src {
        return false;
    }

    board.set_cell(src.0, src.1, 0);
    board.set_cell(dst.0, dst.1, cell);
    emit(MoveEvent::moved(src, dst, cell));

    true
}
