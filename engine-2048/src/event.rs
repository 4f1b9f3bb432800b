pub type Position = (usize, usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Move,
    Merge,
    New,
    Reset,
    Over,
}

/// One step of a move resolution, in the order it happened.
///
/// `value` is the numeric tile value, never the log-value. `New` carries the spawn position in
/// `src`; `Reset` and `Over` carry zeroed positions and a value of 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    pub kind: EventKind,
    pub src: Position,
    pub dst: Position,
    pub value: u64,
}

/// Numeric value of a log-value, saturating at `u64::MAX`.
pub fn tile_value(cell: u8) -> u64 {
    1u64.checked_shl(u32::from(cell)).unwrap_or(u64::MAX)
}

impl MoveEvent {
    const fn new(kind: EventKind, src: Position, dst: Position, value: u64) -> Self {
        Self {
            kind,
            src,
            dst,
            value,
        }
    }

    pub fn moved(src: Position, dst: Position, cell: u8) -> Self {
        Self::new(EventKind::Move, src, dst, tile_value(cell))
    }

    pub fn merged(src: Position, dst: Position, cell: u8) -> Self {
        Self::new(EventKind::Merge, src, dst, tile_value(cell))
    }

    pub fn spawned(at: Position, cell: u8) -> Self {
        Self::new(EventKind::New, at, (0, 0), tile_value(cell))
    }

    pub const fn reset() -> Self {
        Self::new(EventKind::Reset, (0, 0), (0, 0), 1)
    }

    pub const fn over() -> Self {
        Self::new(EventKind::Over, (0, 0), (0, 0), 1)
    }
}
