use rustc_hash::FxHashMap;

use crate::{
    event::{tile_value, EventKind, MoveEvent, Position},
    PackedBoard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    /// The event stream and the tracked tiles disagree.
    #[error("no tile at ({x}, {y})")]
    TileMissing { x: usize, y: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub value: u64,
}

/// Follows the event stream the way a presentation layer does, one tile per occupied cell.
#[derive(Debug, Clone, Default)]
pub struct TileTracker {
    tiles: FxHashMap<Position, u64>,
}

impl TileTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn take(&mut self, (x, y): Position) -> Result<u64, TrackError> {
        self.tiles
            .remove(&(x, y))
            .ok_or(TrackError::TileMissing { x, y })
    }

    pub fn apply(&mut self, event: &MoveEvent) -> Result<(), TrackError> {
        match event.kind {
            EventKind::Move => {
                let value = self.take(event.src)?;
                self.tiles.insert(event.dst, value);
            }
            EventKind::Merge => {
                // Both tiles must exist before either is consumed.
                for (x, y) in [event.dst, event.src] {
                    if !self.tiles.contains_key(&(x, y)) {
                        return Err(TrackError::TileMissing { x, y });
                    }
                }

                self.tiles.remove(&event.src);
                self.tiles.insert(event.dst, event.value);
            }
            EventKind::New => {
                self.tiles.insert(event.src, event.value);
            }
            EventKind::Reset => self.tiles.clear(),
            EventKind::Over => {}
        }

        Ok(())
    }

    /// Applies events in order, stopping at the first inconsistency.
    pub fn apply_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a MoveEvent>,
    ) -> Result<(), TrackError> {
        events.into_iter().try_for_each(|event| self.apply(event))
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<u64> {
        self.tiles.get(&(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles
            .iter()
            .map(|(&(x, y), &value)| Tile { x, y, value })
    }

    /// Whether the tracked tiles are exactly the occupied cells of `board`.
    pub fn matches(&self, board: &PackedBoard) -> bool {
        let occupied = board.cells().iter().filter(|&&cell| cell != 0).count();

        occupied == self.tiles.len()
            && self.tiles().all(|tile| {
                board.contains(tile.x, tile.y)
                    && board.get_cell(tile.x, tile.y) != 0
                    && tile_value(board.get_cell(tile.x, tile.y)) == tile.value
            })
    }
}
