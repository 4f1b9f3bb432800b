#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Search and tie-break order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Unit step `(dx, dy)`; `y` grows downwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_steps_on_one_axis() {
        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();

            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!(dx != 0, direction.is_horizontal());
        }
    }

    #[test]
    fn discriminants_match_iteration_order() {
        for (index, direction) in Direction::iter().enumerate() {
            assert_eq!(direction as usize, index);
        }
    }
}
