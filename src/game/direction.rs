use enum_map::Enum;

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[cfg(test)]
    pub(crate) fn iter() -> impl Iterator<Item = Direction> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    /// Return the change in column & row produced by one step in this
    /// direction
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub(crate) fn is_opposite(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Right, Direction::Left)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
        assert!(d.is_opposite(r));
    }

    #[test]
    fn deltas_cancel_out() {
        for d in Direction::iter() {
            let (dx, dy) = d.delta();
            let (rx, ry) = d.reverse().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0), "{d:?} and its reverse");
            assert_eq!(dx.abs() + dy.abs(), 1, "{d:?} is not a unit step");
        }
    }

    #[test]
    fn only_reverse_is_opposite() {
        for d in Direction::iter() {
            let opposites = Direction::iter().filter(|&e| d.is_opposite(e)).count();
            assert_eq!(opposites, 1, "{d:?} should have exactly one opposite");
            assert!(!d.is_opposite(d), "{d:?} is not its own opposite");
        }
    }
}
