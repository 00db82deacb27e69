// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline(always)]
    pub fn new(col: i8, row: i8) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn step(self, direction: Direction, amount: i8) -> Self {
        let (dc, dr) = direction.delta();
        Self {
            row: self.row.wrapping_add(dr.wrapping_mul(amount)),
            col: self.col.wrapping_add(dc.wrapping_mul(amount)),
        }
    }

    // signed offset along the axis, the other coordinate is kept
    #[inline(always)]
    pub fn along(self, axis: Axis, offset: i8) -> Self {
        self.step(axis.forward(), offset)
    }

    // human-facing, eg "8h" for row 7 col 7 across and "h8" down, like the
    // usual board notation.
    pub fn fmt_at(self, axis: Axis) -> String {
        match axis {
            Axis::Horizontal => format!("{}{}", self.row + 1, (self.col as u8 + 0x61) as char),
            Axis::Vertical => format!("{}{}", (self.col as u8 + 0x61) as char, self.row + 1),
        }
    }

    // inverse of fmt_at: leading digits mean across, leading letter down.
    pub fn parse_at(s: &str) -> Option<(Self, Axis)> {
        let s = s.trim();
        let down = s.starts_with(|c: char| c.is_ascii_alphabetic());
        let split = s.find(|c: char| c.is_ascii_alphabetic() != down)?;
        let (head, tail) = s.split_at(split);
        let (letters, digits, axis) = if down {
            (head, tail, Axis::Vertical)
        } else {
            (tail, head, Axis::Horizontal)
        };
        let mut letters = letters.chars();
        let col = letters.next()?.to_ascii_lowercase();
        if letters.next().is_some() || !col.is_ascii_lowercase() {
            return None;
        }
        let row = digits.parse::<i8>().ok()?.checked_sub(1)?;
        if row < 0 {
            return None;
        }
        Some((Self::new((col as u8 - b'a') as i8, row), axis))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[inline(always)]
    pub fn forward(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Right,
            Axis::Vertical => Direction::Down,
        }
    }

    #[inline(always)]
    pub fn backward(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Left,
            Axis::Vertical => Direction::Up,
        }
    }

    #[inline(always)]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    // coordinate that varies along this axis
    #[inline(always)]
    pub fn moving(self, coord: Coord) -> i8 {
        match self {
            Axis::Horizontal => coord.col,
            Axis::Vertical => coord.row,
        }
    }

    // coordinate that stays fixed along this axis
    #[inline(always)]
    pub fn fixed(self, coord: Coord) -> i8 {
        match self {
            Axis::Horizontal => coord.row,
            Axis::Vertical => coord.col,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    // (dcol, drow)
    #[inline(always)]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    #[inline(always)]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }
}

impl Dim {
    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row >= 0 && coord.row < self.rows && coord.col >= 0 && coord.col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn at(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(self.at_row_col(coord.row, coord.col))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn num_cells(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    // row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Coord { row, col }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_off_the_grid_is_not_contained() {
        let dim = Dim { rows: 15, cols: 15 };
        let corner = Coord::new(0, 0);
        assert!(!dim.contains(corner.step(Direction::Left, 1)));
        assert!(!dim.contains(corner.step(Direction::Up, 1)));
        assert_eq!(dim.at(corner.step(Direction::Down, 2)), Some(30));
        assert_eq!(dim.at(Coord::new(15, 0)), None);
    }

    #[test]
    fn along_uses_signed_offsets() {
        let anchor = Coord::new(7, 7);
        assert_eq!(anchor.along(Axis::Horizontal, -2), Coord::new(5, 7));
        assert_eq!(anchor.along(Axis::Vertical, 3), Coord::new(7, 10));
        assert_eq!(Axis::Vertical.fixed(anchor.along(Axis::Vertical, 3)), 7);
    }

    #[test]
    fn board_notation() {
        let at = Coord::new(7, 7);
        assert_eq!(at.fmt_at(Axis::Horizontal), "8h");
        assert_eq!(Coord::parse_at("8h"), Some((at, Axis::Horizontal)));
        assert_eq!(Coord::parse_at("H8"), Some((at, Axis::Vertical)));
        assert_eq!(Coord::parse_at("c12"), Some((Coord::new(2, 11), Axis::Vertical)));
        assert_eq!(Coord::parse_at("8"), None);
        assert_eq!(Coord::parse_at("hh8"), None);
        assert_eq!(Coord::parse_at("0a"), None);
    }

    #[test]
    fn row_major_coords() {
        let dim = Dim { rows: 2, cols: 3 };
        let v = dim.coords().collect::<Vec<_>>();
        assert_eq!(v.len(), 6);
        assert_eq!(v[1], Coord::new(1, 0));
        assert_eq!(v[3], Coord::new(0, 1));
    }
}
