// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, matrix};

// Why a run of free cells stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    // next cell is off the board
    Edge,
    // next cell holds a tile
    Occupied,
    // next cell is empty but touches a tile across the axis
    Crowded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub cells: i8,
    pub end: RunEnd,
}

impl Run {
    // Letters that fit without the last one touching the blocking tile.
    #[inline(always)]
    pub fn usable(&self) -> i8 {
        match self.end {
            RunEnd::Occupied => (self.cells - 1).max(0),
            RunEnd::Edge | RunEnd::Crowded => self.cells,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extents {
    pub left: Run,
    pub right: Run,
    pub up: Run,
    pub down: Run,
}

impl Extents {
    #[inline(always)]
    pub fn run(&self, direction: matrix::Direction) -> Run {
        match direction {
            matrix::Direction::Left => self.left,
            matrix::Direction::Right => self.right,
            matrix::Direction::Up => self.up,
            matrix::Direction::Down => self.down,
        }
    }

    #[inline(always)]
    pub fn total(&self, axis: matrix::Axis) -> i16 {
        self.run(axis.backward()).cells as i16 + self.run(axis.forward()).cells as i16
    }
}

// Result of analyzing one anchor. axis is None when nothing can grow
// through the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Freedom {
    pub axis: Option<matrix::Axis>,
    pub extents: Extents,
}

impl Freedom {
    #[inline(always)]
    pub fn total(&self) -> i16 {
        self.axis.map_or(0, |axis| self.extents.total(axis))
    }

    // Whether a word with `before` letters ahead of the anchor and `after`
    // letters behind it fits on the chosen axis.
    pub fn fits(&self, before: usize, after: usize) -> bool {
        match self.axis {
            None => false,
            Some(axis) => {
                before <= self.extents.run(axis.backward()).usable() as usize
                    && after <= self.extents.run(axis.forward()).usable() as usize
            }
        }
    }
}

// Cells after `from` (exclusive) in the direction that are empty and whose
// two neighbours across the direction are empty too. Off-board is blocked.
pub fn scan_run<B: board::BoardAccess + ?Sized>(
    board: &B,
    from: matrix::Coord,
    direction: matrix::Direction,
) -> Run {
    let across = direction.axis().perpendicular();
    let mut cells = 0i8;
    let mut at = from;
    loop {
        at = at.step(direction, 1);
        let end = match board.cell_at(at) {
            None => Some(RunEnd::Edge),
            Some(cell) if !cell.is_empty() => Some(RunEnd::Occupied),
            Some(_)
                if !board.is_vacant(at.step(across.backward(), 1))
                    || !board.is_vacant(at.step(across.forward(), 1)) =>
            {
                Some(RunEnd::Crowded)
            }
            Some(_) => None,
        };
        if let Some(end) = end {
            return Run { cells, end };
        }
        cells += 1;
    }
}

pub fn analyze<B: board::BoardAccess + ?Sized>(board: &B, anchor: matrix::Coord) -> Freedom {
    let extents = Extents {
        left: scan_run(board, anchor, matrix::Direction::Left),
        right: scan_run(board, anchor, matrix::Direction::Right),
        up: scan_run(board, anchor, matrix::Direction::Up),
        down: scan_run(board, anchor, matrix::Direction::Down),
    };
    let qualifies = |axis: matrix::Axis| {
        extents.total(axis) > 0
            && board.is_vacant(anchor.step(axis.backward(), 1))
            && board.is_vacant(anchor.step(axis.forward(), 1))
    };
    let (first, second) =
        if extents.total(matrix::Axis::Vertical) > extents.total(matrix::Axis::Horizontal) {
            (matrix::Axis::Vertical, matrix::Axis::Horizontal)
        } else {
            (matrix::Axis::Horizontal, matrix::Axis::Vertical)
        };
    let axis = if qualifies(first) {
        Some(first)
    } else if qualifies(second) {
        Some(second)
    } else {
        None
    };
    Freedom { axis, extents }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::matrix::{Axis, Coord};
    use crate::{alphabet, board_layout, tile};

    fn board_with(words: &[(&str, Coord, Axis)]) -> Board {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let mut board = Board::new(board_layout::make_plain_board_layout(9, 9));
        for &(word, start, axis) in words {
            board.seed_word(&alphabet, &mut ids, word, start, axis).unwrap();
        }
        board
    }

    #[test]
    fn lone_tile_in_the_middle() {
        let board = board_with(&[("S", Coord::new(4, 4), Axis::Horizontal)]);
        let freedom = analyze(&board, Coord::new(4, 4));
        assert_eq!(freedom.axis, Some(Axis::Horizontal));
        assert_eq!(freedom.extents.left, Run { cells: 4, end: RunEnd::Edge });
        assert_eq!(freedom.total(), 8);
        assert_eq!(freedom.extents.total(Axis::Vertical), 8);
        assert!(freedom.fits(4, 4));
        assert!(!freedom.fits(5, 0));
    }

    #[test]
    fn tile_inside_a_horizontal_word_grows_vertically() {
        let board = board_with(&[("GOT", Coord::new(3, 4), Axis::Horizontal)]);
        let freedom = analyze(&board, Coord::new(4, 4));
        assert_eq!(freedom.axis, Some(Axis::Vertical));
        assert_eq!(freedom.extents.left.cells, 0);
        assert_eq!(freedom.extents.left.end, RunEnd::Occupied);
        assert_eq!(freedom.total(), 8);
    }

    #[test]
    fn runs_stop_before_crowded_cells() {
        // X sits one row below the path to the right of the anchor
        let board = board_with(&[
            ("A", Coord::new(1, 4), Axis::Horizontal),
            ("X", Coord::new(4, 5), Axis::Horizontal),
        ]);
        let run = scan_run(&board, Coord::new(1, 4), matrix::Direction::Right);
        assert_eq!(run, Run { cells: 2, end: RunEnd::Crowded });
        assert_eq!(run.usable(), 2);
    }

    #[test]
    fn occupied_run_end_loses_a_cell() {
        let board = board_with(&[
            ("A", Coord::new(1, 4), Axis::Horizontal),
            ("B", Coord::new(5, 4), Axis::Horizontal),
        ]);
        let run = scan_run(&board, Coord::new(1, 4), matrix::Direction::Right);
        assert_eq!(run, Run { cells: 3, end: RunEnd::Occupied });
        assert_eq!(run.usable(), 2);
    }

    #[test]
    fn boxed_anchor_has_no_freedom() {
        let board = board_with(&[
            ("ABC", Coord::new(3, 3), Axis::Horizontal),
            ("DEF", Coord::new(3, 4), Axis::Horizontal),
            ("GHI", Coord::new(3, 5), Axis::Horizontal),
        ]);
        let freedom = analyze(&board, Coord::new(4, 4));
        assert_eq!(freedom.axis, None);
        assert_eq!(freedom.total(), 0);
        assert!(!freedom.fits(0, 0));
    }

    #[test]
    fn board_edge_blocks_runs_along_it() {
        let board = board_with(&[("Q", Coord::new(4, 0), Axis::Horizontal)]);
        let freedom = analyze(&board, Coord::new(4, 0));
        // the row above is off the board, so nothing grows sideways
        assert_eq!(freedom.extents.total(Axis::Horizontal), 0);
        assert_eq!(freedom.axis, None);
    }
}
