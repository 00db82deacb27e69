// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, matrix, tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationError {
    Empty,
    // tile at this index leaves the row/column fixed by the first two
    Misaligned(usize),
    // tile at this index is not exactly one cell after its predecessor
    Gap(usize),
    // tile at this index is not on the board
    NotOnBoard(usize),
}

impl std::fmt::Display for FormationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormationError::Empty => write!(f, "no tiles"),
            FormationError::Misaligned(i) => write!(f, "tile {} is not in line", i + 1),
            FormationError::Gap(i) => write!(f, "gap before tile {}", i + 1),
            FormationError::NotOnBoard(i) => write!(f, "tile {} is not on the board", i + 1),
        }
    }
}

impl std::error::Error for FormationError {}

// Axis of a well-formed sequence, in reading order. A single tile has no
// axis of its own and is reported as horizontal.
pub fn check(coords: &[matrix::Coord]) -> Result<matrix::Axis, FormationError> {
    let (first, second) = match coords {
        [] => return Err(FormationError::Empty),
        [_] => return Ok(matrix::Axis::Horizontal),
        [first, second, ..] => (*first, *second),
    };
    let axis = if first.row == second.row {
        matrix::Axis::Horizontal
    } else if first.col == second.col {
        matrix::Axis::Vertical
    } else {
        return Err(FormationError::Misaligned(1));
    };
    let fixed = axis.fixed(first);
    for (i, pair) in coords.windows(2).enumerate() {
        if axis.fixed(pair[1]) != fixed {
            return Err(FormationError::Misaligned(i + 1));
        }
        if axis.moving(pair[1]) as i16 - axis.moving(pair[0]) as i16 != 1 {
            return Err(FormationError::Gap(i + 1));
        }
    }
    Ok(axis)
}

#[inline(always)]
pub fn is_valid(coords: &[matrix::Coord]) -> bool {
    check(coords).is_ok()
}

// Board coordinates of the tiles, None if any of them is not on the board.
pub fn coords_of<B: board::BoardAccess + ?Sized>(
    board: &B,
    tiles: &[tile::TileId],
) -> Option<Vec<matrix::Coord>> {
    tiles.iter().map(|&id| board.holder_of(id)).collect()
}

// check() on the tiles where they sit on the board.
pub fn check_tiles<B: board::BoardAccess + ?Sized>(
    board: &B,
    tiles: &[tile::TileId],
) -> Result<matrix::Axis, FormationError> {
    let coords = tiles
        .iter()
        .enumerate()
        .map(|(i, &id)| board.holder_of(id).ok_or(FormationError::NotOnBoard(i)))
        .collect::<Result<Vec<_>, _>>()?;
    check(&coords)
}
