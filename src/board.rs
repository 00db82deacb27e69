// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix, tile};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Cell {
    pub premium: board_layout::Premium,
    pub occupant: Option<tile::LetterTile>,
}

impl Cell {
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

// What the turn engine needs from whoever owns the board.
pub trait BoardAccess {
    fn dim(&self) -> matrix::Dim;

    // None when off the board.
    fn cell_at(&self, coord: matrix::Coord) -> Option<&Cell>;

    fn holder_of(&self, tile: tile::TileId) -> Option<matrix::Coord>;

    fn registered_words(&self) -> &[Box<[tile::TileId]>];

    // Refuses occupied or off-board cells; never overwrites.
    fn commit(&mut self, tile: tile::LetterTile, coord: matrix::Coord) -> error::Returns<()>;

    fn withdraw(&mut self, coord: matrix::Coord) -> Option<tile::LetterTile>;

    // Tiles become neutral and the sequence joins the registry.
    fn register_word(&mut self, tiles: &[tile::TileId]) -> error::Returns<()>;

    #[inline(always)]
    fn tile_at(&self, coord: matrix::Coord) -> Option<&tile::LetterTile> {
        self.cell_at(coord).and_then(|cell| cell.occupant.as_ref())
    }

    // off-board counts as blocked.
    #[inline(always)]
    fn is_vacant(&self, coord: matrix::Coord) -> bool {
        matches!(self.cell_at(coord), Some(cell) if cell.is_empty())
    }

    // Neutral tiles (row-major) bearing the letter with at least one empty
    // orthogonal neighbour.
    fn anchors(&self, letter: u8) -> Vec<(tile::TileId, matrix::Coord)> {
        self.dim()
            .coords()
            .filter_map(|coord| match self.tile_at(coord) {
                Some(t)
                    if t.letter == letter
                        && t.is_neutral()
                        && matrix::Direction::ALL
                            .iter()
                            .any(|&d| self.is_vacant(coord.step(d, 1))) =>
                {
                    Some((t.id, coord))
                }
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct Board {
    layout: board_layout::BoardLayout,
    cells: Box<[Cell]>,
    positions: HashMap<tile::TileId, matrix::Coord>,
    words: Vec<Box<[tile::TileId]>>,
}

impl Board {
    pub fn new(layout: board_layout::BoardLayout) -> Self {
        let cells = layout
            .premiums()
            .iter()
            .map(|&premium| Cell {
                premium,
                occupant: None,
            })
            .collect();
        Self {
            layout,
            cells,
            positions: HashMap::new(),
            words: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn layout(&self) -> &board_layout::BoardLayout {
        &self.layout
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn num_tiles(&self) -> usize {
        self.positions.len()
    }

    // Lays down a neutral, already-registered word. For setting up positions.
    pub fn seed_word(
        &mut self,
        alphabet: &alphabet::Alphabet<'_>,
        tile_ids: &mut tile::TileIds,
        word: &str,
        start: matrix::Coord,
        axis: matrix::Axis,
    ) -> error::Returns<Vec<tile::TileId>> {
        let Some(letters) = alphabet.parse_word(word) else {
            return_error!(format!("invalid letter in {:?}", word));
        };
        let mut ids = Vec::with_capacity(letters.len());
        for (i, &letter) in (0..).zip(letters.iter()) {
            let coord = start.along(axis, i);
            let tile = tile_ids.make(letter, alphabet.score(letter), None);
            self.commit(tile, coord)?;
            ids.push(tile.id);
        }
        if ids.len() > 1 {
            self.register_word(&ids)?;
        }
        Ok(ids)
    }

    // Builds a position from text rows, '.' (or space) for an empty cell and
    // letters for neutral tiles. Every maximal run of two or more letters,
    // across then down, is registered as a word.
    pub fn from_rows<S: AsRef<str>>(
        layout: board_layout::BoardLayout,
        alphabet: &alphabet::Alphabet<'_>,
        tile_ids: &mut tile::TileIds,
        rows: &[S],
    ) -> error::Returns<Self> {
        let dim = layout.dim();
        if rows.len() != dim.rows as usize {
            return_error!(format!(
                "board: need {} rows, found {} rows",
                dim.rows,
                rows.len()
            ));
        }
        let mut board = Self::new(layout);
        for (row, s) in (0i8..).zip(rows.iter()) {
            let s = s.as_ref();
            if s.chars().count() != dim.cols as usize {
                return_error!(format!(
                    "board: row {} needs {} cells, found {:?}",
                    row + 1,
                    dim.cols,
                    s
                ));
            }
            for (col, c) in (0i8..).zip(s.chars()) {
                if c == '.' || c == ' ' {
                    continue;
                }
                let Some(letter) = alphabet.tile_of(c) else {
                    return_error!(format!("board: invalid letter {:?} in row {}", c, row + 1));
                };
                let tile = tile_ids.make(letter, alphabet.score(letter), None);
                board.commit(tile, matrix::Coord::new(col, row))?;
            }
        }
        for axis in [matrix::Axis::Horizontal, matrix::Axis::Vertical] {
            let (lanes, len) = match axis {
                matrix::Axis::Horizontal => (dim.rows, dim.cols),
                matrix::Axis::Vertical => (dim.cols, dim.rows),
            };
            for lane in 0..lanes {
                let mut run = Vec::new();
                for idx in 0..=len {
                    let coord = match axis {
                        matrix::Axis::Horizontal => matrix::Coord::new(idx, lane),
                        matrix::Axis::Vertical => matrix::Coord::new(lane, idx),
                    };
                    match board.tile_at(coord) {
                        Some(t) => run.push(t.id),
                        None => {
                            if run.len() > 1 {
                                board.register_word(&run)?;
                            }
                            run.clear();
                        }
                    }
                }
            }
        }
        Ok(board)
    }

    // board bytes in the usual row-major layout, 0 for empty.
    pub fn letters(&self) -> Box<[u8]> {
        self.cells
            .iter()
            .map(|cell| cell.occupant.map_or(0, |t| t.letter))
            .collect()
    }
}

impl BoardAccess for Board {
    #[inline(always)]
    fn dim(&self) -> matrix::Dim {
        self.layout.dim()
    }

    #[inline(always)]
    fn cell_at(&self, coord: matrix::Coord) -> Option<&Cell> {
        self.layout.dim().at(coord).map(|idx| &self.cells[idx])
    }

    #[inline(always)]
    fn holder_of(&self, tile: tile::TileId) -> Option<matrix::Coord> {
        self.positions.get(&tile).copied()
    }

    fn registered_words(&self) -> &[Box<[tile::TileId]>] {
        &self.words
    }

    fn commit(&mut self, tile: tile::LetterTile, coord: matrix::Coord) -> error::Returns<()> {
        let Some(idx) = self.layout.dim().at(coord) else {
            return_error!(format!("({}, {}) is off the board", coord.col, coord.row));
        };
        if self.cells[idx].occupant.is_some() {
            return_error!(format!("({}, {}) is occupied", coord.col, coord.row));
        }
        if self.positions.contains_key(&tile.id) {
            return_error!(format!("tile {:?} is already on the board", tile.id));
        }
        self.cells[idx].occupant = Some(tile);
        self.positions.insert(tile.id, coord);
        Ok(())
    }

    fn withdraw(&mut self, coord: matrix::Coord) -> Option<tile::LetterTile> {
        let idx = self.layout.dim().at(coord)?;
        let tile = self.cells[idx].occupant.take()?;
        self.positions.remove(&tile.id);
        Some(tile)
    }

    fn register_word(&mut self, tiles: &[tile::TileId]) -> error::Returns<()> {
        for id in tiles {
            let Some(coord) = self.positions.get(id).copied() else {
                return_error!(format!("tile {:?} is not on the board", id));
            };
            let idx = self.layout.dim().at_row_col(coord.row, coord.col);
            if let Some(t) = self.cells[idx].occupant.as_mut() {
                t.owner = None;
            }
        }
        self.words.push(tiles.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Axis, Coord};

    fn tile(ids: &mut tile::TileIds, letter: u8, owner: Option<u8>) -> tile::LetterTile {
        ids.make(letter, 1, owner.map(tile::PlayerId))
    }

    #[test]
    fn commit_refuses_occupied_and_off_board() {
        let mut ids = tile::TileIds::new();
        let mut board = Board::new(board_layout::make_plain_board_layout(5, 5));
        let a = tile(&mut ids, 1, Some(0));
        board.commit(a, Coord::new(2, 2)).unwrap();
        assert!(board.commit(tile(&mut ids, 2, Some(0)), Coord::new(2, 2)).is_err());
        assert!(board.commit(tile(&mut ids, 2, Some(0)), Coord::new(5, 0)).is_err());
        assert_eq!(board.tile_at(Coord::new(2, 2)).unwrap().letter, 1);
        assert_eq!(board.holder_of(a.id), Some(Coord::new(2, 2)));
    }

    #[test]
    fn withdraw_frees_the_cell() {
        let mut ids = tile::TileIds::new();
        let mut board = Board::new(board_layout::make_plain_board_layout(5, 5));
        let a = tile(&mut ids, 1, Some(0));
        board.commit(a, Coord::new(1, 1)).unwrap();
        assert_eq!(board.withdraw(Coord::new(1, 1)), Some(a));
        assert_eq!(board.holder_of(a.id), None);
        assert!(board.is_vacant(Coord::new(1, 1)));
        assert_eq!(board.withdraw(Coord::new(1, 1)), None);
    }

    #[test]
    fn registering_neutralizes() {
        let mut ids = tile::TileIds::new();
        let mut board = Board::new(board_layout::make_plain_board_layout(5, 5));
        let a = tile(&mut ids, 1, Some(1));
        let b = tile(&mut ids, 2, Some(1));
        board.commit(a, Coord::new(0, 0)).unwrap();
        board.commit(b, Coord::new(1, 0)).unwrap();
        assert!(board.anchors(1).is_empty());
        board.register_word(&[a.id, b.id]).unwrap();
        assert!(board.tile_at(Coord::new(0, 0)).unwrap().is_neutral());
        assert_eq!(board.registered_words().len(), 1);
        assert_eq!(board.anchors(1), [(a.id, Coord::new(0, 0))]);
    }

    #[test]
    fn boxed_in_tiles_are_not_anchors() {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let mut board = Board::new(board_layout::make_plain_board_layout(3, 3));
        board
            .seed_word(&alphabet, &mut ids, "ABC", Coord::new(0, 0), Axis::Horizontal)
            .unwrap();
        board
            .seed_word(&alphabet, &mut ids, "DEF", Coord::new(0, 1), Axis::Horizontal)
            .unwrap();
        board
            .seed_word(&alphabet, &mut ids, "GHI", Coord::new(0, 2), Axis::Horizontal)
            .unwrap();
        assert!(board.anchors(alphabet.tile_of('E').unwrap()).is_empty());
        assert!(!board.is_vacant(Coord::new(-1, 0)));
    }

    #[test]
    fn rows_register_every_run() {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let board = Board::from_rows(
            board_layout::make_plain_board_layout(4, 4),
            &alphabet,
            &mut ids,
            &["GO..", "N...", "....", "...A"],
        )
        .unwrap();
        assert_eq!(board.num_tiles(), 4);
        // GO across, GN down; the lone A is no word
        assert_eq!(board.registered_words().len(), 2);
        assert!(board.tile_at(Coord::new(3, 3)).unwrap().is_neutral());
        assert!(Board::from_rows(
            board_layout::make_plain_board_layout(4, 4),
            &alphabet,
            &mut ids,
            &["GO.."],
        )
        .is_err());
    }
}
