// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

impl Premium {
    #[inline(always)]
    pub fn is_plain(&self) -> bool {
        self.word_multiplier == 1 && self.letter_multiplier == 1
    }
}

pub static TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
pub static DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
pub static TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
pub static DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
pub static FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

#[derive(Clone)]
pub struct StaticBoardLayout {
    premiums: Box<[Premium]>,
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

#[derive(Clone)]
pub enum BoardLayout {
    Static(StaticBoardLayout),
}

impl BoardLayout {
    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            BoardLayout::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_row,
        }
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_col,
        }
    }

    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        match self {
            BoardLayout::Static(x) => &x.premiums,
        }
    }

    #[inline(always)]
    pub fn premium_at(&self, coord: matrix::Coord) -> Premium {
        match self.dim().at(coord) {
            Some(idx) => self.premiums()[idx],
            None => FVS,
        }
    }

    pub fn set_premium(&mut self, coord: matrix::Coord, premium: Premium) {
        let dim = self.dim();
        match self {
            BoardLayout::Static(x) => {
                if let Some(idx) = dim.at(coord) {
                    x.premiums[idx] = premium;
                }
            }
        }
    }
}

pub fn make_standard_board_layout() -> BoardLayout {
    BoardLayout::Static(StaticBoardLayout {
        premiums: Box::new([
            TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
            FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
            FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
            DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
            FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
            FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
            FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
            TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
            FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
            FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
            FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
            DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
            FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
            FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
            TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
        ]),
        dim: matrix::Dim { rows: 15, cols: 15 },
        star_row: 7,
        star_col: 7,
    })
}

// no premiums anywhere, for tests and small practice boards
pub fn make_plain_board_layout(rows: i8, cols: i8) -> BoardLayout {
    let dim = matrix::Dim { rows, cols };
    BoardLayout::Static(StaticBoardLayout {
        premiums: vec![FVS; dim.num_cells()].into_boxed_slice(),
        dim,
        star_row: rows / 2,
        star_col: cols / 2,
    })
}
