// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, matrix};
use board::BoardAccess;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premium_at(matrix::Coord::new(col, row));
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "\'",
        _ => ".",
    }
}

// Neutral tiles print in upper case, tiles still owned by a player in lower
// case so a half-placed word stands out.
pub fn board_label(
    alphabet: &alphabet::Alphabet<'_>,
    board: &board::Board,
    row: i8,
    col: i8,
) -> String {
    match board.tile_at(matrix::Coord::new(col, row)) {
        Some(t) => {
            let label = alphabet.label(t.letter).unwrap_or("?");
            if t.is_neutral() {
                label.to_string()
            } else {
                label.to_lowercase()
            }
        }
        None => empty_label(board.layout(), row, col).to_string(),
    }
}

pub fn fmt_board(alphabet: &alphabet::Alphabet<'_>, board: &board::Board) -> String {
    let dim = board.dim();
    let mut s = String::new();
    let col_header = |s: &mut String| {
        s.push_str("  ");
        for c in 0..dim.cols {
            s.push(' ');
            s.push(((c as u8) + 0x61) as char);
        }
        s.push('\n');
    };
    let rule = |s: &mut String| {
        s.push_str("  +");
        for _ in 1..dim.cols {
            s.push_str("--");
        }
        s.push_str("-+\n");
    };
    col_header(&mut s);
    rule(&mut s);
    for r in 0..dim.rows {
        s.push_str(&format!("{:2}|", r + 1));
        for c in 0..dim.cols {
            if c > 0 {
                s.push(' ');
            }
            s.push_str(&board_label(alphabet, board, r, c));
        }
        s.push_str(&format!("|{}\n", r + 1));
    }
    rule(&mut s);
    col_header(&mut s);
    s
}

pub fn print_board(alphabet: &alphabet::Alphabet<'_>, board: &board::Board) {
    print!("{}", fmt_board(alphabet, board));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Axis, Coord};
    use crate::tile;

    #[test]
    fn letters_and_premiums() {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let mut board = board::Board::new(board_layout::make_standard_board_layout());
        board
            .seed_word(&alphabet, &mut ids, "GO", Coord::new(7, 7), Axis::Horizontal)
            .unwrap();
        let t = ids.make(alphabet.tile_of('X').unwrap(), 8, Some(tile::PlayerId(0)));
        board.commit(t, Coord::new(0, 1)).unwrap();
        assert_eq!(board_label(&alphabet, &board, 7, 7), "G");
        assert_eq!(board_label(&alphabet, &board, 1, 0), "x");
        assert_eq!(board_label(&alphabet, &board, 0, 0), "=");
        assert_eq!(board_label(&alphabet, &board, 1, 1), "-");
        assert_eq!(board_label(&alphabet, &board, 0, 3), "\'");
        assert_eq!(board_label(&alphabet, &board, 0, 1), ".");
        let text = fmt_board(&alphabet, &board);
        assert_eq!(text.lines().count(), 19);
        assert!(text.lines().nth(9).unwrap().contains("G O"));
    }
}
