// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, board_layout, tile};

// Word premiums add up (two double-word cells make x4, a double and a triple
// make x5) and are applied once to the letter subtotal.
pub fn score_cells<II: IntoIterator<Item = (i8, board_layout::Premium)>>(cells: II) -> i16 {
    let mut letter_score = 0i16;
    let mut word_multiplier_sum = 0i16;
    for (points, premium) in cells {
        letter_score += points as i16 * premium.letter_multiplier as i16;
        if premium.word_multiplier > 1 {
            word_multiplier_sum += premium.word_multiplier as i16;
        }
    }
    if word_multiplier_sum != 0 {
        letter_score * word_multiplier_sum
    } else {
        letter_score
    }
}

// Tiles not found on the board contribute nothing.
pub fn compute_score<B: board::BoardAccess + ?Sized>(board: &B, tiles: &[tile::TileId]) -> i16 {
    score_cells(tiles.iter().filter_map(|&id| {
        let cell = board.cell_at(board.holder_of(id)?)?;
        let t = cell.occupant.as_ref()?;
        Some((t.points, cell.premium))
    }))
}
