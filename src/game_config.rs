// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, rack};

pub struct StaticGameConfig<'a> {
    alphabet: alphabet::Alphabet<'a>,
    board_layout: board_layout::BoardLayout,
    rack_size: i8,
    num_players: u8,
    num_zeros_to_end: u8,
    ticks_per_removal: u8,
}

pub enum GameConfig<'a> {
    Static(StaticGameConfig<'a>),
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &alphabet::Alphabet<'a> {
        match self {
            GameConfig::Static(x) => &x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &board_layout::BoardLayout {
        match self {
            GameConfig::Static(x) => &x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    // consecutive scoreless turns (passes) that end the game
    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_zeros_to_end,
        }
    }

    // how long the rack stays busy after giving up a tile
    #[inline(always)]
    pub fn ticks_per_removal(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.ticks_per_removal,
        }
    }
}

pub fn make_english_game_config<'a>() -> GameConfig<'a> {
    GameConfig::Static(StaticGameConfig {
        alphabet: alphabet::make_english_alphabet(),
        board_layout: board_layout::make_standard_board_layout(),
        rack_size: rack::RACK_SIZE as i8,
        num_players: 2,
        num_zeros_to_end: 6,
        ticks_per_removal: 0,
    })
}

// Same rules on a premium-free board of the given size.
pub fn make_plain_english_game_config<'a>(rows: i8, cols: i8) -> GameConfig<'a> {
    GameConfig::Static(StaticGameConfig {
        alphabet: alphabet::make_english_alphabet(),
        board_layout: board_layout::make_plain_board_layout(rows, cols),
        rack_size: rack::RACK_SIZE as i8,
        num_players: 2,
        num_zeros_to_end: 6,
        ticks_per_removal: 0,
    })
}
