// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod candidate;
pub mod display;
pub mod formation;
pub mod freedom;
pub mod game_config;
pub mod game_state;
pub mod lexicon;
pub mod logging;
pub mod matrix;
pub mod move_picker;
pub mod play_scorer;
pub mod prefix_extension;
pub mod rack;
pub mod rlhelper;
pub mod tile;
pub mod turn_engine;
