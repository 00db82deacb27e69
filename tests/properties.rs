// Copyright (C) 2020-2026 Andy Kurnia.

use proptest::prelude::*;
use std::collections::HashSet;
use wordbot::board::{Board, BoardAccess};
use wordbot::board_layout::{self, DLS, DWS, FVS, Premium, TLS, TWS};
use wordbot::matrix::{Axis, Coord};
use wordbot::rack::{Rack, RackAccess};
use wordbot::turn_engine::TurnEngine;
use wordbot::{alphabet, candidate, formation, freedom, lexicon, move_picker, play_scorer, tile};

static WORDS: &[&str] = &[
    "AT", "TA", "TO", "ON", "NO", "SO", "AS", "IS", "IT", "TIN", "TON", "NOT", "TOE", "OAT",
    "SAT", "SEAT", "EAST", "EATS", "TEAS", "STONE", "NOTES", "ONSET", "TONES", "ATONE", "OATEN",
    "SATIN", "STAIN", "SAINT", "TAINT",
];

fn premium_of(k: u8) -> Premium {
    [FVS, DLS, TLS, DWS, TWS][k as usize % 5]
}

fn rack_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(b"AEINOSTX".to_vec()), 1..=7)
        .prop_map(|v| v.into_iter().map(char::from).collect())
}

fn setup(
    alphabet: &alphabet::Alphabet<'_>,
    rack_letters: &str,
    seed_word: &str,
    col: i8,
    row: i8,
    axis: Axis,
) -> (Board, Rack) {
    let mut ids = tile::TileIds::new();
    let mut board = Board::new(board_layout::make_plain_board_layout(15, 15));
    board
        .seed_word(alphabet, &mut ids, seed_word, Coord::new(col, row), axis)
        .unwrap();
    let mut rack = Rack::new();
    for letter in alphabet.parse_word(rack_letters).unwrap() {
        rack.insert(ids.make(letter, alphabet.score(letter), Some(tile::PlayerId(0))));
    }
    (board, rack)
}

fn sorted(mut v: Vec<u8>) -> Vec<u8> {
    v.sort_unstable();
    v
}

proptest! {
    #[test]
    fn score_ignores_tile_order(
        cells in prop::collection::vec((1i8..=10, 0u8..5), 1..8)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let (original, shuffled) = cells;
        let a = play_scorer::score_cells(original.iter().map(|&(p, k)| (p, premium_of(k))));
        let b = play_scorer::score_cells(shuffled.iter().map(|&(p, k)| (p, premium_of(k))));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn candidates_rebuild_their_word(
        rack_letters in rack_strategy(),
        seed_idx in 0..WORDS.len(),
        col in 0i8..10,
        row in 0i8..15,
    ) {
        let alphabet = alphabet::make_english_alphabet();
        let lexicon = lexicon::Lexicon::from_words(&alphabet, WORDS.iter().copied()).unwrap();
        let (board, rack) =
            setup(&alphabet, &rack_letters, WORDS[seed_idx], col, row, Axis::Horizontal);
        let rack = rack.letters();
        for c in candidate::CandidateSearch::new().search(&lexicon, &board, &rack) {
            let binding = c.binding.unwrap();
            let anchor = board.tile_at(board.holder_of(binding.anchor).unwrap()).unwrap();
            prop_assert!(anchor.is_neutral());
            prop_assert_eq!(c.word[binding.index], anchor.letter);
            let mut used = c.rack_letters().collect::<Vec<_>>();
            // the rack really holds what the word takes from it
            let mut left = rack.clone();
            for letter in &used {
                let pos = left.iter().position(|l| l == letter);
                prop_assert!(pos.is_some());
                left.swap_remove(pos.unwrap());
            }
            used.push(anchor.letter);
            prop_assert_eq!(sorted(used), sorted(c.word.to_vec()));
        }
    }

    #[test]
    fn straight_runs_are_valid_and_gaps_are_not(
        start_col in 0i8..10,
        start_row in 0i8..10,
        len in 1usize..6,
        vertical in any::<bool>(),
        gap_at in 1usize..6,
    ) {
        let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
        let start = Coord::new(start_col, start_row);
        let mut coords = (0..len as i8).map(|i| start.along(axis, i)).collect::<Vec<_>>();
        let expected = if len > 1 { axis } else { Axis::Horizontal };
        prop_assert_eq!(formation::check(&coords).ok(), Some(expected));
        if gap_at < len {
            for c in coords[gap_at..].iter_mut() {
                *c = c.along(axis, 1);
            }
            prop_assert_eq!(
                formation::check(&coords),
                Err(formation::FormationError::Gap(gap_at))
            );
        }
    }

    #[test]
    fn freedom_total_is_zero_or_the_two_sides(
        seed_idx in 0..WORDS.len(),
        col in 0i8..10,
        row in 0i8..15,
        probe in 0usize..5,
    ) {
        let alphabet = alphabet::make_english_alphabet();
        let (board, _) = setup(&alphabet, "A", WORDS[seed_idx], col, row, Axis::Horizontal);
        let anchor = Coord::new(col + (probe % WORDS[seed_idx].len()) as i8, row);
        let f = freedom::analyze(&board, anchor);
        match f.axis {
            Some(axis) => {
                prop_assert_eq!(
                    f.total(),
                    f.extents.run(axis.backward()).cells as i16
                        + f.extents.run(axis.forward()).cells as i16
                );
                prop_assert!(f.total() > 0);
            }
            None => prop_assert_eq!(f.total(), 0),
        }
    }

    #[test]
    fn no_word_is_tried_twice_in_a_turn(
        rack_letters in rack_strategy(),
        seed_idx in 0..WORDS.len(),
        col in 0i8..10,
        row in 0i8..15,
        level in 0u8..=move_picker::Tier::MAX,
        rng_seed in any::<u64>(),
    ) {
        let alphabet = alphabet::make_english_alphabet();
        let lexicon = lexicon::Lexicon::from_words(&alphabet, WORDS.iter().copied()).unwrap();
        let (mut board, mut rack) =
            setup(&alphabet, &rack_letters, WORDS[seed_idx], col, row, Axis::Horizontal);
        let rack_len = rack.len();
        let tiles_before = board.num_tiles();
        let tier = move_picker::Tier::new(level).unwrap();
        let mut engine = TurnEngine::new(&alphabet, &lexicon, tier, rng_seed);
        let end = engine.run_to_end(&mut board, &mut rack, 500);
        prop_assert!(end.is_terminal());
        let attempts = engine.attempts();
        let unique = attempts.iter().collect::<HashSet<_>>();
        prop_assert_eq!(unique.len(), attempts.len());
        prop_assert_eq!(engine.blacklist_len(), 0);
        // tiles are conserved between board and rack
        prop_assert_eq!(board.num_tiles() + rack.len(), tiles_before + rack_len);
        if let Some(placed) = engine.last_selection() {
            let letters = placed.iter().map(|t| t.letter).collect::<Vec<_>>();
            let coords = placed.iter().map(|t| t.coord).collect::<Vec<_>>();
            prop_assert!(lexicon.exists(&letters));
            prop_assert!(formation::is_valid(&coords));
        }
    }
}
