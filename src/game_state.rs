// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, bag, board, error, formation, game_config, lexicon, matrix, move_picker,
    play_scorer, rack, tile,
};
use board::BoardAccess;
use rack::RackAccess;
use rand::prelude::*;

pub struct GamePlayer {
    pub score: i16,
    pub rack: rack::Rack,
    pub tier: move_picker::Tier,
}

impl Clone for GamePlayer {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            score: self.score,
            rack: self.rack.clone(),
            tier: self.tier,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.score.clone_from(&source.score);
        self.rack.clone_from(&source.rack);
        self.tier.clone_from(&source.tier);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnd {
    // the player emptied the rack with the bag empty
    WentOut(u8),
    // too many scoreless turns in a row
    StandStill,
}

pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig<'a>,
    pub players: Box<[GamePlayer]>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub tile_ids: tile::TileIds,
    pub turn: u8,
    pub zero_turns: u8,
}

impl<'a> GameState<'a> {
    pub fn new(game_config: &'a game_config::GameConfig<'a>) -> Self {
        let mut tile_ids = tile::TileIds::new();
        let bag = bag::Bag::new(game_config.alphabet(), &mut tile_ids);
        Self {
            game_config,
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: rack::Rack::with_removal_ticks(game_config.ticks_per_removal()),
                    tier: move_picker::Tier::default(),
                })
                .collect(),
            board: board::Board::new(game_config.board_layout().clone()),
            bag,
            tile_ids,
            turn: 0,
            zero_turns: 0,
        }
    }

    // Shuffles the bag and fills every rack.
    pub fn deal(&mut self, rng: &mut dyn RngCore) {
        self.bag.shuffle(rng);
        let rack_size = self.game_config.rack_size() as usize;
        for (i, player) in (0u8..).zip(self.players.iter_mut()) {
            self.bag
                .replenish(&mut player.rack, rack_size, tile::PlayerId(i));
        }
    }

    // The board needs a neutral word before anyone can play through it.
    // Lays a random lexicon word across the star square.
    pub fn seed_opening(
        &mut self,
        lexicon: &lexicon::Lexicon,
        rng: &mut dyn RngCore,
    ) -> error::Returns<Box<[u8]>> {
        let layout = self.board.layout();
        let cols = layout.dim().cols as usize;
        let fitting = lexicon
            .words()
            .filter(|w| (3..=cols.min(7)).contains(&w.len()))
            .collect::<Vec<_>>();
        let Some(&word) = fitting.choose(rng) else {
            return_error!("lexicon has no word to open with".into());
        };
        let start = matrix::Coord::new(
            (layout.star_col() - (word.len() as i8 - 1) / 2).max(0),
            layout.star_row(),
        );
        let game_config = self.game_config;
        let alphabet = game_config.alphabet();
        let label = alphabet.fmt_word(word);
        self.board.seed_word(
            alphabet,
            &mut self.tile_ids,
            &label,
            start,
            matrix::Axis::Horizontal,
        )?;
        Ok(word.into())
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    // Board and rack borrowed together for the engine.
    pub fn board_and_rack(&mut self) -> (&mut board::Board, &mut rack::Rack) {
        (
            &mut self.board,
            &mut self.players[self.turn as usize].rack,
        )
    }

    // Books the result of the current player's turn and refills the rack.
    pub fn finish_turn(&mut self, score: i16) {
        let rack_size = self.game_config.rack_size() as usize;
        let owner = tile::PlayerId(self.turn);
        let player = &mut self.players[self.turn as usize];
        player.score += score;
        self.bag.replenish(&mut player.rack, rack_size, owner);
        if score == 0 {
            self.zero_turns += 1;
        } else {
            self.zero_turns = 0;
        }
    }

    // Places a word for a human player. Cells already holding the right
    // neutral letter are reused, the rest comes from the current rack. The
    // word must reuse at least one neutral tile, form a straight unbroken
    // line and be in the lexicon. On success the word is registered and its
    // score returned; on failure the board and rack are left as they were.
    pub fn play_word(
        &mut self,
        lexicon: &lexicon::Lexicon,
        word: &str,
        start: matrix::Coord,
        axis: matrix::Axis,
    ) -> error::Returns<i16> {
        let game_config = self.game_config;
        let alphabet = game_config.alphabet();
        let Some(letters) = alphabet.parse_word(word) else {
            return_error!(format!("invalid letter in {:?}", word));
        };
        if letters.len() < 2 {
            return_error!("a word needs at least two letters".into());
        }
        if !lexicon.exists(&letters) {
            return_error!(format!("{} is not in the lexicon", alphabet.fmt_word(&letters)));
        }
        let turn = self.turn as usize;
        let board = &mut self.board;
        let rack = &mut self.players[turn].rack;
        let mut tiles = Vec::with_capacity(letters.len());
        let mut placed = Vec::new();
        let mut reused = 0;
        let mut failure = None;
        for (i, &letter) in (0i8..).zip(letters.iter()) {
            let coord = start.along(axis, i);
            if let Some(t) = board.tile_at(coord) {
                if t.letter == letter && t.is_neutral() {
                    tiles.push(t.id);
                    reused += 1;
                } else {
                    failure = Some(format!("{} is taken", coord.fmt_at(axis)));
                    break;
                }
                continue;
            }
            let Some(t) = rack.find_letter(letter).and_then(|id| rack.remove(id)) else {
                failure = Some(format!("no {} on the rack", alphabet.fmt_word(&[letter])));
                break;
            };
            if let Err(err) = board.commit(t, coord) {
                rack.insert(t);
                failure = Some(err.to_string());
                break;
            }
            tiles.push(t.id);
            placed.push(coord);
        }
        if failure.is_none() && reused == 0 && !placed.is_empty() {
            failure = Some("the word must go through a tile on the board".into());
        }
        if failure.is_none() && placed.is_empty() {
            failure = Some("the word is already on the board".into());
        }
        if failure.is_none() {
            if let Err(err) = formation::check_tiles(&*board, &tiles) {
                failure = Some(err.to_string());
            }
        }
        if let Some(failure) = failure {
            for &coord in placed.iter().rev() {
                if let Some(t) = board.withdraw(coord) {
                    rack.insert(t);
                }
            }
            return Err(failure.into());
        }
        board.register_word(&tiles)?;
        Ok(play_scorer::compute_score(&*board, &tiles))
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        self.turn -= num_players & -((self.turn >= num_players) as i8) as u8;
    }

    pub fn check_game_ended(&self) -> Option<GameEnd> {
        if self.bag.is_empty() {
            if let Some(i) = self.players.iter().position(|p| p.rack.is_empty()) {
                return Some(GameEnd::WentOut(i as u8));
            }
        }
        if self.zero_turns >= self.game_config.num_zeros_to_end() {
            return Some(GameEnd::StandStill);
        }
        None
    }

    // Leftover rack values are deducted; whoever went out collects them.
    pub fn settle(&mut self, end: GameEnd) {
        let leftovers = self
            .players
            .iter()
            .map(|p| p.rack.score_left())
            .collect::<Vec<_>>();
        let total = leftovers.iter().sum::<i16>();
        for (player, left) in self.players.iter_mut().zip(leftovers) {
            player.score -= left;
        }
        if let GameEnd::WentOut(i) = end {
            self.players[i as usize].score += total;
        }
    }

    pub fn rack_label(&self, alphabet: &alphabet::Alphabet<'_>, player: usize) -> String {
        alphabet.fmt_word(&self.players[player].rack.letters())
    }
}
