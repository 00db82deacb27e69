// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, board, candidate, formation, freedom, lexicon, matrix, move_picker, play_scorer,
    prefix_extension, rack, tile,
};
use rand::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiState {
    WordSelection,
    RackUpdate,
    Validating,
    Finishing,
    Pass,
}

impl AiState {
    #[inline(always)]
    pub fn is_terminal(self) -> bool {
        matches!(self, AiState::Finishing | AiState::Pass)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedTile {
    pub id: tile::TileId,
    pub letter: u8,
    pub coord: matrix::Coord,
}

// The word being placed this cycle.
struct Selection {
    word: Box<[u8]>,
    binding: candidate::Binding,
    axis: matrix::Axis,
    anchor_coord: matrix::Coord,
    // (index within word, letter) still to come from the rack
    queue: Vec<(usize, u8)>,
    // registered word being extended at its front
    base: Option<Box<[tile::TileId]>>,
    // (index within word, tile) committed so far
    committed: Vec<(usize, tile::TileId)>,
}

impl Selection {
    // Formation in word order, None if a position has no tile.
    fn tile_sequence(&self) -> Option<Vec<tile::TileId>> {
        (0..self.word.len())
            .map(|index| {
                if index == self.binding.index {
                    Some(self.binding.anchor)
                } else if let Some(base) = self
                    .base
                    .as_ref()
                    .filter(|_| index > self.binding.index)
                {
                    base.get(index - self.binding.index).copied()
                } else {
                    self.committed
                        .iter()
                        .find(|&&(i, _)| i == index)
                        .map(|&(_, id)| id)
                }
            })
            .collect()
    }
}

pub struct TurnEngine<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    lexicon: &'a lexicon::Lexicon,
    tier: move_picker::Tier,
    rng: rand_chacha::ChaCha20Rng,
    search: candidate::CandidateSearch,
    state: AiState,
    // accepted candidates, computed once per cycle
    candidates: Option<Vec<candidate::Candidate>>,
    blacklist: HashSet<Box<[u8]>>,
    attempts: Vec<Box<[u8]>>,
    annotations: HashMap<tile::TileId, freedom::Freedom>,
    selection: Option<Selection>,
    queue_index: usize,
    fallback_tried: bool,
    last_selection: Option<Vec<PlacedTile>>,
    last_score: i16,
}

impl<'a> TurnEngine<'a> {
    pub fn new(
        alphabet: &'a alphabet::Alphabet<'a>,
        lexicon: &'a lexicon::Lexicon,
        tier: move_picker::Tier,
        seed: u64,
    ) -> Self {
        Self {
            alphabet,
            lexicon,
            tier,
            rng: rand_chacha::ChaCha20Rng::seed_from_u64(seed),
            search: candidate::CandidateSearch::new(),
            state: AiState::WordSelection,
            candidates: None,
            blacklist: HashSet::new(),
            attempts: Vec::new(),
            annotations: HashMap::new(),
            selection: None,
            queue_index: 0,
            fallback_tried: false,
            last_selection: None,
            last_score: 0,
        }
    }

    #[inline(always)]
    pub fn tier(&self) -> move_picker::Tier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: move_picker::Tier) {
        self.tier = tier;
    }

    #[inline(always)]
    pub fn current_state(&self) -> AiState {
        self.state
    }

    pub fn last_selection(&self) -> Option<&[PlacedTile]> {
        self.last_selection.as_deref()
    }

    #[inline(always)]
    pub fn score_of_last_selection(&self) -> i16 {
        self.last_score
    }

    pub fn last_word(&self) -> Option<String> {
        self.last_selection.as_ref().map(|tiles| {
            self.alphabet
                .fmt_word(&tiles.iter().map(|t| t.letter).collect::<Vec<_>>())
        })
    }

    // Words selected so far since begin_turn, in order.
    pub fn attempts(&self) -> &[Box<[u8]>] {
        &self.attempts
    }

    pub fn is_blacklisted(&self, word: &[u8]) -> bool {
        self.blacklist.contains(word)
    }

    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    pub fn annotation(&self, anchor: tile::TileId) -> Option<&freedom::Freedom> {
        self.annotations.get(&anchor)
    }

    // Starts a new decision cycle. An unfinished cycle is abandoned as is.
    pub fn begin_turn(&mut self) {
        self.reset_cycle();
        self.attempts.clear();
        self.last_selection = None;
        self.last_score = 0;
        self.state = AiState::WordSelection;
    }

    fn reset_cycle(&mut self) {
        self.candidates = None;
        self.blacklist.clear();
        self.annotations.clear();
        self.selection = None;
        self.queue_index = 0;
        self.fallback_tried = false;
    }

    fn enter(&mut self, state: AiState) {
        if state != self.state {
            log::debug!("ai: {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        if state.is_terminal() {
            self.reset_cycle();
        }
    }

    // One step of the cycle. Terminal states stay put until begin_turn.
    pub fn advance_tick<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
    ) -> AiState {
        match self.state {
            AiState::WordSelection => self.select_word(board, rack),
            AiState::RackUpdate => self.place_next_letter(board, rack),
            AiState::Validating => self.validate(board, rack),
            AiState::Finishing | AiState::Pass => {}
        }
        self.state
    }

    // Ticks until Finishing or Pass, or until the budget runs out.
    pub fn run_to_end<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
        max_ticks: usize,
    ) -> AiState {
        for _ in 0..max_ticks {
            if self.advance_tick(board, rack).is_terminal() {
                break;
            }
        }
        self.state
    }

    fn select_word<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
    ) {
        if self.candidates.is_none() {
            let found = self.search.search(self.lexicon, &*board, &rack.letters());
            self.candidates = Some(found);
        }
        let picked = {
            let accepted = self
                .candidates
                .iter()
                .flatten()
                .filter(|c| c.is_selectable() && !self.blacklist.contains(&c.word))
                .collect::<Vec<_>>();
            self.tier
                .rules()
                .policy
                .pick(&accepted, &mut self.rng)
                .cloned()
        };
        let Some(picked) = picked else {
            log::debug!("ai: no usable candidate left");
            self.enter(AiState::Validating);
            return;
        };
        self.blacklist.insert(picked.word.clone());
        self.attempts.push(picked.word.clone());
        let Some(binding) = picked.binding else {
            return;
        };
        let Some(anchor_coord) = board.holder_of(binding.anchor) else {
            log::warn!("ai: anchor {:?} is not on the board", binding.anchor);
            return;
        };
        let freedom = freedom::analyze(&*board, anchor_coord);
        let before = binding.index;
        let after = picked.len() - 1 - binding.index;
        let axis = match freedom.axis {
            Some(axis) if freedom.fits(before, after) => axis,
            _ => {
                log::debug!(
                    "ai: {} does not fit through {} (freedom {})",
                    self.alphabet.fmt_word(&picked.word),
                    anchor_coord.fmt_at(matrix::Axis::Horizontal),
                    freedom.total()
                );
                return;
            }
        };
        self.annotations.insert(binding.anchor, freedom);
        log::debug!(
            "ai: placing {} at {}",
            self.alphabet.fmt_word(&picked.word),
            anchor_coord.along(axis, -(before as i8)).fmt_at(axis)
        );
        let queue = picked
            .word
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != binding.index)
            .map(|(i, &letter)| (i, letter))
            .collect();
        self.selection = Some(Selection {
            word: picked.word,
            binding,
            axis,
            anchor_coord,
            queue,
            base: None,
            committed: Vec::new(),
        });
        self.queue_index = 0;
        self.enter(AiState::RackUpdate);
    }

    fn place_next_letter<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
    ) {
        let Some(selection) = self.selection.as_mut() else {
            log::warn!("ai: placing without a selection");
            self.enter(AiState::Pass);
            return;
        };
        if !rack.is_idle() {
            return;
        }
        let Some(&(index, letter)) = selection.queue.get(self.queue_index) else {
            self.enter(AiState::Validating);
            return;
        };
        self.queue_index += 1;
        let offset = index as i8 - selection.binding.index as i8;
        let target = selection.anchor_coord.along(selection.axis, offset);
        let Some(tile) = rack.find_letter(letter).and_then(|id| rack.remove(id)) else {
            log::warn!(
                "ai: {} is no longer on the rack, skipping",
                self.alphabet.label(letter).unwrap_or("?")
            );
            return;
        };
        match board.commit(tile, target) {
            Ok(()) => selection.committed.push((index, tile.id)),
            Err(err) => {
                log::warn!("ai: cannot place {:?}: {}", tile.id, err);
                rack.insert(tile);
            }
        }
    }

    fn validate<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
    ) {
        match self.selection.take() {
            Some(selection) => self.validate_selection(board, rack, selection),
            None => self.try_prefix_extension(board, rack),
        }
    }

    fn validate_selection<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
        selection: Selection,
    ) {
        let placed = selection.tile_sequence().and_then(|tiles| {
            let coords = formation::coords_of(&*board, &tiles)?;
            formation::check(&coords).ok()?;
            let letters = tiles
                .iter()
                .map(|&id| board.tile_at(board.holder_of(id)?).map(|t| t.letter))
                .collect::<Option<Vec<_>>>()?;
            if !self.lexicon.exists(&letters) {
                return None;
            }
            Some((tiles, coords, letters))
        });
        self.annotations.remove(&selection.binding.anchor);
        let Some((tiles, coords, letters)) = placed else {
            log::debug!(
                "ai: {} did not come out whole, taking it back",
                self.alphabet.fmt_word(&selection.word)
            );
            for &(_, id) in selection.committed.iter().rev() {
                if let Some(tile) = board.holder_of(id).and_then(|coord| board.withdraw(coord)) {
                    rack.insert(tile);
                }
            }
            // the rack changed, search again
            self.candidates = None;
            self.queue_index = 0;
            self.enter(AiState::WordSelection);
            return;
        };
        if let Err(err) = board.register_word(&tiles) {
            log::warn!("ai: board refused the word: {}", err);
        }
        self.last_score = play_scorer::compute_score(&*board, &tiles);
        self.last_selection = Some(
            tiles
                .iter()
                .zip(coords.iter().zip(letters.iter()))
                .map(|(&id, (&coord, &letter))| PlacedTile { id, letter, coord })
                .collect(),
        );
        log::info!(
            "ai: played {} for {}",
            self.alphabet.fmt_word(&letters),
            self.last_score
        );
        self.enter(AiState::Finishing);
    }

    fn try_prefix_extension<B: board::BoardAccess + ?Sized, R: rack::RackAccess + ?Sized>(
        &mut self,
        board: &mut B,
        rack: &mut R,
    ) {
        if !self.tier.rules().may_extend_prefix || self.fallback_tried {
            log::info!("ai: pass");
            self.enter(AiState::Pass);
            return;
        }
        self.fallback_tried = true;
        let blacklist = &self.blacklist;
        let found = prefix_extension::find_extension(self.lexicon, &*board, &rack.letters(), |w| {
            blacklist.contains(w)
        });
        let Some(ext) = found else {
            log::info!("ai: no prefix fits either, pass");
            self.enter(AiState::Pass);
            return;
        };
        let (Some(binding), Some(anchor_coord)) = (
            ext.candidate.binding,
            ext.base.first().and_then(|&id| board.holder_of(id)),
        ) else {
            self.enter(AiState::Pass);
            return;
        };
        log::debug!(
            "ai: extending to {}",
            self.alphabet.fmt_word(&ext.candidate.word)
        );
        self.blacklist.insert(ext.candidate.word.clone());
        self.attempts.push(ext.candidate.word.clone());
        let queue = ext.candidate.word[..binding.index]
            .iter()
            .enumerate()
            .map(|(i, &letter)| (i, letter))
            .collect();
        self.selection = Some(Selection {
            word: ext.candidate.word,
            binding,
            axis: ext.axis,
            anchor_coord,
            queue,
            base: Some(ext.base),
            committed: Vec::new(),
        });
        self.queue_index = 0;
        self.enter(AiState::RackUpdate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, BoardAccess};
    use crate::matrix::{Axis, Coord};
    use crate::rack::{Rack, RackAccess};
    use crate::{board_layout, tile::PlayerId};

    struct Fixture {
        alphabet: alphabet::Alphabet<'static>,
        ids: tile::TileIds,
        board: Board,
        rack: Rack,
    }

    impl Fixture {
        fn new(rack_letters: &str, removal_ticks: u8) -> Self {
            let alphabet = alphabet::make_english_alphabet();
            let mut ids = tile::TileIds::new();
            let mut rack = Rack::with_removal_ticks(removal_ticks);
            for letter in alphabet.parse_word(rack_letters).unwrap() {
                rack.insert(ids.make(letter, alphabet.score(letter), Some(PlayerId(1))));
            }
            Self {
                alphabet,
                ids,
                board: Board::new(board_layout::make_plain_board_layout(15, 15)),
                rack,
            }
        }

        fn seed(&mut self, word: &str, start: Coord, axis: Axis) -> Vec<tile::TileId> {
            self.board
                .seed_word(&self.alphabet, &mut self.ids, word, start, axis)
                .unwrap()
        }
    }

    fn lexicon_of(alphabet: &alphabet::Alphabet<'_>, words: &[&str]) -> lexicon::Lexicon {
        lexicon::Lexicon::from_words(alphabet, words.iter().copied()).unwrap()
    }

    #[test]
    fn one_letter_per_idle_tick() {
        let mut f = Fixture::new("CAT", 1);
        f.seed("S", Coord::new(7, 7), Axis::Horizontal);
        let lexicon = lexicon_of(&f.alphabet, &["CATS"]);
        let tier = move_picker::Tier::new(0).unwrap();
        let mut engine = TurnEngine::new(&f.alphabet, &lexicon, tier, 0);
        assert_eq!(engine.advance_tick(&mut f.board, &mut f.rack), AiState::RackUpdate);
        let mut placements = 0;
        let mut ticks = 0;
        while engine.current_state() == AiState::RackUpdate {
            let before = f.rack.len();
            engine.advance_tick(&mut f.board, &mut f.rack);
            if f.rack.len() < before {
                placements += 1;
                // busy for one frame after each removal
                engine.advance_tick(&mut f.board, &mut f.rack);
                assert_eq!(f.rack.len() + placements, 3);
            }
            f.rack.tick();
            ticks += 1;
            assert!(ticks < 20);
        }
        assert_eq!(placements, 3);
        assert_eq!(engine.current_state(), AiState::Validating);
        assert_eq!(engine.advance_tick(&mut f.board, &mut f.rack), AiState::Finishing);
        assert_eq!(engine.last_word().as_deref(), Some("CATS"));
        let placed = engine.last_selection().unwrap();
        assert_eq!(placed[3].coord, Coord::new(7, 7));
        assert_eq!(placed[0].coord, Coord::new(4, 7));
        assert_eq!(engine.score_of_last_selection(), 6);
        assert!(f.rack.is_empty());
        assert!(f.board.tile_at(Coord::new(4, 7)).unwrap().is_neutral());
    }

    #[test]
    fn taken_back_word_stays_blacklisted_and_the_retry_plays() {
        let mut f = Fixture::new("OAT", 0);
        f.seed("R", Coord::new(3, 3), Axis::Horizontal);
        f.seed("T", Coord::new(10, 10), Axis::Horizontal);
        let lexicon = lexicon_of(&f.alphabet, &["ROTA", "TOT"]);
        let tier = move_picker::Tier::new(3).unwrap();
        let mut engine = TurnEngine::new(&f.alphabet, &lexicon, tier, 0);
        let rota = f.alphabet.parse_word("ROTA").unwrap();
        assert_eq!(engine.advance_tick(&mut f.board, &mut f.rack), AiState::RackUpdate);
        assert!(engine.is_blacklisted(&rota));
        assert_eq!(engine.blacklist_len(), 1);
        // the A goes missing, so ROTA cannot come out whole
        let a = f.rack.find_letter(f.alphabet.tile_of('A').unwrap()).unwrap();
        f.rack.remove(a).unwrap();
        let mut state = engine.current_state();
        while state != AiState::WordSelection {
            state = engine.advance_tick(&mut f.board, &mut f.rack);
            assert!(!state.is_terminal());
        }
        assert!(engine.is_blacklisted(&rota));
        assert_eq!(f.board.num_tiles(), 2);
        assert_eq!(engine.run_to_end(&mut f.board, &mut f.rack, 20), AiState::Finishing);
        assert_eq!(engine.last_word().as_deref(), Some("TOT"));
        assert_eq!(engine.last_selection().unwrap()[2].coord, Coord::new(10, 10));
        assert_eq!(engine.blacklist_len(), 0);
        assert_eq!(engine.attempts().len(), 2);
    }

    #[test]
    fn missing_rack_letter_is_skipped_then_taken_back() {
        let mut f = Fixture::new("CAT", 0);
        f.seed("S", Coord::new(7, 7), Axis::Horizontal);
        let lexicon = lexicon_of(&f.alphabet, &["CATS"]);
        let tier = move_picker::Tier::new(0).unwrap();
        let mut engine = TurnEngine::new(&f.alphabet, &lexicon, tier, 0);
        assert_eq!(engine.advance_tick(&mut f.board, &mut f.rack), AiState::RackUpdate);
        // the A goes missing behind the engine's back
        let a = f.rack.find_letter(f.alphabet.tile_of('A').unwrap()).unwrap();
        let stolen = f.rack.remove(a).unwrap();
        assert_eq!(engine.run_to_end(&mut f.board, &mut f.rack, 10), AiState::Pass);
        assert!(engine.last_selection().is_none());
        // C and T came back
        assert_eq!(f.rack.len(), 2);
        assert_eq!(f.board.num_tiles(), 1);
        assert_eq!(stolen.id, a);
        assert_eq!(engine.attempts().len(), 1);
    }

    #[test]
    fn annotation_lives_only_while_placing() {
        let mut f = Fixture::new("CAT", 0);
        let s = f.seed("S", Coord::new(7, 7), Axis::Horizontal)[0];
        let lexicon = lexicon_of(&f.alphabet, &["CATS"]);
        let mut engine =
            TurnEngine::new(&f.alphabet, &lexicon, move_picker::Tier::new(0).unwrap(), 0);
        engine.advance_tick(&mut f.board, &mut f.rack);
        let annotation = engine.annotation(s).unwrap();
        assert_eq!(annotation.axis, Some(Axis::Horizontal));
        assert_eq!(annotation.total(), 14);
        engine.run_to_end(&mut f.board, &mut f.rack, 10);
        assert!(engine.annotation(s).is_none());
    }

    #[test]
    fn terminal_states_hold_until_next_turn() {
        let mut f = Fixture::new("ZZ", 0);
        let lexicon = lexicon_of(&f.alphabet, &["AT"]);
        let mut engine =
            TurnEngine::new(&f.alphabet, &lexicon, move_picker::Tier::new(3).unwrap(), 0);
        assert_eq!(engine.run_to_end(&mut f.board, &mut f.rack, 10), AiState::Pass);
        assert_eq!(engine.advance_tick(&mut f.board, &mut f.rack), AiState::Pass);
        engine.begin_turn();
        assert_eq!(engine.current_state(), AiState::WordSelection);
    }
}
