// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, freedom, lexicon, tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub anchor: tile::TileId,
    // position within the word covered by the anchor
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub word: Box<[u8]>,
    pub binding: Option<Binding>,
}

impl Candidate {
    // Every move has to attach to the board.
    #[inline(always)]
    pub fn is_selectable(&self) -> bool {
        self.binding.is_some()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    // Letters that have to come from the rack, in word order.
    pub fn rack_letters(&self) -> impl Iterator<Item = u8> + '_ {
        let skip = self.binding.map(|b| b.index);
        self.word
            .iter()
            .enumerate()
            .filter(move |&(i, _)| Some(i) != skip)
            .map(|(_, &letter)| letter)
    }
}

// Reused between searches to avoid reallocating per word.
pub struct CandidateSearch {
    rack_tally: Vec<u8>,
    // per letter, anchors that can grow along some axis
    anchors: Vec<Option<Box<[(tile::TileId, freedom::Freedom)]>>>,
}

impl CandidateSearch {
    pub fn new() -> Self {
        Self {
            rack_tally: Vec::new(),
            anchors: Vec::new(),
        }
    }

    // Anchor lookups are memoized per letter for the duration of one search.
    fn anchors_for<B: board::BoardAccess + ?Sized>(
        &mut self,
        board: &B,
        letter: u8,
    ) -> &[(tile::TileId, freedom::Freedom)] {
        let slot = letter as usize;
        if slot >= self.anchors.len() {
            self.anchors.resize(slot + 1, None);
        }
        self.anchors[slot].get_or_insert_with(|| {
            board
                .anchors(letter)
                .into_iter()
                .filter_map(|(id, coord)| {
                    let freedom = freedom::analyze(board, coord);
                    freedom.axis.map(|_| (id, freedom))
                })
                .collect()
        })
    }

    // Covers the word with rack letters, binding the first letter the rack
    // cannot supply to the first board anchor (row-major) the word fits
    // through. None when the word cannot be covered that way.
    fn cover<B: board::BoardAccess + ?Sized>(
        &mut self,
        board: &B,
        rack: &[u8],
        word: &[u8],
    ) -> Option<Candidate> {
        self.rack_tally.clear();
        for &letter in rack {
            let slot = letter as usize;
            if slot >= self.rack_tally.len() {
                self.rack_tally.resize(slot + 1, 0);
            }
            self.rack_tally[slot] += 1;
        }
        let mut binding = None;
        for (index, &letter) in word.iter().enumerate() {
            let slot = letter as usize;
            if slot < self.rack_tally.len() && self.rack_tally[slot] > 0 {
                self.rack_tally[slot] -= 1;
            } else if binding.is_none() {
                let after = word.len() - 1 - index;
                let anchor = self
                    .anchors_for(board, letter)
                    .iter()
                    .find(|(_, freedom)| freedom.fits(index, after))
                    .map(|&(id, _)| id)?;
                binding = Some(Binding { anchor, index });
            } else {
                return None;
            }
        }
        Some(Candidate {
            word: word.into(),
            binding,
        })
    }

    // All anchored candidates in lexicon order. Words the rack covers on its
    // own are left out, as are words longer than the rack plus one anchor.
    pub fn search<B: board::BoardAccess + ?Sized>(
        &mut self,
        lexicon: &lexicon::Lexicon,
        board: &B,
        rack: &[u8],
    ) -> Vec<Candidate> {
        self.anchors.clear();
        let max_len = rack.len() + 1;
        let mut found = Vec::new();
        for word in lexicon.words() {
            if word.len() < 2 || word.len() > max_len {
                continue;
            }
            if let Some(candidate) = self.cover(board, rack, word) {
                if candidate.is_selectable() {
                    found.push(candidate);
                }
            }
        }
        log::debug!(
            "{} anchored candidates out of {} words",
            found.len(),
            lexicon.len()
        );
        found
    }
}

impl Default for CandidateSearch {
    fn default() -> Self {
        Self::new()
    }
}
