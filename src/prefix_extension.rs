// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, candidate, formation, freedom, lexicon, matrix, tile};

// A registered word lengthened at its front. The binding points at the
// word's first tile, so placement uses the same anchor arithmetic as a
// fresh word; only the prefix letters come from the rack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub candidate: candidate::Candidate,
    pub axis: matrix::Axis,
    pub base: Box<[tile::TileId]>,
}

impl Extension {
    #[inline(always)]
    pub fn prefix_len(&self) -> usize {
        self.candidate.binding.map_or(0, |b| b.index)
    }
}

fn rack_holds(rack_tally: &mut Vec<u8>, rack: &[u8], letters: &[u8]) -> bool {
    rack_tally.clear();
    for &letter in rack {
        let slot = letter as usize;
        if slot >= rack_tally.len() {
            rack_tally.resize(slot + 1, 0);
        }
        rack_tally[slot] += 1;
    }
    letters.iter().all(|&letter| match rack_tally.get_mut(letter as usize) {
        Some(n) if *n > 0 => {
            *n -= 1;
            true
        }
        _ => false,
    })
}

// First (registered word, prefix) pair, in registry then prefix order, such
// that the joined word is in the lexicon, the rack holds the prefix and the
// run of free cells in front of the word has room for the prefix plus one.
pub fn find_extension<B: board::BoardAccess + ?Sized, Skip: Fn(&[u8]) -> bool>(
    lexicon: &lexicon::Lexicon,
    board: &B,
    rack: &[u8],
    skip: Skip,
) -> Option<Extension> {
    let mut rack_tally = Vec::new();
    let mut joined = Vec::new();
    for base in board.registered_words() {
        if base.len() < 2 {
            continue;
        }
        let Some(coords) = formation::coords_of(board, base) else {
            continue;
        };
        let Ok(axis) = formation::check(&coords) else {
            continue;
        };
        let Some(letters) = base
            .iter()
            .map(|&id| board.tile_at(board.holder_of(id)?).map(|t| t.letter))
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };
        let room = freedom::scan_run(board, coords[0], axis.backward()).cells as usize;
        for prefix in lexicon.prefixes() {
            if room < prefix.len() + 1 {
                continue;
            }
            joined.clear();
            joined.extend_from_slice(prefix);
            joined.extend_from_slice(&letters);
            if skip(&joined) || !lexicon.exists(&joined) {
                continue;
            }
            if !rack_holds(&mut rack_tally, rack, prefix) {
                continue;
            }
            return Some(Extension {
                candidate: candidate::Candidate {
                    word: joined[..].into(),
                    binding: Some(candidate::Binding {
                        anchor: base[0],
                        index: prefix.len(),
                    }),
                },
                axis,
                base: base.clone(),
            });
        }
    }
    None
}
