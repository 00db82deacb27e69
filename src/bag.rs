// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, rack, tile};
use rand::prelude::*;

// Draw pile. Tiles are drawn from the end.
pub struct Bag(pub Vec<tile::LetterTile>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet<'_>, tile_ids: &mut tile::TileIds) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for letter in 1..alphabet.len() {
            for _ in 0..alphabet.freq(letter) {
                bag.push(tile_ids.make(letter, alphabet.score(letter), None));
            }
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<tile::LetterTile> {
        self.0.pop()
    }

    // Tops the rack up to rack_size, the drawn tiles belong to the owner.
    pub fn replenish<R: rack::RackAccess + ?Sized>(
        &mut self,
        rack: &mut R,
        rack_size: usize,
        owner: tile::PlayerId,
    ) {
        while rack.tiles().len() < rack_size {
            let Some(mut t) = self.pop() else {
                break;
            };
            t.owner = Some(owner);
            rack.insert(t);
        }
    }

    // put back the tiles at random positions. keep the rest of the bag in the same order.
    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[tile::LetterTile]) {
        self.0.reserve(tiles.len());
        for &t in tiles {
            let idx = rng.random_range(0..=self.0.len());
            self.0.insert(idx, tile::LetterTile { owner: None, ..t });
        }
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rack::{Rack, RackAccess};

    #[test]
    fn replenish_stops_at_rack_size_and_sets_owner() {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let mut bag = Bag::new(&alphabet, &mut ids);
        assert_eq!(bag.len(), 98);
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(3);
        bag.shuffle(&mut rng);
        let mut rack = Rack::new();
        bag.replenish(&mut rack, 7, tile::PlayerId(1));
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.len(), 91);
        assert!(rack.tiles().iter().all(|t| t.owner == Some(tile::PlayerId(1))));
        bag.replenish(&mut rack, 7, tile::PlayerId(1));
        assert_eq!(bag.len(), 91);
    }

    #[test]
    fn put_back_keeps_count_and_clears_owner() {
        let alphabet = alphabet::make_english_alphabet();
        let mut ids = tile::TileIds::new();
        let mut bag = Bag::new(&alphabet, &mut ids);
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(5);
        let mut rack = Rack::new();
        bag.replenish(&mut rack, 3, tile::PlayerId(0));
        let tiles = rack.clear();
        bag.put_back(&mut rng, &tiles);
        assert_eq!(bag.len(), 98);
        assert!(bag.0.iter().all(|t| t.is_neutral()));
    }
}
