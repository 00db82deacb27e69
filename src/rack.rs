// Copyright (C) 2020-2026 Andy Kurnia.

use super::tile;

pub const RACK_SIZE: usize = 7;

// What the turn engine needs from the rack owner. Readiness comes from the
// presentation layer: a rack is busy while a tile is still animating.
pub trait RackAccess {
    fn tiles(&self) -> &[tile::LetterTile];

    fn remove(&mut self, tile: tile::TileId) -> Option<tile::LetterTile>;

    fn insert(&mut self, tile: tile::LetterTile);

    fn is_idle(&self) -> bool;

    #[inline(always)]
    fn contains(&self, tile: tile::TileId) -> bool {
        self.index_of(tile).is_some()
    }

    #[inline(always)]
    fn index_of(&self, tile: tile::TileId) -> Option<usize> {
        self.tiles().iter().position(|t| t.id == tile)
    }

    #[inline(always)]
    fn letters(&self) -> Vec<u8> {
        self.tiles().iter().map(|t| t.letter).collect()
    }

    // Last tile bearing the letter, like taking from the right end of a rack.
    #[inline(always)]
    fn find_letter(&self, letter: u8) -> Option<tile::TileId> {
        self.tiles()
            .iter()
            .rev()
            .find(|t| t.letter == letter)
            .map(|t| t.id)
    }
}

pub struct Rack {
    tiles: Vec<tile::LetterTile>,
    // ticks a removal keeps the rack busy; 0 means instantaneous
    removal_ticks: u8,
    busy_ticks: u8,
}

impl Rack {
    pub fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(RACK_SIZE),
            removal_ticks: 0,
            busy_ticks: 0,
        }
    }

    pub fn with_removal_ticks(removal_ticks: u8) -> Self {
        Self {
            removal_ticks,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    // Advances the removal animation by one frame.
    pub fn tick(&mut self) {
        self.busy_ticks = self.busy_ticks.saturating_sub(1);
    }

    pub fn score_left(&self) -> i16 {
        self.tiles.iter().map(|t| t.points as i16).sum()
    }

    pub fn clear(&mut self) -> Vec<tile::LetterTile> {
        std::mem::take(&mut self.tiles)
    }
}

impl Default for Rack {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Rack {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            tiles: self.tiles.clone(),
            removal_ticks: self.removal_ticks,
            busy_ticks: self.busy_ticks,
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.tiles.clone_from(&source.tiles);
        self.removal_ticks = source.removal_ticks;
        self.busy_ticks = source.busy_ticks;
    }
}

impl RackAccess for Rack {
    #[inline(always)]
    fn tiles(&self) -> &[tile::LetterTile] {
        &self.tiles
    }

    fn remove(&mut self, tile: tile::TileId) -> Option<tile::LetterTile> {
        let pos = self.index_of(tile)?;
        self.busy_ticks = self.removal_ticks;
        Some(self.tiles.remove(pos))
    }

    fn insert(&mut self, tile: tile::LetterTile) {
        self.tiles.push(tile);
    }

    #[inline(always)]
    fn is_idle(&self) -> bool {
        self.busy_ticks == 0
    }
}
