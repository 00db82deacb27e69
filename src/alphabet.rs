// Copyright (C) 2020-2026 Andy Kurnia.

// Tiles are numbered from 1. Tile 0 is reserved so that a zeroed tally slot
// or a zeroed board byte never aliases a letter.

pub struct Tile<'a> {
    label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    // includes the reserved tile 0
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    #[inline(always)]
    fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    #[inline(always)]
    pub fn label(&self, idx: u8) -> Option<&'a str> {
        if idx == 0 || idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        if idx >= self.len() {
            0
        } else {
            self.get(idx).score
        }
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    // case-insensitive, single-character labels only
    pub fn tile_of(&self, c: char) -> Option<u8> {
        let c = c.to_ascii_uppercase();
        (1..self.len()).find(|&tile| {
            let mut chars = self.get(tile).label.chars();
            chars.next() == Some(c) && chars.next().is_none()
        })
    }

    pub fn parse_word(&self, s: &str) -> Option<Vec<u8>> {
        s.chars().map(|c| self.tile_of(c)).collect()
    }

    pub fn fmt_word(&self, tiles: &[u8]) -> String {
        tiles
            .iter()
            .map(|&tile| self.label(tile).unwrap_or("?"))
            .collect()
    }
}

static ENGLISH_TILES: &[Tile] = &[
    Tile { label: "", freq: 0, score: 0 },
    Tile { label: "A", freq: 9, score: 1 },
    Tile { label: "B", freq: 2, score: 3 },
    Tile { label: "C", freq: 2, score: 3 },
    Tile { label: "D", freq: 4, score: 2 },
    Tile { label: "E", freq: 12, score: 1 },
    Tile { label: "F", freq: 2, score: 4 },
    Tile { label: "G", freq: 3, score: 2 },
    Tile { label: "H", freq: 2, score: 4 },
    Tile { label: "I", freq: 9, score: 1 },
    Tile { label: "J", freq: 1, score: 8 },
    Tile { label: "K", freq: 1, score: 5 },
    Tile { label: "L", freq: 4, score: 1 },
    Tile { label: "M", freq: 2, score: 3 },
    Tile { label: "N", freq: 6, score: 1 },
    Tile { label: "O", freq: 8, score: 1 },
    Tile { label: "P", freq: 2, score: 3 },
    Tile { label: "Q", freq: 1, score: 10 },
    Tile { label: "R", freq: 6, score: 1 },
    Tile { label: "S", freq: 4, score: 1 },
    Tile { label: "T", freq: 6, score: 1 },
    Tile { label: "U", freq: 4, score: 1 },
    Tile { label: "V", freq: 2, score: 4 },
    Tile { label: "W", freq: 2, score: 4 },
    Tile { label: "X", freq: 1, score: 8 },
    Tile { label: "Y", freq: 2, score: 4 },
    Tile { label: "Z", freq: 1, score: 10 },
];

pub fn make_english_alphabet<'a>() -> Alphabet<'a> {
    Alphabet::Static(StaticAlphabet {
        tiles: ENGLISH_TILES,
        num_tiles: ENGLISH_TILES.iter().map(|tile| tile.freq as u16).sum(),
    })
}
