// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u8);

// A physical letter tile. The owner is cleared once the tile becomes part of
// a registered word; an ownerless tile on the board can serve as an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterTile {
    pub id: TileId,
    pub letter: u8,
    pub points: i8,
    pub owner: Option<PlayerId>,
}

impl LetterTile {
    #[inline(always)]
    pub fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }
}

// Hands out tile identities. Ids are never reused within one source.
#[derive(Clone, Debug)]
pub struct TileIds(u32);

impl TileIds {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.0);
        self.0 += 1;
        id
    }

    pub fn make(&mut self, letter: u8, points: i8, owner: Option<PlayerId>) -> LetterTile {
        LetterTile {
            id: self.next_id(),
            letter,
            points,
            owner,
        }
    }
}

impl Default for TileIds {
    fn default() -> Self {
        Self::new()
    }
}
