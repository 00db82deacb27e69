// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};
use std::collections::HashSet;

pub static COMMON_PREFIXES: &[&str] = &[
    "UN", "RE", "IN", "IM", "DE", "EN", "EM", "UP", "DIS", "MIS", "NON", "PRE", "OUT", "SUB",
    "OVER", "ANTI", "FORE", "INTER", "SUPER", "UNDER",
];

// Words and prefixes are kept as tile codes. The word list keeps load order,
// which is also the order candidate search walks it in.
pub struct Lexicon {
    words: Vec<Box<[u8]>>,
    word_set: HashSet<Box<[u8]>>,
    prefixes: Vec<Box<[u8]>>,
}

fn parse_entry(alphabet: &alphabet::Alphabet<'_>, s: &str) -> error::Returns<Box<[u8]>> {
    match alphabet.parse_word(s) {
        Some(v) => Ok(v.into_boxed_slice()),
        None => {
            return_error!(format!("invalid letter in {:?}", s));
        }
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            word_set: HashSet::new(),
            prefixes: Vec::new(),
        }
    }

    // one word per line, blank lines ignored, repeats kept once.
    pub fn from_text(alphabet: &alphabet::Alphabet<'_>, giant_string: &str) -> error::Returns<Self> {
        let mut lexicon = Self::new();
        for s in giant_string.lines() {
            let s = s.trim();
            if s.is_empty() {
                continue;
            }
            lexicon.add_word(parse_entry(alphabet, s)?);
        }
        lexicon.set_prefixes(alphabet, COMMON_PREFIXES.iter().copied())?;
        Ok(lexicon)
    }

    pub fn from_words<'s, II: IntoIterator<Item = &'s str>>(
        alphabet: &alphabet::Alphabet<'_>,
        words: II,
    ) -> error::Returns<Self> {
        let mut lexicon = Self::new();
        for s in words {
            lexicon.add_word(parse_entry(alphabet, s)?);
        }
        lexicon.set_prefixes(alphabet, COMMON_PREFIXES.iter().copied())?;
        Ok(lexicon)
    }

    fn add_word(&mut self, word: Box<[u8]>) {
        if !word.is_empty() && self.word_set.insert(word.clone()) {
            self.words.push(word);
        }
    }

    pub fn set_prefixes<'s, II: IntoIterator<Item = &'s str>>(
        &mut self,
        alphabet: &alphabet::Alphabet<'_>,
        prefixes: II,
    ) -> error::Returns<()> {
        let mut v = Vec::new();
        for s in prefixes {
            let s = s.trim();
            if !s.is_empty() {
                v.push(parse_entry(alphabet, s)?);
            }
        }
        self.prefixes = v;
        Ok(())
    }

    #[inline(always)]
    pub fn exists(&self, word: &[u8]) -> bool {
        self.word_set.contains(word)
    }

    #[inline(always)]
    pub fn words(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.words.iter().map(|w| &w[..])
    }

    #[inline(always)]
    pub fn prefixes(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.prefixes.iter().map(|w| &w[..])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}
