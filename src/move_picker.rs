// Copyright (C) 2020-2026 Andy Kurnia.

use super::candidate;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    // longest word, earliest in lexicon order among equals
    Longest,
    // uniform over the accepted candidates
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierRules {
    pub policy: SelectionPolicy,
    pub may_extend_prefix: bool,
}

static TIER_RULES: [TierRules; 4] = [
    TierRules {
        policy: SelectionPolicy::Longest,
        may_extend_prefix: false,
    },
    TierRules {
        policy: SelectionPolicy::Random,
        may_extend_prefix: false,
    },
    TierRules {
        policy: SelectionPolicy::Random,
        may_extend_prefix: true,
    },
    TierRules {
        policy: SelectionPolicy::Longest,
        may_extend_prefix: true,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn level(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn rules(self) -> &'static TierRules {
        &TIER_RULES[self.0 as usize]
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("tier must be 0 to {}, not {}", Self::MAX, level))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

impl SelectionPolicy {
    pub fn pick<'c, R: Rng + ?Sized>(
        self,
        candidates: &[&'c candidate::Candidate],
        rng: &mut R,
    ) -> Option<&'c candidate::Candidate> {
        match self {
            SelectionPolicy::Longest => {
                let mut best: Option<&candidate::Candidate> = None;
                for &c in candidates {
                    if best.is_none_or(|b| c.len() > b.len()) {
                        best = Some(c);
                    }
                }
                best
            }
            SelectionPolicy::Random => {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates[rng.random_range(0..candidates.len())])
                }
            }
        }
    }
}
