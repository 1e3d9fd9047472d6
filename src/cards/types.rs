use serde::{Deserialize, Serialize};
use std::fmt;

/// Card id. Dense, `0..catalog.len()`.
pub type CardId = usize;

/// Rarity tiers, rarest first. The derived `Ord` is the tie-break order
/// for "rarest missing card".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RarityTier {
    Ultra,
    TripleStar,
    DoubleStar,
    Star,
    QuadDiamond,
    TripleDiamond,
    DoubleDiamond,
    Diamond,
}

impl RarityTier {
    /// Every tier, rarest first.
    pub const ALL: [RarityTier; 8] = [
        RarityTier::Ultra,
        RarityTier::TripleStar,
        RarityTier::DoubleStar,
        RarityTier::Star,
        RarityTier::QuadDiamond,
        RarityTier::TripleDiamond,
        RarityTier::DoubleDiamond,
        RarityTier::Diamond,
    ];

    /// Pack points needed to buy a card of this tier outright.
    pub fn price(&self) -> u64 {
        match self {
            RarityTier::Ultra => 2500,
            RarityTier::TripleStar => 1500,
            RarityTier::DoubleStar => 1250,
            RarityTier::Star => 400,
            RarityTier::QuadDiamond => 500,
            RarityTier::TripleDiamond => 150,
            RarityTier::DoubleDiamond => 70,
            RarityTier::Diamond => 35,
        }
    }

    /// Returns the symbol printed on the card.
    pub fn symbol(&self) -> &'static str {
        match self {
            RarityTier::Ultra => "♛",
            RarityTier::TripleStar => "☆☆☆",
            RarityTier::DoubleStar => "☆☆",
            RarityTier::Star => "☆",
            RarityTier::QuadDiamond => "♢♢♢♢",
            RarityTier::TripleDiamond => "♢♢♢",
            RarityTier::DoubleDiamond => "♢♢",
            RarityTier::Diamond => "♢",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Ultra => "ultra",
            RarityTier::TripleStar => "triple-star",
            RarityTier::DoubleStar => "double-star",
            RarityTier::Star => "star",
            RarityTier::QuadDiamond => "quad-diamond",
            RarityTier::TripleDiamond => "triple-diamond",
            RarityTier::DoubleDiamond => "double-diamond",
            RarityTier::Diamond => "diamond",
        }
    }

    /// Position in `ALL`, for tier-indexed arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name reserved for the shared pool in catalog files.
pub const SHARED_HOME: &str = "shared";

/// Where a card can be pulled from. Serialized as a bare string, with
/// `"shared"` standing for [`Home::Shared`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Home {
    /// Drawable from every collection's packs.
    Shared,
    /// Drawable only from the named collection's packs.
    Collection(String),
}

impl Home {
    pub fn collection(name: &str) -> Self {
        Home::Collection(name.to_string())
    }

    /// Whether a pack of `collection` can yield a card with this home.
    pub fn drawable_from(&self, collection: &str) -> bool {
        match self {
            Home::Shared => true,
            Home::Collection(name) => name == collection,
        }
    }
}

impl fmt::Display for Home {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Home::Shared => f.write_str(SHARED_HOME),
            Home::Collection(name) => f.write_str(name),
        }
    }
}

impl From<String> for Home {
    fn from(name: String) -> Self {
        if name == SHARED_HOME {
            Home::Shared
        } else {
            Home::Collection(name)
        }
    }
}

impl From<Home> for String {
    fn from(home: Home) -> Self {
        home.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rarity: RarityTier,
    pub home: Home,
}
