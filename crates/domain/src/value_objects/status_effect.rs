//! Status effects and the per-player effect set
//!
//! Effects are orthogonal flags: a player can be charmed, in love and the
//! sheriff at the same time. They are stored as a bitset and serialized as a
//! list of effect names so the wire format stays readable.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A flag attached to a player independently of their main role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusEffect {
    /// The Elder survived one wolf attack and has no extra life left
    ElderExtraLifeLost,
    /// Infected by the Accursed Wolf-Father; now plays for the wolves
    Infected,
    /// Charmed by the Piper
    Charmed,
    /// Linked by Cupid
    InLove,
    /// Holds the sheriff title (double vote)
    Sheriff,
    HealPotionUsed,
    PoisonPotionUsed,
    /// The Accursed Wolf-Father already used his one infection
    InfectionUsed,
    /// Wounded by the Knight's rusty sword; dies at the next dawn
    RustySwordWound,
    HunterShotSpent,
}

impl StatusEffect {
    pub const ALL: [StatusEffect; 10] = [
        StatusEffect::ElderExtraLifeLost,
        StatusEffect::Infected,
        StatusEffect::Charmed,
        StatusEffect::InLove,
        StatusEffect::Sheriff,
        StatusEffect::HealPotionUsed,
        StatusEffect::PoisonPotionUsed,
        StatusEffect::InfectionUsed,
        StatusEffect::RustySwordWound,
        StatusEffect::HunterShotSpent,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusEffect::ElderExtraLifeLost => "extra life lost",
            StatusEffect::Infected => "infected",
            StatusEffect::Charmed => "charmed",
            StatusEffect::InLove => "in love",
            StatusEffect::Sheriff => "sheriff",
            StatusEffect::HealPotionUsed => "healing potion used",
            StatusEffect::PoisonPotionUsed => "poison potion used",
            StatusEffect::InfectionUsed => "infection used",
            StatusEffect::RustySwordWound => "rusty sword wound",
            StatusEffect::HunterShotSpent => "hunter shot spent",
        };
        write!(f, "{}", label)
    }
}

/// Set of status effects carried by one player.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusEffects(u16);

impl StatusEffects {
    pub fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub fn contains(&self, effect: StatusEffect) -> bool {
        self.0 & effect.bit() != 0
    }

    /// Adds the effect. Returns false if it was already present.
    pub fn insert(&mut self, effect: StatusEffect) -> bool {
        let present = self.contains(effect);
        self.0 |= effect.bit();
        !present
    }

    /// Removes the effect. Returns false if it was not present.
    pub fn remove(&mut self, effect: StatusEffect) -> bool {
        let present = self.contains(effect);
        self.0 &= !effect.bit();
        present
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates effects in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = StatusEffect> + '_ {
        StatusEffect::ALL
            .into_iter()
            .filter(move |effect| self.contains(*effect))
    }
}

impl fmt::Debug for StatusEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<I: IntoIterator<Item = StatusEffect>>(iter: I) -> Self {
        let mut set = StatusEffects::empty();
        for effect in iter {
            set.insert(effect);
        }
        set
    }
}

impl Serialize for StatusEffects {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for StatusEffects {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let effects = Vec::<StatusEffect>::deserialize(deserializer)?;
        Ok(effects.into_iter().collect())
    }
}
