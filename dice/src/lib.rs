use serde::{Deserialize, Serialize};

pub mod api;
pub mod content;
pub mod dc;
pub mod die;
pub mod logging;
pub mod parse;
mod render;
pub mod rng;
pub mod roll;
pub mod set;
pub mod util;

pub use dc::DifficultyClass;
pub use die::Die;
pub use parse::ParseError;
pub use rng::{global, RandomSource, ScriptedSource, SeededSource};
pub use roll::{Roll, RollOption, RollOptions, SubRoll};
pub use set::{DiceSet, RollSet};

/// Natural result at or above which a canonical d20 counts as a critical hit.
pub const CRITICAL_HIT: i32 = 20;
/// Natural result at or below which a canonical d20 counts as a critical miss.
pub const CRITICAL_MISS: i32 = 1;

/// How many times a die expression is physically rolled and which result is kept.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AdMode {
    /// Fold one more (dis)advantage source into the current mode.
    /// Opposites cancel back to `Normal`; repeating a source is idempotent.
    pub fn combine(self, other: AdMode) -> AdMode {
        use AdMode::*;
        match (self, other) {
            (Disadvantage, Advantage) | (Advantage, Disadvantage) => Normal,
            (Normal, x) => x,
            (x, Normal) => x,
            (Advantage, Advantage) => Advantage,
            (Disadvantage, Disadvantage) => Disadvantage,
        }
    }
}

/// Anything that yields a signed total and can be checked against another value:
/// roll outcomes, composite outcomes and difficulty classes.
pub trait Value {
    fn value(&self) -> i32;
    fn is_critical_hit(&self) -> bool;
    fn is_critical_miss(&self) -> bool;

    /// Meets-or-beats check. The receiver's own critical status wins outright;
    /// the target's critical status is ignored.
    fn check(&self, other: &dyn Value) -> bool {
        if self.is_critical_hit() {
            return true;
        }
        if self.is_critical_miss() {
            return false;
        }
        self.value() >= other.value()
    }
}
