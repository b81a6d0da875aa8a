//! Composite expressions: several dice summed together, such as an attack
//! roll plus a bless die minus a bane die.

use crate::die::Die;
use crate::rng::{global, RandomSource};
use crate::roll::{Roll, RollOptions};
use crate::Value;

/// An ordered sum of dice. Order only matters for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    pub fn new(dice: impl IntoIterator<Item = Die>) -> Self {
        Self {
            dice: dice.into_iter().collect(),
        }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// True when every member is a debuff. An empty set is not.
    pub fn is_debuff(&self) -> bool {
        !self.dice.is_empty() && self.dice.iter().all(Die::is_debuff)
    }

    pub fn is_constant(&self) -> bool {
        false
    }

    pub fn is_lucky(&self) -> bool {
        false
    }

    pub fn num_dice(&self) -> u32 {
        self.dice.first().map_or(0, Die::count)
    }

    pub fn num_sides(&self) -> u32 {
        self.dice.first().map_or(0, Die::sides)
    }

    pub fn modifier(&self) -> i32 {
        self.dice.first().map_or(0, Die::modifier)
    }

    pub fn source(&self) -> Option<&str> {
        self.dice.first().and_then(Die::source)
    }

    pub fn roll(&self, opts: RollOptions) -> RollSet {
        self.roll_with(opts, global())
    }

    /// `opts` only shape the first member; the rest are plain single rolls.
    pub fn roll_with(&self, opts: RollOptions, rng: &dyn RandomSource) -> RollSet {
        let rolls = self
            .dice
            .iter()
            .enumerate()
            .map(|(i, die)| {
                let opts = if i == 0 { opts } else { RollOptions::default() };
                die.roll_with(opts, rng)
            })
            .collect();
        RollSet { rolls }
    }
}

impl From<Die> for DiceSet {
    fn from(die: Die) -> Self {
        Self { dice: vec![die] }
    }
}

impl FromIterator<Die> for DiceSet {
    fn from_iter<I: IntoIterator<Item = Die>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One roll per member of a [`DiceSet`].
///
/// An empty set totals 0 and is never critical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollSet {
    rolls: Vec<Roll>,
}

impl RollSet {
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    /// The dice that produced these rolls, in order.
    pub fn dice(&self) -> DiceSet {
        self.rolls.iter().map(|r| r.die().clone()).collect()
    }

    /// Roll every member again; `opts` shape the first one only.
    pub fn reroll_with(&self, opts: RollOptions, rng: &dyn RandomSource) -> RollSet {
        self.dice().roll_with(opts, rng)
    }

    pub fn reroll(&self, opts: RollOptions) -> RollSet {
        self.reroll_with(opts, global())
    }

    pub fn rolled_with_advantage(&self) -> bool {
        self.rolls.first().is_some_and(Roll::rolled_with_advantage)
    }

    pub fn rolled_with_disadvantage(&self) -> bool {
        self.rolls.first().is_some_and(Roll::rolled_with_disadvantage)
    }

    fn all_debuffs(&self) -> bool {
        !self.rolls.is_empty() && self.rolls.iter().all(|r| r.die().is_debuff())
    }
}

impl Value for RollSet {
    fn value(&self) -> i32 {
        let total = self
            .rolls
            .iter()
            .fold(0i32, |acc, r| acc.saturating_add(r.value()));
        // A set made only of debuffs always reads as a penalty.
        if self.all_debuffs() && total > 0 {
            -total
        } else {
            total
        }
    }

    fn is_critical_hit(&self) -> bool {
        self.rolls.first().is_some_and(Roll::is_critical_hit)
    }

    fn is_critical_miss(&self) -> bool {
        self.rolls.first().is_some_and(Roll::is_critical_miss)
    }
}
