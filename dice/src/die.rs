use std::sync::Arc;

use crate::rng::{global, RandomSource};
use crate::roll::{Roll, RollOptions};

/// Counts and faces above `i32::MAX` pin to it rather than wrapping negative.
pub(crate) fn to_total(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DieDef {
    count: u32,
    sides: u32,
    modifier: i32,
    lucky: bool,
    debuff: bool,
    source: Option<String>,
}

/// `count` dice of `sides` sides plus a flat modifier, e.g. `2d6+3`.
///
/// A `Die` is an immutable, cheaply cloned handle. Every [`Roll`] keeps a clone
/// of the die that produced it, so outcomes stay readable after the caller has
/// dropped or replaced the expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Die {
    def: Arc<DieDef>,
}

impl Die {
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            def: Arc::new(DieDef {
                count,
                sides,
                modifier: 0,
                lucky: false,
                debuff: false,
                source: None,
            }),
        }
    }

    /// A zero-dice expression whose whole value is `value`.
    pub fn constant(value: i32) -> Self {
        Self::new(0, 0).with_modifier(value)
    }

    pub fn d4() -> Self {
        Self::new(1, 4)
    }

    pub fn d6() -> Self {
        Self::new(1, 6)
    }

    pub fn d8() -> Self {
        Self::new(1, 8)
    }

    pub fn d10() -> Self {
        Self::new(1, 10)
    }

    pub fn d12() -> Self {
        Self::new(1, 12)
    }

    pub fn d20() -> Self {
        Self::new(1, 20)
    }

    pub fn d100() -> Self {
        Self::new(1, 100)
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        Arc::make_mut(&mut self.def).modifier = modifier;
        self
    }

    /// Label shown next to the dice when rendered, e.g. "Guidance".
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.def).source = Some(source.into());
        self
    }

    /// A natural 1 on any die is re-drawn once and the second draw kept.
    pub fn with_luck(mut self) -> Self {
        Arc::make_mut(&mut self.def).lucky = true;
        self
    }

    /// Negate the rolled total.
    pub fn as_debuff(mut self) -> Self {
        Arc::make_mut(&mut self.def).debuff = true;
        self
    }

    /// A fresh copy of this expression with its count, sides, modifier and
    /// flags but no source label. Chain builder calls to change it further.
    pub fn customize(&self) -> Self {
        Self {
            def: Arc::new(DieDef {
                source: None,
                ..(*self.def).clone()
            }),
        }
    }

    pub fn count(&self) -> u32 {
        self.def.count
    }

    pub fn sides(&self) -> u32 {
        self.def.sides
    }

    pub fn modifier(&self) -> i32 {
        self.def.modifier
    }

    pub fn is_lucky(&self) -> bool {
        self.def.lucky
    }

    pub fn is_debuff(&self) -> bool {
        self.def.debuff
    }

    pub fn source(&self) -> Option<&str> {
        self.def.source.as_deref()
    }

    /// No dice at all; the modifier is the entire value.
    pub fn is_constant(&self) -> bool {
        self.def.count == 0 && self.def.sides == 0
    }

    /// A bare `1d20`: the only shape that can crit or fumble.
    pub fn is_d20(&self) -> bool {
        self.def.count == 1 && self.def.sides == 20 && self.def.modifier == 0
    }

    /// Lowest unsigned total a non-lucky roll can produce.
    pub fn min(&self) -> i32 {
        let per_die = if self.def.sides == 0 { 0 } else { 1 };
        to_total(self.def.count)
            .saturating_mul(per_die)
            .saturating_add(self.def.modifier)
    }

    /// Highest unsigned total a roll can produce.
    pub fn max(&self) -> i32 {
        to_total(self.def.count)
            .saturating_mul(to_total(self.def.sides))
            .saturating_add(self.def.modifier)
    }

    /// Roll against the process-wide source.
    pub fn roll(&self, opts: RollOptions) -> Roll {
        self.roll_with(opts, global())
    }

    pub fn roll_with(&self, opts: RollOptions, rng: &dyn RandomSource) -> Roll {
        Roll::evaluate(self, opts, rng)
    }
}
