use crate::die::{to_total, Die};
use crate::rng::{global, RandomSource};
use crate::{AdMode, Value, CRITICAL_HIT, CRITICAL_MISS};

/// Critical thresholds carried by a roll. Detection is off unless a threshold
/// was supplied or criticals were explicitly allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criticals {
    pub enabled: bool,
    pub hit: i32,
    pub miss: i32,
}

impl Default for Criticals {
    fn default() -> Self {
        Self {
            enabled: false,
            hit: CRITICAL_HIT,
            miss: CRITICAL_MISS,
        }
    }
}

/// One adjustment to how a die is rolled. Options are applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOption {
    Advantage,
    Disadvantage,
    /// Crit at or above this natural d20 result; enables crit detection.
    CriticalHit(i32),
    /// Fumble at or below this natural d20 result; enables crit detection.
    CriticalMiss(i32),
    /// Enable crit detection with the current thresholds.
    AllowCriticals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollOptions {
    mode: AdMode,
    crit: Criticals,
}

impl RollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_criticals(crit: Criticals) -> Self {
        Self {
            mode: AdMode::Normal,
            crit,
        }
    }

    pub fn apply(mut self, opt: RollOption) -> Self {
        match opt {
            RollOption::Advantage => self.shift(AdMode::Advantage),
            RollOption::Disadvantage => self.shift(AdMode::Disadvantage),
            RollOption::CriticalHit(v) => {
                self.crit.enabled = true;
                self.crit.hit = v;
            }
            RollOption::CriticalMiss(v) => {
                self.crit.enabled = true;
                self.crit.miss = v;
            }
            RollOption::AllowCriticals => self.crit.enabled = true,
        }
        self
    }

    fn shift(&mut self, towards: AdMode) {
        let next = self.mode.combine(towards);
        tracing::trace!(from = ?self.mode, to = ?next, "roll mode");
        self.mode = next;
    }

    pub fn advantage(self) -> Self {
        self.apply(RollOption::Advantage)
    }

    pub fn disadvantage(self) -> Self {
        self.apply(RollOption::Disadvantage)
    }

    pub fn critical_hit(self, threshold: i32) -> Self {
        self.apply(RollOption::CriticalHit(threshold))
    }

    pub fn critical_miss(self, threshold: i32) -> Self {
        self.apply(RollOption::CriticalMiss(threshold))
    }

    pub fn allow_criticals(self) -> Self {
        self.apply(RollOption::AllowCriticals)
    }

    pub fn mode(&self) -> AdMode {
        self.mode
    }

    pub fn criticals(&self) -> Criticals {
        self.crit
    }
}

impl FromIterator<RollOption> for RollOptions {
    fn from_iter<I: IntoIterator<Item = RollOption>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::apply)
    }
}

fn signed(die: &Die, raw: i32) -> i32 {
    if die.is_debuff() { raw.saturating_neg() } else { raw }
}

fn crit_hit(die: &Die, crit: Criticals, raw: i32) -> bool {
    crit.enabled && die.is_d20() && raw >= crit.hit
}

fn crit_miss(die: &Die, crit: Criticals, raw: i32) -> bool {
    crit.enabled && die.is_d20() && raw <= crit.miss
}

/// One physical throw of every die in an expression, plus its modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRoll {
    raw: i32,
    value: i32,
    crit: Criticals,
    die: Die,
}

impl SubRoll {
    pub(crate) fn draw(die: &Die, crit: Criticals, rng: &dyn RandomSource) -> Self {
        let mut raw = die.modifier();
        for _ in 0..die.count() {
            let mut face = rng.face(die.sides());
            if face == 1 && die.is_lucky() {
                let again = rng.face(die.sides());
                tracing::debug!(sides = die.sides(), again, "lucky re-draw of a natural 1");
                face = again;
            }
            tracing::trace!(sides = die.sides(), face, "die drawn");
            raw = raw.saturating_add(to_total(face));
        }
        Self {
            raw,
            // The debuff sign is applied here and nowhere else.
            value: signed(die, raw),
            crit,
            die: die.clone(),
        }
    }

    /// Total before the debuff sign is applied.
    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn die(&self) -> &Die {
        &self.die
    }

    pub fn criticals(&self) -> Criticals {
        self.crit
    }

    /// A fresh single throw of the same die, keeping this throw's crit settings
    /// and layering `opts` on top.
    pub fn reroll_with(&self, opts: &[RollOption], rng: &dyn RandomSource) -> SubRoll {
        let opts = opts
            .iter()
            .fold(RollOptions::with_criticals(self.crit), |o, opt| o.apply(*opt));
        let mut fresh = Roll::evaluate(&self.die, opts, rng);
        fresh.rolls.swap_remove(0)
    }

    pub fn reroll(&self, opts: &[RollOption]) -> SubRoll {
        self.reroll_with(opts, global())
    }
}

impl Value for SubRoll {
    fn value(&self) -> i32 {
        self.value
    }

    fn is_critical_hit(&self) -> bool {
        crit_hit(&self.die, self.crit, self.raw)
    }

    fn is_critical_miss(&self) -> bool {
        crit_miss(&self.die, self.crit, self.raw)
    }
}

/// The outcome of rolling a [`Die`] once, with or without (dis)advantage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    kind: AdMode,
    rolls: Vec<SubRoll>,
    raw: i32,
    crit: Criticals,
    die: Die,
}

impl Roll {
    /// Throw `die` once, or twice under (dis)advantage. The kept throw is the
    /// one with the larger raw total for advantage and the smaller for
    /// disadvantage, so on a debuff die advantage keeps the bigger penalty.
    pub fn evaluate(die: &Die, opts: RollOptions, rng: &dyn RandomSource) -> Self {
        let crit = opts.criticals();
        let kind = opts.mode();
        let (rolls, raw) = match kind {
            AdMode::Normal => {
                let only = SubRoll::draw(die, crit, rng);
                let raw = only.raw;
                (vec![only], raw)
            }
            AdMode::Advantage | AdMode::Disadvantage => {
                let a = SubRoll::draw(die, crit, rng);
                let b = SubRoll::draw(die, crit, rng);
                let raw = if kind == AdMode::Advantage {
                    a.raw.max(b.raw)
                } else {
                    a.raw.min(b.raw)
                };
                (vec![a, b], raw)
            }
        };
        let roll = Self {
            kind,
            rolls,
            raw,
            crit,
            die: die.clone(),
        };
        tracing::debug!(
            die = %roll.die,
            mode = ?roll.kind,
            value = roll.value(),
            crit = roll.is_critical_hit(),
            fumble = roll.is_critical_miss(),
            "rolled"
        );
        roll
    }

    /// Roll the same die again from scratch; `self` is left as it was.
    pub fn reroll_with(&self, opts: RollOptions, rng: &dyn RandomSource) -> Roll {
        Roll::evaluate(&self.die, opts, rng)
    }

    pub fn reroll(&self, opts: RollOptions) -> Roll {
        self.reroll_with(opts, global())
    }

    /// One throw for a normal roll, two for (dis)advantage.
    pub fn all_rolls(&self) -> &[SubRoll] {
        &self.rolls
    }

    pub fn kind(&self) -> AdMode {
        self.kind
    }

    pub fn rolled_with_advantage(&self) -> bool {
        self.kind == AdMode::Advantage
    }

    pub fn rolled_with_disadvantage(&self) -> bool {
        self.kind == AdMode::Disadvantage
    }

    pub fn die(&self) -> &Die {
        &self.die
    }

    /// Kept total before the debuff sign is applied.
    pub fn raw(&self) -> i32 {
        self.raw
    }

    pub fn criticals(&self) -> Criticals {
        self.crit
    }
}

impl Value for Roll {
    fn value(&self) -> i32 {
        signed(&self.die, self.raw)
    }

    fn is_critical_hit(&self) -> bool {
        crit_hit(&self.die, self.crit, self.raw)
    }

    fn is_critical_miss(&self) -> bool {
        crit_miss(&self.die, self.crit, self.raw)
    }
}
