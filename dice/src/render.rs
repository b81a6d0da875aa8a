//! Human-readable text for expressions and outcomes.
//!
//! Expressions render as notation that [`Die::parse`] reads back to the same
//! text: `2d6+3 (Source)`, `-1d4`, `5`. Outcomes render as
//! `<magnitude> (<details>) = <signed value>`.

use std::fmt::{self, Display, Write};

use crate::dc::DifficultyClass;
use crate::die::Die;
use crate::roll::{Roll, SubRoll};
use crate::set::{DiceSet, RollSet};
use crate::{AdMode, Value};

/// `XdY±Z`, or just the modifier for a constant (`0` when everything is zero).
fn write_notation(out: &mut impl Write, die: &Die) -> fmt::Result {
    let modifier = die.modifier();
    if die.is_constant() {
        return write!(out, "{modifier}");
    }
    write!(out, "{}d{}", die.count(), die.sides())?;
    match modifier {
        0 => Ok(()),
        m if m < 0 => write!(out, "-{}", m.unsigned_abs()),
        m => write!(out, "+{m}"),
    }
}

fn write_body(out: &mut impl Write, die: &Die) -> fmt::Result {
    write_notation(out, die)?;
    if let Some(source) = die.source() {
        write!(out, " ({source})")?;
    }
    Ok(())
}

/// Everything but the trailing `= value`.
fn write_summary(out: &mut impl Write, outcome: &dyn Value, die: &Die, kind: AdMode) -> fmt::Result {
    write!(out, "{}", outcome.value().unsigned_abs())?;
    if outcome.is_critical_hit() {
        return out.write_str(" (Critical!)");
    }
    if outcome.is_critical_miss() {
        return out.write_str(" (Miss!)");
    }
    if die.is_constant() {
        if let Some(source) = die.source() {
            write!(out, " ({source})")?;
        }
        return Ok(());
    }
    out.write_str(" (")?;
    write_notation(out, die)?;
    if let Some(source) = die.source() {
        write!(out, ", {source}")?;
    }
    match kind {
        AdMode::Advantage => out.write_str(", Advantage")?,
        AdMode::Disadvantage => out.write_str(", Disadvantage")?,
        AdMode::Normal => {}
    }
    out.write_str(")")
}

fn write_outcome(f: &mut fmt::Formatter<'_>, outcome: &dyn Value, die: &Die, kind: AdMode) -> fmt::Result {
    let value = outcome.value();
    if value < 0 {
        f.write_str("-")?;
    }
    write_summary(f, outcome, die, kind)?;
    write!(f, " = {value}")
}

impl Die {
    /// Notation and source without the leading debuff sign.
    pub fn body(&self) -> String {
        let mut out = String::new();
        let _ = write_body(&mut out, self);
        out
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_debuff() {
            f.write_str("-")?;
        }
        write_body(f, self)
    }
}

impl Roll {
    /// The rendered outcome without its final `= value`.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = write_summary(&mut out, self, self.die(), self.kind());
        out
    }
}

impl Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outcome(f, self, self.die(), self.kind())
    }
}

impl SubRoll {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = write_summary(&mut out, self, self.die(), AdMode::Normal);
        out
    }
}

impl Display for SubRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outcome(f, self, self.die(), AdMode::Normal)
    }
}

impl Display for DiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.dice().iter().enumerate() {
            match (i, die.is_debuff()) {
                (0, true) => f.write_str("-")?,
                (0, false) => {}
                (_, true) => f.write_str(" - ")?,
                (_, false) => f.write_str(" + ")?,
            }
            write_body(f, die)?;
        }
        Ok(())
    }
}

impl RollSet {
    /// Member summaries joined by their signs, without the final total.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (i, roll) in self.rolls().iter().enumerate() {
            if i == 0 {
                if roll.die().is_debuff() {
                    out.push('-');
                }
            } else if roll.value() < 0 {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            out.push_str(&roll.summary());
        }
        out
    }
}

impl Display for RollSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.summary(), self.value())
    }
}

impl Display for DifficultyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
