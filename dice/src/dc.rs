use serde::{Deserialize, Serialize};

use crate::Value;

/// The number a roll has to meet or beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DifficultyClass(i32);

impl DifficultyClass {
    pub fn new(target: i32) -> Self {
        Self(target)
    }
}

impl From<i32> for DifficultyClass {
    fn from(target: i32) -> Self {
        Self(target)
    }
}

impl Value for DifficultyClass {
    fn value(&self) -> i32 {
        self.0
    }

    fn is_critical_hit(&self) -> bool {
        false
    }

    fn is_critical_miss(&self) -> bool {
        false
    }

    /// Does `roll` pass this DC? A natural crit always passes and a fumble
    /// always fails, whatever the target.
    fn check(&self, roll: &dyn Value) -> bool {
        if roll.is_critical_hit() {
            return true;
        }
        if roll.is_critical_miss() {
            return false;
        }
        roll.value() >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::{Die, RollOptions};

    #[test]
    fn never_critical() {
        for target in [-20, -1, 0, 1, 20, 100] {
            let dc = DifficultyClass::new(target);
            assert!(!dc.is_critical_hit());
            assert!(!dc.is_critical_miss());
            assert_eq!(dc.value(), target);
        }
    }

    #[test]
    fn meets_or_beats() {
        let src = ScriptedSource::from_scripted(vec![12]);
        let roll = Die::d20().with_modifier(3).roll_with(RollOptions::new(), &src);
        assert!(DifficultyClass::new(15).check(&roll));
        assert!(!DifficultyClass::new(16).check(&roll));
    }

    #[test]
    fn crits_override_the_target() {
        let src = ScriptedSource::from_scripted(vec![20, 1]);
        let opts = RollOptions::new().allow_criticals();
        let crit = Die::d20().roll_with(opts, &src);
        let fumble = Die::d20().roll_with(opts, &src);
        assert!(DifficultyClass::new(99).check(&crit));
        assert!(!DifficultyClass::new(-99).check(&fumble));
    }

    #[test]
    fn renders_as_plain_number() {
        assert_eq!(DifficultyClass::new(17).to_string(), "17");
        assert_eq!(DifficultyClass::new(-3).to_string(), "-3");
    }
}
