use dice::{DiceSet, DifficultyClass, Die, RollOptions, ScriptedSource};

#[test]
fn expression_rendering() {
    let set = DiceSet::new([
        Die::d20(),
        Die::parse("1d20+5"),
        Die::constant(-1).with_source("Strength Modifier"),
        Die::parse("1d4").with_source("Guidance"),
        Die::parse("1d8").with_source("Debuff").as_debuff(),
    ]);
    insta::assert_snapshot!(
        set.to_string(),
        @"1d20 + 1d20+5 + -1 (Strength Modifier) + 1d4 (Guidance) - 1d8 (Debuff)"
    );
    insta::assert_snapshot!(DifficultyClass::new(17).to_string(), @"17");
}

#[test]
fn leading_debuff_in_a_set() {
    let set = DiceSet::new([Die::d20().as_debuff(), Die::d4().with_source("Guidance").as_debuff()]);
    insta::assert_snapshot!(set.to_string(), @"-1d20 - 1d4 (Guidance)");
}

#[test]
fn outcome_rendering() {
    let src = ScriptedSource::from_scripted(vec![20, 1, 9, 14, 3]);
    let crits = RollOptions::new().allow_criticals();

    let crit = Die::d20().roll_with(crits, &src);
    insta::assert_snapshot!(crit.to_string(), @"20 (Critical!) = 20");

    let fumble = Die::d20().roll_with(crits, &src);
    insta::assert_snapshot!(fumble.to_string(), @"1 (Miss!) = 1");

    let disadvantaged = Die::d20()
        .with_modifier(2)
        .with_source("Stealth")
        .roll_with(RollOptions::new().disadvantage(), &src);
    insta::assert_snapshot!(disadvantaged.to_string(), @"11 (1d20+2, Stealth, Disadvantage) = 11");

    let penalty = Die::d4().as_debuff().roll_with(RollOptions::new(), &src);
    insta::assert_snapshot!(penalty.to_string(), @"-3 (1d4) = -3");
    insta::assert_snapshot!(penalty.summary(), @"3 (1d4)");
}

#[test]
fn composite_outcome_rendering() {
    let src = ScriptedSource::from_scripted(vec![12, 3, 2]);
    let set = DiceSet::new([
        Die::d20(),
        Die::constant(4).with_source("Proficiency"),
        Die::d4().with_source("Bless"),
        Die::d6().with_source("Bane").as_debuff(),
    ]);
    let rolled = set.roll_with(RollOptions::new(), &src);
    insta::assert_snapshot!(
        rolled.to_string(),
        @"12 (1d20) + 4 (Proficiency) + 3 (1d4, Bless) - 2 (1d6, Bane) = 17"
    );
}

#[test]
fn all_debuff_composite_rendering() {
    let src = ScriptedSource::from_scripted(vec![5, 2]);
    let set = DiceSet::new([Die::d8().as_debuff(), Die::d4().as_debuff()]);
    let rolled = set.roll_with(RollOptions::new(), &src);
    insta::assert_snapshot!(rolled.to_string(), @"-5 (1d8) - 2 (1d4) = -7");
}
