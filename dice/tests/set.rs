use dice::{DiceSet, DifficultyClass, Die, RollOptions, ScriptedSource, SeededSource, Value};

#[test]
fn two_constants_sum() {
    let rolled = DiceSet::new([Die::constant(10), Die::constant(5)]).roll(RollOptions::new());
    assert_eq!(rolled.value(), 15);
}

#[test]
fn all_debuff_sum_is_never_positive() {
    let src = SeededSource::from_seed(11);
    let set = DiceSet::new([Die::d6().as_debuff(), Die::constant(3).as_debuff()]);
    for _ in 0..200 {
        assert!(set.roll_with(RollOptions::new(), &src).value() < 0);
    }
}

#[test]
fn all_debuff_of_negative_constants_is_forced_negative() {
    // Debuffed negative constants sum to a positive total, which is flipped.
    let set = DiceSet::new([Die::constant(-2).as_debuff(), Die::constant(-3).as_debuff()]);
    let rolled = set.roll(RollOptions::new());
    assert_eq!(rolled.rolls()[0].value(), 2);
    assert_eq!(rolled.value(), -5);
}

#[test]
fn skill_check_against_another_roll() {
    let src = ScriptedSource::from_scripted(vec![11, 2, 13]);
    let ours = DiceSet::new([Die::d20(), Die::d4().with_source("Favorable Beginnings")])
        .roll_with(RollOptions::new(), &src);
    let theirs = Die::d20().roll_with(RollOptions::new(), &src);
    assert_eq!(ours.value(), 13);
    assert!(ours.check(&theirs));
    assert!(!theirs.check(&DifficultyClass::new(14)));
}

#[test]
fn composite_crit_short_circuits_check() {
    let src = ScriptedSource::from_scripted(vec![20, 1]);
    let set = DiceSet::new([Die::d20(), Die::d4().as_debuff()]);
    let rolled = set.roll_with(RollOptions::new().critical_hit(20), &src);
    assert!(rolled.is_critical_hit());
    assert!(rolled.check(&DifficultyClass::new(1000)));
}

#[test]
fn debuff_set_with_advantage() {
    let src = SeededSource::from_seed(8);
    let set = DiceSet::new([Die::d20().as_debuff(), Die::d4().with_source("Guidance").as_debuff()]);
    let rolled = set.roll_with(RollOptions::new().advantage(), &src);
    assert!(rolled.rolled_with_advantage());
    assert!(!rolled.rolled_with_disadvantage());
    assert!(rolled.value() < 0);
}

#[test]
fn reroll_reuses_members() {
    let set = DiceSet::new([Die::d20().with_source("Attack"), Die::constant(3)]);
    let first = set.roll(RollOptions::new());
    let second = first.reroll(RollOptions::new().disadvantage());
    assert_eq!(second.dice(), set);
    assert!(second.rolled_with_disadvantage());
    assert!(!first.rolled_with_disadvantage());
}
