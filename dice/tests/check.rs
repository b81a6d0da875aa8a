use dice::{DiceSet, DifficultyClass, Die, RollOptions, SeededSource, Value};

#[test]
fn deterministic_check_total_consistent() {
    let src = SeededSource::from_seed(123);
    let dc = DifficultyClass::new(13);
    let rolled = DiceSet::new([Die::d20(), Die::constant(2)]).roll_with(RollOptions::new(), &src);
    assert_eq!(dc.check(&rolled), rolled.value() >= 13);
    assert_eq!(rolled.check(&dc), dc.check(&rolled));
}

#[test]
fn crit_flags_and_pass_logic_agree() {
    let src = SeededSource::from_seed(777);
    let dc = DifficultyClass::new(15);
    let opts = RollOptions::new().allow_criticals();
    for _ in 0..500 {
        let roll = Die::d20().roll_with(opts, &src);
        assert_eq!(roll.is_critical_hit(), roll.value() == 20);
        assert_eq!(roll.is_critical_miss(), roll.value() == 1);
        let expected = roll.is_critical_hit() || (!roll.is_critical_miss() && roll.value() >= 15);
        assert_eq!(dc.check(&roll), expected);
    }
}

#[test]
fn same_seed_same_outcomes() {
    let a = SeededSource::from_seed(2025);
    let b = SeededSource::from_seed(2025);
    let die = Die::parse("4d6+1");
    for _ in 0..50 {
        let x = die.roll_with(RollOptions::new().advantage(), &a);
        let y = die.roll_with(RollOptions::new().advantage(), &b);
        assert_eq!(x, y);
    }
}
