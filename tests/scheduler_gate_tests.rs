use regime_rotation::scheduler::SchedulerGate;

#[test]
fn every_fourth_tick_is_eligible() {
    let mut gate = SchedulerGate::new(4).unwrap();
    let eligible: Vec<bool> = (0..8).map(|_| gate.should_run()).collect();
    assert_eq!(
        eligible,
        vec![true, false, false, false, true, false, false, false]
    );
    assert_eq!(gate.tick_count(), 8);
}

#[test]
fn counter_persists_across_many_ticks() {
    let mut gate = SchedulerGate::new(3).unwrap();
    let eligible = (0..30).filter(|_| gate.should_run()).count();
    assert_eq!(eligible, 10);
}
