use regime_rotation::model::decision::ReallocationAction;
use regime_rotation::model::instrument::InstrumentQuote;
use regime_rotation::strategy::momentum_rank::{MomentumRanker, MomentumRanking};
use regime_rotation::strategy::reallocation::ReallocationPolicy;

const IDS: [&str; 4] = ["UPRO", "TQQQ", "URTY", "UDOW"];

/// Ranking whose ratios are exactly `ratios` (lookback price 1.0 everywhere).
fn ranking(ratios: [f64; 4]) -> MomentumRanking {
    let quotes: Vec<InstrumentQuote> = IDS
        .iter()
        .zip(ratios)
        .map(|(id, ratio)| InstrumentQuote::new(*id, ratio, Some(1.0), false))
        .collect();
    MomentumRanker.rank(&quotes).unwrap()
}

fn policy() -> ReallocationPolicy {
    ReallocationPolicy::new(0.85, 0.99).unwrap()
}

#[test]
fn leader_becomes_target_and_is_bought_from_cash() {
    let decision = policy().decide(&ranking([1.2, 0.9, 1.5, 1.1]), &[false; 4]);
    assert_eq!(decision.target.as_deref(), Some("URTY"));
    assert_eq!(decision.liquidations().count(), 0);
    let buys: Vec<_> = decision.buys().collect();
    assert_eq!(buys.len(), 1);
    assert_eq!(buys[0].0, "URTY");
    assert!((buys[0].1 - 0.99).abs() < f64::EPSILON);
}

#[test]
fn rotation_liquidates_previous_holding_before_buying() {
    let decision = policy().decide(&ranking([1.2, 0.9, 1.5, 1.1]), &[false, true, false, false]);
    assert_eq!(decision.instructions.len(), 2);
    assert_eq!(decision.instructions[0].instrument_id, "TQQQ");
    assert_eq!(decision.instructions[0].action, ReallocationAction::Liquidate);
    assert_eq!(decision.instructions[1].instrument_id, "URTY");
    assert!(matches!(
        decision.instructions[1].action,
        ReallocationAction::Buy { .. }
    ));
}

#[test]
fn below_participation_threshold_liquidates_exactly_one() {
    let decision = policy().decide(&ranking([0.8, 0.7, 0.75, 0.6]), &[false, true, true, false]);
    assert_eq!(decision.target, None);
    assert_eq!(decision.liquidations().collect::<Vec<_>>(), vec!["TQQQ"]);
    assert_eq!(decision.buys().count(), 0);
}

#[test]
fn below_threshold_and_flat_does_nothing() {
    let decision = policy().decide(&ranking([0.8, 0.7, 0.75, 0.6]), &[false; 4]);
    assert!(decision.is_empty());
}

#[test]
fn threshold_is_inclusive_for_participation() {
    let decision = policy().decide(&ranking([0.85, 0.7, 0.75, 0.6]), &[false; 4]);
    assert_eq!(decision.target.as_deref(), Some("UPRO"));
    assert_eq!(decision.buys().count(), 1);
}

#[test]
fn already_holding_target_is_idempotent() {
    let decision = policy().decide(&ranking([1.2, 0.9, 1.5, 1.1]), &[false, false, true, false]);
    assert_eq!(decision.target.as_deref(), Some("URTY"));
    assert!(decision.is_empty());
}

#[test]
fn at_most_one_liquidation_even_with_several_holdings() {
    let decision = policy().decide(&ranking([1.2, 0.9, 1.5, 1.1]), &[true, true, false, true]);
    assert_eq!(decision.liquidations().collect::<Vec<_>>(), vec!["UPRO"]);
    assert_eq!(decision.buys().count(), 1);
}

#[test]
fn invalid_parameters_rejected() {
    assert!(ReallocationPolicy::new(0.0, 0.99).is_err());
    assert!(ReallocationPolicy::new(f64::INFINITY, 0.99).is_err());
    assert!(ReallocationPolicy::new(0.85, 0.0).is_err());
    assert!(ReallocationPolicy::new(0.85, 1.5).is_err());
}
