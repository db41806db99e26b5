use regime_rotation::error::EngineError;
use regime_rotation::indicator::rolling_window::RollingObservationWindow;
use regime_rotation::model::signal::RegimeSignal;
use regime_rotation::strategy::percentile_regime::{PercentileRegimeClassifier, RegimeThresholds};

fn one_to_hundred() -> RollingObservationWindow {
    let mut window = RollingObservationWindow::new(100).unwrap();
    window.extend((1..=100).map(f64::from));
    window
}

fn classifier() -> PercentileRegimeClassifier {
    PercentileRegimeClassifier::new(RegimeThresholds::default()).unwrap()
}

#[test]
fn value_at_or_above_90th_percentile_is_short_bias() {
    assert_eq!(classifier().evaluate(&one_to_hundred(), 95.0), RegimeSignal::ShortBias);
}

#[test]
fn value_below_80th_percentile_is_long_bias() {
    assert_eq!(classifier().evaluate(&one_to_hundred(), 75.0), RegimeSignal::LongBias);
}

#[test]
fn value_between_80th_and_90th_percentile_holds() {
    // P80 = 80.2, P90 = 90.1
    assert_eq!(classifier().evaluate(&one_to_hundred(), 85.0), RegimeSignal::Hold);
    assert_eq!(classifier().evaluate(&one_to_hundred(), 81.0), RegimeSignal::Hold);
    assert_eq!(classifier().evaluate(&one_to_hundred(), 91.0), RegimeSignal::ShortBias);
}

#[test]
fn levels_come_from_one_snapshot() {
    let levels = classifier().levels(&one_to_hundred().snapshot()).unwrap();
    assert!((levels.short_bias - 90.1).abs() < 1e-9);
    assert!((levels.long_bias - 80.2).abs() < 1e-9);
    assert!((levels.exit_long - 10.9).abs() < 1e-9);
}

#[test]
fn classifier_abstains_until_window_is_ready() {
    let mut window = RollingObservationWindow::new(10).unwrap();
    window.extend([1.0, 2.0, 3.0]);
    assert_eq!(classifier().evaluate(&window, 100.0), RegimeSignal::Hold);
}

#[test]
fn exit_long_fires_only_when_its_threshold_exceeds_long_bias() {
    // With equal long/exit thresholds the long-bias branch takes precedence.
    let c = PercentileRegimeClassifier::new(RegimeThresholds {
        short_bias_pct: 90.0,
        long_bias_pct: 10.0,
        exit_long_pct: 10.0,
    })
    .unwrap();
    assert_eq!(c.evaluate(&one_to_hundred(), 5.0), RegimeSignal::LongBias);
    assert_eq!(c.evaluate(&one_to_hundred(), 50.0), RegimeSignal::Hold);
}

#[test]
fn out_of_order_thresholds_are_config_errors() {
    let bad = [
        RegimeThresholds {
            short_bias_pct: 80.0,
            long_bias_pct: 90.0,
            exit_long_pct: 10.0,
        },
        RegimeThresholds {
            short_bias_pct: 90.0,
            long_bias_pct: 5.0,
            exit_long_pct: 10.0,
        },
        RegimeThresholds {
            short_bias_pct: 101.0,
            long_bias_pct: 80.0,
            exit_long_pct: 10.0,
        },
        RegimeThresholds {
            short_bias_pct: f64::NAN,
            long_bias_pct: 80.0,
            exit_long_pct: 10.0,
        },
    ];
    for t in bad {
        assert!(matches!(
            PercentileRegimeClassifier::new(t),
            Err(EngineError::Config(_))
        ));
    }
}
