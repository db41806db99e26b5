use regime_rotation::error::EngineError;
use regime_rotation::indicator::rolling_window::RollingObservationWindow;

#[test]
/// Any C + k pushes leave exactly the last C values, oldest first.
fn window_keeps_last_capacity_values_in_push_order() {
    for capacity in 1..=8usize {
        for extra in 0..=10usize {
            let mut window = RollingObservationWindow::new(capacity).unwrap();
            let pushed: Vec<f64> = (0..capacity + extra).map(|i| i as f64 * 1.5).collect();
            window.extend(pushed.iter().copied());

            assert_eq!(window.len(), capacity);
            assert!(window.is_ready());
            assert_eq!(window.snapshot(), pushed[extra..].to_vec());
        }
    }
}

#[test]
fn window_not_ready_below_capacity() {
    let mut window = RollingObservationWindow::new(52).unwrap();
    for v in 0..51 {
        window.push(v as f64);
    }
    assert!(!window.is_ready());
    assert_eq!(window.len(), 51);
    window.push(51.0);
    assert!(window.is_ready());
}

#[test]
fn snapshot_is_detached_from_later_pushes() {
    let mut window = RollingObservationWindow::new(2).unwrap();
    window.extend([1.0, 2.0]);
    let snap = window.snapshot();
    window.push(3.0);
    assert_eq!(snap, vec![1.0, 2.0]);
    assert_eq!(window.snapshot(), vec![2.0, 3.0]);
}

#[test]
fn zero_capacity_fails_fast() {
    let err = RollingObservationWindow::new(0).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}
