use duffing_core::duffing::conservative_energy;
use duffing_core::strobe::{strobe_stride, stroboscopic_section};
use duffing_core::{
    integrate, integrate_duffing, integrate_with, DuffingParams, IntegrationSettings,
    PositionRate, StepScheme, TimeWindow, STEP_SIZE,
};

fn harmonic_fast(y: f64) -> f64 {
    y
}

fn harmonic_slow(_t: f64, _y: f64, x: f64, _nu: f64, _forcing: f64) -> f64 {
    -x
}

#[test]
fn sample_count_matches_ceiling_formula() {
    for (a, b) in [(0.0_f64, 1.0), (0.0, 2.5), (1.0, 1.25), (-0.5, 0.5)] {
        let trajectory =
            integrate_duffing(TimeWindow::new(a, b), 0.1, 0.0, DuffingParams::default())
                .expect("trajectory");
        let expected = ((2.0 * b * std::f64::consts::PI - 2.0 * a * std::f64::consts::PI)
            / STEP_SIZE)
            .ceil() as usize;
        assert_eq!(trajectory.len(), expected, "window ({a}, {b})");
        assert_eq!(trajectory.x.len(), expected);
        assert_eq!(trajectory.y.len(), expected);
        let start = 2.0 * a * std::f64::consts::PI;
        let end = 2.0 * b * std::f64::consts::PI;
        assert!((trajectory.t[0] - start).abs() < 1e-12);
        assert!((trajectory.t[expected - 1] - end).abs() < 1e-12);
    }
}

#[test]
fn forced_offset_window_matches_reference_values() {
    // Stage times come from the grid sample t[k], whose spacing differs from dt.
    let trajectory = integrate_duffing(
        TimeWindow::new(0.25_f64, 2.0),
        0.5,
        0.2,
        DuffingParams::new(0.25, 0.4),
    )
    .expect("trajectory");
    assert_eq!(trajectory.len(), 10996);
    let expected = [
        (5000, 1.2479711111298915, None),
        (10995, -0.18486269943394648, Some(0.019776567761808018)),
    ];
    for (k, x, y) in expected {
        assert!(
            (trajectory.x[k] - x).abs() < 1e-12,
            "x[{k}] = {}, expected {x}",
            trajectory.x[k]
        );
        if let Some(y) = y {
            assert!(
                (trajectory.y[k] - y).abs() < 1e-12,
                "y[{k}] = {}, expected {y}",
                trajectory.y[k]
            );
        }
    }
}

#[test]
fn conservative_energy_drift_is_bounded_over_one_period() {
    let trajectory =
        integrate_duffing(TimeWindow::new(0.0_f64, 1.0), 0.5, 0.0, DuffingParams::default())
            .expect("trajectory");
    let initial = conservative_energy(trajectory.x[0], trajectory.y[0]);
    let worst = trajectory
        .x
        .iter()
        .zip(&trajectory.y)
        .map(|(&x, &y)| (conservative_energy(x, y) - initial).abs())
        .fold(0.0, f64::max);
    assert!(worst < 1e-2, "energy drifted by {worst}");
}

#[test]
fn orbit_started_inside_right_well_stays_there() {
    let trajectory =
        integrate_duffing(TimeWindow::new(0.0_f64, 2.0), 0.5, 0.0, DuffingParams::default())
            .expect("trajectory");
    assert!(trajectory.x.iter().all(|&x| x > 0.4 && x < 1.4));
}

#[test]
fn damping_dissipates_energy() {
    let trajectory =
        integrate_duffing(TimeWindow::new(0.0_f64, 4.0), 0.5, 0.0, DuffingParams::new(0.5, 0.0))
            .expect("trajectory");
    let start = conservative_energy(trajectory.x[0], trajectory.y[0]);
    let n = trajectory.len() - 1;
    let end = conservative_energy(trajectory.x[n], trajectory.y[n]);
    assert!(end < start);
    assert!((trajectory.x[n] - 1.0).abs() < 0.05, "x settled at {}", trajectory.x[n]);
}

#[test]
fn harmonic_law_flips_sign_after_half_a_period() {
    let trajectory = integrate(
        TimeWindow::new(0.0_f64, 1.0),
        1.0,
        0.0,
        DuffingParams::default(),
        &harmonic_fast,
        &harmonic_slow,
    )
    .expect("trajectory");
    assert_eq!(trajectory.len(), 6284);
    assert_eq!(trajectory.x[0], 1.0);
    assert_eq!(trajectory.y[0], 0.0);
    assert!(
        (trajectory.x[3141] + 1.0).abs() < 1e-2,
        "x at t = pi is {}",
        trajectory.x[3141]
    );
}

#[test]
fn harmonic_law_tracks_cosine_and_sine_for_small_times() {
    let (x0, y0) = (0.01, 0.02);
    let trajectory = integrate(
        TimeWindow::new(0.0_f64, 0.2),
        x0,
        y0,
        DuffingParams::default(),
        &harmonic_fast,
        &harmonic_slow,
    )
    .expect("trajectory");
    let amplitude = (x0 * x0 + y0 * y0).sqrt();
    for k in (0..trajectory.len()).step_by(100) {
        let t = k as f64 * STEP_SIZE;
        let exact = x0 * t.cos() + y0 * t.sin();
        assert!(
            (trajectory.x[k] - exact).abs() < 1e-2 * amplitude,
            "k = {k}: {} vs {exact}",
            trajectory.x[k]
        );
    }
}

#[test]
fn closures_can_stand_in_for_the_default_laws() {
    let window = TimeWindow::new(0.0_f64, 0.5);
    let params = DuffingParams::new(0.1, 0.3);
    let from_closures = integrate(
        window,
        0.3,
        -0.2,
        params,
        &|y: f64| y,
        &|t: f64, y: f64, x: f64, nu: f64, forcing: f64| {
            -(nu * y) + x - x.powi(3) + forcing * t.cos()
        },
    )
    .expect("closure trajectory");
    let from_defaults = integrate_duffing(window, 0.3, -0.2, params).expect("default trajectory");
    assert_eq!(from_closures, from_defaults);
}

#[test]
fn fully_coupled_scheme_conserves_energy_more_tightly() {
    let window = TimeWindow::new(0.0_f64, 1.0);
    let params = DuffingParams::default();
    let fully = integrate_with(
        window,
        0.5,
        0.0,
        params,
        &PositionRate,
        &duffing_core::VelocityRate,
        IntegrationSettings {
            scheme: StepScheme::FullyCoupled,
        },
    )
    .expect("trajectory");
    let initial = conservative_energy(0.5_f64, 0.0);
    let last = fully.len() - 1;
    let drift = (conservative_energy(fully.x[last], fully.y[last]) - initial).abs();
    assert!(drift < 1e-7, "energy drifted by {drift}");
}

#[test]
fn stroboscopic_section_of_forced_run_stays_in_bounds() {
    let periods = 5;
    let trajectory = integrate_duffing(
        TimeWindow::<f64>::periods(periods),
        1.0,
        0.0,
        DuffingParams::new(0.25, 0.4),
    )
    .expect("trajectory");
    let stride = strobe_stride(trajectory.dt).expect("stride");
    let section = stroboscopic_section(&trajectory, periods).expect("section");
    assert_eq!(section.len(), periods);
    for (k, point) in section.iter().enumerate() {
        assert_eq!(point.x, trajectory.x[k * stride]);
        assert_eq!(point.y, trajectory.y[k * stride]);
    }
}
