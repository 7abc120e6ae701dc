use runtrack_rs::tracking::geo::{self, Coordinate};
use runtrack_rs::tracking::session::TrackSession;
use runtrack_rs::tracking::split::SplitTracker;
use runtrack_rs::tracking::stream::{FilterConfig, Rejected, TrackStream};
use runtrack_rs::tracking::summary::{summarize, MetTable};
use runtrack_rs::types::track::LocationSample;
use uuid::Uuid;

fn sample(lat: f64, lon: f64, timestamp_ms: i64) -> LocationSample {
    LocationSample {
        lat,
        lon,
        altitude_m: None,
        accuracy_m: 5.0,
        speed_mps: Some(3.0),
        timestamp_ms,
    }
}

#[test]
fn haversine_is_symmetric_and_zero_on_identity() {
    let a = Coordinate::new(52.52, 13.405);
    let b = Coordinate::new(48.8566, 2.3522);

    assert_eq!(geo::distance_m(a, a), 0.0);
    assert!((geo::distance_m(a, b) - geo::distance_m(b, a)).abs() < 1e-9);
}

#[test]
fn haversine_one_degree_of_latitude() {
    let d = geo::distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
    assert!((d - 111_195.0).abs() < 50.0, "got {d}");
}

#[test]
fn haversine_is_additive_along_a_meridian() {
    let a = Coordinate::new(0.0, 10.0);
    let b = Coordinate::new(0.5, 10.0);
    let c = Coordinate::new(1.0, 10.0);

    let direct = geo::distance_m(a, c);
    let via_b = geo::distance_m(a, b) + geo::distance_m(b, c);
    assert!((direct - via_b).abs() < 1e-6);
}

#[test]
fn accuracy_gate_rejects_before_any_state_change() {
    let mut stream = TrackStream::new(FilterConfig::default());
    let mut bad = sample(50.0, 8.0, 0);
    bad.accuracy_m = 60.0;

    assert_eq!(stream.accept(&bad), Err(Rejected::Accuracy));
    assert_eq!(stream.cumulative_m(), 0.0);
    assert!(stream.state().samples.is_empty());
}

#[test]
fn gps_jump_is_rejected_and_distance_unchanged() {
    let mut stream = TrackStream::new(FilterConfig::default());
    stream.accept(&sample(50.0, 8.0, 0)).expect("first sample");

    // ~100 m north in one second: 100 m/s implied speed
    let jump = sample(50.0 + 100.0 / 111_195.0, 8.0, 1_000);
    assert_eq!(stream.accept(&jump), Err(Rejected::ImpliedSpeed));
    assert_eq!(stream.cumulative_m(), 0.0);
}

#[test]
fn stationary_drift_is_rejected() {
    let mut stream = TrackStream::new(FilterConfig::default());
    stream.accept(&sample(50.0, 8.0, 0)).expect("first sample");

    // ~1 m after two seconds: below the minimum movement threshold
    let drift = sample(50.0 + 1.0 / 111_195.0, 8.0, 2_000);
    assert_eq!(stream.accept(&drift), Err(Rejected::Movement));
}

#[test]
fn updates_faster_than_the_throttle_are_rejected() {
    let mut stream = TrackStream::new(FilterConfig::default());
    stream.accept(&sample(50.0, 8.0, 0)).expect("first sample");

    // ~5 m in half a second: plausible speed, but over the update rate
    let rapid = sample(50.0 + 5.0 / 111_195.0, 8.0, 500);
    assert_eq!(stream.accept(&rapid), Err(Rejected::Interval));
}

#[test]
fn accepted_samples_accumulate_distance() {
    let mut stream = TrackStream::new(FilterConfig::default());
    let step_deg = 100.0 / 111_194.9;

    for i in 0..3 {
        stream
            .accept(&sample(50.0 + f64::from(i) * step_deg, 8.0, i64::from(i) * 60_000))
            .expect("accepted");
    }

    assert!((stream.cumulative_m() - 200.0).abs() < 0.5);
    assert_eq!(stream.elapsed_ms(), 120_000);
}

#[test]
fn first_accepted_sample_adds_no_distance() {
    let mut stream = TrackStream::new(FilterConfig::default());
    let snapshot = stream.accept(&sample(50.0, 8.0, 0)).expect("first sample");
    assert_eq!(snapshot.distance_m, 0.0);
    assert_eq!(snapshot.elapsed_ms, 0);
}

#[test]
fn pace_is_absent_when_stationary() {
    let mut stream = TrackStream::new(FilterConfig::default());
    let mut still = sample(50.0, 8.0, 0);
    still.speed_mps = Some(0.0);

    let snapshot = stream.accept(&still).expect("first sample");
    assert_eq!(snapshot.pace_min_per_km, None);
}

#[test]
fn splits_emit_once_per_kilometer_in_order() {
    let mut tracker = SplitTracker::default();

    assert!(tracker.observe(500.0, 300_000).is_empty());

    let splits = tracker.observe(1_100.0, 660_000);
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].index, 1);
    assert_eq!(splits[0].duration_ms, 600_000);
    assert!((splits[0].pace_min_per_km - 10.0).abs() < 1e-9);
}

#[test]
fn distance_jump_backfills_proportional_splits() {
    let mut tracker = SplitTracker::default();
    tracker.observe(500.0, 300_000);
    tracker.observe(1_100.0, 660_000);

    // One update covering two boundaries: indices stay contiguous and the
    // boundary times are interpolated by distance.
    let splits = tracker.observe(3_200.0, 1_500_000);
    assert_eq!(splits.len(), 2);
    assert_eq!(splits[0].index, 2);
    assert_eq!(splits[1].index, 3);
    assert_eq!(splits[0].duration_ms, 420_000);
    assert_eq!(splits[1].duration_ms, 400_000);

    let partial = tracker.finish(3_200.0, 1_500_000).expect("partial split");
    assert_eq!(partial.index, 4);
    assert!(partial.partial);
    assert_eq!(partial.duration_ms, 80_000);
    // 80 s over 200 m scales to a 6.67 min/km pace
    assert!((partial.pace_min_per_km - 80.0 / 60.0 / 0.2).abs() < 1e-9);
}

#[test]
fn short_remainder_yields_no_partial_split() {
    let mut tracker = SplitTracker::default();
    tracker.observe(1_050.0, 600_000);
    assert!(tracker.finish(1_050.0, 620_000).is_none());
}

#[test]
fn session_emits_contiguous_splits_for_kilometer_steps() {
    let mut session = TrackSession::new(Uuid::new_v4(), 70.0, FilterConfig::default());
    let step_deg = 0.009; // slightly over one kilometer per step

    let mut indices = Vec::new();
    for i in 0..4i64 {
        let update = session
            .accept(&sample(50.0 + i as f64 * step_deg, 8.0, i * 100_000))
            .expect("accepted");
        indices.extend(update.splits.iter().map(|s| s.index));
    }

    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn summary_matches_five_km_in_thirty_minutes() {
    let summary = summarize(5_000.0, 1_800_000, &[], 70.0, &MetTable::default());

    assert!((summary.avg_speed_kmh - 10.0).abs() < 1e-9);
    assert!((summary.avg_pace_min_per_km.expect("pace") - 6.0).abs() < 1e-9);
    // 10 km/h falls in the 11.0 MET band: 11.0 * 70 kg * 0.5 h
    assert!((summary.calories_kcal - 385.0).abs() < 1e-6);
}

#[test]
fn elevation_gain_and_loss_from_consecutive_deltas() {
    let summary = summarize(
        1_000.0,
        600_000,
        &[100.0, 105.0, 102.0, 110.0],
        70.0,
        &MetTable::default(),
    );

    assert!((summary.elevation.gain_m - 13.0).abs() < 1e-9);
    assert!((summary.elevation.loss_m - 3.0).abs() < 1e-9);
    assert_eq!(summary.elevation.max_m, Some(110.0));
    assert_eq!(summary.elevation.min_m, Some(100.0));
}

#[test]
fn zero_duration_summary_uses_sentinels() {
    let summary = summarize(0.0, 0, &[], 70.0, &MetTable::default());
    assert_eq!(summary.avg_speed_kmh, 0.0);
    assert_eq!(summary.avg_pace_min_per_km, None);
    assert_eq!(summary.calories_kcal, 0.0);
}

#[test]
fn summarize_is_idempotent() {
    let table = MetTable::default();
    let first = summarize(8_400.0, 2_520_000, &[12.0, 18.0, 15.0], 64.0, &table);
    let second = summarize(8_400.0, 2_520_000, &[12.0, 18.0, 15.0], 64.0, &table);
    assert_eq!(first, second);
}

#[test]
fn elevation_bonus_raises_calories() {
    let flat = summarize(5_000.0, 1_800_000, &[], 70.0, &MetTable::default());
    let hilly = summarize(5_000.0, 1_800_000, &[0.0, 100.0], 70.0, &MetTable::default());

    // (100 m / 10) * 70 kg * 0.1 = 70 kcal bonus
    assert!((hilly.calories_kcal - flat.calories_kcal - 70.0).abs() < 1e-6);
}
