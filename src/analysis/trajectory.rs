//! Per-aircraft trajectory history, smoothing, prediction and pattern
//! classification
//!
//! Each tracked aircraft gets two bounded FIFOs: the raw positions as
//! decoded, and a one-pole exponentially smoothed series. On top of those the
//! analyzer computes flight statistics, linearly extrapolates near-future
//! positions with decaying confidence, and classifies the flight pattern
//! from heading, speed and altitude features.

use std::collections::{
    HashMap,
    VecDeque,
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc,
};
use ridbee_types::LocationVector;
use serde::{
    Deserialize,
    Serialize,
};

use crate::geo::{
    haversine_distance,
    initial_bearing,
    project_position,
};

/// Confidence reaches zero at this prediction horizon.
const CONFIDENCE_HORIZON_S: f64 = 30.0;

/// Points required before a pattern is classified.
const MIN_PATTERN_POINTS: usize = 5;

/// Statistics and pattern are recomputed every this many appended points.
const STATS_INTERVAL: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Bound on both the raw and the smoothed FIFO.
    pub max_history_points: usize,
    /// One-pole smoothing factor α in (0, 1]; 1 disables smoothing.
    pub smoothing_factor: f64,
    /// Default look-ahead for consumers that predict.
    pub prediction_horizon_ms: u32,
    /// Movement below this is dropped as jitter, meters.
    pub min_movement_m: f64,
    /// Average speed below this classifies as hovering, m/s.
    pub stationary_speed_threshold: f32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            max_history_points: 1000,
            smoothing_factor: 0.3,
            prediction_horizon_ms: 5000,
            min_movement_m: 1.0,
            stationary_speed_threshold: 0.5,
        }
    }
}

/// One spatial sample of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Geodetic altitude, meters.
    pub altitude: f32,
    /// Reported ground speed, m/s.
    pub speed: f32,
    /// Reported track, degrees.
    pub heading: f32,
    pub time: DateTime<Utc>,
}

impl TrajectoryPoint {
    fn from_location(location: &LocationVector, time: DateTime<Utc>) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude_geo,
            speed: location.speed_horizontal,
            heading: location.direction,
            time,
        }
    }
}

/// Linear extrapolation of a near-future position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PredictedPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f32,
    /// In [0, 1]; 0 means no usable prediction.
    pub confidence: f64,
    /// Estimated error radius, meters.
    pub error_radius_m: f64,
    pub predicted_at: DateTime<Utc>,
}

/// Flight statistics over the retained history. Monotonic while points only
/// accrete.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrajectoryStats {
    pub total_distance_m: f64,
    pub max_speed_mps: f64,
    pub avg_speed_mps: f64,
    pub max_altitude_m: f32,
    pub min_altitude_m: f32,
    /// Circular standard deviation of the headings, degrees.
    pub heading_variance: f64,
    pub duration: TimeDelta,
    pub point_count: usize,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FlightPattern {
    #[default]
    Unknown,
    /// Hovering in place.
    Stationary,
    /// Straight-line flight.
    Linear,
    /// Consistent turning.
    Circular,
    /// Back-and-forth sweeps.
    Patrol,
    /// No discernible pattern.
    Erratic,
    /// Descending.
    Landing,
    /// Ascending.
    Takeoff,
}

/// Retained history for one aircraft.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    points: VecDeque<TrajectoryPoint>,
    smoothed: VecDeque<TrajectoryPoint>,
    stats: TrajectoryStats,
    pattern: FlightPattern,
}

impl Trajectory {
    pub fn points(&self) -> &VecDeque<TrajectoryPoint> {
        &self.points
    }

    pub fn smoothed(&self) -> &VecDeque<TrajectoryPoint> {
        &self.smoothed
    }

    pub fn stats(&self) -> &TrajectoryStats {
        &self.stats
    }

    pub fn pattern(&self) -> FlightPattern {
        self.pattern
    }

    fn push(&mut self, point: TrajectoryPoint, max_points: usize) {
        self.points.push_back(point);
        while self.points.len() > max_points {
            self.points.pop_front();
        }
    }

    fn recalculate_stats(&mut self) {
        let Some(first) = self.points.front() else {
            self.stats = TrajectoryStats::default();
            return;
        };

        let mut stats = TrajectoryStats {
            max_altitude_m: first.altitude,
            min_altitude_m: first.altitude,
            point_count: self.points.len(),
            ..Default::default()
        };

        let mut speed_sum = 0.0;
        let mut previous: Option<&TrajectoryPoint> = None;
        for point in &self.points {
            stats.max_altitude_m = stats.max_altitude_m.max(point.altitude);
            stats.min_altitude_m = stats.min_altitude_m.min(point.altitude);
            stats.max_speed_mps = stats.max_speed_mps.max(f64::from(point.speed));
            speed_sum += f64::from(point.speed);

            if let Some(previous) = previous {
                stats.total_distance_m += haversine_distance(
                    previous.latitude,
                    previous.longitude,
                    point.latitude,
                    point.longitude,
                );
            }
            previous = Some(point);
        }

        stats.avg_speed_mps = speed_sum / self.points.len() as f64;
        stats.heading_variance = heading_variance(&self.points);
        if let (Some(first), Some(last)) = (self.points.front(), self.points.back()) {
            stats.duration = last.time.signed_duration_since(first.time);
        }

        self.stats = stats;
    }
}

#[derive(Debug, Default)]
pub struct TrajectoryAnalyzer {
    config: TrajectoryConfig,
    trajectories: HashMap<String, Trajectory>,
}

impl TrajectoryAnalyzer {
    pub fn new(config: TrajectoryConfig) -> Self {
        Self {
            config,
            trajectories: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Appends one decoded position for an aircraft.
    ///
    /// Invalid locations are ignored, as is movement below the configured
    /// jitter threshold. Every tenth retained point the statistics and the
    /// pattern classification are refreshed.
    pub fn add_position(&mut self, uav_id: &str, location: &LocationVector, time: DateTime<Utc>) {
        if !location.valid {
            return;
        }

        let trajectory = self.trajectories.entry(uav_id.to_owned()).or_default();
        let point = TrajectoryPoint::from_location(location, time);

        if let Some(last) = trajectory.points.back() {
            let moved = haversine_distance(
                last.latitude,
                last.longitude,
                point.latitude,
                point.longitude,
            );
            if moved < self.config.min_movement_m {
                return;
            }
        }

        trajectory.push(point, self.config.max_history_points);

        let smoothed = match trajectory.smoothed.back() {
            Some(previous) => smooth_point(&point, previous, self.config.smoothing_factor),
            None => point,
        };
        trajectory.smoothed.push_back(smoothed);
        while trajectory.smoothed.len() > self.config.max_history_points {
            trajectory.smoothed.pop_front();
        }

        if trajectory.points.len() % STATS_INTERVAL == 0 {
            trajectory.recalculate_stats();
            trajectory.pattern = classify_pattern(
                &trajectory.points,
                self.config.stationary_speed_threshold,
            );
        }
    }

    pub fn trajectory(&self, uav_id: &str) -> Option<&Trajectory> {
        self.trajectories.get(uav_id)
    }

    pub fn active_uavs(&self) -> impl Iterator<Item = &str> {
        self.trajectories.keys().map(String::as_str)
    }

    /// Snapshot of the smoothed series for an aircraft.
    pub fn smoothed_trajectory(&self, uav_id: &str) -> Vec<TrajectoryPoint> {
        self.trajectories
            .get(uav_id)
            .map(|trajectory| trajectory.smoothed.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn pattern(&self, uav_id: &str) -> FlightPattern {
        self.trajectories
            .get(uav_id)
            .map(Trajectory::pattern)
            .unwrap_or_default()
    }

    pub fn stats(&self, uav_id: &str) -> Option<&TrajectoryStats> {
        self.trajectories.get(uav_id).map(Trajectory::stats)
    }

    /// Linearly extrapolates the position `time_ahead_ms` into the future
    /// from the last two smoothed points.
    ///
    /// Confidence decays linearly to zero over a 30 s horizon; the error
    /// radius grows with both speed and look-ahead. With fewer than two
    /// points there is no usable estimate and confidence is zero.
    pub fn predict_position(&self, uav_id: &str, time_ahead_ms: u32) -> PredictedPosition {
        let Some(trajectory) = self.trajectories.get(uav_id) else {
            return PredictedPosition::default();
        };

        let points = if trajectory.smoothed.len() >= 2 {
            &trajectory.smoothed
        }
        else {
            &trajectory.points
        };
        if points.len() < 2 {
            return PredictedPosition::default();
        }

        let p1 = &points[points.len() - 2];
        let p2 = &points[points.len() - 1];
        let predicted_at = p2.time + TimeDelta::milliseconds(i64::from(time_ahead_ms));

        let time_diff = p2.time.signed_duration_since(p1.time).as_seconds_f64();
        if time_diff <= 0.0 {
            return PredictedPosition {
                latitude: p2.latitude,
                longitude: p2.longitude,
                altitude: p2.altitude,
                confidence: 0.5,
                error_radius_m: 0.0,
                predicted_at,
            };
        }

        let bearing = initial_bearing(p1.latitude, p1.longitude, p2.latitude, p2.longitude);
        let distance = haversine_distance(p1.latitude, p1.longitude, p2.latitude, p2.longitude);
        let speed = distance / time_diff;
        let altitude_rate = f64::from(p2.altitude - p1.altitude) / time_diff;

        let ahead_s = f64::from(time_ahead_ms) / 1000.0;
        let (latitude, longitude) =
            project_position(p2.latitude, p2.longitude, bearing, speed * ahead_s);

        PredictedPosition {
            latitude,
            longitude,
            altitude: p2.altitude + (altitude_rate * ahead_s) as f32,
            confidence: (1.0 - ahead_s / CONFIDENCE_HORIZON_S).max(0.0),
            error_radius_m: speed * ahead_s * 0.1 + ahead_s * 2.0,
            predicted_at,
        }
    }

    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    pub fn clear_uav(&mut self, uav_id: &str) {
        self.trajectories.remove(uav_id);
    }
}

fn smooth_point(raw: &TrajectoryPoint, previous: &TrajectoryPoint, alpha: f64) -> TrajectoryPoint {
    let blend = |a: f64, b: f64| alpha * a + (1.0 - alpha) * b;

    TrajectoryPoint {
        latitude: blend(raw.latitude, previous.latitude),
        longitude: blend(raw.longitude, previous.longitude),
        altitude: blend(f64::from(raw.altitude), f64::from(previous.altitude)) as f32,
        speed: blend(f64::from(raw.speed), f64::from(previous.speed)) as f32,
        heading: blend(f64::from(raw.heading), f64::from(previous.heading)) as f32,
        time: raw.time,
    }
}

/// Classifies the flight pattern from heading, speed and altitude features.
fn classify_pattern(points: &VecDeque<TrajectoryPoint>, stationary_threshold: f32) -> FlightPattern {
    if points.len() < MIN_PATTERN_POINTS {
        return FlightPattern::Unknown;
    }

    let avg_speed =
        points.iter().map(|point| f64::from(point.speed)).sum::<f64>() / points.len() as f64;

    if avg_speed < f64::from(stationary_threshold) {
        return FlightPattern::Stationary;
    }

    let altitude_diff = points
        .back()
        .map(|last| last.altitude)
        .unwrap_or_default()
        - points.front().map(|first| first.altitude).unwrap_or_default();

    if altitude_diff < -10.0 && avg_speed < 5.0 {
        return FlightPattern::Landing;
    }
    if altitude_diff > 10.0 && avg_speed < 5.0 {
        return FlightPattern::Takeoff;
    }

    let variance = heading_variance(points);
    if variance < 15.0 {
        return FlightPattern::Linear;
    }

    // mean per-step heading change: consistent turning reads as circling
    let mut total_turn = 0.0;
    for window in turn_steps(points) {
        total_turn += window;
    }
    let avg_turn = total_turn / (points.len() - 1) as f64;
    if avg_turn.abs() > 5.0 && variance < 30.0 {
        return FlightPattern::Circular;
    }

    // swings of more than 90 degrees between consecutive steps read as
    // patrol reversals when they are occasional
    let steps: Vec<f64> = turn_steps(points).collect();
    let reversals = steps
        .windows(2)
        .filter(|pair| (pair[1] - pair[0]).abs() > 90.0)
        .count();
    if reversals >= 2 && reversals <= points.len() / 5 {
        return FlightPattern::Patrol;
    }

    if variance > 60.0 {
        return FlightPattern::Erratic;
    }

    FlightPattern::Unknown
}

/// Per-step heading changes wrapped to (-180, 180].
fn turn_steps<'a>(
    points: &'a VecDeque<TrajectoryPoint>,
) -> impl Iterator<Item = f64> + 'a {
    points
        .iter()
        .zip(points.iter().skip(1))
        .map(|(a, b)| wrap_degrees(f64::from(b.heading) - f64::from(a.heading)))
}

/// Circular standard deviation of the headings, in degrees.
fn heading_variance(points: &VecDeque<TrajectoryPoint>) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let (sin_sum, cos_sum) = points.iter().fold((0.0f64, 0.0f64), |(sin, cos), point| {
        let heading = f64::from(point.heading).to_radians();
        (sin + heading.sin(), cos + heading.cos())
    });
    let mean = sin_sum.atan2(cos_sum).to_degrees();

    let variance_sum: f64 = points
        .iter()
        .map(|point| wrap_degrees(f64::from(point.heading) - mean).powi(2))
        .sum();

    (variance_sum / points.len() as f64).sqrt()
}

fn wrap_degrees(mut degrees: f64) -> f64 {
    while degrees > 180.0 {
        degrees -= 360.0;
    }
    while degrees < -180.0 {
        degrees += 360.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use super::*;

    fn location(lat: f64, lon: f64, alt: f32, speed: f32, heading: f32) -> LocationVector {
        LocationVector {
            valid: true,
            latitude: lat,
            longitude: lon,
            altitude_geo: alt,
            speed_horizontal: speed,
            direction: heading,
            ..Default::default()
        }
    }

    /// Constant-velocity track due north at `speed` m/s, one point per
    /// second.
    fn northbound(analyzer: &mut TrajectoryAnalyzer, id: &str, points: usize, speed: f64) {
        let start = Utc::now();
        let step_deg = speed * 0.00899 / 1000.0;
        for i in 0..points {
            analyzer.add_position(
                id,
                &location(
                    37.0 + step_deg * i as f64,
                    -122.0,
                    100.0,
                    speed as f32,
                    0.0,
                ),
                start + TimeDelta::seconds(i as i64),
            );
        }
    }

    #[test]
    fn it_ignores_invalid_locations() {
        let mut analyzer = TrajectoryAnalyzer::default();
        let invalid = LocationVector::default();
        analyzer.add_position("UAV1", &invalid, Utc::now());
        assert!(analyzer.trajectory("UAV1").is_none());
    }

    #[test]
    fn it_drops_sub_threshold_jitter() {
        let mut analyzer = TrajectoryAnalyzer::default();
        let start = Utc::now();

        analyzer.add_position("UAV1", &location(37.0, -122.0, 100.0, 0.0, 0.0), start);
        // ~0.1 m east, below the 1 m default threshold
        analyzer.add_position(
            "UAV1",
            &location(37.0, -122.000_001, 100.0, 0.0, 0.0),
            start + TimeDelta::seconds(1),
        );

        assert_eq!(analyzer.trajectory("UAV1").unwrap().points().len(), 1);
    }

    #[test]
    fn it_smooths_with_the_configured_alpha() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            smoothing_factor: 0.5,
            ..Default::default()
        });
        let start = Utc::now();

        analyzer.add_position("UAV1", &location(37.0, -122.0, 100.0, 10.0, 0.0), start);
        analyzer.add_position(
            "UAV1",
            &location(37.001, -122.0, 120.0, 10.0, 0.0),
            start + TimeDelta::seconds(1),
        );

        let smoothed = analyzer.smoothed_trajectory("UAV1");
        assert_eq!(smoothed.len(), 2);
        // first point seeds the series unchanged
        assert_abs_diff_eq!(smoothed[0].latitude, 37.0);
        assert_abs_diff_eq!(smoothed[1].latitude, 37.0005, epsilon = 1e-9);
        assert_abs_diff_eq!(smoothed[1].altitude, 110.0, epsilon = 1e-3);
    }

    #[test]
    fn it_bounds_history() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            max_history_points: 10,
            ..Default::default()
        });
        northbound(&mut analyzer, "UAV1", 50, 10.0);

        let trajectory = analyzer.trajectory("UAV1").unwrap();
        assert_eq!(trajectory.points().len(), 10);
        assert_eq!(trajectory.smoothed().len(), 10);
    }

    #[test]
    fn it_computes_stats_on_a_linear_track() {
        let mut analyzer = TrajectoryAnalyzer::default();
        northbound(&mut analyzer, "UAV1", 20, 10.0);

        let stats = *analyzer.stats("UAV1").unwrap();
        assert_eq!(stats.point_count, 20);
        // 19 segments of ~10 m
        assert_abs_diff_eq!(stats.total_distance_m, 190.0, epsilon = 5.0);
        assert_abs_diff_eq!(stats.avg_speed_mps, 10.0, epsilon = 0.01);
        assert_abs_diff_eq!(stats.max_speed_mps, 10.0, epsilon = 0.01);
        assert_eq!(stats.duration, TimeDelta::seconds(19));
    }

    #[test]
    fn it_predicts_a_constant_velocity_flight() {
        let mut analyzer = TrajectoryAnalyzer::default();
        // 10 m/s due north
        northbound(&mut analyzer, "UAV1", 10, 10.0);

        let last = analyzer.trajectory("UAV1").unwrap().points().back().copied().unwrap();

        let prediction = analyzer.predict_position("UAV1", 1000);
        assert!(prediction.confidence > 0.9);

        // true position one second later is ~10 m further north
        let (true_lat, true_lon) = crate::geo::project_position(
            last.latitude,
            last.longitude,
            0.0,
            10.0,
        );
        let error = haversine_distance(
            prediction.latitude,
            prediction.longitude,
            true_lat,
            true_lon,
        );
        assert!(error < 100.0, "prediction off by {error} m");
    }

    #[test]
    fn it_decays_confidence_with_the_horizon() {
        let mut analyzer = TrajectoryAnalyzer::default();
        northbound(&mut analyzer, "UAV1", 10, 10.0);

        let mut last_confidence = 1.0;
        for horizon in [500, 1000, 5000, 15_000, 29_000] {
            let prediction = analyzer.predict_position("UAV1", horizon);
            assert!(
                prediction.confidence < last_confidence,
                "confidence did not decay at {horizon} ms"
            );
            last_confidence = prediction.confidence;
        }

        let prediction = analyzer.predict_position("UAV1", 60_000);
        assert_abs_diff_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn it_returns_zero_confidence_without_history() {
        let analyzer = TrajectoryAnalyzer::default();
        assert_abs_diff_eq!(analyzer.predict_position("NOBODY", 1000).confidence, 0.0);

        let mut analyzer = TrajectoryAnalyzer::default();
        analyzer.add_position("UAV1", &location(37.0, -122.0, 0.0, 0.0, 0.0), Utc::now());
        assert_abs_diff_eq!(analyzer.predict_position("UAV1", 1000).confidence, 0.0);
    }

    #[test]
    fn it_classifies_stationary_hover() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        for i in 0..10 {
            analyzer.add_position(
                "HOVER",
                &location(37.0, -122.0, 50.0, 0.1, 0.0),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("HOVER"), FlightPattern::Stationary);
    }

    #[test]
    fn it_classifies_linear_flight() {
        let mut analyzer = TrajectoryAnalyzer::default();
        northbound(&mut analyzer, "LINE", 20, 10.0);
        assert_eq!(analyzer.pattern("LINE"), FlightPattern::Linear);
    }

    #[test]
    fn it_classifies_circling() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        // heading advances 8 degrees per step along an arc
        for i in 0..10 {
            let heading = 8.0 * i as f64;
            let angle = heading.to_radians();
            analyzer.add_position(
                "ORBIT",
                &location(
                    37.0 + 0.001 * angle.cos(),
                    -122.0 + 0.001 * angle.sin(),
                    80.0,
                    8.0,
                    heading as f32,
                ),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("ORBIT"), FlightPattern::Circular);
    }

    #[test]
    fn it_classifies_takeoff() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        for i in 0..10 {
            analyzer.add_position(
                "CLIMB",
                &location(37.0 + 0.00001 * i as f64, -122.0, 5.0 * i as f32, 2.0, 0.0),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("CLIMB"), FlightPattern::Takeoff);
    }

    #[test]
    fn it_classifies_landing() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        for i in 0..10 {
            analyzer.add_position(
                "DESCEND",
                &location(
                    37.0 + 0.00001 * i as f64,
                    -122.0,
                    100.0 - 5.0 * i as f32,
                    3.0,
                    0.0,
                ),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("DESCEND"), FlightPattern::Landing);
    }

    #[test]
    fn it_classifies_patrol_sweeps() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        // two legs: east, then back west
        for i in 0..20 {
            let heading = if i < 10 { 90.0 } else { 270.0 };
            analyzer.add_position(
                "SWEEP",
                &location(37.0, -122.0 + 0.0001 * i as f64, 60.0, 6.0, heading),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("SWEEP"), FlightPattern::Patrol);
    }

    #[test]
    fn it_classifies_erratic_flight() {
        let mut analyzer = TrajectoryAnalyzer::new(TrajectoryConfig {
            min_movement_m: 0.0,
            ..Default::default()
        });
        let start = Utc::now();
        for i in 0..10 {
            let heading = if i % 2 == 0 { 0.0 } else { 150.0 };
            analyzer.add_position(
                "WILD",
                &location(37.0 + 0.0001 * i as f64, -122.0, 70.0, 6.0, heading),
                start + TimeDelta::seconds(i),
            );
        }
        assert_eq!(analyzer.pattern("WILD"), FlightPattern::Erratic);
    }

    #[test]
    fn it_reports_unknown_below_the_point_minimum() {
        let mut analyzer = TrajectoryAnalyzer::default();
        northbound(&mut analyzer, "SHORT", 3, 10.0);
        assert_eq!(analyzer.pattern("SHORT"), FlightPattern::Unknown);
    }

    #[test]
    fn it_clears_per_uav_and_global_state() {
        let mut analyzer = TrajectoryAnalyzer::default();
        northbound(&mut analyzer, "A", 5, 10.0);
        northbound(&mut analyzer, "B", 5, 10.0);
        assert_eq!(analyzer.active_uavs().count(), 2);

        analyzer.clear_uav("A");
        assert!(analyzer.trajectory("A").is_none());
        assert!(analyzer.trajectory("B").is_some());

        analyzer.clear();
        assert_eq!(analyzer.active_uavs().count(), 0);
    }
}
