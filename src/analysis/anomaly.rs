//! Anomaly detection over decoded UAV updates
//!
//! Flags physically impossible motion, duplicated (replayed) messages and
//! signal-versus-position inconsistencies that point at spoofed or
//! manipulated Remote-ID broadcasts. Purely a function of the update stream:
//! feed every decoded record into [`AnomalyDetector::analyze`] and collect
//! the findings.

use std::{
    collections::{
        HashMap,
        VecDeque,
    },
    hash::{
        Hash,
        Hasher,
    },
};

use chrono::{
    DateTime,
    Utc,
};
use ridbee_types::{
    LocationVector,
    UavObject,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::geo::haversine_distance;

/// Entries of per-UAV history kept for the look-back rules.
const HISTORY_LIMIT: usize = 100;

// log-distance path loss: reference RSSI at 1 m and exponent
const RSSI_REFERENCE_DBM: f64 = -50.0;
const PATH_LOSS_EXPONENT: f64 = 2.5;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    /// Inferred or reported speed exceeds physical limits.
    SpeedImpossible,
    /// Position jumped further than physically possible.
    PositionJump,
    /// Sudden altitude change.
    AltitudeSpike,
    /// Duplicate messages inside the replay window.
    ReplayAttack,
    /// RSSI inconsistent with the position change.
    SignalAnomaly,
    /// Timestamps out of sequence.
    TimestampAnomaly,
    /// Multiple simultaneous locations for the same id.
    IdSpoof,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    /// Might be normal.
    Info,
    /// Suspicious, needs attention.
    Warning,
    /// Definite anomaly, likely spoofing.
    Critical,
}

/// One detected issue, with expected-versus-actual context so callers can
/// present it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub kind: AnomalyType,
    pub severity: AnomalySeverity,
    pub uav_id: String,
    pub description: String,
    /// In [0, 1].
    pub confidence: f64,
    pub detected_at: DateTime<Utc>,
    pub expected: f64,
    pub actual: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnomalyConfig {
    /// m/s; ~540 km/h.
    pub max_horizontal_speed: f32,
    /// m/s.
    pub max_vertical_speed: f32,
    /// m/s².
    pub max_acceleration: f32,

    /// Largest believable jump between consecutive positions, meters.
    pub max_position_jump_m: f64,
    /// m/s.
    pub max_altitude_change_rate: f32,

    /// Look-back window for duplicate-message detection.
    pub replay_window_ms: u32,
    /// Duplicates inside the window before a replay is flagged.
    pub min_duplicate_count: usize,

    /// Fractional slack on the expected path-loss delta.
    pub rssi_distance_tolerance: f32,
    /// dB step against the rolling average before the signal rule engages.
    pub min_rssi_change: i8,

    /// Updates further apart than this are too stale for kinematic rules.
    pub max_timestamp_gap_ms: u32,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            max_horizontal_speed: 150.0,
            max_vertical_speed: 50.0,
            max_acceleration: 30.0,
            max_position_jump_m: 1000.0,
            max_altitude_change_rate: 100.0,
            replay_window_ms: 5000,
            min_duplicate_count: 3,
            rssi_distance_tolerance: 0.3,
            min_rssi_change: 20,
            max_timestamp_gap_ms: 10_000,
        }
    }
}

/// Bounded per-UAV history feeding the look-back rules.
#[derive(Clone, Debug, Default)]
pub struct UavHistory {
    positions: VecDeque<LocationVector>,
    rssi: VecDeque<i8>,
    timestamps: VecDeque<DateTime<Utc>>,
    message_hashes: VecDeque<u32>,
}

impl UavHistory {
    fn push(
        &mut self,
        location: LocationVector,
        rssi: i8,
        time: DateTime<Utc>,
        message_hash: u32,
    ) {
        self.positions.push_back(location);
        self.rssi.push_back(rssi);
        self.timestamps.push_back(time);
        self.message_hashes.push_back(message_hash);
        self.trim();
    }

    fn trim(&mut self) {
        while self.positions.len() > HISTORY_LIMIT {
            self.positions.pop_front();
            self.rssi.pop_front();
            self.timestamps.pop_front();
            self.message_hashes.pop_front();
        }
    }
}

#[derive(Debug, Default)]
pub struct AnomalyDetector {
    config: AnomalyConfig,
    history: HashMap<String, UavHistory>,
    counts: HashMap<AnomalyType, usize>,
    total: usize,
}

impl AnomalyDetector {
    pub fn new(config: AnomalyConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    /// Runs all rules against one decoded update. The update's `last_seen`
    /// is the analysis clock. Returns every anomaly found, possibly none.
    pub fn analyze(&mut self, uav: &UavObject, rssi: i8) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        if uav.id.is_empty() {
            return anomalies;
        }

        let now = uav.last_seen;
        let message_hash = message_hash(uav);

        anomalies.extend(self.check_replay(&uav.id, message_hash, now));

        let history = self.history.entry(uav.id.clone()).or_default();
        if let (Some(previous), Some(previous_time)) =
            (history.positions.back(), history.timestamps.back())
        {
            if uav.location.valid {
                let time_delta =
                    now.signed_duration_since(*previous_time).as_seconds_f64();
                let max_gap = f64::from(self.config.max_timestamp_gap_ms) / 1000.0;

                let mut found = Vec::new();
                if time_delta > 0.0 && time_delta < max_gap {
                    found.extend(check_speed(
                        &self.config,
                        &uav.id,
                        &uav.location,
                        previous,
                        time_delta,
                        now,
                    ));
                    found.extend(check_position(
                        &self.config,
                        &uav.id,
                        &uav.location,
                        previous,
                        time_delta,
                        now,
                    ));
                }
                found.extend(check_signal(
                    &self.config,
                    &uav.id,
                    history,
                    rssi,
                    &uav.location,
                    now,
                ));
                anomalies.extend(found);
            }
        }

        if uav.location.valid {
            let history = self.history.entry(uav.id.clone()).or_default();
            history.push(uav.location, rssi, now, message_hash);
        }

        for anomaly in &anomalies {
            *self.counts.entry(anomaly.kind).or_default() += 1;
            self.total += 1;
        }

        anomalies
    }

    fn check_replay(
        &self,
        id: &str,
        message_hash: u32,
        now: DateTime<Utc>,
    ) -> Option<Anomaly> {
        let history = self.history.get(id)?;
        let window = i64::from(self.config.replay_window_ms);

        let duplicates = history
            .message_hashes
            .iter()
            .zip(&history.timestamps)
            .filter(|&(&hash, &time)| {
                hash == message_hash
                    && now.signed_duration_since(time).num_milliseconds() < window
            })
            .count();

        if duplicates < self.config.min_duplicate_count {
            return None;
        }

        Some(Anomaly {
            kind: AnomalyType::ReplayAttack,
            severity: AnomalySeverity::Critical,
            uav_id: id.to_owned(),
            description: "duplicate messages detected (possible replay attack)".to_owned(),
            confidence: (duplicates as f64 / 10.0).min(1.0),
            detected_at: now,
            expected: 0.0,
            actual: duplicates as f64,
        })
    }

    pub fn total_anomalies(&self) -> usize {
        self.total
    }

    pub fn count(&self, kind: AnomalyType) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Estimated transmitter distance in meters from a single RSSI reading,
    /// by inverting the log-distance path-loss model. Coarse, indicative
    /// only.
    pub fn estimate_distance_from_rssi(&self, rssi: i8) -> f64 {
        let exponent = (RSSI_REFERENCE_DBM - f64::from(rssi)) / (10.0 * PATH_LOSS_EXPONENT);
        10f64.powf(exponent)
    }

    /// Drops all history and counters.
    pub fn clear(&mut self) {
        self.history.clear();
        self.counts.clear();
        self.total = 0;
    }

    /// Drops the history of one aircraft.
    pub fn clear_uav(&mut self, id: &str) {
        self.history.remove(id);
    }
}

fn check_speed(
    config: &AnomalyConfig,
    id: &str,
    current: &LocationVector,
    previous: &LocationVector,
    time_delta_s: f64,
    now: DateTime<Utc>,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if time_delta_s <= 0.0 {
        return anomalies;
    }

    if finite_position(current) && finite_position(previous) {
        let distance = haversine_distance(
            previous.latitude,
            previous.longitude,
            current.latitude,
            current.longitude,
        );
        let inferred_speed = distance / time_delta_s;
        let limit = f64::from(config.max_horizontal_speed);

        if inferred_speed > limit {
            anomalies.push(Anomaly {
                kind: AnomalyType::SpeedImpossible,
                severity: if inferred_speed > limit * 2.0 {
                    AnomalySeverity::Critical
                }
                else {
                    AnomalySeverity::Warning
                },
                uav_id: id.to_owned(),
                description: "inferred horizontal speed exceeds physical limits".to_owned(),
                confidence: (inferred_speed / (limit * 3.0)).min(1.0),
                detected_at: now,
                expected: limit,
                actual: inferred_speed,
            });
        }
    }

    if current.altitude_geo.is_finite() && previous.altitude_geo.is_finite() {
        let altitude_rate =
            f64::from((current.altitude_geo - previous.altitude_geo).abs()) / time_delta_s;
        let limit = f64::from(config.max_vertical_speed);

        if altitude_rate > limit {
            anomalies.push(Anomaly {
                kind: AnomalyType::AltitudeSpike,
                severity: if altitude_rate > limit * 2.0 {
                    AnomalySeverity::Critical
                }
                else {
                    AnomalySeverity::Warning
                },
                uav_id: id.to_owned(),
                description: "vertical speed exceeds physical limits".to_owned(),
                confidence: (altitude_rate / (limit * 3.0)).min(1.0),
                detected_at: now,
                expected: limit,
                actual: altitude_rate,
            });
        }
    }

    // reported (not inferred) speed change; NaN sentinels skip the rule
    if current.speed_horizontal.is_finite() && previous.speed_horizontal.is_finite() {
        let acceleration = f64::from((current.speed_horizontal - previous.speed_horizontal).abs())
            / time_delta_s;
        let limit = f64::from(config.max_acceleration);

        if acceleration > limit {
            anomalies.push(Anomaly {
                kind: AnomalyType::SpeedImpossible,
                severity: AnomalySeverity::Warning,
                uav_id: id.to_owned(),
                description: "acceleration exceeds reasonable limits".to_owned(),
                confidence: (acceleration / (limit * 2.0)).min(1.0),
                detected_at: now,
                expected: limit,
                actual: acceleration,
            });
        }
    }

    anomalies
}

fn check_position(
    config: &AnomalyConfig,
    id: &str,
    current: &LocationVector,
    previous: &LocationVector,
    time_delta_s: f64,
    now: DateTime<Utc>,
) -> Option<Anomaly> {
    if !finite_position(current) || !finite_position(previous) {
        return None;
    }

    let distance = haversine_distance(
        previous.latitude,
        previous.longitude,
        current.latitude,
        current.longitude,
    );
    let max_possible = f64::from(config.max_horizontal_speed) * time_delta_s;

    if distance <= config.max_position_jump_m || distance <= max_possible * 1.5 {
        return None;
    }

    Some(Anomaly {
        kind: AnomalyType::PositionJump,
        severity: AnomalySeverity::Critical,
        uav_id: id.to_owned(),
        description: "position jumped impossibly far".to_owned(),
        confidence: (distance / (max_possible * 3.0)).min(1.0),
        detected_at: now,
        expected: max_possible,
        actual: distance,
    })
}

fn check_signal(
    config: &AnomalyConfig,
    id: &str,
    history: &UavHistory,
    current_rssi: i8,
    location: &LocationVector,
    now: DateTime<Utc>,
) -> Option<Anomaly> {
    if history.rssi.len() < 3 {
        return None;
    }

    let average: f64 =
        history.rssi.iter().map(|&rssi| f64::from(rssi)).sum::<f64>() / history.rssi.len() as f64;
    let rssi_delta = (f64::from(current_rssi) - average).abs();

    if rssi_delta <= f64::from(config.min_rssi_change) {
        return None;
    }

    let previous = history.positions.back()?;
    if !finite_position(previous) || !finite_position(location) {
        return None;
    }

    let distance = haversine_distance(
        previous.latitude,
        previous.longitude,
        location.latitude,
        location.longitude,
    );

    // a free-space step of `distance` explains at most this much dB
    let expected_change = 10.0 * PATH_LOSS_EXPONENT * distance.max(1.0).log10();

    if rssi_delta <= expected_change * (1.0 + f64::from(config.rssi_distance_tolerance)) {
        return None;
    }

    Some(Anomaly {
        kind: AnomalyType::SignalAnomaly,
        severity: AnomalySeverity::Warning,
        uav_id: id.to_owned(),
        description: "RSSI change inconsistent with position change".to_owned(),
        confidence: (rssi_delta / 40.0).min(1.0),
        detected_at: now,
        expected: expected_change,
        actual: rssi_delta,
    })
}

fn finite_position(location: &LocationVector) -> bool {
    location.latitude.is_finite() && location.longitude.is_finite()
}

/// 32-bit digest of the fields a replayed frame necessarily repeats.
fn message_hash(uav: &UavObject) -> u32 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    uav.id.hash(&mut hasher);
    uav.location.latitude.to_bits().hash(&mut hasher);
    uav.location.longitude.to_bits().hash(&mut hasher);
    uav.location.altitude_geo.to_bits().hash(&mut hasher);
    uav.location.speed_horizontal.to_bits().hash(&mut hasher);
    hasher.finish() as u32
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn located_uav(id: &str, lat: f64, lon: f64, time: DateTime<Utc>) -> UavObject {
        let mut uav = UavObject::new(time);
        uav.id = id.to_owned();
        uav.location = LocationVector {
            valid: true,
            latitude: lat,
            longitude: lon,
            altitude_geo: 100.0,
            speed_horizontal: 10.0,
            ..Default::default()
        };
        uav
    }

    #[test]
    fn it_ignores_records_without_an_id() {
        let mut detector = AnomalyDetector::default();
        let uav = UavObject::default();
        assert!(detector.analyze(&uav, -60).is_empty());
        assert_eq!(detector.total_anomalies(), 0);
    }

    #[test]
    fn it_flags_replayed_messages() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        let mut flagged_at = None;
        for i in 0..5 {
            let time = start + TimeDelta::milliseconds(20 * i);
            let uav = located_uav("REPLAY1", 37.7749, -122.4194, time);
            let anomalies = detector.analyze(&uav, -60);
            if anomalies
                .iter()
                .any(|anomaly| anomaly.kind == AnomalyType::ReplayAttack)
                && flagged_at.is_none()
            {
                flagged_at = Some(i);
            }
        }

        // at least one replay flag by the third identical frame
        assert!(flagged_at.is_some_and(|i| i >= 2 && i <= 3), "{flagged_at:?}");
        assert!(detector.count(AnomalyType::ReplayAttack) >= 1);
    }

    #[test]
    fn it_ignores_duplicates_outside_the_replay_window() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        for i in 0..6 {
            let time = start + TimeDelta::seconds(6 * i);
            let uav = located_uav("SLOW1", 37.7749, -122.4194, time);
            let anomalies = detector.analyze(&uav, -60);
            assert!(
                !anomalies
                    .iter()
                    .any(|anomaly| anomaly.kind == AnomalyType::ReplayAttack),
                "iteration {i}: {anomalies:?}"
            );
        }
    }

    #[test]
    fn it_flags_impossible_jumps() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        // San Francisco, then New York 50 ms later
        detector.analyze(&located_uav("SPOOF001", 37.7749, -122.4194, start), -60);
        let anomalies = detector.analyze(
            &located_uav(
                "SPOOF001",
                40.7128,
                -74.0060,
                start + TimeDelta::milliseconds(50),
            ),
            -60,
        );

        let flagged = anomalies
            .iter()
            .find(|anomaly| {
                matches!(
                    anomaly.kind,
                    AnomalyType::SpeedImpossible | AnomalyType::PositionJump
                )
            })
            .expect("no speed/position anomaly");
        assert_eq!(flagged.severity, AnomalySeverity::Critical);
        assert!(flagged.confidence >= 0.5);
    }

    #[test]
    fn it_flags_altitude_spikes() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        detector.analyze(&located_uav("ALT1", 37.0, -122.0, start), -60);
        let mut uav = located_uav("ALT1", 37.0, -122.0, start + TimeDelta::seconds(1));
        uav.location.altitude_geo = 300.0;
        let anomalies = detector.analyze(&uav, -60);

        assert!(anomalies
            .iter()
            .any(|anomaly| anomaly.kind == AnomalyType::AltitudeSpike));
    }

    #[test]
    fn it_flags_excessive_acceleration() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        let mut first = located_uav("ACC1", 37.0, -122.0, start);
        first.location.speed_horizontal = 1.0;
        detector.analyze(&first, -60);

        let mut second = located_uav("ACC1", 37.0001, -122.0, start + TimeDelta::seconds(1));
        second.location.speed_horizontal = 80.0;
        let anomalies = detector.analyze(&second, -60);

        assert!(anomalies.iter().any(|anomaly| {
            anomaly.kind == AnomalyType::SpeedImpossible
                && anomaly.severity == AnomalySeverity::Warning
        }));
    }

    #[test]
    fn it_suppresses_kinematic_rules_across_stale_gaps() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        detector.analyze(&located_uav("GAP1", 37.7749, -122.4194, start), -60);
        // same massive jump, but 60 s later: too stale to judge
        let anomalies = detector.analyze(
            &located_uav("GAP1", 40.7128, -74.0060, start + TimeDelta::seconds(60)),
            -60,
        );

        assert!(
            !anomalies.iter().any(|anomaly| {
                matches!(
                    anomaly.kind,
                    AnomalyType::SpeedImpossible | AnomalyType::PositionJump
                )
            }),
            "{anomalies:?}"
        );
    }

    #[test]
    fn it_skips_kinematics_on_nan_sentinels() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        let mut first = located_uav("NAN1", 37.0, -122.0, start);
        first.location.speed_horizontal = f32::NAN;
        detector.analyze(&first, -60);

        let mut second = located_uav("NAN1", 37.0, -122.0, start + TimeDelta::seconds(1));
        second.location.speed_horizontal = f32::NAN;
        let anomalies = detector.analyze(&second, -60);
        assert!(anomalies.is_empty(), "{anomalies:?}");
    }

    #[test]
    fn it_flags_rssi_inconsistent_with_position() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();

        for i in 0..4 {
            let uav = located_uav(
                "SIG1",
                37.0 + 0.000_02 * f64::from(i),
                -122.0,
                start + TimeDelta::seconds(i64::from(i)),
            );
            detector.analyze(&uav, -60);
        }

        // 35 dB swing while barely moving
        let uav = located_uav("SIG1", 37.000_08, -122.0, start + TimeDelta::seconds(4));
        let anomalies = detector.analyze(&uav, -95);
        assert!(anomalies
            .iter()
            .any(|anomaly| anomaly.kind == AnomalyType::SignalAnomaly));
    }

    #[test]
    fn it_estimates_distance_from_rssi() {
        let detector = AnomalyDetector::default();
        // at the reference RSSI the estimate is 1 m, and it grows as the
        // signal weakens
        assert!((detector.estimate_distance_from_rssi(-50) - 1.0).abs() < 1e-9);
        assert!(
            detector.estimate_distance_from_rssi(-75) > detector.estimate_distance_from_rssi(-60)
        );
    }

    #[test]
    fn it_clears_history_and_counters() {
        let mut detector = AnomalyDetector::default();
        let start = Utc::now();
        for i in 0..5 {
            let uav = located_uav(
                "CLR1",
                37.0,
                -122.0,
                start + TimeDelta::milliseconds(10 * i),
            );
            detector.analyze(&uav, -60);
        }
        assert!(detector.total_anomalies() > 0);

        detector.clear();
        assert_eq!(detector.total_anomalies(), 0);
        assert_eq!(detector.count(AnomalyType::ReplayAttack), 0);

        detector.analyze(&located_uav("CLR1", 37.0, -122.0, start), -60);
        detector.clear_uav("CLR1");
        let anomalies = detector.analyze(
            &located_uav("CLR1", 40.0, -74.0, start + TimeDelta::milliseconds(50)),
            -60,
        );
        // history gone, so the jump is not judged
        assert!(anomalies.is_empty(), "{anomalies:?}");
    }
}
