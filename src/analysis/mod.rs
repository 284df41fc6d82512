//! Analysis services on top of the decode pipeline
//!
//! Both services consume the stream of decoded UAV updates; neither is wired
//! into the session manager's event path. A caller who wants live analysis
//! feeds each decoded record in itself, which keeps the session manager
//! single-responsibility and lets batch or offline callers drive the
//! analyzers directly.

pub mod anomaly;
pub mod trajectory;

pub use anomaly::{
    Anomaly,
    AnomalyConfig,
    AnomalyDetector,
    AnomalySeverity,
    AnomalyType,
};
pub use trajectory::{
    FlightPattern,
    PredictedPosition,
    Trajectory,
    TrajectoryAnalyzer,
    TrajectoryConfig,
    TrajectoryPoint,
    TrajectoryStats,
};
