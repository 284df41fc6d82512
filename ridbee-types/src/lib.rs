//! Shared data model for the ridbee Remote-ID decoder.
//!
//! These are the types that cross the boundary between the decode engine and
//! its consumers (scanners, servers, binding layers): the raw frame handed in
//! by a radio receiver, the aggregated per-aircraft [`UavObject`], and the
//! enumerations defined by ASTM F3411 / ASD-STAN EN 4709-002.
//!
//! Everything here is plain data. The decode pipeline lives in the `ridbee`
//! crate.

use std::{
    fmt::Display,
    str::FromStr,
};

use bitflags::bitflags;
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Broadcast protocol a frame was decoded with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Unknown,
    /// ASTM F3411 (USA / international).
    AstmF3411,
    /// ASD-STAN EN 4709-002 (EU).
    AsdStan,
    /// GB/T (China). Reserved; the specification is not public.
    CnRid,
}

impl Protocol {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Unknown),
            1 => Some(Self::AstmF3411),
            2 => Some(Self::AsdStan),
            3 => Some(Self::CnRid),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::AstmF3411 => 1,
            Self::AsdStan => 2,
            Self::CnRid => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::AstmF3411 => "astm_f3411",
            Self::AsdStan => "asd_stan",
            Self::CnRid => "cn_rid",
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ProtocolFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "astm_f3411" => Ok(Self::AstmF3411),
            "asd_stan" => Ok(Self::AsdStan),
            "cn_rid" => Ok(Self::CnRid),
            _ => {
                Err(ProtocolFromStrError {
                    input: s.to_owned(),
                })
            }
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("Invalid protocol: {input}")]
pub struct ProtocolFromStrError {
    pub input: String,
}

/// Radio transport a frame was captured on.
///
/// The receiver tags each [`RawFrame`] with this; the envelope classifier may
/// refine it (e.g. a generic Bluetooth capture turning out to be an extended
/// advertisement).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    #[default]
    Unknown,
    /// Bluetooth 4.x legacy advertising.
    BtLegacy,
    /// Bluetooth 5.x extended advertising.
    BtExtended,
    /// Wi-Fi beacon (or probe-response / action) management frame.
    WifiBeacon,
    /// Wi-Fi Neighbor Awareness Networking service discovery.
    WifiNan,
}

impl Transport {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Unknown),
            1 => Some(Self::BtLegacy),
            2 => Some(Self::BtExtended),
            3 => Some(Self::WifiBeacon),
            4 => Some(Self::WifiNan),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::BtLegacy => 1,
            Self::BtExtended => 2,
            Self::WifiBeacon => 3,
            Self::WifiNan => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::BtLegacy => "bt_legacy",
            Self::BtExtended => "bt_extended",
            Self::WifiBeacon => "wifi_beacon",
            Self::WifiNan => "wifi_nan",
        }
    }
}

impl Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Transport {
    type Err = TransportFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "bt_legacy" => Ok(Self::BtLegacy),
            "bt_extended" => Ok(Self::BtExtended),
            "wifi_beacon" => Ok(Self::WifiBeacon),
            "wifi_nan" => Ok(Self::WifiNan),
            _ => {
                Err(TransportFromStrError {
                    input: s.to_owned(),
                })
            }
        }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("Invalid transport: {input}")]
pub struct TransportFromStrError {
    pub input: String,
}

/// Raw frame handed to the parser by the radio layer.
///
/// The payload is whatever the receiver captured: a BLE advertisement, an
/// extended-advertising payload, or a full 802.11 management frame. The core
/// borrows it for the duration of a parse and never retains it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFrame {
    pub payload: Vec<u8>,
    /// Received signal strength in dBm.
    pub rssi: i8,
    pub transport: Transport,
    /// Reception instant, stamped by the receiver.
    pub timestamp: DateTime<Utc>,
}

impl RawFrame {
    /// Frame stamped with the current time.
    pub fn new(payload: Vec<u8>, rssi: i8, transport: Transport) -> Self {
        Self {
            payload,
            rssi,
            transport,
            timestamp: Utc::now(),
        }
    }
}

/// Kind of identifier carried in a Basic ID message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UavIdType {
    #[default]
    None,
    /// Manufacturer serial number (ANSI/CTA-2063-A).
    SerialNumber,
    /// Civil aviation authority registration.
    CaaRegistration,
    /// UTM-system assigned UUID.
    UtmAssigned,
    /// Specific session ID.
    SpecificSession,
}

impl UavIdType {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::None),
            1 => Some(Self::SerialNumber),
            2 => Some(Self::CaaRegistration),
            3 => Some(Self::UtmAssigned),
            4 => Some(Self::SpecificSession),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::SerialNumber => 1,
            Self::CaaRegistration => 2,
            Self::UtmAssigned => 3,
            Self::SpecificSession => 4,
        }
    }
}

/// Aircraft category, 16 values as defined by ASTM F3411.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UavType {
    #[default]
    None,
    Aeroplane,
    HelicopterOrMultirotor,
    Gyroplane,
    /// Fixed wing with VTOL capability.
    HybridLift,
    Ornithopter,
    Glider,
    Kite,
    FreeBalloon,
    CaptiveBalloon,
    Airship,
    FreeFallParachute,
    Rocket,
    TetheredPowered,
    GroundObstacle,
    Other,
}

impl UavType {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::None),
            1 => Some(Self::Aeroplane),
            2 => Some(Self::HelicopterOrMultirotor),
            3 => Some(Self::Gyroplane),
            4 => Some(Self::HybridLift),
            5 => Some(Self::Ornithopter),
            6 => Some(Self::Glider),
            7 => Some(Self::Kite),
            8 => Some(Self::FreeBalloon),
            9 => Some(Self::CaptiveBalloon),
            10 => Some(Self::Airship),
            11 => Some(Self::FreeFallParachute),
            12 => Some(Self::Rocket),
            13 => Some(Self::TetheredPowered),
            14 => Some(Self::GroundObstacle),
            15 => Some(Self::Other),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Aeroplane => 1,
            Self::HelicopterOrMultirotor => 2,
            Self::Gyroplane => 3,
            Self::HybridLift => 4,
            Self::Ornithopter => 5,
            Self::Glider => 6,
            Self::Kite => 7,
            Self::FreeBalloon => 8,
            Self::CaptiveBalloon => 9,
            Self::Airship => 10,
            Self::FreeFallParachute => 11,
            Self::Rocket => 12,
            Self::TetheredPowered => 13,
            Self::GroundObstacle => 14,
            Self::Other => 15,
        }
    }
}

/// What the operator location in a System message refers to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperatorLocationType {
    #[default]
    Takeoff,
    /// Dynamic position from the operator's GNSS receiver.
    LiveGnss,
    Fixed,
}

impl OperatorLocationType {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Takeoff),
            1 => Some(Self::LiveGnss),
            2 => Some(Self::Fixed),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Takeoff => 0,
            Self::LiveGnss => 1,
            Self::Fixed => 2,
        }
    }
}

/// Reference surface for the height field of a Location message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HeightReference {
    #[default]
    Takeoff,
    Ground,
}

impl HeightReference {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Takeoff),
            1 => Some(Self::Ground),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Takeoff => 0,
            Self::Ground => 1,
        }
    }
}

/// Horizontal accuracy bucket (ASTM F3411 table).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAccuracy {
    #[default]
    Unknown,
    LessThan10Nm,
    LessThan4Nm,
    LessThan2Nm,
    LessThan1Nm,
    LessThan0_5Nm,
    LessThan0_3Nm,
    LessThan0_1Nm,
    LessThan0_05Nm,
    LessThan30M,
    LessThan10M,
    LessThan3M,
    LessThan1M,
}

impl HorizontalAccuracy {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Unknown),
            1 => Some(Self::LessThan10Nm),
            2 => Some(Self::LessThan4Nm),
            3 => Some(Self::LessThan2Nm),
            4 => Some(Self::LessThan1Nm),
            5 => Some(Self::LessThan0_5Nm),
            6 => Some(Self::LessThan0_3Nm),
            7 => Some(Self::LessThan0_1Nm),
            8 => Some(Self::LessThan0_05Nm),
            9 => Some(Self::LessThan30M),
            10 => Some(Self::LessThan10M),
            11 => Some(Self::LessThan3M),
            12 => Some(Self::LessThan1M),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::LessThan10Nm => 1,
            Self::LessThan4Nm => 2,
            Self::LessThan2Nm => 3,
            Self::LessThan1Nm => 4,
            Self::LessThan0_5Nm => 5,
            Self::LessThan0_3Nm => 6,
            Self::LessThan0_1Nm => 7,
            Self::LessThan0_05Nm => 8,
            Self::LessThan30M => 9,
            Self::LessThan10M => 10,
            Self::LessThan3M => 11,
            Self::LessThan1M => 12,
        }
    }
}

/// Vertical accuracy bucket.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAccuracy {
    #[default]
    Unknown,
    LessThan150M,
    LessThan45M,
    LessThan25M,
    LessThan10M,
    LessThan3M,
    LessThan1M,
}

impl VerticalAccuracy {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Unknown),
            1 => Some(Self::LessThan150M),
            2 => Some(Self::LessThan45M),
            3 => Some(Self::LessThan25M),
            4 => Some(Self::LessThan10M),
            5 => Some(Self::LessThan3M),
            6 => Some(Self::LessThan1M),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::LessThan150M => 1,
            Self::LessThan45M => 2,
            Self::LessThan25M => 3,
            Self::LessThan10M => 4,
            Self::LessThan3M => 5,
            Self::LessThan1M => 6,
        }
    }
}

/// Speed accuracy bucket.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SpeedAccuracy {
    #[default]
    Unknown,
    LessThan10Mps,
    LessThan3Mps,
    LessThan1Mps,
    LessThan0_3Mps,
}

impl SpeedAccuracy {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Unknown),
            1 => Some(Self::LessThan10Mps),
            2 => Some(Self::LessThan3Mps),
            3 => Some(Self::LessThan1Mps),
            4 => Some(Self::LessThan0_3Mps),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::LessThan10Mps => 1,
            Self::LessThan3Mps => 2,
            Self::LessThan1Mps => 3,
            Self::LessThan0_3Mps => 4,
        }
    }
}

/// Operational status reported in a Location message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UavStatus {
    #[default]
    Undeclared,
    Ground,
    Airborne,
    Emergency,
    RemoteIdFailure,
}

impl UavStatus {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Undeclared),
            1 => Some(Self::Ground),
            2 => Some(Self::Airborne),
            3 => Some(Self::Emergency),
            4 => Some(Self::RemoteIdFailure),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Undeclared => 0,
            Self::Ground => 1,
            Self::Airborne => 2,
            Self::Emergency => 3,
            Self::RemoteIdFailure => 4,
        }
    }
}

/// Instantaneous kinematics from a Location message.
///
/// Sentinel encodings ("speed unknown", "direction unknown") decode to
/// `f32::NAN`; consumers treat NaN as absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationVector {
    pub valid: bool,
    /// Degrees, [-90, 90].
    pub latitude: f64,
    /// Degrees, [-180, 180].
    pub longitude: f64,
    /// Barometric altitude in meters.
    pub altitude_baro: f32,
    /// Geodetic (WGS-84) altitude in meters.
    pub altitude_geo: f32,
    /// Height above [`Self::height_ref`] in meters.
    pub height: f32,
    pub height_ref: HeightReference,
    /// Ground speed in m/s.
    pub speed_horizontal: f32,
    /// Vertical speed in m/s, positive up.
    pub speed_vertical: f32,
    /// Track direction in degrees, [0, 360).
    pub direction: f32,
    pub h_accuracy: HorizontalAccuracy,
    pub v_accuracy: VerticalAccuracy,
    pub speed_accuracy: SpeedAccuracy,
    pub status: UavStatus,
    /// Offset from the current full hour in 0.1 s units.
    pub timestamp_offset: u16,
}

bitflags! {
    /// Flag byte of the ASD-STAN EU System extension.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EuFlags: u8 {
        const GEO_AWARENESS = 0b0000_0001;
        const REMOTE_PILOT_ID = 0b0000_0010;
    }
}

impl Default for EuFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// EU UAS classification (ASD-STAN System extension).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EuClassification {
    #[default]
    Undefined,
    Open,
    Specific,
    Certified,
}

impl EuClassification {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Undefined),
            1 => Some(Self::Open),
            2 => Some(Self::Specific),
            3 => Some(Self::Certified),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::Open => 1,
            Self::Specific => 2,
            Self::Certified => 3,
        }
    }
}

/// EU class mark C0..C6.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EuCategoryClass {
    #[default]
    Undefined,
    C0,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
}

impl EuCategoryClass {
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Undefined),
            1 => Some(Self::C0),
            2 => Some(Self::C1),
            3 => Some(Self::C2),
            4 => Some(Self::C3),
            5 => Some(Self::C4),
            6 => Some(Self::C5),
            7 => Some(Self::C6),
            _ => None,
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::Undefined => 0,
            Self::C0 => 1,
            Self::C1 => 2,
            Self::C2 => 3,
            Self::C3 => 4,
            Self::C4 => 5,
            Self::C5 => 6,
            Self::C6 => 7,
        }
    }
}

/// EU extension block of a System message.
///
/// The public ASD-STAN specification has not finalized these bit positions;
/// treat this as an extension point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuSystemInfo {
    pub classification: EuClassification,
    pub category: EuCategoryClass,
    pub flags: EuFlags,
}

/// Operator and area-of-operation data from a System message.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub valid: bool,
    pub location_type: OperatorLocationType,
    pub operator_latitude: f64,
    pub operator_longitude: f64,
    /// Area operation ceiling in meters.
    pub area_ceiling: f32,
    /// Area operation floor in meters.
    pub area_floor: f32,
    /// Number of aircraft in the operation area.
    pub area_count: u16,
    /// Area radius in meters (encoded on the wire in 10 m units).
    pub area_radius: u16,
    /// Unix timestamp.
    pub timestamp: u32,
    /// EU extension, present when decoded through the ASD-STAN path.
    pub eu: Option<EuSystemInfo>,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            valid: false,
            location_type: OperatorLocationType::Takeoff,
            operator_latitude: 0.0,
            operator_longitude: 0.0,
            area_ceiling: 0.0,
            area_floor: 0.0,
            area_count: 1,
            area_radius: 0,
            timestamp: 0,
            eu: None,
        }
    }
}

/// Free-form description from a Self-ID message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfId {
    pub valid: bool,
    pub description_type: u8,
    /// Up to 23 characters, trailing spaces and NULs trimmed.
    pub description: String,
}

/// Operator registration from an Operator ID message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorId {
    pub valid: bool,
    pub id_type: u8,
    /// Up to 20 characters, trailing spaces and NULs trimmed.
    pub id: String,
}

/// Aggregated per-aircraft record.
///
/// One `UavObject` accumulates everything received from a single aircraft,
/// keyed by its Basic ID. A freshly decoded frame produces a partial record
/// (possibly with an empty id); the session manager merges partials into the
/// live record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UavObject {
    /// Primary identifier (serial number or registration), trimmed ASCII.
    ///
    /// Empty until a Basic ID message has been decoded; only records with a
    /// non-empty id are admitted to the session map.
    pub id: String,
    pub id_type: UavIdType,
    pub uav_type: UavType,

    pub protocol: Protocol,
    pub transport: Transport,

    /// RSSI of the most recent frame, dBm.
    pub rssi: i8,
    /// Reception instant of the most recent frame.
    pub last_seen: DateTime<Utc>,

    pub location: LocationVector,
    pub system: SystemInfo,
    pub self_id: SelfId,
    pub operator_id: OperatorId,

    /// Raw payload of the most recent Authentication message. Interpretation
    /// depends on the authentication type; not validated here.
    pub auth_data: Vec<u8>,

    /// Messages successfully applied to this record, including each
    /// sub-message of a Message Pack.
    pub message_count: u32,
}

impl UavObject {
    /// Empty record stamped with a reception instant.
    pub fn new(last_seen: DateTime<Utc>) -> Self {
        Self {
            last_seen,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_enum_wire_values() {
        for byte in 0..=4u8 {
            assert_eq!(Transport::from_u8(byte).unwrap().as_u8(), byte);
            assert_eq!(UavIdType::from_u8(byte).unwrap().as_u8(), byte);
            assert_eq!(UavStatus::from_u8(byte).unwrap().as_u8(), byte);
        }
        for byte in 0..=15u8 {
            assert_eq!(UavType::from_u8(byte).unwrap().as_u8(), byte);
        }
        for byte in 0..=12u8 {
            assert_eq!(HorizontalAccuracy::from_u8(byte).unwrap().as_u8(), byte);
        }
        assert_eq!(UavType::from_u8(16), None);
        assert_eq!(Transport::from_u8(5), None);
    }

    #[test]
    fn it_parses_transport_strings() {
        assert_eq!(
            "bt_legacy".parse::<Transport>().unwrap(),
            Transport::BtLegacy
        );
        assert_eq!(
            "wifi_beacon".parse::<Transport>().unwrap(),
            Transport::WifiBeacon
        );
        assert!("bluetooth".parse::<Transport>().is_err());
        assert_eq!(Transport::BtExtended.to_string(), "bt_extended");
    }

    #[test]
    fn it_defaults_system_info_area_count_to_one() {
        let system = SystemInfo::default();
        assert!(!system.valid);
        assert_eq!(system.area_count, 1);
        assert_eq!(system.eu, None);
    }
}
