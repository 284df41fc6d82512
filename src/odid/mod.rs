//! ASTM F3411 (Open Drone ID) message decoder
//!
//! - [ASTM F3411][1] - the Remote ID standard; defines the seven broadcast
//!   message types and their 25 byte encoding
//! - [opendroneid-core-c][2] - reference encoder/decoder, useful for
//!   cross-checking field layouts
//!
//! One broadcast message is always 25 bytes: a header byte with the message
//! type in the upper nibble and protocol version in the lower nibble,
//! followed by a 24 byte body. The Message Pack container (type 0xF) carries
//! up to 15 such messages back to back.
//!
//! [1]: https://www.astm.org/f3411-22a.html
//! [2]: https://github.com/opendroneid/opendroneid-core-c

pub mod asd_stan;
pub mod cn_rid;

use bytes::Buf;
use ridbee_types::{
    HeightReference,
    HorizontalAccuracy,
    LocationVector,
    OperatorId,
    OperatorLocationType,
    SelfId,
    SpeedAccuracy,
    SystemInfo,
    UavIdType,
    UavObject,
    UavStatus,
    UavType,
    VerticalAccuracy,
};

use crate::util::{
    decode_ascii_field,
    BufReadBytesExt,
};

/// Length of one broadcast message.
pub const MESSAGE_LENGTH: usize = 25;

/// Length of the body following the header byte.
pub const BODY_LENGTH: usize = MESSAGE_LENGTH - 1;

/// Length of the Basic ID identifier field.
pub const BASIC_ID_LENGTH: usize = 20;

/// Length of the Self-ID description field.
pub const SELF_ID_LENGTH: usize = 23;

/// Length of the Operator ID field.
pub const OPERATOR_ID_LENGTH: usize = 20;

/// Length of the raw Authentication payload captured per message.
pub const AUTH_DATA_LENGTH: usize = 24;

/// Most sub-messages a Message Pack may carry.
pub const MAX_PACK_MESSAGES: usize = 15;

const LAT_LON_MULTIPLIER: f64 = 1e-7;
const ALTITUDE_MULTIPLIER: f32 = 0.5;
const ALTITUDE_OFFSET: f32 = -1000.0;
const SPEED_MULTIPLIER: f32 = 0.25;
const SPEED_MULTIPLIER_HIGH: f32 = 0.75;
const SPEED_OFFSET_HIGH: f32 = 255.0 * 0.25;
const VERTICAL_SPEED_MULTIPLIER: f32 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("buffer with length 0 doesn't contain a message header")]
    NoHeader,

    #[error("unknown message type: {value:#x}")]
    UnknownMessageType { value: u8 },

    #[error(
        "expected {expected_length} bytes for the message, but buffer is only {buffer_length} bytes long"
    )]
    Truncated {
        expected_length: usize,
        buffer_length: usize,
    },

    #[error("message pack declares {declared} byte sub-messages, expected {MESSAGE_LENGTH}")]
    InvalidPackSize { declared: usize },

    #[error("message pack declares {count} sub-messages, at most {MAX_PACK_MESSAGES} allowed")]
    InvalidPackCount { count: usize },

    #[error(
        "message pack declares {count} sub-messages ({required} bytes), but only {available} bytes follow"
    )]
    PackOverrun {
        count: usize,
        required: usize,
        available: usize,
    },

    #[error("message pack nested inside a message pack")]
    NestedPack,
}

/// Message type nibble of the header byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageType {
    BasicId,
    Location,
    Authentication,
    SelfId,
    System,
    OperatorId,
    MessagePack,
}

impl MessageType {
    pub const fn from_u8(byte: u8) -> Result<Self, DecodeError> {
        match byte {
            0x0 => Ok(Self::BasicId),
            0x1 => Ok(Self::Location),
            0x2 => Ok(Self::Authentication),
            0x3 => Ok(Self::SelfId),
            0x4 => Ok(Self::System),
            0x5 => Ok(Self::OperatorId),
            0xf => Ok(Self::MessagePack),
            _ => Err(DecodeError::UnknownMessageType { value: byte }),
        }
    }

    pub const fn as_u8(&self) -> u8 {
        match self {
            Self::BasicId => 0x0,
            Self::Location => 0x1,
            Self::Authentication => 0x2,
            Self::SelfId => 0x3,
            Self::System => 0x4,
            Self::OperatorId => 0x5,
            Self::MessagePack => 0xf,
        }
    }
}

/// One decoded broadcast message.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    BasicId {
        id_type: UavIdType,
        uav_type: UavType,
        /// Trimmed identifier, up to 20 ASCII characters.
        id: String,
    },
    Location(LocationVector),
    /// Raw authentication payload; the contents are not validated.
    Authentication { data: [u8; AUTH_DATA_LENGTH] },
    SelfId(SelfId),
    System(SystemInfo),
    OperatorId(OperatorId),
    /// Message Pack container. Sub-messages decode best-effort: an
    /// undecodable sub-message is skipped, the rest are kept.
    Pack(Vec<Message>),
}

impl Message {
    /// Decodes one broadcast message, consuming exactly the message's bytes
    /// from the buffer (25 for a plain message, 2 + 25·count for a pack).
    ///
    /// The protocol version nibble is decoded but not validated.
    pub fn decode<B: Buf>(buffer: &mut B) -> Result<Self, DecodeError> {
        Self::decode_inner(buffer, true)
    }

    fn decode_inner<B: Buf>(buffer: &mut B, allow_pack: bool) -> Result<Self, DecodeError> {
        let buffer_length = buffer.remaining();

        let byte_0 = buffer.try_get_u8().map_err(|_| DecodeError::NoHeader)?;
        let message_type = MessageType::from_u8(byte_0 >> 4)?;
        let _version = byte_0 & 0x0f;

        if message_type == MessageType::MessagePack {
            if !allow_pack {
                return Err(DecodeError::NestedPack);
            }
            return Self::decode_pack(buffer, buffer_length);
        }

        let body: [u8; BODY_LENGTH] =
            buffer
                .try_get_bytes()
                .map_err(|_| DecodeError::Truncated {
                    expected_length: MESSAGE_LENGTH,
                    buffer_length,
                })?;

        let message = match message_type {
            MessageType::BasicId => Self::decode_basic_id(&body),
            MessageType::Location => Self::decode_location(&body),
            MessageType::Authentication => Self::Authentication { data: body },
            MessageType::SelfId => Self::decode_self_id(&body),
            MessageType::System => Self::decode_system(&body),
            MessageType::OperatorId => Self::decode_operator_id(&body),
            MessageType::MessagePack => unreachable!(),
        };

        Ok(message)
    }

    fn decode_pack<B: Buf>(buffer: &mut B, buffer_length: usize) -> Result<Self, DecodeError> {
        // byte        1        2
        //      size of one sub-message, then sub-message count

        let header: [u8; 2] = buffer.try_get_bytes().map_err(|_| DecodeError::Truncated {
            expected_length: 3,
            buffer_length,
        })?;
        let declared = usize::from(header[0]);
        let count = usize::from(header[1]);

        if declared != MESSAGE_LENGTH {
            return Err(DecodeError::InvalidPackSize { declared });
        }
        if count > MAX_PACK_MESSAGES {
            return Err(DecodeError::InvalidPackCount { count });
        }

        let required = count * MESSAGE_LENGTH;
        let available = buffer.remaining();
        if required > available {
            return Err(DecodeError::PackOverrun {
                count,
                required,
                available,
            });
        }

        let mut messages = Vec::with_capacity(count);
        for _ in 0..count {
            let sub: [u8; MESSAGE_LENGTH] = buffer
                .try_get_bytes()
                .expect("pack length checked above");
            match Self::decode_inner(&mut &sub[..], false) {
                Ok(message) => messages.push(message),
                Err(error) => {
                    tracing::debug!(?error, "skipping undecodable pack sub-message");
                }
            }
        }

        Ok(Self::Pack(messages))
    }

    fn decode_basic_id(body: &[u8; BODY_LENGTH]) -> Self {
        // byte        1        2..21
        // bit  01234567
        //      aaaabbbb iiii...   a = id type, b = aircraft type, i = id

        Self::BasicId {
            id_type: UavIdType::from_u8(body[0] >> 4).unwrap_or_default(),
            uav_type: UavType::from_u8(body[0] & 0x0f).unwrap_or_default(),
            id: decode_ascii_field(&body[1..1 + BASIC_ID_LENGTH]),
        }
    }

    fn decode_location(body: &[u8; BODY_LENGTH]) -> Self {
        let buffer = &mut &body[..];

        // byte        1
        // bit  01234567
        //      ssss.hes   s = status, h = height reference, e = east/west
        //                 (unused), s = speed multiplier
        let status_byte = buffer.get_u8();
        let status = UavStatus::from_u8(status_byte >> 4).unwrap_or_default();
        let height_ref = HeightReference::from_u8((status_byte >> 2) & 0x01).unwrap_or_default();
        let speed_multiplier = status_byte & 0x01 != 0;

        let direction = decode_direction(buffer.get_u8());
        let speed_horizontal = decode_speed(buffer.get_u8(), speed_multiplier);
        let speed_vertical = decode_vertical_speed(buffer.get_i8());

        let latitude = decode_lat_lon(buffer.get_i32_le());
        let longitude = decode_lat_lon(buffer.get_i32_le());

        let altitude_baro = decode_altitude(buffer.get_u16_le());
        let altitude_geo = decode_altitude(buffer.get_u16_le());
        let height = decode_altitude(buffer.get_u16_le());

        // byte       20       21
        // bit  01234567 01234567
        //      hhhhvvvv ....ssss   accuracy buckets
        let accuracy_1 = buffer.get_u8();
        let accuracy_2 = buffer.get_u8();

        let timestamp_offset = buffer.get_u16_le();

        Self::Location(LocationVector {
            valid: true,
            latitude,
            longitude,
            altitude_baro,
            altitude_geo,
            height,
            height_ref,
            speed_horizontal,
            speed_vertical,
            direction,
            h_accuracy: HorizontalAccuracy::from_u8(accuracy_1 >> 4).unwrap_or_default(),
            v_accuracy: VerticalAccuracy::from_u8(accuracy_1 & 0x0f).unwrap_or_default(),
            speed_accuracy: SpeedAccuracy::from_u8(accuracy_2 & 0x0f).unwrap_or_default(),
            status,
            timestamp_offset,
        })
    }

    fn decode_self_id(body: &[u8; BODY_LENGTH]) -> Self {
        Self::SelfId(SelfId {
            valid: true,
            description_type: body[0],
            description: decode_ascii_field(&body[1..1 + SELF_ID_LENGTH]),
        })
    }

    fn decode_system(body: &[u8; BODY_LENGTH]) -> Self {
        let buffer = &mut &body[..];

        // byte        1
        // bit  01234567
        //      ..ll....   l = operator location type
        let flags = buffer.get_u8();
        let location_type =
            OperatorLocationType::from_u8((flags >> 4) & 0x03).unwrap_or_default();

        let operator_latitude = decode_lat_lon(buffer.get_i32_le());
        let operator_longitude = decode_lat_lon(buffer.get_i32_le());

        let area_count = buffer.get_u16_le();
        // encoded in 10 m units, stored in meters
        let area_radius = u16::from(buffer.get_u8()) * 10;
        let area_ceiling = decode_altitude(buffer.get_u16_le());
        let area_floor = decode_altitude(buffer.get_u16_le());

        let timestamp = buffer.get_u32_le();

        Self::System(SystemInfo {
            valid: true,
            location_type,
            operator_latitude,
            operator_longitude,
            area_ceiling,
            area_floor,
            area_count,
            area_radius,
            timestamp,
            eu: None,
        })
    }

    fn decode_operator_id(body: &[u8; BODY_LENGTH]) -> Self {
        Self::OperatorId(OperatorId {
            valid: true,
            id_type: body[0],
            id: decode_ascii_field(&body[1..1 + OPERATOR_ID_LENGTH]),
        })
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Message::BasicId { .. } => MessageType::BasicId,
            Message::Location(_) => MessageType::Location,
            Message::Authentication { .. } => MessageType::Authentication,
            Message::SelfId(_) => MessageType::SelfId,
            Message::System(_) => MessageType::System,
            Message::OperatorId(_) => MessageType::OperatorId,
            Message::Pack(_) => MessageType::MessagePack,
        }
    }

    /// Merges this message into an aggregated UAV record.
    ///
    /// Every applied message bumps `message_count`; a pack bumps it once per
    /// contained sub-message, the container itself is not counted.
    pub fn apply(&self, uav: &mut UavObject) {
        match self {
            Message::BasicId {
                id_type,
                uav_type,
                id,
            } => {
                uav.id = id.clone();
                uav.id_type = *id_type;
                uav.uav_type = *uav_type;
                uav.message_count += 1;
            }
            Message::Location(location) => {
                uav.location = *location;
                uav.message_count += 1;
            }
            Message::Authentication { data } => {
                uav.auth_data = data.to_vec();
                uav.message_count += 1;
            }
            Message::SelfId(self_id) => {
                uav.self_id = self_id.clone();
                uav.message_count += 1;
            }
            Message::System(system) => {
                uav.system = *system;
                uav.message_count += 1;
            }
            Message::OperatorId(operator_id) => {
                uav.operator_id = operator_id.clone();
                uav.message_count += 1;
            }
            Message::Pack(messages) => {
                for message in messages {
                    message.apply(uav);
                }
            }
        }
    }
}

fn decode_lat_lon(encoded: i32) -> f64 {
    f64::from(encoded) * LAT_LON_MULTIPLIER
}

/// Altitude encoding: 0.5 m steps with a -1000 m offset. The raw value 0 is
/// the "field absent" literal and decodes to 0 m, not -1000 m.
fn decode_altitude(encoded: u16) -> f32 {
    if encoded == 0 {
        return 0.0;
    }
    f32::from(encoded) * ALTITUDE_MULTIPLIER + ALTITUDE_OFFSET
}

/// Horizontal speed: 0.25 m/s steps, or 0.75 m/s steps offset by 63.75 m/s
/// when the multiplier bit is set. 255 is the "unknown" sentinel.
fn decode_speed(encoded: u8, multiplier: bool) -> f32 {
    if encoded == 255 {
        return f32::NAN;
    }
    if multiplier {
        f32::from(encoded) * SPEED_MULTIPLIER_HIGH + SPEED_OFFSET_HIGH
    }
    else {
        f32::from(encoded) * SPEED_MULTIPLIER
    }
}

/// Vertical speed: signed 0.5 m/s steps, positive up. 63 is the "unknown"
/// sentinel.
fn decode_vertical_speed(encoded: i8) -> f32 {
    if encoded == 63 {
        return f32::NAN;
    }
    f32::from(encoded) * VERTICAL_SPEED_MULTIPLIER
}

/// Track direction in whole degrees; values above 360 decode as unknown.
fn decode_direction(encoded: u8) -> f32 {
    if u16::from(encoded) > 360 {
        return f32::NAN;
    }
    f32::from(encoded)
}
