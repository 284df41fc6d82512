//! Parser façade
//!
//! The single entry point tying the pipeline together: envelope
//! classification, message decoding, and the session map. One frame in, one
//! [`ParseResult`] out; event callbacks fire synchronously inside
//! [`RemoteIdParser::parse`] before it returns.
//!
//! Enabled protocols are tried in a fixed priority order: ASTM over
//! Bluetooth, then Wi-Fi, then ASD-STAN, then the reserved CN-RID slot.
//! ASTM and ASD-STAN share an envelope, so with both enabled ASTM wins and
//! frames are tagged as ASTM; this is a documented choice, not a
//! correctness requirement.

use chrono::{
    DateTime,
    Utc,
};
use ridbee_types::{
    Protocol,
    RawFrame,
    Transport,
    UavObject,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    frame::{
        bluetooth,
        wifi,
        EnvelopeError,
    },
    odid::{
        self,
        asd_stan,
        cn_rid,
        Message,
    },
    session::SessionManager,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Soft expiry for session entries; has no effect until
    /// [`RemoteIdParser::cleanup`] runs.
    pub uav_timeout_ms: u32,
    /// Merge decoded records into the session map. When false, records are
    /// returned but not tracked.
    pub enable_deduplication: bool,
    /// ASTM F3411 envelopes and messages (Bluetooth and Wi-Fi).
    pub enable_astm: bool,
    /// ASD-STAN EN 4709-002. Shares the ASTM envelope; with both enabled,
    /// ASTM wins.
    pub enable_asd: bool,
    /// Reserved GB/T slot.
    pub enable_cn: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            uav_timeout_ms: 30_000,
            enable_deduplication: true,
            enable_astm: true,
            enable_asd: false,
            enable_cn: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty payload")]
    EmptyPayload,

    #[error("no matching protocol decoder")]
    NoMatchingProtocol,

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Decode(#[from] odid::DecodeError),
}

/// Outcome of parsing one frame.
#[derive(Clone, Debug, Default)]
pub struct ParseResult {
    /// Whether a complete decode succeeded.
    pub success: bool,
    /// Whether the payload matched an enabled protocol envelope, regardless
    /// of decode success.
    pub is_remote_id: bool,
    /// Protocol that decoded the frame; [`Protocol::Unknown`] on failure.
    pub protocol: Protocol,
    /// Diagnostic when `success` is false.
    pub error: Option<ParseError>,
    /// The decoded (possibly partial) record; present only on success.
    pub uav: Option<UavObject>,
}

impl ParseResult {
    fn failure(is_remote_id: bool, error: ParseError) -> Self {
        Self {
            is_remote_id,
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Remote-ID parser: decode pipeline plus live session tracking.
///
/// All methods must be serialized by the caller; separate parser instances
/// are independent. The struct is not clonable, and moving it leaves the
/// source unusable, as moves do.
#[derive(Debug)]
pub struct RemoteIdParser {
    config: ParserConfig,
    session: SessionManager,
}

impl Default for RemoteIdParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl RemoteIdParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            session: SessionManager::new(config.uav_timeout_ms),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one captured frame.
    ///
    /// Work is bounded by the payload length and the number of enabled
    /// protocols; the payload is only borrowed and never retained.
    pub fn parse(&mut self, frame: &RawFrame) -> ParseResult {
        if frame.payload.is_empty() {
            return ParseResult::failure(false, ParseError::EmptyPayload);
        }

        if self.config.enable_astm {
            if let Some(service_data) = bluetooth::find_service_data(&frame.payload) {
                return self.decode_messages(
                    frame,
                    service_data.transport,
                    service_data.messages,
                    Protocol::AstmF3411,
                );
            }

            if wifi::is_remote_id(&frame.payload) {
                return self.parse_wifi(frame);
            }
        }

        if self.config.enable_asd {
            if let Some(service_data) = bluetooth::find_service_data(&frame.payload) {
                return self.decode_messages(
                    frame,
                    service_data.transport,
                    service_data.messages,
                    Protocol::AsdStan,
                );
            }
        }

        if self.config.enable_cn && cn_rid::is_remote_id(&frame.payload) {
            // reserved slot; the classifier never matches until GB/T is
            // published
            if let Err(error) = cn_rid::decode(&frame.payload) {
                tracing::debug!(%error, "cn-rid decode unavailable");
            }
        }

        ParseResult::failure(false, ParseError::NoMatchingProtocol)
    }

    /// Convenience wrapper stamping the frame with the current time.
    pub fn parse_bytes(&mut self, payload: &[u8], rssi: i8, transport: Transport) -> ParseResult {
        self.parse(&RawFrame::new(payload.to_vec(), rssi, transport))
    }

    fn parse_wifi(&mut self, frame: &RawFrame) -> ParseResult {
        let extracted = if frame.transport == Transport::WifiNan {
            wifi::extract_nan(&frame.payload).map(|messages| (Transport::WifiNan, messages))
        }
        else {
            wifi::extract_beacon(&frame.payload)
                .map(|messages| (Transport::WifiBeacon, messages))
                .or_else(|_| {
                    wifi::extract_nan(&frame.payload)
                        .map(|messages| (Transport::WifiNan, messages))
                })
        };

        match extracted {
            Ok((transport, messages)) => {
                self.decode_messages(frame, transport, messages, Protocol::AstmF3411)
            }
            Err(error) => ParseResult::failure(true, error.into()),
        }
    }

    fn decode_messages(
        &mut self,
        frame: &RawFrame,
        transport: Transport,
        messages: &[u8],
        protocol: Protocol,
    ) -> ParseResult {
        let decoded = match protocol {
            Protocol::AsdStan => asd_stan::decode_message(messages),
            _ => Message::decode(&mut &messages[..]).map(|message| (message, None)),
        };

        let (message, eu) = match decoded {
            Ok(decoded) => decoded,
            Err(error) => {
                tracing::debug!(?error, %transport, "remote id decode failed");
                return ParseResult::failure(true, error.into());
            }
        };

        let mut uav = UavObject::new(frame.timestamp);
        uav.rssi = frame.rssi;
        uav.transport = transport;
        uav.protocol = protocol;
        message.apply(&mut uav);

        if let Some(eu) = eu {
            if uav.system.valid {
                uav.system.eu = Some(eu);
            }
        }
        if protocol == Protocol::AsdStan
            && uav.operator_id.valid
            && !asd_stan::validate_eu_operator_id(&uav.operator_id.id)
        {
            // metadata only, not a decode failure
            tracing::debug!(operator_id = %uav.operator_id.id, "operator id not in EU format");
        }

        if self.config.enable_deduplication && !uav.id.is_empty() {
            self.session.update(uav.clone());
        }

        tracing::trace!(id = %uav.id, %protocol, %transport, "decoded remote id frame");

        ParseResult {
            success: true,
            is_remote_id: true,
            protocol,
            error: None,
            uav: Some(uav),
        }
    }

    /// Snapshot of all tracked aircraft, most recently seen first.
    pub fn active_uavs(&self) -> Vec<UavObject> {
        self.session.active_uavs()
    }

    pub fn get_uav(&self, id: &str) -> Option<&UavObject> {
        self.session.get(id)
    }

    pub fn active_count(&self) -> usize {
        self.session.count()
    }

    /// Drops all tracked aircraft without firing events.
    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Expires aircraft past the configured timeout, firing `on_timeout` per
    /// removed entry. Returns the removed ids.
    pub fn cleanup(&mut self) -> Vec<String> {
        self.session.cleanup()
    }

    /// [`Self::cleanup`] against an explicit clock.
    pub fn cleanup_at(&mut self, now: DateTime<Utc>) -> Vec<String> {
        self.session.cleanup_at(now)
    }

    pub fn set_on_new_uav(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.session.set_on_new(callback);
    }

    pub fn set_on_uav_update(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.session.set_on_update(callback);
    }

    pub fn set_on_uav_timeout(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.session.set_on_timeout(callback);
    }
}
