//! # ridbee — drone Remote-ID broadcast decoder
//!
//! Drones mandated by ASTM F3411 (US) and ASD-STAN EN 4709-002 (EU) transmit
//! an "electronic license plate" over Bluetooth advertising and Wi-Fi
//! beacon/NAN frames. This crate turns the raw payloads a receiver captures
//! into structured aircraft telemetry:
//!
//! - [`frame`]: locates the Remote-ID payload inside the transport envelope
//!   (BLE legacy/extended advertising, 802.11 vendor IE, NAN service data)
//! - [`odid`]: decodes the 25-byte broadcast messages, including the Message
//!   Pack container and the ASD-STAN EU extensions
//! - [`session`]: merges successive messages per aircraft into live
//!   [`types::UavObject`] records, with expiry and lifecycle events
//! - [`analysis`]: flags physically impossible or replayed broadcasts and
//!   maintains per-aircraft trajectories with prediction and pattern
//!   classification
//!
//! [`RemoteIdParser`] is the assembled pipeline:
//!
//! ```
//! use ridbee::{types::Transport, RemoteIdParser};
//!
//! let mut parser = RemoteIdParser::default();
//! # let captured: &[u8] = &[];
//! let result = parser.parse_bytes(captured, -60, Transport::BtLegacy);
//! if result.success {
//!     println!("saw {:?}", result.uav);
//! }
//! for uav in parser.active_uavs() {
//!     println!("{}: {} messages", uav.id, uav.message_count);
//! }
//! ```
//!
//! The radio layer is out of scope: scanners hand in already-captured byte
//! buffers with an RSSI and a transport tag. The core is synchronous and
//! single-threaded by design; callers serialize access to one parser
//! instance, and separate instances are independent.

pub mod analysis;
pub mod frame;
pub mod geo;
pub mod odid;
pub mod parser;
pub mod session;
mod util;

pub use ridbee_types as types;

pub use crate::{
    parser::{
        ParseError,
        ParseResult,
        ParserConfig,
        RemoteIdParser,
    },
    session::SessionManager,
};
