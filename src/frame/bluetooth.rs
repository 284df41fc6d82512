//! Bluetooth advertising envelopes
//!
//! Remote ID over Bluetooth uses a Service Data AD structure with the ASTM
//! 16-bit UUID 0xFFFA. Legacy (4.x) advertisements carry a well-formed AD
//! structure list; BT5 extended advertisements embed the same service-data
//! tuple somewhere in a larger payload, so a looser scan is used there.
//!
//! The byte after the UUID is a message counter, then the message(s) follow.

use ridbee_types::Transport;

/// Service Data - 16-bit UUID.
pub const AD_TYPE_SERVICE_DATA: u8 = 0x16;

/// ASTM Remote ID service UUID.
pub const SERVICE_UUID: u16 = 0xfffa;

/// Service UUID as it appears on the wire.
const SERVICE_UUID_LE: [u8; 2] = SERVICE_UUID.to_le_bytes();

/// Smallest extended-advertising payload worth scanning.
const EXTENDED_MIN_LENGTH: usize = 7;

/// Remote-ID service data located inside an advertising payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServiceData<'a> {
    /// Which advertising flavor matched.
    pub transport: Transport,
    /// Message bytes, with the leading message counter already skipped.
    pub messages: &'a [u8],
}

/// Locates Remote-ID service data in a Bluetooth advertising payload.
///
/// The structured legacy AD walk is tried first; if the payload is not a
/// well-formed AD list, the looser extended-advertising scan runs and the
/// result is tagged [`Transport::BtExtended`].
pub fn find_service_data(payload: &[u8]) -> Option<ServiceData<'_>> {
    if let Some(messages) = find_legacy(payload) {
        return Some(ServiceData {
            transport: Transport::BtLegacy,
            messages,
        });
    }

    find_extended(payload).map(|messages| {
        ServiceData {
            transport: Transport::BtExtended,
            messages,
        }
    })
}

/// Whether the payload carries the Remote-ID service-data signature at all.
pub fn is_remote_id(payload: &[u8]) -> bool {
    find_service_data(payload).is_some()
}

/// Walks the `{length, ad_type, data[length - 1]}` structure list of a legacy
/// advertisement.
///
/// A zero length or a declared length past the buffer end terminates the
/// walk. The signature is tested before the length is trusted, so a
/// truncated Remote-ID structure still classifies (and later fails decode
/// with a truncation error); its data is clamped to the buffer end. An AD
/// too short to carry anything after the UUID is refused.
fn find_legacy(payload: &[u8]) -> Option<&[u8]> {
    let mut i = 0;

    while i + 1 < payload.len() {
        let length = usize::from(payload[i]);
        if length == 0 {
            break;
        }

        if payload[i + 1] == AD_TYPE_SERVICE_DATA
            && length >= 4
            && payload.get(i + 2..i + 4) == Some(&SERVICE_UUID_LE[..])
        {
            let start = i + 4;
            let end = (i + 1 + length).min(payload.len());
            let data = &payload[start..end];
            // leading message counter
            return Some(data.get(1..).unwrap_or(&[]));
        }

        if i + 1 + length > payload.len() {
            break;
        }
        i += 1 + length;
    }

    None
}

/// Scans an extended-advertising payload for the service-data tuple anywhere,
/// ignoring AD structure lengths. First match wins.
fn find_extended(payload: &[u8]) -> Option<&[u8]> {
    if payload.len() < EXTENDED_MIN_LENGTH {
        return None;
    }

    for i in 0..payload.len().saturating_sub(2) {
        if payload[i] == AD_TYPE_SERVICE_DATA
            && payload.get(i + 1..i + 3) == Some(&SERVICE_UUID_LE[..])
        {
            let data = &payload[i + 3..];
            // leading message counter
            return Some(data.get(1..).unwrap_or(&[]));
        }
    }

    None
}
