//! Wi-Fi envelopes: beacon vendor IEs and NAN service discovery
//!
//! Remote ID over Wi-Fi is carried in a Vendor Specific information element
//! (id 221) with the ASTM OUI inside an 802.11 management frame, or announced
//! through a NAN service-discovery frame identified by the hashed service id.

use crate::frame::EnvelopeError;

/// ASTM-designated OUI.
pub const OUI: [u8; 3] = [0xfa, 0x0b, 0xbc];

/// Vendor-specific type byte following the OUI.
pub const VENDOR_TYPE: u8 = 0x0d;

/// Vendor Specific information element id.
pub const IE_VENDOR_SPECIFIC: u8 = 221;

/// NAN service id: the first 6 bytes of SHA-256("org.opendroneid.remoteid").
pub const NAN_SERVICE_ID: [u8; 6] = [0x88, 0x69, 0x19, 0x9d, 0x92, 0x09];

/// Fixed 802.11 management frame header.
const MGMT_HEADER_LENGTH: usize = 24;

/// Timestamp (8) + beacon interval (2) + capability (2).
const BEACON_FIXED_LENGTH: usize = 12;

// frame control field, low byte
const FC_TYPE_MASK: u16 = 0x000c;
const FC_SUBTYPE_MASK: u16 = 0x00f0;
const FC_TYPE_MGMT: u16 = 0x0000;
const FC_SUBTYPE_BEACON: u16 = 0x0080;
const FC_SUBTYPE_PROBE_RESP: u16 = 0x0050;
const FC_SUBTYPE_ACTION: u16 = 0x00d0;

/// Whether the payload carries either Wi-Fi Remote-ID signature: the ASTM
/// OUI + vendor type, or the NAN service id.
pub fn is_remote_id(payload: &[u8]) -> bool {
    if payload.len() < 10 {
        return false;
    }

    payload
        .windows(4)
        .any(|window| window[..3] == OUI && window[3] == VENDOR_TYPE)
        || payload
            .windows(NAN_SERVICE_ID.len())
            .any(|window| window == NAN_SERVICE_ID)
}

/// Extracts the Remote-ID message bytes from an 802.11 beacon (or probe
/// response / action) frame: header check, skip the fixed beacon fields, walk
/// the IE list for the ASTM vendor IE.
pub fn extract_beacon(payload: &[u8]) -> Result<&[u8], EnvelopeError> {
    if payload.len() < MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH {
        return Err(EnvelopeError::TruncatedHeader);
    }

    let frame_control = u16::from_le_bytes([payload[0], payload[1]]);
    if frame_control & FC_TYPE_MASK != FC_TYPE_MGMT {
        return Err(EnvelopeError::NotManagement);
    }
    let subtype = frame_control & FC_SUBTYPE_MASK;
    if subtype != FC_SUBTYPE_BEACON
        && subtype != FC_SUBTYPE_PROBE_RESP
        && subtype != FC_SUBTYPE_ACTION
    {
        return Err(EnvelopeError::NotManagement);
    }

    let body = &payload[MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH..];
    let ie_data = find_vendor_ie(body).ok_or(EnvelopeError::NoVendorIe)?;

    // vendor type byte, then the messages
    match ie_data.split_first() {
        Some((&VENDOR_TYPE, messages)) if !messages.is_empty() => Ok(messages),
        Some((&VENDOR_TYPE, _)) => Err(EnvelopeError::VendorIeTooShort),
        _ => Err(EnvelopeError::NoVendorIe),
    }
}

/// Extracts Remote-ID message bytes from a NAN service-discovery payload:
/// first by the hashed service id, then by a direct OUI + vendor type scan.
pub fn extract_nan(payload: &[u8]) -> Result<&[u8], EnvelopeError> {
    if payload.len() < 10 {
        return Err(EnvelopeError::NoNanServiceData);
    }

    if let Some(i) = payload
        .windows(NAN_SERVICE_ID.len())
        .position(|window| window == NAN_SERVICE_ID)
    {
        return Ok(&payload[i + NAN_SERVICE_ID.len()..]);
    }

    if let Some(i) = payload
        .windows(4)
        .position(|window| window[..3] == OUI && window[3] == VENDOR_TYPE)
    {
        return Ok(&payload[i + 4..]);
    }

    Err(EnvelopeError::NoNanServiceData)
}

/// Walks the `{id, length, data[length]}` information-element list for a
/// Vendor Specific IE with the ASTM OUI. Returns the IE data after the OUI.
fn find_vendor_ie(body: &[u8]) -> Option<&[u8]> {
    let mut offset = 0;

    while offset + 2 <= body.len() {
        let ie_id = body[offset];
        let ie_length = usize::from(body[offset + 1]);

        if offset + 2 + ie_length > body.len() {
            break;
        }

        let ie_data = &body[offset + 2..offset + 2 + ie_length];
        if ie_id == IE_VENDOR_SPECIFIC && ie_data.len() >= OUI.len() && ie_data[..3] == OUI {
            return Some(&ie_data[3..]);
        }

        offset += 2 + ie_length;
    }

    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn beacon_frame(message: &[u8]) -> Vec<u8> {
        let mut frame = Vec::new();
        // frame control: management / beacon
        frame.extend_from_slice(&FC_SUBTYPE_BEACON.to_le_bytes());
        frame.resize(MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH, 0);

        // SSID IE first, then the vendor IE
        frame.extend_from_slice(&[0x00, 0x04, b'u', b'a', b'v', b'0']);
        frame.push(IE_VENDOR_SPECIFIC);
        frame.push((OUI.len() + 1 + message.len()) as u8);
        frame.extend_from_slice(&OUI);
        frame.push(VENDOR_TYPE);
        frame.extend_from_slice(message);
        frame
    }

    #[test]
    fn it_extracts_the_vendor_ie_from_a_beacon() {
        let message = [0x02u8; 25];
        let frame = beacon_frame(&message);

        assert!(is_remote_id(&frame));
        assert_eq!(extract_beacon(&frame).unwrap(), &message[..]);
    }

    #[test]
    fn it_accepts_probe_responses() {
        let message = [0x02u8; 25];
        let mut frame = beacon_frame(&message);
        frame[0] = FC_SUBTYPE_PROBE_RESP.to_le_bytes()[0];
        assert_eq!(extract_beacon(&frame).unwrap(), &message[..]);
    }

    #[test]
    fn it_rejects_data_frames() {
        let message = [0x02u8; 25];
        let mut frame = beacon_frame(&message);
        frame[0] = 0x08; // data frame
        assert_eq!(extract_beacon(&frame), Err(EnvelopeError::NotManagement));
    }

    #[test]
    fn it_rejects_short_frames() {
        assert_eq!(
            extract_beacon(&[0x80, 0x00]),
            Err(EnvelopeError::TruncatedHeader)
        );
    }

    #[test]
    fn it_requires_the_vendor_type_byte() {
        let message = [0x02u8; 25];
        let mut frame = beacon_frame(&message);
        // corrupt the vendor type byte
        let type_offset = MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH + 6 + 2 + OUI.len();
        frame[type_offset] = 0x0c;
        assert_eq!(extract_beacon(&frame), Err(EnvelopeError::NoVendorIe));
    }

    #[test]
    fn it_rejects_beacons_without_the_vendor_ie() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&FC_SUBTYPE_BEACON.to_le_bytes());
        frame.resize(MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH, 0);
        frame.extend_from_slice(&[0x00, 0x02, b'h', b'i']);
        assert_eq!(extract_beacon(&frame), Err(EnvelopeError::NoVendorIe));
    }

    #[test]
    fn it_terminates_on_overrunning_ie_lengths() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&FC_SUBTYPE_BEACON.to_le_bytes());
        frame.resize(MGMT_HEADER_LENGTH + BEACON_FIXED_LENGTH, 0);
        frame.extend_from_slice(&[IE_VENDOR_SPECIFIC, 0xff, 0xfa]);
        assert_eq!(extract_beacon(&frame), Err(EnvelopeError::NoVendorIe));
    }

    #[test]
    fn it_extracts_nan_service_data() {
        let message = [0x12u8; 25];
        let mut payload = vec![0x04, 0x09, 0x50, 0x6f];
        payload.extend_from_slice(&NAN_SERVICE_ID);
        payload.extend_from_slice(&message);

        assert!(is_remote_id(&payload));
        assert_eq!(extract_nan(&payload).unwrap(), &message[..]);
    }

    #[test]
    fn it_extracts_nan_data_by_oui() {
        let message = [0x12u8; 25];
        let mut payload = vec![0x00, 0x00, 0x00];
        payload.extend_from_slice(&OUI);
        payload.push(VENDOR_TYPE);
        payload.extend_from_slice(&message);

        assert_eq!(extract_nan(&payload).unwrap(), &message[..]);
    }

    #[test]
    fn it_rejects_payloads_without_nan_markers() {
        let payload = [0u8; 64];
        assert_eq!(extract_nan(&payload), Err(EnvelopeError::NoNanServiceData));
        assert!(!is_remote_id(&payload));
    }
}
