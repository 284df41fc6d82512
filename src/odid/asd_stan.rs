//! ASD-STAN EN 4709-002 (EU) decoder
//!
//! The EU direct-identification standard reuses the ASTM F3411 wire format,
//! so decoding delegates to [`Message::decode`]. On top of that this module
//! parses the EU extension bytes of the System message and validates the EU
//! operator-id registration format.
//!
//! The extension bit positions are not finalized by the public specification;
//! [`parse_eu_extension`] isolates them as the single extension point.

use ridbee_types::{
    EuCategoryClass,
    EuClassification,
    EuFlags,
    EuSystemInfo,
};

use crate::odid::{
    DecodeError,
    Message,
    MESSAGE_LENGTH,
};

/// ISO 3166-1 alpha-3 codes accepted at the front of an EU operator id:
/// EU members, then EEA/EFTA, then the UK.
pub const EU_COUNTRY_CODES: &[&str] = &[
    "AUT", "BEL", "BGR", "HRV", "CYP", "CZE", "DNK", "EST", "FIN", "FRA", "DEU", "GRC", "HUN",
    "IRL", "ITA", "LVA", "LTU", "LUX", "MLT", "NLD", "POL", "PRT", "ROU", "SVK", "SVN", "ESP",
    "SWE", "ISL", "LIE", "NOR", "CHE", "GBR",
];

/// Decodes one message as ASD-STAN: the ASTM decode, plus the EU extension
/// block when the message is a System message.
///
/// The extension is only read from a top-level System message; sub-messages
/// inside a pack carry none.
pub fn decode_message(data: &[u8]) -> Result<(Message, Option<EuSystemInfo>), DecodeError> {
    let message = Message::decode(&mut &data[..])?;

    let eu = match &message {
        Message::System(_) => parse_eu_extension(data),
        _ => None,
    };

    Ok((message, eu))
}

/// Parses the EU extension bytes 21-22 of a System message.
///
/// Byte 21 bits 6-7 carry the classification, bits 3-5 the category class;
/// byte 22 is a flag byte (bit 0 geo-awareness, bit 1 remote-pilot id).
pub fn parse_eu_extension(message: &[u8]) -> Option<EuSystemInfo> {
    if message.len() < MESSAGE_LENGTH {
        return None;
    }

    let class_byte = message[21];
    let flags_byte = message[22];

    Some(EuSystemInfo {
        classification: EuClassification::from_u8((class_byte >> 6) & 0x03).unwrap_or_default(),
        category: EuCategoryClass::from_u8((class_byte >> 3) & 0x07).unwrap_or_default(),
        flags: EuFlags::from_bits_truncate(flags_byte),
    })
}

/// Extracts the leading ISO 3166-1 alpha-3 country code of an EU operator id,
/// if it is uppercase and in the accepted set.
pub fn extract_country_code(operator_id: &str) -> Option<&str> {
    let code = operator_id.get(..3)?;
    if !code.bytes().all(|byte| byte.is_ascii_uppercase()) {
        return None;
    }
    EU_COUNTRY_CODES.contains(&code).then_some(code)
}

/// Validates the EU operator-id registration format.
///
/// Accepted shapes, both starting with an accepted country code:
/// - separator form `XXX-YY-NNNN...`: at least 7 characters, a second
///   separator after the first, and a non-empty tail behind it
/// - compact form `XXXNNNN...`: the remainder alphanumeric
///
/// A failed validation is metadata for the caller, never a decode failure.
pub fn validate_eu_operator_id(operator_id: &str) -> bool {
    if operator_id.len() < 5 {
        return false;
    }
    if extract_country_code(operator_id).is_none() {
        return false;
    }

    let bytes = operator_id.as_bytes();
    if bytes[3] == b'-' {
        if operator_id.len() < 7 {
            return false;
        }
        let Some(second_separator) = bytes[4..].iter().position(|&byte| byte == b'-') else {
            return false;
        };
        // registration number must follow the second separator
        return 4 + second_separator + 1 < bytes.len();
    }

    bytes[3..].iter().all(|byte| byte.is_ascii_alphanumeric())
}
