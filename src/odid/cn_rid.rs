//! Reserved decoder slot for the Chinese GB/T Remote ID broadcast.
//!
//! The GB/T specification is not publicly available, so nothing can be
//! classified or decoded yet. The slot exists so the parser's protocol
//! priority and configuration surface are already in place.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("GB/T decoder not implemented, pending official specification")]
pub struct NotImplemented;

/// Always false until the GB/T envelope is known.
pub fn is_remote_id(_payload: &[u8]) -> bool {
    false
}

/// Always fails until the GB/T message format is known.
pub fn decode(_payload: &[u8]) -> Result<(), NotImplemented> {
    Err(NotImplemented)
}

/// Placeholder validation for CAAC operator registrations. The public
/// information only pins a minimum length; everything is rejected until the
/// official format is available.
pub fn validate_cn_operator_id(operator_id: &str) -> bool {
    if operator_id.len() < 6 {
        return false;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_classifies_nothing() {
        assert!(!is_remote_id(&[]));
        assert!(!is_remote_id(&[0xff; 64]));
        assert_eq!(decode(&[0x00; 25]), Err(NotImplemented));
        assert!(!validate_cn_operator_id("CN-1234567"));
    }
}
