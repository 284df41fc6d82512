//! Transport envelope classification
//!
//! Remote-ID messages arrive wrapped in a transport-specific envelope: a BLE
//! advertising structure, a BT5 extended-advertising payload, an 802.11
//! beacon with a vendor-specific IE, or a Wi-Fi NAN service-discovery frame.
//! The functions here locate the message bytes inside those envelopes without
//! decoding them; the `odid` module does the decoding.
//!
//! All walks are bounds-checked slice traversals: a malformed length field
//! terminates the walk, it never reads past the buffer.

pub mod bluetooth;
pub mod wifi;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("no Remote ID service data found")]
    NoServiceData,

    #[error("frame too short for an 802.11 management header")]
    TruncatedHeader,

    #[error("not an 802.11 beacon, probe response or action frame")]
    NotManagement,

    #[error("no Remote ID vendor IE found")]
    NoVendorIe,

    #[error("vendor IE carries no Remote ID payload")]
    VendorIeTooShort,

    #[error("no NAN Remote ID service data found")]
    NoNanServiceData,
}
