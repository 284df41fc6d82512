use bytes::{
    Buf,
    TryGetError,
};

/// Extension trait reading a fixed-size byte array off a [`Buf`].
///
/// The checked sibling of copying into a stack array by hand; on a short
/// buffer nothing is consumed and the caller turns the error into a typed
/// decode failure.
pub trait BufReadBytesExt {
    fn try_get_bytes<const N: usize>(&mut self) -> Result<[u8; N], TryGetError>;
}

impl<B: Buf> BufReadBytesExt for B {
    fn try_get_bytes<const N: usize>(&mut self) -> Result<[u8; N], TryGetError> {
        let mut data: [u8; N] = [0; N];
        self.try_copy_to_slice(&mut data[..])?;
        Ok(data)
    }
}

/// Decodes a fixed-width ASCII field: the string ends at the first NUL, and
/// trailing ordinary spaces are trimmed (no other whitespace is touched).
pub fn decode_ascii_field(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .position(|&byte| byte == 0)
        .unwrap_or(bytes.len());
    let trimmed = bytes[..end]
        .iter()
        .rposition(|&byte| byte != b' ')
        .map_or(&bytes[..0], |last| &bytes[..=last]);
    String::from_utf8_lossy(trimmed).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_fixed_arrays() {
        let mut buffer: &[u8] = &[1, 2, 3, 4, 5];
        let head: [u8; 2] = buffer.try_get_bytes().unwrap();
        assert_eq!(head, [1, 2]);
        assert_eq!(buffer.remaining(), 3);

        let result: Result<[u8; 4], _> = buffer.try_get_bytes();
        assert!(result.is_err());
        // nothing consumed on failure
        assert_eq!(buffer.remaining(), 3);
    }

    #[test]
    fn it_trims_ascii_fields() {
        assert_eq!(decode_ascii_field(b"DJI123  \0\0\0"), "DJI123");
        assert_eq!(decode_ascii_field(b"ABC\0garbage"), "ABC");
        assert_eq!(decode_ascii_field(b"   "), "");
        assert_eq!(decode_ascii_field(b""), "");
        // tabs are data, not padding
        assert_eq!(decode_ascii_field(b"X\t "), "X\t");
    }
}
