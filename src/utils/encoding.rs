//! Byte-order-mark handling for config files.
//!
//! Decoders expect plain UTF-8, so a leading UTF-8 BOM is dropped and
//! UTF-16 files are transcoded. Malformed sequences in a BOM-marked file
//! become U+FFFD.

use encoding_rs::Encoding;

/// Strip a UTF-8 BOM or transcode a UTF-16 (LE/BE) file with BOM to UTF-8.
/// Anything without a BOM is returned unchanged.
pub fn normalize_bom(content: Vec<u8>) -> Vec<u8> {
    let Some((encoding, _)) = Encoding::for_bom(&content) else {
        return content;
    };

    let (text, had_errors) = encoding.decode_with_bom_removal(&content);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "replaced malformed sequences while transcoding");
    }
    text.into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut content = vec![0xef, 0xbb, 0xbf];
        content.extend_from_slice(b"{\"a\": 1}");
        assert_eq!(normalize_bom(content), b"{\"a\": 1}".to_vec());
    }

    #[test]
    fn test_utf16_le_is_transcoded() {
        let mut content = vec![0xff, 0xfe];
        for unit in "a: é".encode_utf16() {
            content.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(normalize_bom(content), "a: é".as_bytes().to_vec());
    }

    #[test]
    fn test_utf16_be_is_transcoded() {
        let mut content = vec![0xfe, 0xff];
        for unit in "k = 1".encode_utf16() {
            content.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(normalize_bom(content), b"k = 1".to_vec());
    }

    #[test]
    fn test_utf16_trailing_odd_byte_becomes_replacement() {
        let out = normalize_bom(vec![0xff, 0xfe, b'a', 0x00, 0x41]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('a'));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_plain_content_untouched() {
        assert_eq!(normalize_bom(b"name: x".to_vec()), b"name: x".to_vec());
    }
}
