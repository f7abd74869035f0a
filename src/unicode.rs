//! UTF-16 to UTF-8 transcoding, the one input-format helper this crate
//! carries: every internal matcher works bytewise over UTF-8, so callers
//! starting from UTF-16 (e.g. data off the wire from a UTF-16-native host)
//! need a conversion step before building a [`StringView`](crate::view::StringView).

/// Converts a UTF-16 code unit sequence into an owned UTF-8 `String`.
///
/// Unpaired surrogates are replaced with `U+FFFD` (the standard lossy
/// decoding behavior of [`char::decode_utf16`]); this crate does not
/// expose a strict/fallible variant since no [MODULE] in scope needs one.
pub fn transcode_utf16(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcodes_plain_ascii() {
        let units: Vec<u16> = "hello".encode_utf16().collect();
        assert_eq!(transcode_utf16(&units), "hello");
    }

    #[test]
    fn transcodes_a_surrogate_pair() {
        let units: Vec<u16> = "\u{1F600}".encode_utf16().collect();
        assert_eq!(transcode_utf16(&units), "\u{1F600}");
    }

    #[test]
    fn replaces_unpaired_surrogates() {
        let units = [0xD800u16];
        assert_eq!(transcode_utf16(&units), "\u{FFFD}");
    }
}
