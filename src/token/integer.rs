use crate::error::Outcome;
use crate::matcher::Matcher;
use crate::piece::Piece;
use crate::view::StringView;

/// Matches the longest nonempty run of ASCII digits, as an `i64`.
///
/// A digit run too long to fit in `i64` fails the match rather than
/// wrapping or panicking; the original leaves overflow behavior
/// unspecified, this crate picks the conservative option (see DESIGN.md).
#[derive(Clone, Copy, Debug, Default)]
pub struct Integer;

impl Integer {
    /// Builds the matcher. Stateless, so every instance behaves alike.
    pub fn new() -> Self {
        Self
    }
}

impl Matcher<i64> for Integer {
    fn consume(&self, input: &StringView) -> Outcome<i64> {
        let bytes = input.as_bytes();
        let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return Ok(Piece::fail());
        }
        let mut value: i64 = 0;
        for &b in &bytes[..len] {
            let digit = (b - b'0') as i64;
            value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
                Some(v) => v,
                None => return Ok(Piece::fail()),
            };
        }
        Ok(Piece::success(len as u32, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_takes_longest_digit_run() {
        let m = Integer::new();
        let piece = m.consume(&StringView::from("12345abc")).unwrap();
        assert_eq!(piece.length, 5);
        assert_eq!(piece.value, Some(12345));
    }

    #[test]
    fn integer_fails_on_non_digit() {
        let m = Integer::new();
        assert!(!m.consume(&StringView::from("abc")).unwrap().is_success());
    }

    #[test]
    fn integer_fails_on_overflow_rather_than_wrapping() {
        let m = Integer::new();
        let huge = "9".repeat(30);
        assert!(!m.consume(&StringView::from(huge.as_str())).unwrap().is_success());
    }
}
