//! Trailing-digit increment.
//!
//! Only the final character of a version takes part: an ASCII digit `d` is
//! replaced by the decimal text of `d + 1`, so `9` becomes `10` and nothing
//! carries into the preceding characters. Anything else is left alone.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex_lite::Captures;
use regex_lite::Regex;

#[allow(clippy::expect_used)]
fn trailing_digit() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]$").expect("valid trailing digit regex"))
}

/// Increment the trailing ASCII digit of `version`.
///
/// Returns the input borrowed when it does not end in a digit.
///
/// ```
/// use html_report_version::bump_trailing_digit;
///
/// assert_eq!(bump_trailing_digit("1.0.3"), "1.0.4");
/// assert_eq!(bump_trailing_digit("1.2.9"), "1.2.10");
/// assert_eq!(bump_trailing_digit("1.0.0-beta"), "1.0.0-beta");
/// ```
pub fn bump_trailing_digit(version: &str) -> Cow<'_, str> {
    trailing_digit().replace(version, |caps: &Captures<'_>| {
        let digit = u32::from(caps[0].as_bytes()[0] - b'0');
        (digit + 1).to_string()
    })
}

/// Whether [`bump_trailing_digit`] would change `version`.
pub fn ends_with_digit(version: &str) -> bool {
    version.as_bytes().last().is_some_and(u8::is_ascii_digit)
}
