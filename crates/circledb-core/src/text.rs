// crates/circledb-core/src/text.rs
use std::cmp::Ordering;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Bhāgalpur` -> `Bhagalpur`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use circledb_core::text::fold_key;
///
/// assert_eq!(fold_key("Bhāgalpur"), "bhagalpur");
/// assert_eq!(fold_key("RAMNAGAR"), "ramnagar");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// `true` when `s` is non-empty and made only of ASCII digits.
///
/// This is the whole "is it a thana number" test: it looks at the text only,
/// never at the dataset.
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Integer sort key of a thana number.
///
/// Reads an optional sign and the leading run of digits after leading
/// whitespace, so `"12"`, `" 12"` and `"12A"` all give `12`. Anything without
/// leading digits (`"abc"`, `""`, `"-"`) gives `0`, which means several groups
/// can share the key `0`; callers sort stably to keep their input order.
/// Values beyond `i64` saturate.
///
/// ```rust
/// use circledb_core::text::thana_sort_key;
///
/// assert_eq!(thana_sort_key("120"), 120);
/// assert_eq!(thana_sort_key("7/1"), 7);
/// assert_eq!(thana_sort_key("abc"), 0);
/// ```
pub fn thana_sort_key(thana_no: &str) -> i64 {
    let s = thana_no.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 0;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Alphabetical order on folded names, falling back to the raw text so the
/// order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

/// Number of whitespace-separated tokens, counting only the space character
/// as a separator.
pub(crate) fn space_token_count(s: &str) -> usize {
    s.split(' ').filter(|t| !t.is_empty()).count()
}
