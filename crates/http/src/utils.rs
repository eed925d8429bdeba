//! Utility macros and functions shared across the crate.

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// It's useful for validation checks where you want to return early with an error
/// if some condition is not satisfied.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Returns the offset of the first occurrence of `needle` within `haystack`.
///
/// Naive window scan; delimiter needles here are 2 or 4 bytes, so nothing
/// smarter is warranted.
pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Returns the offset of the first CRLF within `haystack`.
pub(crate) fn find_crlf(haystack: &[u8]) -> Option<usize> {
    find_subslice(haystack, b"\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_subslice_basic() {
        assert_eq!(find_subslice(b"abcdef", b"cd"), Some(2));
        assert_eq!(find_subslice(b"abcdef", b"abcdef"), Some(0));
        assert_eq!(find_subslice(b"abcdef", b"fg"), None);
        assert_eq!(find_subslice(b"ab", b"abc"), None);
        assert_eq!(find_subslice(b"abc", b""), None);
    }

    #[test]
    fn find_crlf_first_occurrence() {
        assert_eq!(find_crlf(b"line\r\nmore\r\n"), Some(4));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"no terminator"), None);
        assert_eq!(find_crlf(b"split\r"), None);
    }
}
