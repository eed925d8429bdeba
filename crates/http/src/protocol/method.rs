//! Enumerated HTTP request methods.

use std::fmt;

/// The nine standard HTTP request method tokens.
///
/// An unrecognized token is represented by `None` at the lookup boundary
/// ([`Method::from_bytes`]); there is no in-band unknown variant, so a
/// `Method` value always has a string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Head,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

/// Compile-time token table, in the order the variants are declared.
const METHOD_TOKENS: [(&[u8], Method); 9] = [
    (b"GET", Method::Get),
    (b"POST", Method::Post),
    (b"HEAD", Method::Head),
    (b"PUT", Method::Put),
    (b"DELETE", Method::Delete),
    (b"CONNECT", Method::Connect),
    (b"OPTIONS", Method::Options),
    (b"TRACE", Method::Trace),
    (b"PATCH", Method::Patch),
];

impl Method {
    /// Maps an exact uppercase ASCII token to its method.
    ///
    /// The comparison is exact-length and byte-for-byte; no case folding.
    /// Returns `None` for any token outside the table.
    pub fn from_bytes(bytes: &[u8]) -> Option<Method> {
        METHOD_TOKENS.iter().find(|(token, _)| *token == bytes).map(|&(_, method)| method)
    }

    /// The uppercase ASCII token for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_round_trip() {
        for (token, method) in METHOD_TOKENS {
            assert_eq!(Method::from_bytes(token), Some(method));
            assert_eq!(method.as_str().as_bytes(), token);
            assert_eq!(Method::from_bytes(method.as_str().as_bytes()), Some(method));
        }
    }

    #[test]
    fn unknown_tokens_have_no_method() {
        assert_eq!(Method::from_bytes(b"NOTAMETHOD"), None);
        assert_eq!(Method::from_bytes(b"get"), None);
        assert_eq!(Method::from_bytes(b"GE"), None);
        assert_eq!(Method::from_bytes(b"GETT"), None);
        assert_eq!(Method::from_bytes(b""), None);
    }

    #[test]
    fn display_matches_token() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
