//! The arena-backed HTTP message model.
//!
//! A [`Message`] aggregates one [`Arena`] with the spans that give its bytes
//! meaning: start-line fields, the header block, and the body. Because every
//! field is a view into the same contiguous buffer, [`Message::as_bytes`]
//! yields the exact wire form at any point of the message's life, including
//! after headers or body data have been appended in place.
//!
//! Mutation keeps the wire form valid at every step:
//!
//! - [`Message::put_header`] shifts the bytes that follow the header block
//!   (the blank-line CRLF and the body) to the right and writes the new
//!   entry into the opened gap, so entries stay contiguous and in insertion
//!   order.
//! - [`Message::put_body`] appends at the arena's end, where the body always
//!   sits.

use bytes::Bytes;
use tracing::trace;

use crate::ensure;
use crate::protocol::arena::{Arena, INIT_ARENA_SIZE};
use crate::protocol::{AllocError, BuildError, Method};
use crate::utils::find_crlf;

const CRLF: &[u8] = b"\r\n";

/// Version token written by the serializer when none is supplied.
const HTTP_VERSION: &[u8] = b"HTTP/1.1";

/// Maximum length of a peer identity token.
pub const MAX_IDENTITY_LEN: usize = 255;

/// An (offset, length) view into a message's arena.
///
/// Spans never own memory and never hold addresses: the arena may move when
/// it grows, so byte access always goes through [`Span::slice_of`] against
/// the arena's current base. A zero-length span is valid and denotes an
/// absent or empty field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub(crate) fn empty_at(offset: usize) -> Self {
        Self { offset, len: 0 }
    }

    pub(crate) fn end(self) -> usize {
        self.offset + self.len
    }

    fn slice_of(self, arena: &Arena) -> &[u8] {
        &arena.as_slice()[self.offset..self.end()]
    }
}

/// Opaque peer-correlation token, supplied by the transport per inbound
/// frame and echoed on the outbound reply.
///
/// Held by value, independent of any arena. At most [`MAX_IDENTITY_LEN`]
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(Bytes);

impl Identity {
    /// Wraps a transport-supplied token.
    ///
    /// Fails with [`BuildError::InvalidArgument`] if the token exceeds
    /// [`MAX_IDENTITY_LEN`] bytes. An empty token is valid.
    pub fn from_bytes(bytes: Bytes) -> Result<Self, BuildError> {
        ensure!(
            bytes.len() <= MAX_IDENTITY_LEN,
            BuildError::invalid_argument(format!(
                "identity token of {} bytes exceeds the {MAX_IDENTITY_LEN} byte limit",
                bytes.len()
            ))
        );
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&[u8]> for Identity {
    type Error = BuildError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(Bytes::copy_from_slice(bytes))
    }
}

/// Start-line views, discriminated by message kind.
///
/// Each variant carries only the spans that exist for that kind; the header
/// block and body spans are common to both and live on [`Message`] itself.
#[derive(Debug)]
enum Head {
    Request { method: Span, url: Span, httpv: Span },
    Response { httpv: Span, status: Span, reason: Span },
}

/// One HTTP message — a request or a response — backed by a single arena.
///
/// Created by the serializer ([`Message::request`], [`Message::response`])
/// or by the parser ([`crate::codec::parse_request`]); the message and its
/// arena live and die together.
#[derive(Debug)]
pub struct Message {
    identity: Identity,
    head: Head,
    header: Span,
    body: Span,
    arena: Arena,
}

/// Status reason lookup.
// TODO: replace the stub with a real status/reason table.
pub fn reason_phrase(_status: u16) -> &'static str {
    "OK"
}

impl Message {
    /// Builds an outbound request: `"<method> <url> <httpv>\r\n\r\n"`.
    ///
    /// The three parts are written into a fresh arena in wire order, each
    /// recorded as a span while it is written. The header block starts empty
    /// right after the request line's CRLF; the body starts empty after the
    /// blank-line CRLF.
    ///
    /// All three parts must be non-empty; the method token is taken verbatim
    /// and is not required to be one of the nine standard methods.
    pub fn request(identity: Identity, method: &[u8], url: &[u8], httpv: &[u8]) -> Result<Self, BuildError> {
        ensure!(!method.is_empty(), BuildError::invalid_argument("empty method"));
        ensure!(!url.is_empty(), BuildError::invalid_argument("empty url"));
        ensure!(!httpv.is_empty(), BuildError::invalid_argument("empty http version"));

        let mut arena = Arena::try_with_capacity(INIT_ARENA_SIZE)?;
        // two spaces + request line CRLF + blank line CRLF
        arena.reserve(method.len() + url.len() + httpv.len() + 6)?;

        let method_span = Span::new(arena.len(), method.len());
        arena.extend_from_slice(method);
        arena.extend_from_slice(b" ");

        let url_span = Span::new(arena.len(), url.len());
        arena.extend_from_slice(url);
        arena.extend_from_slice(b" ");

        let httpv_span = Span::new(arena.len(), httpv.len());
        arena.extend_from_slice(httpv);
        arena.extend_from_slice(CRLF);

        let header = Span::empty_at(arena.len());
        arena.extend_from_slice(CRLF);
        let body = Span::empty_at(arena.len());

        Ok(Self {
            identity,
            head: Head::Request { method: method_span, url: url_span, httpv: httpv_span },
            header,
            body,
            arena,
        })
    }

    /// Builds an outbound request from an enumerated method, with the
    /// default `HTTP/1.1` version token.
    pub fn request_with_method(identity: Identity, method: Method, url: &[u8]) -> Result<Self, BuildError> {
        Self::request(identity, method.as_str().as_bytes(), url, HTTP_VERSION)
    }

    /// Builds an outbound response: `"HTTP/1.1 <status> <reason>\r\n\r\n"`.
    ///
    /// The status code is written as exactly three zero-padded ASCII decimal
    /// digits; values above 999 are a caller error and fail with
    /// [`BuildError::InvalidArgument`], as does an empty reason. The
    /// identity is usually the one carried by the originating request.
    pub fn response(identity: Identity, status: u16, reason: &[u8]) -> Result<Self, BuildError> {
        ensure!(status <= 999, BuildError::invalid_argument(format!("status {status} outside 0..=999")));
        ensure!(!reason.is_empty(), BuildError::invalid_argument("empty reason"));

        let mut arena = Arena::try_with_capacity(INIT_ARENA_SIZE)?;
        // two spaces + 3 status digits + status line CRLF + blank line CRLF
        arena.reserve(HTTP_VERSION.len() + reason.len() + 9)?;

        let httpv_span = Span::new(arena.len(), HTTP_VERSION.len());
        arena.extend_from_slice(HTTP_VERSION);
        arena.extend_from_slice(b" ");

        let status_span = Span::new(arena.len(), 3);
        let digits = [
            b'0' + (status / 100) as u8,
            b'0' + (status / 10 % 10) as u8,
            b'0' + (status % 10) as u8,
        ];
        arena.extend_from_slice(&digits);
        arena.extend_from_slice(b" ");

        let reason_span = Span::new(arena.len(), reason.len());
        arena.extend_from_slice(reason);
        arena.extend_from_slice(CRLF);

        let header = Span::empty_at(arena.len());
        arena.extend_from_slice(CRLF);
        let body = Span::empty_at(arena.len());

        Ok(Self {
            identity,
            head: Head::Response { httpv: httpv_span, status: status_span, reason: reason_span },
            header,
            body,
            arena,
        })
    }

    /// Builds a response to `request`, copying its identity verbatim and
    /// using the stub reason lookup.
    pub fn reply(request: &Message, status: u16) -> Result<Self, BuildError> {
        Self::response(request.identity().clone(), status, reason_phrase(status).as_bytes())
    }

    /// Assembles a request message from parser-located spans.
    pub(crate) fn from_request_parts(
        identity: Identity,
        arena: Arena,
        method: Span,
        url: Span,
        httpv: Span,
        header: Span,
        body: Span,
    ) -> Self {
        debug_assert_eq!(body.offset, header.end() + CRLF.len());
        debug_assert_eq!(body.end(), arena.len());
        Self { identity, head: Head::Request { method, url, httpv }, header, body, arena }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_request(&self) -> bool {
        matches!(self.head, Head::Request { .. })
    }

    pub fn is_response(&self) -> bool {
        matches!(self.head, Head::Response { .. })
    }

    /// The method token bytes; `None` on a response.
    pub fn method_bytes(&self) -> Option<&[u8]> {
        match &self.head {
            Head::Request { method, .. } => Some(method.slice_of(&self.arena)),
            Head::Response { .. } => None,
        }
    }

    /// The method mapped through the token table; `None` on a response or
    /// for a token outside the table.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.method_bytes()?)
    }

    /// The request URL bytes; `None` on a response.
    pub fn url(&self) -> Option<&[u8]> {
        match &self.head {
            Head::Request { url, .. } => Some(url.slice_of(&self.arena)),
            Head::Response { .. } => None,
        }
    }

    /// The HTTP version token, present on both kinds.
    pub fn http_version(&self) -> &[u8] {
        match &self.head {
            Head::Request { httpv, .. } | Head::Response { httpv, .. } => httpv.slice_of(&self.arena),
        }
    }

    /// The three status digits; `None` on a request.
    pub fn status(&self) -> Option<&[u8]> {
        match &self.head {
            Head::Request { .. } => None,
            Head::Response { status, .. } => Some(status.slice_of(&self.arena)),
        }
    }

    /// The status reason bytes; `None` on a request.
    pub fn reason(&self) -> Option<&[u8]> {
        match &self.head {
            Head::Request { .. } => None,
            Head::Response { reason, .. } => Some(reason.slice_of(&self.arena)),
        }
    }

    /// The serialized header block: zero or more `key:value\r\n` entries,
    /// exclusive of the blank-line CRLF that terminates it on the wire.
    pub fn header_block(&self) -> &[u8] {
        self.header.slice_of(&self.arena)
    }

    /// The body bytes; empty until data is appended.
    pub fn body(&self) -> &[u8] {
        self.body.slice_of(&self.arena)
    }

    /// The complete wire form, always current.
    pub fn as_bytes(&self) -> &[u8] {
        self.arena.as_slice()
    }

    /// Consumes the message, handing its wire form to the transport.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.arena.into_vec())
    }

    /// Appends a `key:value` entry at the end of the header block.
    ///
    /// Reserves space for the entry, shifts everything following the header
    /// block — the blank-line CRLF and the body — to the right, and writes
    /// `key`, `:`, `value`, CRLF into the opened gap. The body bytes are
    /// relocated, never altered. Entries therefore always read back in
    /// insertion order; duplicate keys are kept, not merged.
    pub fn put_header(&mut self, key: &[u8], value: &[u8]) -> Result<(), AllocError> {
        debug_assert_eq!(self.body.offset, self.header.end() + CRLF.len());

        let entry_len = key.len() + value.len() + 3;
        self.arena.reserve(entry_len)?;

        let insert_at = self.header.end();
        self.arena.shift_right(insert_at, entry_len);

        let mut at = insert_at;
        self.arena.write_at(at, key);
        at += key.len();
        self.arena.write_at(at, b":");
        at += 1;
        self.arena.write_at(at, value);
        at += value.len();
        self.arena.write_at(at, CRLF);

        self.header = Span::new(self.header.offset, self.header.len + entry_len);
        self.body = Span::new(self.body.offset + entry_len, self.body.len);

        trace!(key_len = key.len(), value_len = value.len(), "header appended");
        Ok(())
    }

    /// Returns the value of the first entry whose key matches `key`
    /// byte-for-byte (case-sensitive), or `None`.
    pub fn get_header(&self, key: &[u8]) -> Option<&[u8]> {
        self.headers().find(|&(entry_key, _)| entry_key == key).map(|(_, value)| value)
    }

    /// Iterates header entries as `(key, value)` pairs in insertion order.
    ///
    /// The yielded slices are exact-length byte ranges into the arena, never
    /// NUL-terminated.
    pub fn headers(&self) -> Headers<'_> {
        Headers { block: self.header_block() }
    }

    /// Appends data at the end of the body.
    ///
    /// The body is always the arena's tail, so this extends the arena and
    /// the body span in one step. Append-only: no insertion, no reordering.
    pub fn put_body(&mut self, data: &[u8]) -> Result<(), AllocError> {
        debug_assert_eq!(self.body.end(), self.arena.len());

        self.arena.reserve(data.len())?;
        self.arena.extend_from_slice(data);
        self.body = Span::new(self.body.offset, self.body.len + data.len());

        trace!(appended = data.len(), body_len = self.body.len, "body appended");
        Ok(())
    }
}

/// Iterator over a message's header entries, in insertion order.
#[derive(Debug, Clone)]
pub struct Headers<'a> {
    block: &'a [u8],
}

impl<'a> Iterator for Headers<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.block.is_empty() {
            return None;
        }

        let line_end = find_crlf(self.block)?;
        let line = &self.block[..line_end];
        self.block = &self.block[line_end + CRLF.len()..];

        match line.iter().position(|&b| b == b':') {
            Some(colon) => Some((&line[..colon], &line[colon + 1..])),
            // a parsed block may carry a colon-less line; expose it as a
            // key with an empty value
            None => Some((line, &[][..])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::try_from(&b"peer-00"[..]).unwrap()
    }

    #[test]
    fn request_wire_form_and_views() {
        let msg = Message::request(identity(), b"GET", b"/index.html", b"HTTP/1.1").unwrap();

        assert_eq!(msg.as_bytes(), b"GET /index.html HTTP/1.1\r\n\r\n");
        assert!(msg.is_request());
        assert_eq!(msg.method_bytes(), Some(&b"GET"[..]));
        assert_eq!(msg.method(), Some(Method::Get));
        assert_eq!(msg.url(), Some(&b"/index.html"[..]));
        assert_eq!(msg.http_version(), b"HTTP/1.1");
        assert_eq!(msg.header_block(), b"");
        assert_eq!(msg.body(), b"");
        assert_eq!(msg.status(), None);
        assert_eq!(msg.reason(), None);
    }

    #[test]
    fn request_accepts_nonstandard_tokens() {
        let msg = Message::request(identity(), b"AMETHOD", b"/a/url", b"HTTP/0.8").unwrap();

        assert_eq!(msg.as_bytes(), b"AMETHOD /a/url HTTP/0.8\r\n\r\n");
        assert_eq!(msg.method_bytes(), Some(&b"AMETHOD"[..]));
        assert_eq!(msg.method(), None);
    }

    #[test]
    fn request_rejects_empty_parts() {
        assert!(matches!(
            Message::request(identity(), b"", b"/url", b"HTTP/1.1"),
            Err(BuildError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Message::request(identity(), b"GET", b"", b"HTTP/1.1"),
            Err(BuildError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Message::request(identity(), b"GET", b"/url", b""),
            Err(BuildError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn request_with_method_uses_default_version() {
        let msg = Message::request_with_method(identity(), Method::Post, b"/submit").unwrap();
        assert_eq!(msg.as_bytes(), b"POST /submit HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn response_wire_form_and_views() {
        let msg = Message::response(identity(), 200, b"OK").unwrap();

        assert_eq!(msg.as_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
        assert!(msg.is_response());
        assert_eq!(msg.http_version(), b"HTTP/1.1");
        assert_eq!(msg.status(), Some(&b"200"[..]));
        assert_eq!(msg.reason(), Some(&b"OK"[..]));
        assert_eq!(msg.method_bytes(), None);
        assert_eq!(msg.url(), None);
    }

    #[test]
    fn response_status_is_zero_padded_to_three_digits() {
        let msg = Message::response(identity(), 42, b"Odd").unwrap();
        assert_eq!(msg.as_bytes(), b"HTTP/1.1 042 Odd\r\n\r\n");
        assert_eq!(msg.status(), Some(&b"042"[..]));

        let msg = Message::response(identity(), 7, b"Odder").unwrap();
        assert_eq!(msg.status(), Some(&b"007"[..]));
    }

    #[test]
    fn response_rejects_out_of_range_status_and_empty_reason() {
        assert!(matches!(
            Message::response(identity(), 1000, b"OK"),
            Err(BuildError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Message::response(identity(), 200, b""),
            Err(BuildError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn reply_copies_identity_and_stub_reason() {
        let req = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        let res = Message::reply(&req, 404).unwrap();

        assert_eq!(res.identity(), req.identity());
        assert_eq!(res.as_bytes(), b"HTTP/1.1 404 OK\r\n\r\n");
    }

    #[test]
    fn identity_over_limit_is_rejected() {
        let long = vec![0xAAu8; MAX_IDENTITY_LEN + 1];
        assert!(matches!(Identity::try_from(&long[..]), Err(BuildError::InvalidArgument { .. })));

        let max = vec![0xAAu8; MAX_IDENTITY_LEN];
        assert!(Identity::try_from(&max[..]).is_ok());
    }

    #[test]
    fn put_header_keeps_insertion_order() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        msg.put_header(b"A", b"1").unwrap();
        msg.put_header(b"B", b"2").unwrap();
        msg.put_header(b"C", b"3").unwrap();

        assert_eq!(msg.header_block(), b"A:1\r\nB:2\r\nC:3\r\n");
        assert_eq!(msg.as_bytes(), b"GET / HTTP/1.1\r\nA:1\r\nB:2\r\nC:3\r\n\r\n");

        let entries: Vec<_> = msg.headers().collect();
        assert_eq!(
            entries,
            vec![(&b"A"[..], &b"1"[..]), (&b"B"[..], &b"2"[..]), (&b"C"[..], &b"3"[..])]
        );
    }

    #[test]
    fn put_header_relocates_body_without_corruption() {
        let mut msg = Message::request(identity(), b"POST", b"/submit", b"HTTP/1.1").unwrap();
        msg.put_body(b"Payload ").unwrap();
        msg.put_header(b"A", b"1").unwrap();
        msg.put_body(b"Data").unwrap();
        msg.put_header(b"B", b"2").unwrap();

        assert_eq!(msg.body(), b"Payload Data");
        assert_eq!(msg.header_block(), b"A:1\r\nB:2\r\n");
        assert_eq!(msg.as_bytes(), b"POST /submit HTTP/1.1\r\nA:1\r\nB:2\r\n\r\nPayload Data");
    }

    #[test]
    fn put_header_grows_the_arena_when_needed() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        let key = vec![b'K'; 300];
        let value = vec![b'V'; 300];
        msg.put_body(b"tail").unwrap();
        msg.put_header(&key, &value).unwrap();

        assert_eq!(msg.body(), b"tail");
        assert_eq!(msg.get_header(&key), Some(&value[..]));
        assert_eq!(msg.header_block().len(), 603);
    }

    #[test]
    fn get_header_returns_first_duplicate() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        msg.put_header(b"Key", b"first").unwrap();
        msg.put_header(b"Other", b"x").unwrap();
        msg.put_header(b"Key", b"second").unwrap();

        assert_eq!(msg.get_header(b"Key"), Some(&b"first"[..]));
        assert_eq!(msg.get_header(b"Other"), Some(&b"x"[..]));
        assert_eq!(msg.get_header(b"Absent"), None);
        assert_eq!(msg.headers().count(), 3);
    }

    #[test]
    fn get_header_is_case_sensitive() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        msg.put_header(b"Host", b"localhost").unwrap();

        assert_eq!(msg.get_header(b"Host"), Some(&b"localhost"[..]));
        assert_eq!(msg.get_header(b"host"), None);
    }

    #[test]
    fn put_body_appends_in_order() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        msg.put_body(b"abc").unwrap();
        msg.put_body(b"abc").unwrap();

        assert_eq!(msg.body(), b"abcabc");
        assert_eq!(msg.as_bytes(), b"GET / HTTP/1.1\r\n\r\nabcabc");
    }

    #[test]
    fn headers_work_on_responses_too() {
        let mut msg = Message::response(identity(), 200, b"OK").unwrap();
        msg.put_header(b"Content-Length", b"0").unwrap();

        assert_eq!(msg.as_bytes(), b"HTTP/1.1 200 OK\r\nContent-Length:0\r\n\r\n");
        assert_eq!(msg.get_header(b"Content-Length"), Some(&b"0"[..]));
    }

    #[test]
    fn into_bytes_matches_wire_form() {
        let mut msg = Message::request(identity(), b"GET", b"/", b"HTTP/1.1").unwrap();
        msg.put_header(b"A", b"1").unwrap();
        let wire = msg.as_bytes().to_vec();

        assert_eq!(msg.into_bytes(), Bytes::from(wire));
    }
}
