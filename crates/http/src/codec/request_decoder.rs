//! Wire-format request parsing.
//!
//! [`parse_request`] turns one received frame of raw bytes into a
//! [`Message`] by locating the structural delimiters — space, CRLF,
//! CRLF-CRLF — and recording each field as a span. The input is copied once
//! into the message's arena; no field is copied a second time.

use tracing::trace;

use crate::ensure;
use crate::protocol::{Arena, Identity, Message, ParseError, Span};
use crate::utils::{find_crlf, find_subslice};

const CRLF_LEN: usize = 2;

/// Parses one complete request frame.
///
/// `identity` is the peer token the transport attached to the frame; `raw`
/// is the frame payload. The arena is sized to `raw.len()` up front, so a
/// pure parse never grows it.
///
/// All-or-nothing: on any missing delimiter the parse is abandoned with
/// [`ParseError::Malformed`] and no partial message is returned.
///
/// # Grammar
///
/// `METHOD SP URL SP HTTP-VERSION CRLF HEADERS CRLF-CRLF BODY`, where the
/// runs of whitespace after METHOD and URL may be longer than one byte, the
/// HTTP-VERSION content is not further validated, and BODY may be empty.
/// The CRLF-CRLF search starts after the request line's CRLF, so the header
/// section must contain at least one entry.
pub fn parse_request(identity: Identity, raw: &[u8]) -> Result<Message, ParseError> {
    let line_end =
        find_crlf(raw).ok_or_else(|| ParseError::malformed("request line is not CRLF terminated"))?;

    let method_len = raw[..line_end]
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ParseError::malformed("no space after method token"))?;
    let method = Span::new(0, method_len);

    let url_start = skip_whitespace(raw, method.end(), line_end)?;
    let url_len = raw[url_start..line_end]
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ParseError::malformed("no space after url token"))?;
    let url = Span::new(url_start, url_len);

    let httpv_start = skip_whitespace(raw, url.end(), line_end)?;
    let httpv = Span::new(httpv_start, line_end - httpv_start);

    let header_start = line_end + CRLF_LEN;
    let terminator = find_subslice(&raw[header_start..], b"\r\n\r\n")
        .ok_or_else(|| ParseError::malformed("header block is not terminated by a blank line"))?;
    // inclusive of the last entry's CRLF, exclusive of the blank-line CRLF
    let header = Span::new(header_start, terminator + CRLF_LEN);

    let body_start = header_start + terminator + 2 * CRLF_LEN;
    let body = Span::new(body_start, raw.len() - body_start);

    let mut arena = Arena::try_with_capacity(raw.len())?;
    arena.extend_from_slice(raw);

    trace!(
        frame_len = raw.len(),
        header_len = terminator + CRLF_LEN,
        body_len = raw.len() - body_start,
        "parsed request frame"
    );
    Ok(Message::from_request_parts(identity, arena, method, url, httpv, header, body))
}

/// Advances past the whitespace run starting at `at` within the request
/// line. Reaching the line's end without a non-whitespace byte is malformed.
fn skip_whitespace(raw: &[u8], mut at: usize, line_end: usize) -> Result<usize, ParseError> {
    while at < line_end && raw[at].is_ascii_whitespace() {
        at += 1;
    }
    ensure!(at < line_end, ParseError::malformed("request line ends inside a whitespace run"));
    Ok(at)
}
