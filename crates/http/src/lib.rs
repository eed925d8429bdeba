//! An HTTP/1.1 message model for message-oriented transports
//!
//! This crate models HTTP requests and responses exchanged as discrete
//! frames over a message-oriented socket (one frame in, one frame out),
//! rather than as a continuous byte stream. Its defining property is that a
//! message is not a bag of independently allocated fields: every field —
//! method, url, version, status, headers, body — is a view into one
//! contiguous, growable arena holding the message's exact wire form.
//!
//! # Features
//!
//! - Wire form always available: no separate encode pass, ever
//! - In-place mutation after construction: append headers and body data to
//!   a message that already has wire bytes assigned to other fields
//! - Single-copy parsing: an inbound frame is copied once into the arena
//!   and every field becomes an offset-based view into it
//! - Chunked-transfer segment decoding for framed chunk units
//! - Peer identity tokens for correlating frames to peers
//! - Clean error handling: all failures are returned values, and a failed
//!   operation leaves the message in its last valid state
//!
//! # Example
//!
//! ```
//! use framed_http::codec::parse_request;
//! use framed_http::protocol::{Identity, Message, Method};
//!
//! let identity = Identity::try_from(&b"peer-1"[..]).unwrap();
//!
//! // Outbound: build a request; its wire form is current at every step.
//! let mut request = Message::request(identity.clone(), b"GET", b"/index.html", b"HTTP/1.1").unwrap();
//! request.put_header(b"Host", b"example.com").unwrap();
//! assert_eq!(request.as_bytes(), b"GET /index.html HTTP/1.1\r\nHost:example.com\r\n\r\n");
//!
//! // Inbound: parse a received frame back into a message.
//! let parsed = parse_request(identity, request.as_bytes()).unwrap();
//! assert_eq!(parsed.method(), Some(Method::Get));
//! assert_eq!(parsed.url(), Some(&b"/index.html"[..]));
//! assert_eq!(parsed.get_header(b"Host"), Some(&b"example.com"[..]));
//!
//! // Reply, echoing the peer identity of the request.
//! let response = Message::reply(&parsed, 200).unwrap();
//! assert_eq!(response.as_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the arena, the message model and its views, the method
//!   table, and the error taxonomy
//! - [`codec`]: request parsing and chunk-segment decoding for inbound
//!   frames
//! - [`transport`]: the boundary trait a transport collaborator implements
//!
//! # Concurrency
//!
//! Everything here is a synchronous, CPU-bound transformation over owned
//! in-memory buffers; nothing blocks and nothing is shared. Each message is
//! exclusively owned, so the crate composes with any concurrency model the
//! surrounding transport chooses.
//!
//! # Limitations
//!
//! - Not a full RFC 7230 implementation: obsolete line folding, arbitrary
//!   whitespace rules and transfer-coding negotiation are out of scope
//! - No TLS, connection keep-alive state, or pipelining
//! - Chunk size lines are consumed structurally, not validated numerically

pub mod codec;
pub mod protocol;
pub mod transport;

mod utils;
pub(crate) use utils::ensure;
