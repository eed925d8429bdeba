//! Wire-format decoding for inbound frames.
//!
//! A message-oriented transport hands this crate complete frames, so the
//! decoders here are plain functions over byte slices rather than streaming
//! state machines:
//!
//! - [`parse_request`]: one raw frame plus the peer identity in, a parsed
//!   [`crate::protocol::Message`] out
//! - [`decode_chunk`]: strips the framing from one chunk-encoded segment
//!
//! The outbound direction needs no codec: serializer-built messages keep
//! their wire form current in the arena at all times, so sending is just
//! [`crate::protocol::Message::as_bytes`].

mod chunk_decoder;
mod request_decoder;

pub use chunk_decoder::decode_chunk;
pub use request_decoder::parse_request;
