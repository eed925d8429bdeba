//! Core message model: the arena, the views over it, and the errors.
//!
//! This module provides the fundamental building blocks of the crate:
//!
//! - **Arena** ([`arena`]): one growable byte buffer per message, owning
//!   every byte the message's fields reference. Growth doubles the capacity
//!   and may move the allocation, which is why nothing outside the arena
//!   ever holds an address into it — only offsets.
//!
//! - **Message model** ([`message`]):
//!   - [`Message`]: a request or response whose fields are spans into its
//!     arena, so the wire form is available at all times
//!   - [`Identity`]: the opaque peer token the transport attaches to each
//!     frame
//!   - [`Headers`]: insertion-ordered iteration over header entries
//!
//! - **Method table** ([`method`]): [`Method`], the fixed mapping between
//!   the nine standard tokens and their enumerated forms
//!
//! - **Error handling** ([`error`]): [`AllocError`], [`BuildError`],
//!   [`ParseError`] and [`ChunkError`]. Every failure is a returned value;
//!   a failed mutation leaves the message in its last valid state and a
//!   failed construction returns no message at all.

mod arena;
pub(crate) use arena::Arena;

mod message;
pub use message::Headers;
pub use message::Identity;
pub use message::MAX_IDENTITY_LEN;
pub use message::Message;
pub use message::reason_phrase;
pub(crate) use message::Span;

mod method;
pub use method::Method;

mod error;
pub use error::AllocError;
pub use error::BuildError;
pub use error::ChunkError;
pub use error::ParseError;
