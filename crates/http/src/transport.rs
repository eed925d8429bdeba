//! Boundary contract to the transport collaborator.
//!
//! The core never opens, closes, or configures a socket. The transport owns
//! the message-oriented socket, attaches an [`Identity`] to every inbound
//! frame, and supplies the send primitive below for outbound wire bytes.

use crate::protocol::{Identity, Message};

/// The send primitive a transport collaborator provides.
///
/// One call delivers one complete wire-form message to the peer addressed
/// by `identity`.
pub trait SendFrame {
    type Error;

    fn send_frame(&mut self, identity: &Identity, frame: &[u8]) -> Result<(), Self::Error>;
}

impl Message {
    /// Hands this message's wire form to the transport, addressed to the
    /// peer the message carries.
    pub fn send<T: SendFrame>(&self, transport: &mut T) -> Result<(), T::Error> {
        transport.send_frame(self.identity(), self.as_bytes())
    }
}
