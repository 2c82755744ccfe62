//! # Transport contract
//! The runtime never talks to a network directly. It hands envelopes to a
//! [`Transport`] and polls it for incoming envelopes and peer lifecycle
//! events, the same way a game loop polls a socket.

pub mod error;

pub use error::TransportError;

use crate::{PeerId, WireEnvelope};

#[derive(Clone, Debug, PartialEq)]
pub enum TransportEvent {
    /// An envelope arrived from `sender`
    Message {
        envelope: WireEnvelope,
        sender: PeerId,
    },
    PeerJoined(PeerId),
    PeerLeft(PeerId),
}

pub trait Transport {
    /// Id the transport assigned to this peer
    fn local_id(&self) -> &PeerId;

    /// Whether the transport considers this peer the session's host
    fn is_host(&self) -> bool;

    /// Unicast to `target`, or broadcast to every other peer when `None`
    fn send(&mut self, target: Option<&PeerId>, envelope: &WireEnvelope) -> Result<(), TransportError>;

    /// Next pending event, if any. Called repeatedly until it returns `Ok(None)`.
    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError>;

    /// Releases every subscription the transport holds for this peer
    fn disconnect(&mut self) {}
}
