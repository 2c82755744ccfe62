use serde::{Deserialize, Serialize};

use crate::{ActionContext, Patch, PeerId, Value};

/// The unit of exchange between peers.
///
/// On the wire: `{ "kind": "action" | "event" | "state_sync", "payload": ..., "senderId"?: ... }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireEnvelope {
    #[serde(flatten)]
    pub body: EnvelopeBody,
    #[serde(rename = "senderId", default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<PeerId>,
}

impl WireEnvelope {
    pub fn new(body: EnvelopeBody, sender_id: &PeerId) -> Self {
        Self {
            body,
            sender_id: Some(sender_id.clone()),
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        match &self.body {
            EnvelopeBody::Action(_) => EnvelopeKind::Action,
            EnvelopeBody::Event(_) => EnvelopeKind::Event,
            EnvelopeBody::StateSync(_) => EnvelopeKind::StateSync,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum EnvelopeBody {
    Action(ActionPayload),
    Event(EventPayload),
    StateSync(StateSyncPayload),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    Action,
    Event,
    StateSync,
}

/// A request for the host to run a named action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub action_name: String,
    pub input: Value,
    pub context: WireContext,
    /// Seed the host rebuilds the action's DeterministicRng from
    pub action_seed: u64,
}

/// The serializable half of an [`ActionContext`]; the generator travels
/// as `action_seed` instead
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireContext {
    pub requester_id: PeerId,
    pub target_id: PeerId,
    pub is_host: bool,
}

impl From<&ActionContext> for WireContext {
    fn from(context: &ActionContext) -> Self {
        Self {
            requester_id: context.requester_id.clone(),
            target_id: context.target_id.clone(),
            is_host: context.is_host,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub event_name: String,
    pub payload: Value,
}

/// Either a complete state or a patch list, never both. A payload carrying
/// both fields matches neither variant and fails to decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum StateSyncPayload {
    Full {
        #[serde(rename = "fullState")]
        full_state: Value,
    },
    Patches { patches: Vec<Patch> },
}
