use log::{debug, warn};

use hostsync_shared::{
    ActionContext, ActionDefinition, ActionPayload, EnvelopeBody, PeerId, SessionDefinition,
    Value, WireContext, WireEnvelope,
};

use crate::RuntimeError;

/// First seed handed out by a runtime; well clear of small hand-picked seeds
pub const ACTION_SEED_START: u64 = 1_000_000;

/// Resolves action names against the session's action table, validates
/// input and builds the context each action runs with.
pub(crate) struct ActionRouter {
    next_seed: u64,
}

impl ActionRouter {
    pub(crate) fn new() -> Self {
        Self {
            next_seed: ACTION_SEED_START,
        }
    }

    pub(crate) fn next_seed(&mut self) -> u64 {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        seed
    }

    /// Looks up `name` and checks `input` against its schema
    pub(crate) fn route<'d>(
        &self,
        definition: &'d SessionDefinition,
        name: &str,
        input: &Value,
    ) -> Result<&'d ActionDefinition, RuntimeError> {
        let Some(action) = definition.action(name) else {
            return Err(RuntimeError::UnknownAction {
                name: name.to_string(),
                suggestion: definition.suggest_action(name),
            });
        };

        action
            .validate(input)
            .map_err(|error| RuntimeError::InvalidInput {
                action: name.to_string(),
                reason: error.to_string(),
            })?;

        Ok(action)
    }

    /// Context for an action submitted by this peer, with a fresh seed
    pub(crate) fn local_context(
        &mut self,
        local_id: &PeerId,
        target_id: Option<PeerId>,
        is_host: bool,
    ) -> (ActionContext, u64) {
        let seed = self.next_seed();
        let context = ActionContext::new(local_id.clone(), target_id, is_host, seed);
        (context, seed)
    }

    /// Context for an action received from `sender`. The generator is
    /// rebuilt from the transmitted seed so the host draws exactly what
    /// the requester would have drawn.
    pub(crate) fn remote_context(payload: &ActionPayload, sender: &PeerId) -> ActionContext {
        let WireContext {
            requester_id,
            target_id,
            is_host,
        } = &payload.context;

        if requester_id != sender {
            warn!(
                "ActionRouter: action '{}' claims requester {} but was sent by {}, using sender",
                payload.action_name, requester_id, sender
            );
        }

        debug!(
            "ActionRouter: rebuilding context for '{}' from {} with seed {}",
            payload.action_name, sender, payload.action_seed
        );

        ActionContext::new(
            sender.clone(),
            Some(target_id.clone()),
            *is_host,
            payload.action_seed,
        )
    }

    pub(crate) fn action_envelope(
        name: &str,
        input: Value,
        context: &ActionContext,
        action_seed: u64,
        sender_id: &PeerId,
    ) -> WireEnvelope {
        WireEnvelope::new(
            EnvelopeBody::Action(ActionPayload {
                action_name: name.to_string(),
                input,
                context: WireContext::from(context),
                action_seed,
            }),
            sender_id,
        )
    }
}
