use crate::{DeterministicRng, PeerId};

/// Everything an action's `apply` knows about the request it is serving.
/// Built fresh for every submission and never persisted.
#[derive(Clone, Debug)]
pub struct ActionContext {
    /// Peer that submitted the action
    pub requester_id: PeerId,
    /// Peer the action is aimed at; the requester unless stated otherwise
    pub target_id: PeerId,
    /// Whether the requester was the host when it submitted
    pub is_host: bool,
    /// Seeded from the action seed, identical on every peer that replays it
    pub random: DeterministicRng,
}

impl ActionContext {
    pub fn new(
        requester_id: PeerId,
        target_id: Option<PeerId>,
        is_host: bool,
        action_seed: u64,
    ) -> Self {
        let target_id = target_id.unwrap_or_else(|| requester_id.clone());
        Self {
            requester_id,
            target_id,
            is_host,
            random: DeterministicRng::new(seed_to_i64(action_seed)),
        }
    }
}

pub(crate) fn seed_to_i64(seed: u64) -> i64 {
    // the generator only keeps 31 bits, so folding the top bit changes nothing
    (seed & i64::MAX as u64) as i64
}
