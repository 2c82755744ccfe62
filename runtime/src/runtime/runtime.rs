use std::collections::BTreeSet;

use log::{debug, info, trace, warn};

use hostsync_shared::{
    apply_patch, ActionPayload, EnvelopeBody, EventPayload, Patch, PeerId, SessionDefinition,
    StateSyncPayload, Transport, TransportEvent, Value, WireEnvelope,
};

use crate::{
    action_router::ActionRouter,
    host_authority::HostAuthority,
    listeners::{ListenerKey, Listeners},
    sync_scheduler::SyncScheduler,
    RuntimeError, SessionConfig,
};

/// One peer's view of a replicated session.
///
/// On the host it owns the canonical state, applies actions and
/// periodically broadcasts diffs. On every other peer it holds a mirror
/// that only changes by replaying what the host sends.
///
/// Nothing happens in the background: call [`Runtime::update`] regularly
/// to drain the transport and drive the sync timer.
pub struct Runtime {
    definition: SessionDefinition,
    transport: Box<dyn Transport>,
    config: SessionConfig,
    local_id: PeerId,
    state: Value,
    authority: Option<HostAuthority>,
    router: ActionRouter,
    scheduler: Option<SyncScheduler>,
    listeners: Listeners,
    peer_ids: BTreeSet<PeerId>,
    destroyed: bool,
}

impl Runtime {
    /// Create a new Runtime. The initial state comes from the definition's
    /// `setup` hook, called with `config.initial_peer_ids`.
    pub fn new<T: Transport + 'static>(
        definition: SessionDefinition,
        transport: T,
        config: SessionConfig,
    ) -> Result<Self, RuntimeError> {
        let local_id = transport.local_id().clone();
        if transport.is_host() != config.is_host {
            warn!(
                "Runtime: transport reports is_host = {} for {} but config says {}, using config",
                transport.is_host(),
                local_id,
                config.is_host
            );
        }

        let state = definition.initial_state(&config.initial_peer_ids);
        let authority = HostAuthority::grant(config.is_host);
        let scheduler = if authority.is_some() {
            Some(SyncScheduler::new(config.sync_interval, &state)?)
        } else {
            None
        };
        let peer_ids = config.initial_peer_ids.iter().cloned().collect();

        info!(
            "Runtime: {} started as {}",
            local_id,
            if config.is_host { "host" } else { "peer" }
        );

        Ok(Self {
            definition,
            transport: Box::new(transport),
            config,
            local_id,
            state,
            authority,
            router: ActionRouter::new(),
            scheduler,
            listeners: Listeners::new(),
            peer_ids,
            destroyed: false,
        })
    }

    // Accessors

    /// Canonical state on the host, the local mirror everywhere else
    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn is_host(&self) -> bool {
        self.authority.is_some()
    }

    pub fn local_id(&self) -> &PeerId {
        &self.local_id
    }

    /// Peers currently known to be in the session, in sorted order
    pub fn peer_ids(&self) -> impl Iterator<Item = &PeerId> {
        self.peer_ids.iter()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn definition(&self) -> &SessionDefinition {
        &self.definition
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // Actions

    /// Requests the named action. The host applies it immediately; every
    /// peer also sends it to the transport so a remote host can replay it.
    ///
    /// `target` defaults to this peer.
    pub fn submit_action<V: Into<Value>>(
        &mut self,
        name: &str,
        input: V,
        target: Option<PeerId>,
    ) -> Result<(), RuntimeError> {
        if self.destroyed {
            return self.surface(RuntimeError::Destroyed {
                operation: "submit an action",
            });
        }

        let input = input.into();
        let action = match self.router.route(&self.definition, name, &input) {
            Ok(action) => action,
            Err(error) => return self.surface(error),
        };

        let is_host = self.authority.is_some();
        let (mut context, seed) = self.router.local_context(&self.local_id, target, is_host);

        let mut rejection = None;
        if let Some(authority) = &self.authority {
            match authority.apply_action(action, &mut self.state, &mut context, &input) {
                Ok(()) => self.listeners.notify_change(&self.state),
                Err(error) => {
                    rejection = Some(RuntimeError::ActionRejected {
                        action: name.to_string(),
                        reason: error.to_string(),
                    })
                }
            }
        }

        debug!("Runtime: {} submitted '{}' with seed {}", self.local_id, name, seed);
        let envelope =
            ActionRouter::action_envelope(name, input, &context, seed, &self.local_id);
        self.send(None, &envelope)?;

        match rejection {
            Some(error) => self.surface(error),
            None => Ok(()),
        }
    }

    /// Runs `mutator` against canonical state. Only the host may do this;
    /// other peers get a [`RuntimeError::PrivilegeViolation`].
    pub fn mutate_state<F: FnOnce(&mut Value)>(&mut self, mutator: F) -> Result<(), RuntimeError> {
        if self.destroyed {
            return self.surface(RuntimeError::Destroyed {
                operation: "mutate state",
            });
        }

        match &self.authority {
            Some(authority) => {
                authority.mutate(&mut self.state, mutator);
                self.listeners.notify_change(&self.state);
                Ok(())
            }
            None => self.surface(RuntimeError::PrivilegeViolation {
                operation: "mutate state",
            }),
        }
    }

    // Events

    /// Sends a transient, unreplicated event to every other peer. Local
    /// event listeners are not called.
    pub fn broadcast_event<V: Into<Value>>(&mut self, name: &str, payload: V) -> Result<(), RuntimeError> {
        if self.destroyed {
            return self.surface(RuntimeError::Destroyed {
                operation: "broadcast an event",
            });
        }

        let envelope = WireEnvelope::new(
            EnvelopeBody::Event(EventPayload {
                event_name: name.to_string(),
                payload: payload.into(),
            }),
            &self.local_id,
        );
        self.send(None, &envelope)
    }

    pub fn on_event<F: FnMut(&Value, &PeerId) + 'static>(&mut self, name: &str, listener: F) -> ListenerKey {
        self.listeners.add_event(name.to_string(), Box::new(listener))
    }

    /// Called with the full state after every local or replicated change
    pub fn on_change<F: FnMut(&Value) + 'static>(&mut self, listener: F) -> ListenerKey {
        self.listeners.add_change(Box::new(listener))
    }

    /// Called with each patch list this peer replays, or on the host, each
    /// patch list it broadcasts. Patches skipped in lenient mode are left out.
    pub fn on_patch<F: FnMut(&[Patch]) + 'static>(&mut self, listener: F) -> ListenerKey {
        self.listeners.add_patch(Box::new(listener))
    }

    /// Detaches a listener. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, key: ListenerKey) -> bool {
        self.listeners.remove(key)
    }

    // Updates

    /// Must be called regularly. Handles every pending transport event and,
    /// on the host, runs a sync tick once the interval has elapsed.
    pub fn update(&mut self) -> Result<(), RuntimeError> {
        if self.destroyed {
            return Ok(());
        }

        loop {
            let event = match self.transport.receive() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(error) => {
                    self.surface(error.into())?;
                    break;
                }
            };
            self.handle_event(event)?;
        }

        let ringing = self.scheduler.as_ref().is_some_and(SyncScheduler::ringing);
        if ringing {
            self.sync_tick()?;
        }

        Ok(())
    }

    /// Runs a sync tick now, regardless of the timer
    pub fn flush_sync(&mut self) -> Result<(), RuntimeError> {
        if self.destroyed {
            return self.surface(RuntimeError::Destroyed {
                operation: "flush sync",
            });
        }
        if self.scheduler.is_none() {
            return self.surface(RuntimeError::PrivilegeViolation {
                operation: "flush sync",
            });
        }
        self.sync_tick()
    }

    /// Stops syncing, drops every listener and disconnects the transport.
    /// Later calls are inert.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.scheduler = None;
        self.listeners.clear();
        self.transport.disconnect();
        info!("Runtime: {} destroyed", self.local_id);
    }

    // Private methods

    fn sync_tick(&mut self) -> Result<(), RuntimeError> {
        let Some(scheduler) = self.scheduler.as_mut() else {
            return Ok(());
        };
        let Some(payload) = scheduler.tick(&self.state)? else {
            return Ok(());
        };

        if let StateSyncPayload::Patches { patches } = &payload {
            self.listeners.notify_patch(patches);
        }

        let envelope = WireEnvelope::new(EnvelopeBody::StateSync(payload), &self.local_id);
        self.send(None, &envelope)
    }

    fn handle_event(&mut self, event: TransportEvent) -> Result<(), RuntimeError> {
        match event {
            TransportEvent::Message { envelope, sender } => match envelope.body {
                EnvelopeBody::Action(payload) => self.receive_action(payload, &sender),
                EnvelopeBody::Event(payload) => {
                    trace!("Runtime: event '{}' from {}", payload.event_name, sender);
                    self.listeners
                        .notify_event(&payload.event_name, &payload.payload, &sender);
                    Ok(())
                }
                EnvelopeBody::StateSync(payload) => self.receive_state_sync(payload, &sender),
            },
            TransportEvent::PeerJoined(peer_id) => self.peer_joined(peer_id),
            TransportEvent::PeerLeft(peer_id) => {
                info!("Runtime: peer {} left", peer_id);
                self.peer_ids.remove(&peer_id);
                self.definition.player_left(&mut self.state, &peer_id);
                self.listeners.notify_change(&self.state);
                Ok(())
            }
        }
    }

    fn peer_joined(&mut self, peer_id: PeerId) -> Result<(), RuntimeError> {
        info!("Runtime: peer {} joined", peer_id);
        self.peer_ids.insert(peer_id.clone());
        self.definition.player_joined(&mut self.state, &peer_id);
        self.listeners.notify_change(&self.state);

        if self.authority.is_none() {
            return Ok(());
        }

        let envelope = WireEnvelope::new(
            EnvelopeBody::StateSync(StateSyncPayload::Full {
                full_state: self.state.deep_clone()?,
            }),
            &self.local_id,
        );
        self.send(Some(&peer_id), &envelope)
    }

    fn receive_action(&mut self, payload: ActionPayload, sender: &PeerId) -> Result<(), RuntimeError> {
        let Some(authority) = &self.authority else {
            trace!("Runtime: ignoring action '{}' on non-host", payload.action_name);
            return Ok(());
        };
        if *sender == self.local_id {
            return Ok(());
        }

        let action = match self
            .router
            .route(&self.definition, &payload.action_name, &payload.input)
        {
            Ok(action) => action,
            Err(error) => return self.surface(error),
        };

        let mut context = ActionRouter::remote_context(&payload, sender);
        match authority.apply_action(action, &mut self.state, &mut context, &payload.input) {
            Ok(()) => {
                self.listeners.notify_change(&self.state);
                Ok(())
            }
            Err(error) => self.surface(RuntimeError::ActionRejected {
                action: payload.action_name,
                reason: error.to_string(),
            }),
        }
    }

    fn receive_state_sync(&mut self, payload: StateSyncPayload, sender: &PeerId) -> Result<(), RuntimeError> {
        if self.authority.is_some() {
            warn!("Runtime: host ignoring state sync from {}", sender);
            return Ok(());
        }

        match payload {
            StateSyncPayload::Full { full_state } => {
                debug!("Runtime: full state from {}", sender);
                self.state = full_state;
                self.listeners.notify_change(&self.state);
            }
            StateSyncPayload::Patches { patches } => {
                trace!("Runtime: {} patches from {}", patches.len(), sender);
                let mut applied = Vec::with_capacity(patches.len());
                for patch in patches {
                    match apply_patch(&mut self.state, &patch) {
                        Ok(()) => applied.push(patch),
                        // fatal errors stop the replay, the rest skip one patch
                        Err(error) => self.surface(error.into())?,
                    }
                }
                self.listeners.notify_change(&self.state);
                self.listeners.notify_patch(&applied);
            }
        }
        Ok(())
    }

    fn send(&mut self, target: Option<&PeerId>, envelope: &WireEnvelope) -> Result<(), RuntimeError> {
        match self.transport.send(target, envelope) {
            Ok(()) => Ok(()),
            Err(error) => self.surface(error.into()),
        }
    }

    /// Returns fatal errors, and every error in strict mode. Everything
    /// else is logged and swallowed.
    fn surface(&self, error: RuntimeError) -> Result<(), RuntimeError> {
        if self.config.strict || error.is_fatal() {
            return Err(error);
        }
        warn!("Runtime: {}", error);
        Ok(())
    }
}
