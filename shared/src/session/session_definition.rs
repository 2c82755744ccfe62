use std::{collections::BTreeMap, fmt, sync::Arc};

use log::info;

use crate::{suggest::closest_match, PeerId, Value};

use super::{action_definition::ActionDefinition, error::ConfigurationError};

/// Passed to the session's `setup` hook when a runtime starts
#[derive(Clone, Debug)]
pub struct SetupContext {
    pub peer_ids: Vec<PeerId>,
}

type SetupFn = Arc<dyn Fn(&SetupContext) -> Value + Send + Sync>;
type PeerHookFn = Arc<dyn Fn(&mut Value, &PeerId) + Send + Sync>;

/// The game/session author's half of the contract: how to build the
/// initial state, which actions exist, and how peer arrivals and
/// departures change state.
///
/// Built once through [`SessionDefinition::builder`] and immutable after.
/// Cloning is cheap and shares the registered closures.
#[derive(Clone)]
pub struct SessionDefinition {
    setup: Option<SetupFn>,
    actions: BTreeMap<String, Arc<ActionDefinition>>,
    on_player_join: Option<PeerHookFn>,
    on_player_leave: Option<PeerHookFn>,
}

impl SessionDefinition {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Initial state for a session with the given peers; an empty map when
    /// no `setup` hook was registered
    pub fn initial_state(&self, peer_ids: &[PeerId]) -> Value {
        match &self.setup {
            Some(setup) => setup(&SetupContext {
                peer_ids: peer_ids.to_vec(),
            }),
            None => Value::empty_map(),
        }
    }

    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(name).map(Arc::as_ref)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, in sorted order
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// The registered action name closest to `name`, if close enough to
    /// be worth suggesting
    pub fn suggest_action(&self, name: &str) -> Option<String> {
        closest_match(name, self.action_names()).map(str::to_string)
    }

    pub fn player_joined(&self, state: &mut Value, peer_id: &PeerId) {
        if let Some(hook) = &self.on_player_join {
            hook(state, peer_id);
        }
    }

    pub fn player_left(&self, state: &mut Value, peer_id: &PeerId) {
        if let Some(hook) = &self.on_player_leave {
            hook(state, peer_id);
        }
    }
}

impl fmt::Debug for SessionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionDefinition")
            .field("setup", &self.setup.is_some())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("on_player_join", &self.on_player_join.is_some())
            .field("on_player_leave", &self.on_player_leave.is_some())
            .finish()
    }
}

/// Accumulates a [`SessionDefinition`]. Registration problems are held
/// until [`SessionBuilder::build`], which reports the first of them.
#[derive(Default)]
pub struct SessionBuilder {
    setup: Option<SetupFn>,
    actions: BTreeMap<String, Arc<ActionDefinition>>,
    on_player_join: Option<PeerHookFn>,
    on_player_leave: Option<PeerHookFn>,
    errors: Vec<ConfigurationError>,
    built: bool,
}

impl SessionBuilder {
    pub fn setup<F>(&mut self, setup: F) -> &mut Self
    where
        F: Fn(&SetupContext) -> Value + Send + Sync + 'static,
    {
        self.check_built();
        self.setup = Some(Arc::new(setup));
        self
    }

    pub fn add_action<S: Into<String>>(&mut self, name: S, definition: ActionDefinition) -> &mut Self {
        self.check_built();
        let name = name.into();
        if name.is_empty() {
            self.errors.push(ConfigurationError::EmptyActionName);
            return self;
        }
        if self.actions.contains_key(&name) {
            self.errors
                .push(ConfigurationError::DuplicateAction { action: name });
            return self;
        }
        self.actions.insert(name, Arc::new(definition));
        self
    }

    pub fn on_player_join<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Value, &PeerId) + Send + Sync + 'static,
    {
        self.check_built();
        self.on_player_join = Some(Arc::new(hook));
        self
    }

    pub fn on_player_leave<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Value, &PeerId) + Send + Sync + 'static,
    {
        self.check_built();
        self.on_player_leave = Some(Arc::new(hook));
        self
    }

    /// Validates every registered action and produces the definition.
    /// Configuration errors are always fatal; there is no lenient mode.
    pub fn build(&mut self) -> Result<SessionDefinition, ConfigurationError> {
        if self.built {
            return Err(ConfigurationError::AlreadyBuilt);
        }
        if let Some(error) = self.errors.first() {
            return Err(error.clone());
        }
        for (name, definition) in &self.actions {
            if !definition.has_apply() {
                return Err(ConfigurationError::MissingApply {
                    action: name.clone(),
                });
            }
        }

        self.built = true;
        info!(
            "SessionDefinition: built with {} actions",
            self.actions.len()
        );

        Ok(SessionDefinition {
            setup: self.setup.take(),
            actions: std::mem::take(&mut self.actions),
            on_player_join: self.on_player_join.take(),
            on_player_leave: self.on_player_leave.take(),
        })
    }

    fn check_built(&mut self) {
        if self.built {
            self.errors.push(ConfigurationError::AlreadyBuilt);
        }
    }
}
