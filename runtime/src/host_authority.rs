use hostsync_shared::{ActionContext, ActionDefinition, ActionError, Value};

/// Write capability over canonical state. Only ever constructed for the
/// host, so every host-only write path has to go through one.
pub(crate) struct HostAuthority {
    _private: (),
}

impl HostAuthority {
    pub(crate) fn grant(is_host: bool) -> Option<Self> {
        if is_host {
            Some(Self { _private: () })
        } else {
            None
        }
    }

    pub(crate) fn mutate<F: FnOnce(&mut Value)>(&self, state: &mut Value, mutator: F) {
        mutator(state);
    }

    /// Runs an action's `apply` against canonical state. A failing action
    /// keeps whatever it already wrote; nothing is rolled back.
    pub(crate) fn apply_action(
        &self,
        action: &ActionDefinition,
        state: &mut Value,
        context: &mut ActionContext,
        input: &Value,
    ) -> Result<(), ActionError> {
        action.run(state, context, input)
    }
}
