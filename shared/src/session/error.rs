use thiserror::Error;

/// Errors in a session definition, raised eagerly when it is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Action registered without an `apply` function
    #[error("Action '{action}' has no apply function. Call `ActionDefinition::apply()` before registering it")]
    MissingApply { action: String },

    /// Action registered under an empty name
    #[error("Actions must have a non-empty name")]
    EmptyActionName,

    /// The same action name was registered twice
    #[error("Action '{action}' is registered more than once")]
    DuplicateAction { action: String },

    /// The definition was already built and can no longer be changed
    #[error("SessionDefinition is already built and cannot be modified")]
    AlreadyBuilt,
}

/// Errors an action reports while validating or applying its input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Input did not satisfy the action's input schema
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The action refused to apply against the current state
    #[error("rejected: {reason}")]
    Rejected { reason: String },
}

impl ActionError {
    pub fn invalid_input<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn rejected<S: Into<String>>(reason: S) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}
