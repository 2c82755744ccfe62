pub mod action_context;
pub mod action_definition;
pub mod error;
pub mod session_definition;

pub use action_context::ActionContext;
pub use action_definition::ActionDefinition;
pub use error::{ActionError, ConfigurationError};
pub use session_definition::{SessionBuilder, SessionDefinition, SetupContext};
