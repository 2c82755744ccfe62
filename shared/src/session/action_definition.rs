use std::fmt;

use serde::de::DeserializeOwned;

use crate::{ActionContext, Value};

use super::error::ActionError;

type InputSchema = Box<dyn Fn(&Value) -> Result<(), ActionError> + Send + Sync>;
type ApplyFn =
    Box<dyn Fn(&mut Value, &mut ActionContext, &Value) -> Result<(), ActionError> + Send + Sync>;

/// A named state transition: an optional input validator plus the `apply`
/// function the host runs against canonical state.
///
/// ```ignore
/// let definition = ActionDefinition::new()
///     .input_schema(|input| match input.as_f64() {
///         Some(_) => Ok(()),
///         None => Err(ActionError::invalid_input("expected a number")),
///     })
///     .apply(|state, _context, input| {
///         state.insert("score", input.clone());
///         Ok(())
///     });
/// ```
#[derive(Default)]
pub struct ActionDefinition {
    input_schema: Option<InputSchema>,
    apply: Option<ApplyFn>,
}

impl ActionDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action whose input is deserialized into `I` at the boundary. Input
    /// that does not deserialize is rejected before `apply` ever runs.
    pub fn typed<I, F>(apply: F) -> Self
    where
        I: DeserializeOwned + 'static,
        F: Fn(&mut Value, &mut ActionContext, I) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::new()
            .input_schema(|input| decode_input::<I>(input).map(|_| ()))
            .apply(move |state, context, input| {
                let input = decode_input::<I>(input)?;
                apply(state, context, input)
            })
    }

    pub fn input_schema<F>(mut self, schema: F) -> Self
    where
        F: Fn(&Value) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.input_schema = Some(Box::new(schema));
        self
    }

    pub fn apply<F>(mut self, apply: F) -> Self
    where
        F: Fn(&mut Value, &mut ActionContext, &Value) -> Result<(), ActionError>
            + Send
            + Sync
            + 'static,
    {
        self.apply = Some(Box::new(apply));
        self
    }

    pub fn has_apply(&self) -> bool {
        self.apply.is_some()
    }

    pub fn has_input_schema(&self) -> bool {
        self.input_schema.is_some()
    }

    /// Runs the input schema, if any
    pub fn validate(&self, input: &Value) -> Result<(), ActionError> {
        match &self.input_schema {
            Some(schema) => schema(input),
            None => Ok(()),
        }
    }

    /// Runs `apply`. Definitions only reach a built session with an
    /// `apply` present, so the missing case is reported as a rejection.
    pub fn run(
        &self,
        state: &mut Value,
        context: &mut ActionContext,
        input: &Value,
    ) -> Result<(), ActionError> {
        match &self.apply {
            Some(apply) => apply(state, context, input),
            None => Err(ActionError::rejected("action has no apply function")),
        }
    }
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("input_schema", &self.input_schema.is_some())
            .field("apply", &self.apply.is_some())
            .finish()
    }
}

fn decode_input<I: DeserializeOwned>(input: &Value) -> Result<I, ActionError> {
    serde_json::from_value(serde_json::Value::from(input))
        .map_err(|error| ActionError::invalid_input(error.to_string()))
}
