//! Step model
//!
//! A step is one page of a multi-step form: a stable identity, a kind key,
//! a display title, an optional data payload and an optional validator.

use std::fmt;

use super::ids::StepId;

/// Predicate gating forward navigation out of a step
pub type Validator<T> = Box<dyn Fn(&T) -> bool>;

/// One page of a wizard
pub struct Step<T> {
    id: StepId,
    key: String,
    title: String,
    data: Option<T>,
    validator: Option<Validator<T>>,
}

impl<T> Step<T> {
    /// Create a step with unset data and no validator
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: StepId::new(),
            key: key.into(),
            title: title.into(),
            data: None,
            validator: None,
        }
    }

    /// Set the initial data payload
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a validator
    pub fn with_validator(mut self, validator: impl Fn(&T) -> bool + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Identity used to track the cursor across structural changes
    pub fn id(&self) -> StepId {
        self.id
    }

    /// Kind key, e.g. `"newsletter"`
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The data payload, `None` when unset
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Whether the step lets the cursor move forward.
    ///
    /// A step without a validator, or whose data is unset, always passes.
    pub fn is_valid(&self) -> bool {
        match (&self.validator, &self.data) {
            (Some(validate), Some(data)) => validate(data),
            _ => true,
        }
    }

    /// Replace the data payload, returning the previous one
    pub(crate) fn replace_data(&mut self, data: T) -> Option<T> {
        self.data.replace(data)
    }

    /// Reset the data payload to the unset sentinel
    pub(crate) fn clear_data(&mut self) -> Option<T> {
        self.data.take()
    }
}

impl<T: fmt::Debug> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("title", &self.title)
            .field("data", &self.data)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl<T> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.key)
    }
}
