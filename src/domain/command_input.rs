//! Pending command text typed by the user.

/// Single mutable input value. Read and cleared on send; never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    value: String,
}

impl CommandInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the pending value.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Returns the pending value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the pending value and resets the input to `""`.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }
}
