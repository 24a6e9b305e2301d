//! Policy value object

use serde::{Deserialize, Serialize};

/// The policy text under deliberation (Value Object)
///
/// This is the proposal the assembly discusses and ultimately votes on.
/// It is quoted verbatim in every participant's scenario prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    text: String,
}

impl Policy {
    /// Create a new policy
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Policy cannot be empty");
        Self { text }
    }

    /// Try to create a new policy, returning None if invalid
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    /// Get the policy text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Policy {
    fn from(s: &str) -> Self {
        Policy::new(s)
    }
}

impl From<String> for Policy {
    fn from(s: String) -> Self {
        Policy::new(s)
    }
}
