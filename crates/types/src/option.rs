use crate::{NonEmptyText, TypeError};
use serde::{Deserialize, Serialize};

/// A selectable catalog entry: stable identifier plus display label.
///
/// Used uniformly for clinics, specialties and doctors. Equality compares both fields; use
/// [`SelectOption::same_value`] when only the identifier matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: NonEmptyText,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl AsRef<str>, label: impl Into<String>) -> Result<Self, TypeError> {
        Ok(Self {
            value: NonEmptyText::new(value)?,
            label: label.into(),
        })
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True when both options refer to the same catalog entry, ignoring the label.
    pub fn same_value(&self, other: &SelectOption) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Display for SelectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}
