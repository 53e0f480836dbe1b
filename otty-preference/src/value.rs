use serde::{Deserialize, Serialize};

/// Value carried by a change event or held as a preference's persisted
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceValue {
    /// No value. For ringtones this means "use the default tone".
    #[default]
    Absent,
    Text(String),
    Int(i32),
}

impl PreferenceValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload. Text that holds a decimal integer also converts.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
            Self::Absent => None,
        }
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for PreferenceValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<Option<String>> for PreferenceValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}
