use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::entry::NumberState;
use crate::time::{HourCycle, TimeValue};

pub(crate) const FIELD_VALUE: &str = "value";
pub(crate) const FIELD_MIN: &str = "min";
pub(crate) const FIELD_MAX: &str = "max";
pub(crate) const FIELD_SELECTED: &str = "selected";
pub(crate) const FIELD_HOUR: &str = "hour";
pub(crate) const FIELD_MINUTE: &str = "minute";
pub(crate) const FIELD_IS_24_HOUR: &str = "is_24_hour";
pub(crate) const FIELD_NEUTRAL_TEXT: &str = "neutral_text";

/// Editor dialog chosen for a preference kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    NumberStepper,
    RingtoneList,
    TimePicker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedField {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// State of the one open dialog.
///
/// Hosts may serialize a session across an interruption and hand it back
/// unchanged; nothing in it is recomputed on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSession {
    preference_key: String,
    kind: DialogKind,
    #[serde(default)]
    saved_fields: BTreeMap<String, SavedField>,
}

/// Typed view of the editor bound to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEditor {
    NumberStepper { value: i32, min: i32, max: i32 },
    /// `selected` is `None` when the stored value matches no candidate.
    RingtoneList { selected: Option<usize> },
    TimePicker { hour: u32, minute: u32, is_24_hour: bool },
}

impl DialogSession {
    pub fn new(preference_key: impl Into<String>, kind: DialogKind) -> Self {
        Self {
            preference_key: preference_key.into(),
            kind,
            saved_fields: BTreeMap::new(),
        }
    }

    pub(crate) fn number_stepper(key: &str, number: &NumberState) -> Self {
        let mut session = Self::new(key, DialogKind::NumberStepper);
        session.set_int(FIELD_VALUE, number.clamp(number.value()).into());
        session.set_int(FIELD_MIN, number.min().into());
        session.set_int(FIELD_MAX, number.max().into());
        session
    }

    pub(crate) fn ringtone_list(key: &str, selected: Option<usize>) -> Self {
        let mut session = Self::new(key, DialogKind::RingtoneList);
        if let Some(position) = selected.and_then(|p| i64::try_from(p).ok()) {
            session.set_int(FIELD_SELECTED, position);
        }
        session
    }

    pub(crate) fn time_picker(
        key: &str,
        (hour, minute): (u32, u32),
        cycle: HourCycle,
        neutral_text: String,
    ) -> Self {
        let mut session = Self::new(key, DialogKind::TimePicker);
        session.set_int(FIELD_HOUR, hour.into());
        session.set_int(FIELD_MINUTE, minute.into());
        session.set_bool(FIELD_IS_24_HOUR, cycle.is_24_hour());
        session.set_text(FIELD_NEUTRAL_TEXT, neutral_text);
        session
    }

    pub fn preference_key(&self) -> &str {
        &self.preference_key
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn saved_fields(&self) -> &BTreeMap<String, SavedField> {
        &self.saved_fields
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.saved_fields.get(name) {
            Some(SavedField::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.saved_fields.get(name) {
            Some(SavedField::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.saved_fields.get(name) {
            Some(SavedField::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Label of the neutral button, when the dialog has one.
    pub fn neutral_text(&self) -> Option<&str> {
        self.text(FIELD_NEUTRAL_TEXT)
    }

    pub fn set_int(&mut self, name: &str, value: i64) {
        self.saved_fields
            .insert(name.to_string(), SavedField::Int(value));
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.saved_fields
            .insert(name.to_string(), SavedField::Bool(value));
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.saved_fields
            .insert(name.to_string(), SavedField::Text(value.into()));
    }

    /// Bind the editor input of this session.
    ///
    /// # Panics
    ///
    /// Panics when a field the editor cannot work without is missing or out
    /// of range. Sessions built by the controller always carry them.
    /// Stepper bounds saved as `min > max` collapse onto `min`.
    pub fn editor(&self) -> DialogEditor {
        match self.kind {
            DialogKind::NumberStepper => {
                let min: i32 = self.required(FIELD_MIN);
                let max: i32 = self.required(FIELD_MAX);
                DialogEditor::NumberStepper {
                    value: self.required(FIELD_VALUE),
                    min,
                    max: max.max(min),
                }
            },
            DialogKind::RingtoneList => DialogEditor::RingtoneList {
                selected: self
                    .int(FIELD_SELECTED)
                    .and_then(|position| usize::try_from(position).ok()),
            },
            DialogKind::TimePicker => DialogEditor::TimePicker {
                hour: self.required(FIELD_HOUR),
                minute: self.required(FIELD_MINUTE),
                is_24_hour: self.bool(FIELD_IS_24_HOUR).unwrap_or(true),
            },
        }
    }

    /// Time currently shown by a time picker.
    pub fn picked_time(&self) -> Option<TimeValue> {
        if self.kind != DialogKind::TimePicker {
            return None;
        }
        match self.editor() {
            DialogEditor::TimePicker { hour, minute, .. } => {
                TimeValue::from_fields(hour, minute)
            },
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    fn required<T: TryFrom<i64>>(&self, name: &str) -> T {
        self.int(name)
            .and_then(|value| T::try_from(value).ok())
            .unwrap_or_else(|| {
                panic!(
                    "{:?} dialog for [{}] has no usable `{name}` field",
                    self.kind, self.preference_key
                )
            })
    }
}
