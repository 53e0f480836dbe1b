use crate::PreferenceValue;
use crate::ringtone::{CatalogConfig, RingtoneCatalogBuilder};
use crate::time::TimeValue;

/// Bounds of a number preference declared without explicit ones.
pub const DEFAULT_NUMBER_MIN: i32 = 0;
pub const DEFAULT_NUMBER_MAX: i32 = 100;

/// Kind of control behind a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    List,
    Ringtone,
    Time,
    Number,
}

impl PreferenceKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Ringtone => "ringtone",
            Self::Time => "time",
            Self::Number => "number",
        }
    }
}

/// Variant-specific part of a declarative preference definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantDefinition {
    List {
        entries: Vec<String>,
        entry_values: Vec<String>,
    },
    Ringtone(CatalogConfig),
    Time,
    Number {
        min: i32,
        max: i32,
        displayed_values: Option<Vec<String>>,
    },
}

/// Declarative description of one preference on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceDefinition {
    pub key: String,
    pub title: String,
    pub variant: VariantDefinition,
    pub default_value: PreferenceValue,
    /// Key of the preference this one is disabled by.
    pub dependency: Option<String>,
}

impl PreferenceDefinition {
    fn new(key: impl Into<String>, variant: VariantDefinition) -> Self {
        Self {
            key: key.into(),
            title: String::new(),
            variant,
            default_value: PreferenceValue::Absent,
            dependency: None,
        }
    }

    /// A list preference. `entries[i]` is shown for `entry_values[i]`.
    pub fn list(
        key: impl Into<String>,
        entries: Vec<String>,
        entry_values: Vec<String>,
    ) -> Self {
        Self::new(
            key,
            VariantDefinition::List {
                entries,
                entry_values,
            },
        )
    }

    pub fn ringtone(key: impl Into<String>, config: CatalogConfig) -> Self {
        Self::new(key, VariantDefinition::Ringtone(config))
    }

    pub fn time(key: impl Into<String>) -> Self {
        Self::new(key, VariantDefinition::Time)
    }

    /// A number preference bounded by
    /// [`DEFAULT_NUMBER_MIN`]..=[`DEFAULT_NUMBER_MAX`] until
    /// [`PreferenceDefinition::with_bounds`] says otherwise.
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(
            key,
            VariantDefinition::Number {
                min: DEFAULT_NUMBER_MIN,
                max: DEFAULT_NUMBER_MAX,
                displayed_values: None,
            },
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<PreferenceValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_dependency(mut self, key: impl Into<String>) -> Self {
        self.dependency = Some(key.into());
        self
    }

    /// Stepper bounds. Ignored for other variants.
    pub fn with_bounds(mut self, lower: i32, upper: i32) -> Self {
        if let VariantDefinition::Number { min, max, .. } = &mut self.variant {
            *min = lower;
            *max = upper;
        }
        self
    }

    /// Labels shown instead of the raw number. Ignored for other variants.
    pub fn with_displayed_values(mut self, values: Vec<String>) -> Self {
        if let VariantDefinition::Number {
            displayed_values, ..
        } = &mut self.variant
        {
            *displayed_values = Some(values);
        }
        self
    }

    pub fn kind(&self) -> PreferenceKind {
        match self.variant {
            VariantDefinition::List { .. } => PreferenceKind::List,
            VariantDefinition::Ringtone(_) => PreferenceKind::Ringtone,
            VariantDefinition::Time => PreferenceKind::Time,
            VariantDefinition::Number { .. } => PreferenceKind::Number,
        }
    }
}

/// Enumerated entries and values of a list preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    entries: Vec<String>,
    entry_values: Vec<String>,
}

impl ListState {
    pub(crate) fn new(entries: Vec<String>, entry_values: Vec<String>) -> Self {
        if entries.len() != entry_values.len() {
            log::warn!(
                "list preference has {} entries but {} values",
                entries.len(),
                entry_values.len()
            );
        }
        Self {
            entries,
            entry_values,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn entry_values(&self) -> &[String] {
        &self.entry_values
    }

    /// Entry text of the first value equal to `value`.
    pub fn entry_for(&self, value: &str) -> Option<&str> {
        self.entry_values
            .iter()
            .position(|candidate| candidate == value)
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
    }
}

/// Bounds, labels and write tracking of a number preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberState {
    value: i32,
    min: i32,
    max: i32,
    displayed_values: Option<Vec<String>>,
    persisted: bool,
}

impl NumberState {
    pub(crate) fn new(
        min: i32,
        max: i32,
        displayed_values: Option<Vec<String>>,
    ) -> Self {
        Self {
            value: 0,
            min,
            max: max.max(min),
            displayed_values,
            persisted: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn displayed_values(&self) -> Option<&[String]> {
        self.displayed_values.as_deref()
    }

    /// Whether a value has been written to the store at least once.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Upper bound; never drops below the lower bound.
    pub(crate) fn set_max(&mut self, max: i32) {
        self.max = max.max(self.min);
    }

    /// Lower bound; never rises above the upper bound.
    pub(crate) fn set_min(&mut self, min: i32) {
        self.min = min.min(self.max);
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    pub(crate) fn summary(&self) -> Option<String> {
        let index = usize::try_from(self.value).ok()?;
        let label = self
            .displayed_values
            .as_ref()
            .and_then(|values| values.get(index));
        Some(label.cloned().unwrap_or_else(|| self.value.to_string()))
    }
}

/// Ringtone state: the catalog builder owned by this preference.
pub struct RingtoneState {
    pub(crate) builder: RingtoneCatalogBuilder,
}

impl RingtoneState {
    pub fn config(&self) -> CatalogConfig {
        self.builder.config()
    }
}

impl std::fmt::Debug for RingtoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingtoneState")
            .field("config", &self.builder.config())
            .field("auditioning", &self.builder.is_auditioning())
            .finish()
    }
}

/// Runtime state of a preference, one arm per control kind.
#[derive(Debug)]
pub enum PreferenceVariant {
    List(ListState),
    Ringtone(RingtoneState),
    Time(TimeValue),
    Number(NumberState),
}

impl PreferenceVariant {
    pub fn kind(&self) -> PreferenceKind {
        match self {
            Self::List(_) => PreferenceKind::List,
            Self::Ringtone(_) => PreferenceKind::Ringtone,
            Self::Time(_) => PreferenceKind::Time,
            Self::Number(_) => PreferenceKind::Number,
        }
    }
}

/// A live preference on a screen.
///
/// Fields change only through
/// [`PreferenceChangeDispatcher`](crate::PreferenceChangeDispatcher).
#[derive(Debug)]
pub struct PreferenceEntry {
    pub(crate) key: String,
    pub(crate) title: String,
    pub(crate) variant: PreferenceVariant,
    pub(crate) persisted_value: PreferenceValue,
    pub(crate) summary: Option<String>,
    pub(crate) dependency_blocking: bool,
    pub(crate) dependency: Option<String>,
    pub(crate) enabled: bool,
}

impl PreferenceEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> PreferenceKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &PreferenceVariant {
        &self.variant
    }

    pub fn persisted_value(&self) -> &PreferenceValue {
        &self.persisted_value
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Whether dependents of this preference should be disabled.
    pub fn is_dependency_blocking(&self) -> bool {
        self.dependency_blocking
    }

    pub fn dependency(&self) -> Option<&str> {
        self.dependency.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn time_value(&self) -> Option<&TimeValue> {
        match &self.variant {
            PreferenceVariant::Time(value) => Some(value),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<&NumberState> {
        match &self.variant {
            PreferenceVariant::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&ListState> {
        match &self.variant {
            PreferenceVariant::List(list) => Some(list),
            _ => None,
        }
    }

    /// Only an empty time blocks its dependents.
    pub(crate) fn should_disable_dependents(&self) -> bool {
        match &self.variant {
            PreferenceVariant::Time(value) => value.is_absent(),
            PreferenceVariant::List(_)
            | PreferenceVariant::Ringtone(_)
            | PreferenceVariant::Number(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn given_max_below_min_when_built_then_bounds_collapse_to_min() {
        let number = NumberState::new(10, 5, None);

        assert_eq!(number.min(), 10);
        assert_eq!(number.max(), 10);
    }

    #[test]
    fn given_min_above_max_when_set_then_min_is_clamped() {
        let mut number = NumberState::new(0, 20, None);

        number.set_min(50);

        assert_eq!(number.min(), 20);
        assert_eq!(number.clamp(99), 20);
        assert_eq!(number.clamp(-3), 20);
    }

    #[test]
    fn given_displayed_values_when_summarized_then_label_or_decimal() {
        let mut number = NumberState::new(0, 5, Some(labels(&["zero", "one"])));

        number.set_value(1);
        assert_eq!(number.summary().as_deref(), Some("one"));

        number.set_value(4);
        assert_eq!(number.summary().as_deref(), Some("4"));

        number.set_value(-1);
        assert_eq!(number.summary(), None);
    }

    #[test]
    fn given_duplicate_values_when_looking_up_entry_then_first_match_wins() {
        let list = ListState::new(
            labels(&["Small", "Tiny", "Large"]),
            labels(&["s", "s", "l"]),
        );

        assert_eq!(list.entry_for("s"), Some("Small"));
        assert_eq!(list.entry_for("l"), Some("Large"));
        assert_eq!(list.entry_for("xl"), None);
    }

    #[test]
    fn given_number_definition_when_displayed_values_added_then_kept() {
        let definition = PreferenceDefinition::number("snooze")
            .with_bounds(1, 3)
            .with_displayed_values(labels(&["a", "b"]))
            .with_default(2);

        assert_eq!(definition.kind(), PreferenceKind::Number);
        assert_eq!(definition.default_value, PreferenceValue::Int(2));
        assert!(matches!(
            definition.variant,
            VariantDefinition::Number {
                displayed_values: Some(_),
                ..
            }
        ));
    }
}
