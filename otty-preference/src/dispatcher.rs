use std::collections::VecDeque;
use std::rc::Rc;

use crate::entry::{
    ListState, NumberState, PreferenceDefinition, PreferenceEntry,
    PreferenceKind, PreferenceVariant, RingtoneState, VariantDefinition,
};
use crate::options::PreferenceOptions;
use crate::ringtone::{
    CandidateList, RingtoneCatalog, RingtoneCatalogBuilder, ToneType,
};
use crate::store::PersistedValueStore;
use crate::time::{self, TimeValue};
use crate::titles::TitleProvider;
use crate::{PreferenceError, PreferenceValue, Result};

/// Notifications queued while values are accepted. Drain them with
/// [`PreferenceChangeDispatcher::next_effect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceEffect {
    /// The persisted value of `key` changed.
    ValueChanged { key: String },
    /// The displayed summary of `key` changed.
    SummaryChanged { key: String, summary: Option<String> },
    /// Dependents of `key` must be disabled while `blocking` is set.
    DependencyChanged { key: String, blocking: bool },
}

/// Result of running a candidate value through a variant policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Rejected,
    Kept,
    Changed,
}

/// Central controller every control reports candidate values to.
///
/// It owns the entries of one screen, decides whether a value is accepted,
/// persists it, recomputes summaries and keeps dependents in step with
/// blocking entries.
pub struct PreferenceChangeDispatcher<S> {
    store: S,
    catalog: Rc<dyn RingtoneCatalog>,
    titles: Rc<dyn TitleProvider>,
    options: PreferenceOptions,
    entries: Vec<PreferenceEntry>,
    effects: VecDeque<PreferenceEffect>,
}

impl<S: PersistedValueStore> PreferenceChangeDispatcher<S> {
    pub fn new(
        store: S,
        catalog: Rc<dyn RingtoneCatalog>,
        titles: Rc<dyn TitleProvider>,
        options: PreferenceOptions,
    ) -> Self {
        Self {
            store,
            catalog,
            titles,
            options,
            entries: Vec::new(),
            effects: VecDeque::new(),
        }
    }

    /// Build a screen from its definitions, in declaration order.
    pub fn build(
        store: S,
        catalog: Rc<dyn RingtoneCatalog>,
        titles: Rc<dyn TitleProvider>,
        options: PreferenceOptions,
        definitions: impl IntoIterator<Item = PreferenceDefinition>,
    ) -> Result<Self> {
        let mut dispatcher = Self::new(store, catalog, titles, options);
        for definition in definitions {
            dispatcher.add(definition)?;
        }
        Ok(dispatcher)
    }

    /// Add a preference. A declared default is written to the store first
    /// when the store has no value for the key yet.
    pub fn add(&mut self, definition: PreferenceDefinition) -> Result<()> {
        if self.position(&definition.key).is_some() {
            return Err(PreferenceError::DuplicateKey {
                key: definition.key,
            });
        }

        self.apply_default(&definition);

        let PreferenceDefinition {
            key,
            title,
            variant,
            dependency,
            ..
        } = definition;

        let (variant, persisted_value) = match variant {
            VariantDefinition::List {
                entries,
                entry_values,
            } => (
                PreferenceVariant::List(ListState::new(entries, entry_values)),
                self.store.get_string(&key, None).into(),
            ),
            VariantDefinition::Ringtone(config) => {
                let builder = RingtoneCatalogBuilder::new(
                    Rc::clone(&self.catalog),
                    Rc::clone(&self.titles),
                    config,
                );
                (
                    PreferenceVariant::Ringtone(RingtoneState { builder }),
                    self.store.get_string(&key, None).into(),
                )
            },
            VariantDefinition::Time => {
                let raw = self.store.get_string(&key, None);
                let value = raw
                    .as_deref()
                    .map_or_else(TimeValue::absent, |text| {
                        parse_time_logged(&key, text)
                    });
                (PreferenceVariant::Time(value), raw.into())
            },
            VariantDefinition::Number {
                min,
                max,
                displayed_values,
            } => {
                let mut number = NumberState::new(min, max, displayed_values);
                let persisted_value = if self.store.contains(&key) {
                    number.set_value(self.store.get_int(&key, number.value()));
                    number.mark_persisted();
                    PreferenceValue::Int(number.value())
                } else {
                    PreferenceValue::Absent
                };
                (PreferenceVariant::Number(number), persisted_value)
            },
        };

        let enabled = dependency
            .as_deref()
            .is_none_or(|dependency| !self.is_blocking(dependency));
        let mut entry = PreferenceEntry {
            key,
            title,
            variant,
            persisted_value,
            summary: None,
            dependency_blocking: false,
            dependency,
            enabled,
        };
        entry.summary =
            summarize(&mut entry, self.titles.as_ref(), &self.options);
        entry.dependency_blocking = entry.should_disable_dependents();

        let blocking = entry.dependency_blocking;
        let key = entry.key.clone();
        self.entries.push(entry);
        if blocking {
            self.set_dependents_enabled(&key, false);
        }
        Ok(())
    }

    /// Remove a preference. Dependents it was blocking are re-enabled.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };

        let entry = self.entries.remove(index);
        if entry.dependency_blocking {
            self.set_dependents_enabled(key, true);
        }
        true
    }

    /// Report a candidate value for `key`.
    ///
    /// Returns whether the value was accepted. Accepted values are persisted
    /// according to the preference kind, the summary is recomputed and, if
    /// the blocking state flipped, dependents are updated and a
    /// [`PreferenceEffect::DependencyChanged`] is queued.
    ///
    /// List, ringtone and time preferences accept every value; integers are
    /// taken as their decimal text. Number preferences reject values that
    /// are not integers. A value whose store write fails is accepted but
    /// leaves the entry unchanged, so offering it again retries the write.
    pub fn on_candidate_value(
        &mut self,
        key: &str,
        value: PreferenceValue,
    ) -> bool {
        let Some(index) = self.position(key) else {
            log::warn!("value for unknown preference [{key}] ignored");
            return false;
        };

        let entry = &mut self.entries[index];
        let was_blocking = entry.dependency_blocking;
        let outcome = match &mut entry.variant {
            PreferenceVariant::List(_) | PreferenceVariant::Ringtone(_) => {
                accept_text(
                    &entry.key,
                    &mut entry.persisted_value,
                    &mut self.store,
                    value,
                )
            },
            PreferenceVariant::Time(time) => accept_time(
                &entry.key,
                &mut entry.persisted_value,
                time,
                &mut self.store,
                value,
            ),
            PreferenceVariant::Number(number) => accept_number(
                &entry.key,
                &mut entry.persisted_value,
                number,
                &mut self.store,
                value,
            ),
        };

        if outcome == Outcome::Rejected {
            return false;
        }
        if outcome == Outcome::Changed {
            self.effects.push_back(PreferenceEffect::ValueChanged {
                key: key.to_string(),
            });
        }

        self.refresh_summary(index);

        let entry = &mut self.entries[index];
        let blocking = entry.should_disable_dependents();
        entry.dependency_blocking = blocking;
        if blocking != was_blocking {
            self.effects.push_back(PreferenceEffect::DependencyChanged {
                key: key.to_string(),
                blocking,
            });
            self.set_dependents_enabled(key, !blocking);
        }
        true
    }

    /// Next queued effect, oldest first.
    pub fn next_effect(&mut self) -> Option<PreferenceEffect> {
        self.effects.pop_front()
    }

    /// Drain every queued effect.
    pub fn take_effects(&mut self) -> Vec<PreferenceEffect> {
        self.effects.drain(..).collect()
    }

    pub fn entry(&self, key: &str) -> Option<&PreferenceEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PreferenceEntry> {
        self.entries.iter()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &PreferenceOptions {
        &self.options
    }

    pub fn titles(&self) -> &dyn TitleProvider {
        self.titles.as_ref()
    }

    /// Whether `key` currently blocks its dependents. Unknown keys never
    /// block.
    pub fn is_blocking(&self, key: &str) -> bool {
        self.entry(key).is_some_and(|entry| entry.dependency_blocking)
    }

    /// Candidate list of a ringtone preference, built on first use.
    pub fn ringtone_candidates(
        &mut self,
        key: &str,
    ) -> Result<Rc<CandidateList>> {
        Ok(self.ringtone_builder(key)?.candidates())
    }

    /// List position of the persisted value of a ringtone preference.
    pub fn ringtone_value_index(&mut self, key: &str) -> Result<Option<usize>> {
        let index = self.require(key)?;
        let entry = &mut self.entries[index];
        let PreferenceVariant::Ringtone(ringtone) = &mut entry.variant else {
            return Err(mismatch(key, PreferenceKind::Ringtone));
        };
        Ok(ringtone.builder.value_index(entry.persisted_value.as_text()))
    }

    /// Audition the candidate at `position`.
    pub fn play_ringtone(&mut self, key: &str, position: usize) -> Result<()> {
        self.ringtone_builder(key)?.play(position);
        Ok(())
    }

    /// Stop any audition of a ringtone preference.
    pub fn stop_ringtone(&mut self, key: &str) -> Result<()> {
        self.ringtone_builder(key)?.stop_audition();
        Ok(())
    }

    /// Switch the tone type of a ringtone preference.
    ///
    /// The candidate list is rebuilt on next use. A value that pointed at
    /// the old default tone follows the new type's default tone.
    pub fn set_ringtone_type(
        &mut self,
        key: &str,
        tone_type: ToneType,
    ) -> Result<()> {
        let index = self.require(key)?;
        let entry = &mut self.entries[index];
        let PreferenceVariant::Ringtone(ringtone) = &mut entry.variant else {
            return Err(mismatch(key, PreferenceKind::Ringtone));
        };

        let current = entry
            .persisted_value
            .as_text()
            .filter(|value| !value.is_empty());
        let old_default = ringtone.builder.default_identity();
        let preserve_default = current.is_some()
            && current.map(ToString::to_string) == old_default;

        if !ringtone.builder.set_tone_type(tone_type) {
            return Ok(());
        }

        let new_default = ringtone.builder.default_identity();
        match new_default {
            Some(identity) if preserve_default => {
                self.on_candidate_value(key, PreferenceValue::Text(identity));
            },
            _ => self.refresh_summary(index),
        }
        Ok(())
    }

    /// Show or hide the "default" and "silent" entries of a ringtone
    /// preference. The list is rebuilt on next use and the summary follows
    /// it.
    pub fn set_ringtone_visibility(
        &mut self,
        key: &str,
        show_default: bool,
        show_silent: bool,
    ) -> Result<()> {
        let index = self.require(key)?;
        if self
            .ringtone_builder(key)?
            .set_visibility(show_default, show_silent)
        {
            self.refresh_summary(index);
        }
        Ok(())
    }

    /// Change the upper bound of a number preference. A bound below the
    /// lower bound collapses onto it.
    pub fn set_number_max(&mut self, key: &str, max: i32) -> Result<()> {
        self.number_mut(key)?.set_max(max);
        Ok(())
    }

    /// Change the lower bound of a number preference. A bound above the
    /// upper bound collapses onto it.
    pub fn set_number_min(&mut self, key: &str, min: i32) -> Result<()> {
        self.number_mut(key)?.set_min(min);
        Ok(())
    }

    fn number_mut(&mut self, key: &str) -> Result<&mut NumberState> {
        let index = self.require(key)?;
        match &mut self.entries[index].variant {
            PreferenceVariant::Number(number) => Ok(number),
            _ => Err(mismatch(key, PreferenceKind::Number)),
        }
    }

    fn ringtone_builder(
        &mut self,
        key: &str,
    ) -> Result<&mut RingtoneCatalogBuilder> {
        let index = self.require(key)?;
        match &mut self.entries[index].variant {
            PreferenceVariant::Ringtone(ringtone) => Ok(&mut ringtone.builder),
            _ => Err(mismatch(key, PreferenceKind::Ringtone)),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    fn require(&self, key: &str) -> Result<usize> {
        self.position(key).ok_or_else(|| PreferenceError::UnknownKey {
            key: key.to_string(),
        })
    }

    fn refresh_summary(&mut self, index: usize) {
        let entry = &mut self.entries[index];
        let summary = summarize(entry, self.titles.as_ref(), &self.options);
        if summary != entry.summary {
            entry.summary = summary.clone();
            self.effects.push_back(PreferenceEffect::SummaryChanged {
                key: entry.key.clone(),
                summary,
            });
        }
    }

    fn set_dependents_enabled(&mut self, key: &str, enabled: bool) {
        self.entries
            .iter_mut()
            .filter(|entry| entry.dependency.as_deref() == Some(key))
            .for_each(|entry| entry.enabled = enabled);
    }

    fn apply_default(&mut self, definition: &PreferenceDefinition) {
        let key = definition.key.as_str();
        if definition.default_value.is_absent() || self.store.contains(key) {
            return;
        }

        let written = match (definition.kind(), &definition.default_value) {
            (PreferenceKind::Number, value) => match value.as_int() {
                Some(value) => self.store.set_int(key, value),
                None => {
                    log::warn!(
                        "default of number preference [{key}] is not a number"
                    );
                    return;
                },
            },
            (_, PreferenceValue::Text(value)) => {
                self.store.set_string(key, value)
            },
            (_, PreferenceValue::Int(value)) => {
                self.store.set_string(key, &value.to_string())
            },
            (_, PreferenceValue::Absent) => return,
        };

        if let Err(err) = written {
            log::error!(
                "failed to persist default of preference [{key}]: {err}"
            );
        }
    }
}

/// Lists and ringtones persist text. A ringtone key left absent means
/// "use the default tone".
fn accept_text<S: PersistedValueStore>(
    key: &str,
    persisted: &mut PreferenceValue,
    store: &mut S,
    value: PreferenceValue,
) -> Outcome {
    let value = match value {
        PreferenceValue::Absent => None,
        PreferenceValue::Text(value) => Some(value),
        PreferenceValue::Int(value) => Some(value.to_string()),
    };
    write_text(key, persisted, store, value)
}

fn accept_time<S: PersistedValueStore>(
    key: &str,
    persisted: &mut PreferenceValue,
    time: &mut TimeValue,
    store: &mut S,
    value: PreferenceValue,
) -> Outcome {
    let text = match value {
        PreferenceValue::Absent => {
            *time = TimeValue::absent();
            return write_text(key, persisted, store, None);
        },
        PreferenceValue::Text(text) => text,
        PreferenceValue::Int(value) => value.to_string(),
    };

    *time = parse_time_logged(key, &text);
    match time::format(time) {
        Some(canonical) => write_text(key, persisted, store, Some(canonical)),
        None => Outcome::Kept,
    }
}

/// Identical values are written only once; the very first write always
/// happens, even when it equals the initial zero.
fn accept_number<S: PersistedValueStore>(
    key: &str,
    persisted: &mut PreferenceValue,
    number: &mut NumberState,
    store: &mut S,
    value: PreferenceValue,
) -> Outcome {
    let Some(value) = value.as_int() else {
        log::warn!("number preference [{key}] got a non-number: {value:?}");
        return Outcome::Rejected;
    };

    let changed = number.value() != value;
    if !changed && number.is_persisted() {
        return Outcome::Kept;
    }

    if let Err(err) = store.set_int(key, value) {
        log::error!("failed to persist preference [{key}]: {err}");
        return Outcome::Kept;
    }
    number.set_value(value);
    number.mark_persisted();
    *persisted = PreferenceValue::Int(value);

    if changed { Outcome::Changed } else { Outcome::Kept }
}

fn write_text<S: PersistedValueStore>(
    key: &str,
    persisted: &mut PreferenceValue,
    store: &mut S,
    value: Option<String>,
) -> Outcome {
    let unchanged = match &value {
        Some(text) => persisted.as_text() == Some(text.as_str()),
        None => persisted.is_absent(),
    };
    if unchanged {
        return Outcome::Kept;
    }

    let written = match &value {
        Some(text) => store.set_string(key, text),
        None => store.remove(key),
    };
    if let Err(err) = written {
        log::error!("failed to persist preference [{key}]: {err}");
        return Outcome::Kept;
    }

    *persisted = value.into();
    Outcome::Changed
}

fn parse_time_logged(key: &str, text: &str) -> TimeValue {
    if text.is_empty() {
        return TimeValue::absent();
    }
    time::parse(text).unwrap_or_else(|err| {
        log::error!("invalid time for preference [{key}]: {err}");
        TimeValue::absent()
    })
}

fn summarize(
    entry: &mut PreferenceEntry,
    titles: &dyn TitleProvider,
    options: &PreferenceOptions,
) -> Option<String> {
    match &mut entry.variant {
        PreferenceVariant::List(list) => entry
            .persisted_value
            .as_text()
            .and_then(|value| list.entry_for(value))
            .map(ToString::to_string),
        PreferenceVariant::Ringtone(ringtone) => {
            ringtone.builder.title_for(entry.persisted_value.as_text())
        },
        PreferenceVariant::Time(value) => Some(
            time::format_for_display(value, options.hour_cycle)
                .unwrap_or_else(|| titles.off_title()),
        ),
        PreferenceVariant::Number(number) => number.summary(),
    }
}

fn mismatch(key: &str, expected: PreferenceKind) -> PreferenceError {
    PreferenceError::VariantMismatch {
        key: key.to_string(),
        expected: expected.name(),
    }
}
