use chrono::{Local, Timelike};

use super::session::{FIELD_HOUR, FIELD_MINUTE, FIELD_SELECTED, FIELD_VALUE};
use super::{
    Activation, DialogButton, DialogEditor, DialogHost, DialogInput,
    DialogKind, DialogSession,
};
use crate::dispatcher::PreferenceChangeDispatcher;
use crate::entry::{PreferenceEntry, PreferenceKind};
use crate::options::PreferenceOptions;
use crate::store::PersistedValueStore;
use crate::time::{self, TimeValue};
use crate::{PreferenceError, PreferenceValue, Result};

/// Opens editor dialogs for dialog-backed preferences, one at a time.
///
/// `Idle -> Shown` on [`activate`](Self::activate), `Shown -> Idle` on
/// [`close`](Self::close). The close handler runs exactly once per dialog.
pub struct DialogPreferenceController<H> {
    host: H,
    tag: String,
    session: Option<DialogSession>,
}

impl<H: DialogHost> DialogPreferenceController<H> {
    pub fn new(host: H, options: &PreferenceOptions) -> Self {
        Self {
            host,
            tag: options.dialog_tag.clone(),
            session: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn session(&self) -> Option<&DialogSession> {
        self.session.as_ref()
    }

    pub fn is_showing(&self) -> bool {
        self.session.is_some()
    }

    /// React to the user activating preference `key`.
    pub fn activate<S: PersistedValueStore>(
        &mut self,
        dispatcher: &mut PreferenceChangeDispatcher<S>,
        key: &str,
    ) -> Result<Activation> {
        if self.session.is_some() || self.host.find_by_tag(&self.tag) {
            log::debug!("dialog already showing, ignoring [{key}]");
            return Ok(Activation::AlreadyShowing);
        }

        let kind = dispatcher
            .entry(key)
            .map(PreferenceEntry::kind)
            .ok_or_else(|| unknown(key))?;

        let session = match kind {
            PreferenceKind::List => {
                self.host.show_default(key);
                return Ok(Activation::Delegated);
            },
            PreferenceKind::Number => {
                let number = dispatcher
                    .entry(key)
                    .and_then(PreferenceEntry::number)
                    .ok_or_else(|| unknown(key))?;
                DialogSession::number_stepper(key, number)
            },
            PreferenceKind::Ringtone => {
                let selected = dispatcher.ringtone_value_index(key)?;
                DialogSession::ringtone_list(key, selected)
            },
            PreferenceKind::Time => {
                let fields = dispatcher
                    .entry(key)
                    .and_then(PreferenceEntry::time_value)
                    .and_then(TimeValue::fields)
                    .unwrap_or_else(current_time_fields);
                DialogSession::time_picker(
                    key,
                    fields,
                    dispatcher.options().hour_cycle,
                    dispatcher.titles().off_title(),
                )
            },
        };

        self.host.show(&self.tag, &session);
        let kind = session.kind();
        self.session = Some(session);
        Ok(Activation::Shown(kind))
    }

    /// Apply an edit to the open dialog. Returns whether it applied.
    pub fn input<S: PersistedValueStore>(
        &mut self,
        dispatcher: &mut PreferenceChangeDispatcher<S>,
        input: DialogInput,
    ) -> Result<bool> {
        let Some(session) = self.session.as_mut() else {
            log::debug!("dialog input {input:?} without an open dialog");
            return Ok(false);
        };

        match (session.editor(), input) {
            (
                DialogEditor::NumberStepper { value, min, max },
                DialogInput::Step(delta),
            ) => {
                let value = value.saturating_add(delta).clamp(min, max);
                session.set_int(FIELD_VALUE, value.into());
            },
            (
                DialogEditor::NumberStepper { min, max, .. },
                DialogInput::SetValue(value),
            ) => {
                session.set_int(FIELD_VALUE, value.clamp(min, max).into());
            },
            (
                DialogEditor::RingtoneList { .. },
                DialogInput::Select(position),
            ) => {
                let Ok(saved) = i64::try_from(position) else {
                    return Ok(false);
                };
                session.set_int(FIELD_SELECTED, saved);
                let key = session.preference_key().to_string();
                dispatcher.play_ringtone(&key, position)?;
            },
            (
                DialogEditor::TimePicker { .. },
                DialogInput::SetTime { hour, minute },
            ) => {
                if TimeValue::from_fields(hour, minute).is_none() {
                    log::warn!("time picker got {hour}:{minute}");
                    return Ok(false);
                }
                session.set_int(FIELD_HOUR, hour.into());
                session.set_int(FIELD_MINUTE, minute.into());
            },
            (editor, input) => {
                log::warn!("input {input:?} does not apply to {editor:?}");
                return Ok(false);
            },
        }
        Ok(true)
    }

    /// Close the open dialog with `button`.
    ///
    /// Returns whether the dispatcher accepted a value. Closing a ringtone
    /// dialog always stops the audition.
    pub fn close<S: PersistedValueStore>(
        &mut self,
        dispatcher: &mut PreferenceChangeDispatcher<S>,
        button: DialogButton,
    ) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.host.dismiss(&self.tag);

        let key = session.preference_key();
        if session.kind() == DialogKind::RingtoneList {
            if let Err(err) = dispatcher.stop_ringtone(key) {
                log::warn!("failed to stop audition for [{key}]: {err}");
            }
        }

        let candidate = match button {
            DialogButton::Negative => None,
            DialogButton::Positive => committed_value(dispatcher, &session),
            DialogButton::Neutral => (session.kind() == DialogKind::TimePicker)
                .then_some(PreferenceValue::Absent),
        };

        match candidate {
            Some(value) => dispatcher.on_candidate_value(key, value),
            None => false,
        }
    }

    /// Session to stash across an interruption.
    pub fn save_state(&self) -> Option<DialogSession> {
        self.session.clone()
    }

    /// Adopt a stashed session as-is. The host keeps showing its dialog.
    ///
    /// Returns `false` and keeps the live session when a dialog is already
    /// open.
    pub fn restore_state(&mut self, session: DialogSession) -> bool {
        if let Some(live) = &self.session {
            log::warn!(
                "not restoring {:?} dialog for [{}] over open dialog for [{}]",
                session.kind(),
                session.preference_key(),
                live.preference_key()
            );
            return false;
        }
        log::debug!(
            "restoring {:?} dialog for [{}]",
            session.kind(),
            session.preference_key()
        );
        self.session = Some(session);
        true
    }
}

fn committed_value<S: PersistedValueStore>(
    dispatcher: &mut PreferenceChangeDispatcher<S>,
    session: &DialogSession,
) -> Option<PreferenceValue> {
    let key = session.preference_key();
    match session.editor() {
        DialogEditor::NumberStepper { value, .. } => {
            Some(PreferenceValue::Int(value))
        },
        DialogEditor::RingtoneList { selected } => {
            let candidates = match dispatcher.ringtone_candidates(key) {
                Ok(candidates) => candidates,
                Err(err) => {
                    log::error!("no candidates for [{key}]: {err}");
                    return None;
                },
            };
            selected
                .and_then(|position| candidates.get(position))
                .map(|candidate| {
                    PreferenceValue::Text(candidate.identity.clone())
                })
        },
        DialogEditor::TimePicker { hour, minute, .. } => {
            TimeValue::from_fields(hour, minute)
                .and_then(|value| time::format(&value))
                .map(PreferenceValue::Text)
        },
    }
}

fn current_time_fields() -> (u32, u32) {
    let now = Local::now();
    (now.hour(), now.minute())
}

fn unknown(key: &str) -> PreferenceError {
    PreferenceError::UnknownKey {
        key: key.to_string(),
    }
}
