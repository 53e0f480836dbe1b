//! Preference-screen controls with derived summaries and dependencies.
//!
//! The crate keeps the values shown on a settings screen consistent with
//! what is persisted:
//! - [`PreferenceChangeDispatcher`] receives candidate values from every
//!   control, persists accepted ones through a [`store::PersistedValueStore`],
//!   recomputes summaries and keeps dependent controls enabled or disabled.
//! - [`ringtone::RingtoneCatalogBuilder`] turns the system ringtone catalog
//!   into a candidate list with "default" and "silent" sentinels and resolves
//!   stored values to list positions.
//! - [`time`] holds the canonical `HH:mm` codec.
//! - [`dialog::DialogPreferenceController`] opens one editor dialog at a
//!   time and feeds its result back into the dispatcher.
//!
//! Hosts usually:
//! 1. Build a dispatcher from [`PreferenceDefinition`]s.
//! 2. Forward inline edits to `on_candidate_value` and route activations of
//!    dialog-backed preferences through the controller.
//! 3. Drain [`PreferenceEffect`]s with `next_effect()` to refresh the UI.

mod dispatcher;
mod entry;
mod error;
mod options;
mod titles;
mod value;

pub mod dialog;
pub mod ringtone;
pub mod store;
pub mod time;

#[cfg(test)]
mod testing;

pub use dispatcher::{PreferenceChangeDispatcher, PreferenceEffect};
pub use entry::{
    DEFAULT_NUMBER_MAX, DEFAULT_NUMBER_MIN, ListState, NumberState,
    PreferenceDefinition, PreferenceEntry, PreferenceKind, PreferenceVariant,
    RingtoneState, VariantDefinition,
};
pub use error::{PreferenceError, Result};
pub use options::{DIALOG_TAG, PreferenceOptions};
pub use titles::{EnglishTitles, TitleProvider};
pub use value::PreferenceValue;
