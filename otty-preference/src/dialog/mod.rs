//! Editor dialogs for preferences that cannot be edited inline.
//!
//! [`DialogPreferenceController`] maps a preference kind to its dialog,
//! keeps at most one dialog open per screen and reports the result back
//! through [`PreferenceChangeDispatcher`](crate::PreferenceChangeDispatcher).

mod command;
mod controller;
mod host;
mod session;

pub use command::{Activation, DialogButton, DialogInput};
pub use controller::DialogPreferenceController;
pub use host::DialogHost;
pub use session::{DialogEditor, DialogKind, DialogSession, SavedField};
