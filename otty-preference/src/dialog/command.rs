use super::DialogKind;

/// Buttons a dialog can be closed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    /// Commit the edited value.
    Positive,
    /// Close without committing anything.
    Negative,
    /// Time dialogs only: turn the time off.
    Neutral,
}

/// Edits made while a dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogInput {
    /// Move the stepper by `delta`, clamped to its bounds.
    Step(i32),
    /// Put the stepper on an explicit value, clamped to its bounds.
    SetValue(i32),
    /// Highlight a ringtone candidate and audition it.
    Select(usize),
    SetTime { hour: u32, minute: u32 },
}

/// Outcome of activating a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Shown(DialogKind),
    /// A dialog was already open; nothing happened.
    AlreadyShowing,
    /// The host's default handling took over.
    Delegated,
}
