use serde::{Deserialize, Serialize};

use crate::Result;
use crate::time::HourCycle;

/// Tag reserved for the single editor dialog a screen may show.
pub const DIALOG_TAG: &str = "otty.preference.DIALOG";

/// Configuration knobs shared by the dispatcher and the dialog controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceOptions {
    /// Tag used to look up the active editor dialog in the host.
    pub dialog_tag: String,
    /// Clock style for time summaries and the time picker.
    pub hour_cycle: HourCycle,
}

impl Default for PreferenceOptions {
    fn default() -> Self {
        Self {
            dialog_tag: String::from(DIALOG_TAG),
            hour_cycle: HourCycle::default(),
        }
    }
}

impl PreferenceOptions {
    /// Read options from a JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
