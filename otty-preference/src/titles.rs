use crate::ringtone::ToneType;

/// Localized strings the preference controls display.
///
/// Hosts inject their own implementation so the core never reaches for an
/// ambient resource lookup.
pub trait TitleProvider {
    /// Title of the "default" sentinel for the given tone type.
    fn default_title(&self, tone_type: ToneType) -> String;

    /// Title of the "silent" sentinel.
    fn silent_title(&self) -> String;

    /// Summary of a time preference without a value, also used as the
    /// neutral button label of the time picker.
    fn off_title(&self) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTitles;

impl TitleProvider for EnglishTitles {
    fn default_title(&self, tone_type: ToneType) -> String {
        let title = if tone_type == ToneType::NOTIFICATION {
            "Default notification sound"
        } else if tone_type == ToneType::ALARM {
            "Default alarm sound"
        } else {
            "Default ringtone"
        };
        String::from(title)
    }

    fn silent_title(&self) -> String {
        String::from("None")
    }

    fn off_title(&self) -> String {
        String::from("Off")
    }
}
