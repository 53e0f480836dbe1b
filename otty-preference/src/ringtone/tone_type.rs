use bitflags::bitflags;

bitflags! {
    /// Kinds of tones a ringtone preference chooses from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToneType: u8 {
        const RINGTONE = 1;
        const NOTIFICATION = 1 << 1;
        const ALARM = 1 << 2;
        const ALL = Self::RINGTONE.bits()
            | Self::NOTIFICATION.bits()
            | Self::ALARM.bits();
    }
}

impl Default for ToneType {
    fn default() -> Self {
        Self::RINGTONE
    }
}
