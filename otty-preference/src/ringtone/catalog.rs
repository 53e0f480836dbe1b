use super::ToneType;

/// One row of the system ringtone catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub identity: String,
    pub title: String,
}

impl CatalogRow {
    pub fn new(identity: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            title: title.into(),
        }
    }
}

/// A loaded tone that can be played for preview.
pub trait AuditionSample {
    fn play(&mut self);

    fn stop(&mut self);
}

/// System ringtone catalog the candidate list is built from.
pub trait RingtoneCatalog {
    /// Rows for `tone_type` in catalog order, or `None` when the catalog
    /// cannot produce a cursor.
    fn query(&self, tone_type: ToneType) -> Option<Vec<CatalogRow>>;

    /// Identity the platform currently uses as the default tone for
    /// `tone_type`.
    fn default_identity(&self, tone_type: ToneType) -> Option<String>;

    /// Title for an identity that is not part of the candidate list.
    fn resolve_title(&self, identity: &str) -> Option<String>;

    /// Load a playable sample for `identity`.
    fn sample(&self, identity: &str) -> Option<Box<dyn AuditionSample>>;
}

/// Inputs that fully determine a candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CatalogConfig {
    pub tone_type: ToneType,
    pub show_default: bool,
    pub show_silent: bool,
}

impl CatalogConfig {
    pub fn new(tone_type: ToneType) -> Self {
        Self {
            tone_type,
            ..Self::default()
        }
    }

    pub fn with_default(mut self, show_default: bool) -> Self {
        self.show_default = show_default;
        self
    }

    pub fn with_silent(mut self, show_silent: bool) -> Self {
        self.show_silent = show_silent;
        self
    }
}
