use super::{CatalogConfig, RingtoneCatalog, SILENT_PATH};
use crate::titles::TitleProvider;

/// One selectable entry of a ringtone list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingtoneCandidate {
    pub title: String,
    pub identity: String,
}

/// Ordered candidates with the sentinel positions fixed at build time.
///
/// A list is never edited after [`CandidateList::build`]; a configuration
/// change produces a new list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    config: CatalogConfig,
    candidates: Vec<RingtoneCandidate>,
    default_position: Option<usize>,
    silent_position: Option<usize>,
    default_identity: Option<String>,
}

impl CandidateList {
    pub(crate) fn build(
        catalog: &dyn RingtoneCatalog,
        titles: &dyn TitleProvider,
        config: CatalogConfig,
    ) -> Self {
        let mut candidates = Vec::new();
        let default_identity = catalog.default_identity(config.tone_type);

        let mut default_position = None;
        if config.show_default {
            match &default_identity {
                Some(identity) => {
                    default_position = Some(candidates.len());
                    candidates.push(RingtoneCandidate {
                        title: titles.default_title(config.tone_type),
                        identity: identity.clone(),
                    });
                },
                None => log::debug!(
                    "no default tone for {:?}, omitting default entry",
                    config.tone_type
                ),
            }
        }

        let mut silent_position = None;
        if config.show_silent {
            silent_position = Some(candidates.len());
            candidates.push(RingtoneCandidate {
                title: titles.silent_title(),
                identity: String::from(SILENT_PATH),
            });
        }

        let rows = catalog.query(config.tone_type).unwrap_or_default();
        candidates.extend(rows.into_iter().map(|row| RingtoneCandidate {
            title: row.title,
            identity: row.identity,
        }));

        Self {
            config,
            candidates,
            default_position,
            silent_position,
            default_identity,
        }
    }

    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&RingtoneCandidate> {
        self.candidates.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RingtoneCandidate> {
        self.candidates.iter()
    }

    /// Titles in list order, as shown by the chooser dialog.
    pub fn titles(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(|candidate| candidate.title.as_str())
            .collect()
    }

    pub fn default_position(&self) -> Option<usize> {
        self.default_position
    }

    pub fn silent_position(&self) -> Option<usize> {
        self.silent_position
    }

    /// Default identity resolved when the list was built.
    pub fn default_identity(&self) -> Option<&str> {
        self.default_identity.as_deref()
    }

    fn is_sentinel(&self, position: usize) -> bool {
        Some(position) == self.default_position
            || Some(position) == self.silent_position
    }

    /// Position of a persisted value.
    ///
    /// `None` (use default) and the resolved default identity map to the
    /// default sentinel, the silent marker maps to the silent sentinel.
    /// Anything else is matched against catalog rows from the end of the
    /// list, so the last duplicate wins. Sentinels take priority over a
    /// catalog row with the same identity.
    pub fn find_index_of_value(&self, value: Option<&str>) -> Option<usize> {
        let Some(value) = value else {
            return self.default_position;
        };
        if self.default_identity.as_deref() == Some(value) {
            return self.default_position;
        }
        if value == SILENT_PATH {
            return self.silent_position;
        }

        self.candidates
            .iter()
            .enumerate()
            .rev()
            .filter(|(position, _)| !self.is_sentinel(*position))
            .find(|(_, candidate)| candidate.identity == value)
            .map(|(position, _)| position)
    }
}
