use std::rc::Rc;

use super::{
    AuditionSample, CandidateList, CatalogConfig, RingtoneCatalog, SILENT_PATH,
    ToneType,
};
use crate::titles::TitleProvider;

/// Builds and caches the candidate list of one ringtone preference and owns
/// its audition playback.
pub struct RingtoneCatalogBuilder {
    catalog: Rc<dyn RingtoneCatalog>,
    titles: Rc<dyn TitleProvider>,
    config: CatalogConfig,
    cached: Option<Rc<CandidateList>>,
    sample: Option<Box<dyn AuditionSample>>,
}

impl RingtoneCatalogBuilder {
    pub fn new(
        catalog: Rc<dyn RingtoneCatalog>,
        titles: Rc<dyn TitleProvider>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            catalog,
            titles,
            config,
            cached: None,
            sample: None,
        }
    }

    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    pub fn tone_type(&self) -> ToneType {
        self.config.tone_type
    }

    /// Return the candidate list, building it on first use. Later calls with
    /// an unchanged configuration return the same list without querying the
    /// catalog again.
    pub fn candidates(&mut self) -> Rc<CandidateList> {
        if let Some(list) = &self.cached {
            return Rc::clone(list);
        }

        let list = Rc::new(CandidateList::build(
            self.catalog.as_ref(),
            self.titles.as_ref(),
            self.config,
        ));
        self.cached = Some(Rc::clone(&list));
        list
    }

    /// Switch the tone type. Returns `false` when the type is unchanged.
    pub fn set_tone_type(&mut self, tone_type: ToneType) -> bool {
        if tone_type == self.config.tone_type {
            return false;
        }

        self.stop_audition();
        self.config.tone_type = tone_type;
        self.invalidate();
        true
    }

    /// Change which sentinels are shown. Returns `false` when nothing
    /// changed.
    pub fn set_visibility(&mut self, show_default: bool, show_silent: bool) -> bool {
        if self.config.show_default == show_default
            && self.config.show_silent == show_silent
        {
            return false;
        }

        self.config.show_default = show_default;
        self.config.show_silent = show_silent;
        self.invalidate();
        true
    }

    /// Drop the cached list; the next access rebuilds it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Identity the platform currently uses as default for this tone type.
    pub fn default_identity(&self) -> Option<String> {
        self.catalog.default_identity(self.config.tone_type)
    }

    /// List position of a persisted value.
    pub fn value_index(&mut self, value: Option<&str>) -> Option<usize> {
        self.candidates().find_index_of_value(value)
    }

    /// Title shown for a persisted value.
    pub fn title_for(&mut self, value: Option<&str>) -> Option<String> {
        let Some(value) = value else {
            return Some(self.titles.default_title(self.config.tone_type));
        };
        if value == SILENT_PATH {
            return Some(self.titles.silent_title());
        }

        let list = self.candidates();
        if let Some(position) = list.find_index_of_value(Some(value)) {
            return list.get(position).map(|candidate| candidate.title.clone());
        }

        let title = self.catalog.resolve_title(value);
        if title.is_none() {
            log::warn!("no title for ringtone [{value}]");
        }
        title
    }

    /// Play the candidate at `position`, stopping any previous sample
    /// first. The silent sentinel plays nothing.
    pub fn play(&mut self, position: usize) {
        self.stop_audition();

        let list = self.candidates();
        let Some(candidate) = list.get(position) else {
            log::warn!("no ringtone candidate at position {position}");
            return;
        };
        if Some(position) == list.silent_position() {
            return;
        }

        let Some(mut sample) = self.catalog.sample(&candidate.identity) else {
            log::warn!("ringtone [{}] cannot be played", candidate.identity);
            return;
        };
        sample.play();
        self.sample = Some(sample);
    }

    pub fn stop_audition(&mut self) {
        if let Some(mut sample) = self.sample.take() {
            sample.stop();
        }
    }

    pub fn is_auditioning(&self) -> bool {
        self.sample.is_some()
    }
}

impl Drop for RingtoneCatalogBuilder {
    fn drop(&mut self) {
        self.stop_audition();
    }
}
