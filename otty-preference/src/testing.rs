//! Recording fakes for the collaborators the core talks to.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use crate::Result;
use crate::dialog::{DialogHost, DialogSession};
use crate::ringtone::{AuditionSample, CatalogRow, RingtoneCatalog, ToneType};
use crate::store::{MemoryStore, PersistedValueStore};

type PlaybackLog = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
pub(crate) struct FakeCatalog {
    rows: HashMap<ToneType, Vec<CatalogRow>>,
    defaults: HashMap<ToneType, String>,
    titles: HashMap<String, String>,
    queries: Cell<usize>,
    playback: PlaybackLog,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_rows(
        mut self,
        tone_type: ToneType,
        rows: Vec<CatalogRow>,
    ) -> Self {
        self.rows.insert(tone_type, rows);
        self
    }

    pub(crate) fn with_default(
        mut self,
        tone_type: ToneType,
        identity: &str,
    ) -> Self {
        self.defaults.insert(tone_type, identity.to_string());
        self
    }

    pub(crate) fn with_title(mut self, identity: &str, title: &str) -> Self {
        self.titles.insert(identity.to_string(), title.to_string());
        self
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.get()
    }

    pub(crate) fn playback(&self) -> Vec<String> {
        self.playback.borrow().clone()
    }
}

impl RingtoneCatalog for FakeCatalog {
    fn query(&self, tone_type: ToneType) -> Option<Vec<CatalogRow>> {
        self.queries.set(self.queries.get() + 1);
        self.rows.get(&tone_type).cloned()
    }

    fn default_identity(&self, tone_type: ToneType) -> Option<String> {
        self.defaults.get(&tone_type).cloned()
    }

    fn resolve_title(&self, identity: &str) -> Option<String> {
        self.titles.get(identity).cloned()
    }

    fn sample(&self, identity: &str) -> Option<Box<dyn AuditionSample>> {
        Some(Box::new(FakeSample {
            identity: identity.to_string(),
            log: Rc::clone(&self.playback),
        }))
    }
}

struct FakeSample {
    identity: String,
    log: PlaybackLog,
}

impl AuditionSample for FakeSample {
    fn play(&mut self) {
        self.log.borrow_mut().push(format!("play {}", self.identity));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(format!("stop {}", self.identity));
    }
}

/// Memory store that counts writes and can be told to fail them.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    inner: MemoryStore,
    writes: usize,
    failing: Rc<Cell<bool>>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes
    }

    /// Switch that makes every following write fail while set.
    pub(crate) fn failure_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.failing)
    }

    fn begin_write(&mut self) -> Result<()> {
        if self.failing.get() {
            return Err(io::Error::other("store is read-only").into());
        }
        self.writes += 1;
        Ok(())
    }
}

impl PersistedValueStore for RecordingStore {
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.inner.get_string(key, default)
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.inner.get_int(key, default)
    }

    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.begin_write()?;
        self.inner.set_string(key, value)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.begin_write()?;
        self.inner.set_int(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.begin_write()?;
        self.inner.remove(key)
    }
}

/// Dialog host that records what it was asked to show.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) showing: Option<String>,
    pub(crate) shown: Vec<DialogSession>,
    pub(crate) dismissed: usize,
    pub(crate) delegated: Vec<String>,
}

impl DialogHost for FakeHost {
    fn find_by_tag(&self, tag: &str) -> bool {
        self.showing.as_deref() == Some(tag)
    }

    fn show(&mut self, tag: &str, session: &DialogSession) {
        self.showing = Some(tag.to_string());
        self.shown.push(session.clone());
    }

    fn dismiss(&mut self, tag: &str) {
        if self.showing.as_deref() == Some(tag) {
            self.showing = None;
        }
        self.dismissed += 1;
    }

    fn show_default(&mut self, key: &str) {
        self.delegated.push(key.to_string());
    }
}
