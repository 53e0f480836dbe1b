use std::cell::RefCell;
use std::rc::Rc;

use otty_preference::dialog::{
    Activation, DialogButton, DialogHost, DialogInput, DialogKind,
    DialogPreferenceController, DialogSession,
};
use otty_preference::ringtone::{
    AuditionSample, CatalogConfig, CatalogRow, RingtoneCatalog, ToneType,
};
use otty_preference::store::{MemoryStore, PersistedValueStore};
use otty_preference::{
    EnglishTitles, PreferenceChangeDispatcher, PreferenceDefinition,
    PreferenceEffect, PreferenceOptions,
};

const CHIME: &str = "content://media/internal/audio/7";

/// Catalog holding a single "Chime" row and no resolvable default tone.
struct ChimeCatalog {
    played: Rc<RefCell<Vec<String>>>,
}

impl RingtoneCatalog for ChimeCatalog {
    fn query(&self, _tone_type: ToneType) -> Option<Vec<CatalogRow>> {
        Some(vec![CatalogRow::new(CHIME, "Chime")])
    }

    fn default_identity(&self, _tone_type: ToneType) -> Option<String> {
        None
    }

    fn resolve_title(&self, _identity: &str) -> Option<String> {
        None
    }

    fn sample(&self, identity: &str) -> Option<Box<dyn AuditionSample>> {
        Some(Box::new(LoggedSample {
            identity: identity.to_string(),
            played: Rc::clone(&self.played),
        }))
    }
}

struct LoggedSample {
    identity: String,
    played: Rc<RefCell<Vec<String>>>,
}

impl AuditionSample for LoggedSample {
    fn play(&mut self) {
        self.played.borrow_mut().push(self.identity.clone());
    }

    fn stop(&mut self) {}
}

#[derive(Default)]
struct Host {
    open: Option<String>,
    shown: Vec<DialogSession>,
}

impl DialogHost for Host {
    fn find_by_tag(&self, tag: &str) -> bool {
        self.open.as_deref() == Some(tag)
    }

    fn show(&mut self, tag: &str, session: &DialogSession) {
        self.open = Some(tag.to_string());
        self.shown.push(session.clone());
    }

    fn dismiss(&mut self, _tag: &str) {
        self.open = None;
    }

    fn show_default(&mut self, _key: &str) {}
}

fn build(
    store: MemoryStore,
    played: &Rc<RefCell<Vec<String>>>,
) -> PreferenceChangeDispatcher<MemoryStore> {
    let catalog = ChimeCatalog {
        played: Rc::clone(played),
    };
    PreferenceChangeDispatcher::build(
        store,
        Rc::new(catalog),
        Rc::new(EnglishTitles),
        PreferenceOptions::default(),
        vec![
            PreferenceDefinition::ringtone(
                "notification_tone",
                CatalogConfig::new(ToneType::NOTIFICATION)
                    .with_default(false)
                    .with_silent(true),
            )
            .with_title("Notification sound"),
            PreferenceDefinition::time("quiet_start")
                .with_title("Quiet hours start"),
            PreferenceDefinition::number("quiet_level")
                .with_dependency("quiet_start"),
        ],
    )
    .expect("screen builds")
}

#[test]
fn given_stored_chime_when_screen_built_then_summary_and_index_resolve() {
    let mut store = MemoryStore::new();
    store
        .set_string("notification_tone", CHIME)
        .expect("seed store");
    let played = Rc::default();

    let mut dispatcher = build(store, &played);

    let entry = dispatcher.entry("notification_tone").expect("entry");
    assert_eq!(entry.summary(), Some("Chime"));
    assert_eq!(
        dispatcher
            .ringtone_value_index("notification_tone")
            .expect("ringtone"),
        Some(1)
    );
    let candidates = dispatcher
        .ringtone_candidates("notification_tone")
        .expect("ringtone");
    assert_eq!(candidates.titles(), vec!["None", "Chime"]);
    assert_eq!(candidates.default_position(), None);
    assert_eq!(candidates.silent_position(), Some(0));
}

#[test]
fn given_silent_tone_when_picked_in_dialog_then_silence_is_persisted() {
    let mut store = MemoryStore::new();
    store
        .set_string("notification_tone", CHIME)
        .expect("seed store");
    let played = Rc::default();
    let mut dispatcher = build(store, &played);
    let mut controller = DialogPreferenceController::new(
        Host::default(),
        dispatcher.options(),
    );

    let activation = controller
        .activate(&mut dispatcher, "notification_tone")
        .expect("activate");
    controller
        .input(&mut dispatcher, DialogInput::Select(1))
        .expect("audition");
    controller
        .input(&mut dispatcher, DialogInput::Select(0))
        .expect("select silent");
    let accepted = controller.close(&mut dispatcher, DialogButton::Positive);

    assert_eq!(activation, Activation::Shown(DialogKind::RingtoneList));
    assert!(accepted);
    assert_eq!(played.borrow().as_slice(), [CHIME.to_string()]);
    assert_eq!(
        dispatcher
            .store()
            .get_string("notification_tone", None)
            .as_deref(),
        Some("")
    );
    let entry = dispatcher.entry("notification_tone").expect("entry");
    assert_eq!(entry.summary(), Some("None"));
}

#[test]
fn given_quiet_hours_when_started_and_stopped_then_dependents_follow() {
    let played = Rc::default();
    let mut dispatcher = build(MemoryStore::new(), &played);
    assert!(!dispatcher.entry("quiet_level").expect("entry").is_enabled());

    dispatcher.on_candidate_value("quiet_start", "22:00".into());
    assert!(dispatcher.entry("quiet_level").expect("entry").is_enabled());

    let mut controller = DialogPreferenceController::new(
        Host::default(),
        dispatcher.options(),
    );
    controller
        .activate(&mut dispatcher, "quiet_start")
        .expect("activate");
    controller.close(&mut dispatcher, DialogButton::Neutral);

    let dependency_changes: Vec<_> =
        std::iter::from_fn(|| dispatcher.next_effect())
            .filter_map(|effect| match effect {
                PreferenceEffect::DependencyChanged { blocking, .. } => {
                    Some(blocking)
                },
                _ => None,
            })
            .collect();
    assert_eq!(dependency_changes, vec![false, true]);
    assert!(!dispatcher.entry("quiet_level").expect("entry").is_enabled());
    assert!(!dispatcher.store().contains("quiet_start"));
}
