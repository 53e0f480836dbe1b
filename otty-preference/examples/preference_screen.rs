use std::rc::Rc;

use env_logger::Env;
use otty_preference::dialog::{
    DialogButton, DialogHost, DialogInput, DialogPreferenceController,
    DialogSession,
};
use otty_preference::ringtone::{
    AuditionSample, CatalogConfig, CatalogRow, RingtoneCatalog, ToneType,
};
use otty_preference::store::JsonFileStore;
use otty_preference::{
    EnglishTitles, PreferenceChangeDispatcher, PreferenceDefinition,
    PreferenceOptions,
};

struct BuiltinCatalog;

impl RingtoneCatalog for BuiltinCatalog {
    fn query(&self, tone_type: ToneType) -> Option<Vec<CatalogRow>> {
        let rows = if tone_type.contains(ToneType::ALARM) {
            vec![CatalogRow::new("builtin:alarm/klaxon", "Klaxon")]
        } else {
            vec![
                CatalogRow::new("builtin:ring/bell", "Bell"),
                CatalogRow::new("builtin:ring/chime", "Chime"),
            ]
        };
        Some(rows)
    }

    fn default_identity(&self, tone_type: ToneType) -> Option<String> {
        let identity = if tone_type.contains(ToneType::ALARM) {
            "builtin:alarm/klaxon"
        } else {
            "builtin:ring/bell"
        };
        Some(identity.to_string())
    }

    fn resolve_title(&self, _identity: &str) -> Option<String> {
        None
    }

    fn sample(&self, identity: &str) -> Option<Box<dyn AuditionSample>> {
        Some(Box::new(PrintedSample(identity.to_string())))
    }
}

struct PrintedSample(String);

impl AuditionSample for PrintedSample {
    fn play(&mut self) {
        log::info!("audition start: {}", self.0);
    }

    fn stop(&mut self) {
        log::info!("audition stop: {}", self.0);
    }
}

#[derive(Default)]
struct ConsoleHost {
    open: Option<String>,
}

impl DialogHost for ConsoleHost {
    fn find_by_tag(&self, tag: &str) -> bool {
        self.open.as_deref() == Some(tag)
    }

    fn show(&mut self, tag: &str, session: &DialogSession) {
        log::info!(
            "show {:?} for [{}]",
            session.kind(),
            session.preference_key()
        );
        self.open = Some(tag.to_string());
    }

    fn dismiss(&mut self, _tag: &str) {
        self.open = None;
    }

    fn show_default(&mut self, key: &str) {
        log::info!("default editor for [{key}]");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let path = std::env::temp_dir().join("otty-preference-demo.json");
    let store = JsonFileStore::open(&path)?;
    log::info!("store {} ({:?})", path.display(), store.load_status());

    let mut dispatcher = PreferenceChangeDispatcher::build(
        store,
        Rc::new(BuiltinCatalog),
        Rc::new(EnglishTitles),
        PreferenceOptions::default(),
        vec![
            PreferenceDefinition::time("alarm_time").with_title("Alarm"),
            PreferenceDefinition::ringtone(
                "alarm_tone",
                CatalogConfig::new(ToneType::RINGTONE)
                    .with_default(true)
                    .with_silent(true),
            )
            .with_title("Alarm sound")
            .with_dependency("alarm_time"),
            PreferenceDefinition::number("snooze")
                .with_title("Snooze")
                .with_bounds(0, 2)
                .with_displayed_values(vec![
                    "5 minutes".to_string(),
                    "10 minutes".to_string(),
                    "15 minutes".to_string(),
                ])
                .with_default(1),
        ],
    )?;

    let mut dialogs = DialogPreferenceController::new(
        ConsoleHost::default(),
        dispatcher.options(),
    );

    dialogs.activate(&mut dispatcher, "alarm_time")?;
    let wake_up = DialogInput::SetTime {
        hour: 6,
        minute: 45,
    };
    dialogs.input(&mut dispatcher, wake_up)?;
    dialogs.close(&mut dispatcher, DialogButton::Positive);

    dialogs.activate(&mut dispatcher, "alarm_tone")?;
    dialogs.input(&mut dispatcher, DialogInput::Select(3))?;
    dialogs.close(&mut dispatcher, DialogButton::Positive);

    dispatcher.set_ringtone_type("alarm_tone", ToneType::ALARM)?;

    dialogs.activate(&mut dispatcher, "snooze")?;
    dialogs.input(&mut dispatcher, DialogInput::Step(1))?;
    dialogs.close(&mut dispatcher, DialogButton::Positive);

    while let Some(effect) = dispatcher.next_effect() {
        log::info!("{effect:?}");
    }
    for entry in dispatcher.entries() {
        log::info!(
            "{:<12} {:<16} enabled={}",
            entry.title(),
            entry.summary().unwrap_or("-"),
            entry.is_enabled()
        );
    }
    Ok(())
}
