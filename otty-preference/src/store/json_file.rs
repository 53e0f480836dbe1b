use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{MemoryStore, PersistedValueStore, StoredValue};
use crate::Result;

/// Status describing how a store file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Store persisted as a flat JSON object. Every write rewrites the file
/// atomically.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: MemoryStore,
    status: StoreLoadStatus,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. A file that is not a JSON
    /// object of strings and integers also yields an empty store, with the
    /// problem reported through [`JsonFileStore::load_status`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::empty(path, StoreLoadStatus::Missing));
            },
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<BTreeMap<String, StoredValue>>(&data) {
            Ok(values) => Ok(Self {
                path,
                values: MemoryStore::from_values(values),
                status: StoreLoadStatus::Loaded,
            }),
            Err(err) => {
                log::warn!(
                    "preference store {} is invalid: {err}",
                    path.display()
                );
                Ok(Self::empty(path, StoreLoadStatus::Invalid(format!("{err}"))))
            },
        }
    }

    fn empty(path: PathBuf, status: StoreLoadStatus) -> Self {
        Self {
            path,
            values: MemoryStore::new(),
            status,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> &StoreLoadStatus {
        &self.status
    }

    /// Apply one change and save it. When saving fails the change is
    /// undone, so memory never runs ahead of the file.
    fn write_through(
        &mut self,
        key: &str,
        change: impl FnOnce(&mut MemoryStore) -> Result<()>,
    ) -> Result<()> {
        let previous = self.values.values().get(key).cloned();
        change(&mut self.values)?;
        if let Err(err) = self.save() {
            self.values.restore(key, previous);
            return Err(err);
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let payload = serde_json::to_string_pretty(self.values.values())?;
        write_atomic(&self.path, payload.as_bytes())?;
        Ok(())
    }
}

impl PersistedValueStore for JsonFileStore {
    fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.values.get_string(key, default)
    }

    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get_int(key, default)
    }

    fn contains(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_through(key, |values| values.set_string(key, value))
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.write_through(key, |values| values.set_int(key, value))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.write_through(key, |values| values.remove(key))
    }
}

fn write_atomic(path: &Path, payload: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn given_written_values_when_reopened_then_values_survive() {
        let root = test_temp_dir("round_trip");
        let path = root.join("preferences.json");

        let mut store =
            JsonFileStore::open(&path).expect("missing store should open");
        assert_eq!(store.load_status(), &StoreLoadStatus::Missing);
        store.set_string("alarm", "07:30").expect("write should succeed");
        store.set_int("snooze", 5).expect("write should succeed");

        let reopened =
            JsonFileStore::open(&path).expect("written store should open");
        assert_eq!(reopened.load_status(), &StoreLoadStatus::Loaded);
        assert_eq!(
            reopened.get_string("alarm", None),
            Some(String::from("07:30"))
        );
        assert_eq!(reopened.get_int("snooze", 0), 5);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_opened_then_store_is_empty_with_invalid_status()
    {
        let root = test_temp_dir("invalid_json");
        let path = root.join("preferences.json");
        fs::write(&path, "{ not json").expect("payload should be written");

        let store = JsonFileStore::open(&path)
            .expect("invalid payload should not be an i/o error");

        match store.load_status() {
            StoreLoadStatus::Invalid(message) => assert!(!message.is_empty()),
            other => panic!("expected invalid status, got {other:?}"),
        }
        assert!(!store.contains("alarm"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_removed_key_when_reopened_then_key_is_gone() {
        let root = test_temp_dir("remove");
        let path = root.join("nested").join("preferences.json");

        let mut store =
            JsonFileStore::open(&path).expect("missing store should open");
        store.set_string("tone", "").expect("write should succeed");
        store.remove("tone").expect("remove should succeed");

        let reopened =
            JsonFileStore::open(&path).expect("written store should open");
        assert!(!reopened.contains("tone"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_unwritable_directory_when_written_then_memory_is_rolled_back() {
        let root = test_temp_dir("rollback");
        let dir = root.join("settings");
        let path = dir.join("preferences.json");
        let mut store =
            JsonFileStore::open(&path).expect("missing store should open");
        fs::write(&dir, "not a directory").expect("blocker should be written");

        assert!(store.set_string("size", "l").is_err());
        assert!(store.set_int("snooze", 7).is_err());
        assert!(!store.contains("size"));
        assert!(!store.contains("snooze"));

        fs::remove_file(&dir).expect("blocker should be removed");
        store.set_string("size", "l").expect("retry should succeed");

        let reopened =
            JsonFileStore::open(&path).expect("written store should open");
        assert_eq!(reopened.get_string("size", None), Some(String::from("l")));
        assert!(!reopened.contains("snooze"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_failed_remove_when_read_then_previous_value_is_kept() {
        let root = test_temp_dir("rollback_remove");
        let dir = root.join("settings");
        let path = dir.join("preferences.json");
        let mut store =
            JsonFileStore::open(&path).expect("missing store should open");
        store.set_string("tone", "chime").expect("write should succeed");
        fs::remove_dir_all(&dir).expect("store directory should be removed");
        fs::write(&dir, "not a directory").expect("blocker should be written");

        assert!(store.remove("tone").is_err());
        assert_eq!(store.get_string("tone", None), Some(String::from("chime")));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "otty-preference-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
