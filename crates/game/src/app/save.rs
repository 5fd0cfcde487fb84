//! Persisted settings/progress record and the lifecycle that owns it.

use std::path::Path;

use engine::{JsonFileStore, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub(crate) const SAVE_FILE_NAME: &str = "notePadData.json";
pub(crate) const NOTE_PAD_PAGES: usize = 3;
pub(crate) const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;
pub(crate) const DEFAULT_RESOLUTION_INDEX: i32 = 4;
pub(crate) const DEFAULT_FULL_SCREEN: bool = true;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Record {
    pub(crate) note_pad_data: Vec<String>,
    pub(crate) mouse_sensitivity: f32,
    pub(crate) current_resolution_index: i32,
    pub(crate) is_full_screen: bool,
    pub(crate) death_counter: i32,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            note_pad_data: vec![String::new(); NOTE_PAD_PAGES],
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            current_resolution_index: DEFAULT_RESOLUTION_INDEX,
            is_full_screen: DEFAULT_FULL_SCREEN,
            death_counter: 0,
        }
    }
}

impl Record {
    /// Fresh record that keeps the display/input settings of `previous`.
    fn defaults_keeping_settings(previous: &Record) -> Self {
        Self {
            mouse_sensitivity: previous.mouse_sensitivity,
            current_resolution_index: previous.current_resolution_index,
            is_full_screen: previous.is_full_screen,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no record is loaded yet")]
    NotLoaded,
    #[error("no save manager is installed")]
    NotInstalled,
}

pub(crate) type SaveResult<T> = Result<T, SaveError>;

#[derive(Debug, Clone, PartialEq)]
enum Lifecycle {
    Uninitialized,
    Ready(Record),
}

/// Owns the authoritative [`Record`] for the process.
#[derive(Debug)]
pub(crate) struct SaveManager {
    store: JsonFileStore<Record>,
    state: Lifecycle,
    file_existed: bool,
    found_on_activation: bool,
}

impl SaveManager {
    pub(crate) fn new(store: JsonFileStore<Record>) -> Self {
        Self {
            store,
            state: Lifecycle::Uninitialized,
            file_existed: false,
            found_on_activation: false,
        }
    }

    pub(crate) fn in_dir(data_dir: &Path) -> Self {
        Self::new(JsonFileStore::in_dir(data_dir, SAVE_FILE_NAME))
    }

    /// Captures whether a save file is present; `load` branches on this.
    pub(crate) fn activate(&mut self) {
        self.file_existed = self.store.exists();
        self.found_on_activation = self.file_existed;
        info!(
            path = %self.store.path().display(),
            file_exists = self.file_existed,
            "save_manager_activated"
        );
    }

    /// Activation followed by the first load. On a first run this writes
    /// the default record, so the manager is always Ready afterwards.
    pub(crate) fn start(&mut self) -> SaveResult<&Record> {
        self.activate();
        self.load()
    }

    /// Whether a save from an earlier session was on disk at activation.
    pub(crate) fn found_on_activation(&self) -> bool {
        self.found_on_activation
    }

    pub(crate) fn file_exists(&self) -> bool {
        self.store.exists()
    }

    pub(crate) fn is_ready(&self) -> bool {
        matches!(self.state, Lifecycle::Ready(_))
    }

    pub(crate) fn record(&self) -> Option<&Record> {
        match &self.state {
            Lifecycle::Ready(record) => Some(record),
            Lifecycle::Uninitialized => None,
        }
    }

    pub(crate) fn record_mut(&mut self) -> Option<&mut Record> {
        match &mut self.state {
            Lifecycle::Ready(record) => Some(record),
            Lifecycle::Uninitialized => None,
        }
    }

    /// A present but unreadable file is an error, never a silent reset.
    pub(crate) fn load(&mut self) -> SaveResult<&Record> {
        if !self.file_existed {
            return self.reset_preserving_settings();
        }
        let record = self.store.load()?;
        info!(
            note_pages = record.note_pad_data.len(),
            death_counter = record.death_counter,
            "save_loaded"
        );
        self.install(record)
    }

    /// Resets note pad and death counter; sensitivity, resolution and
    /// fullscreen survive when a record is already held.
    pub(crate) fn reset_preserving_settings(&mut self) -> SaveResult<&Record> {
        let record = match &self.state {
            Lifecycle::Ready(previous) => Record::defaults_keeping_settings(previous),
            Lifecycle::Uninitialized => Record::default(),
        };
        self.store.save(&record)?;
        self.file_existed = true;
        info!(
            mouse_sensitivity = record.mouse_sensitivity,
            resolution_index = record.current_resolution_index,
            full_screen = record.is_full_screen,
            "record_defaulted"
        );
        self.install(record)
    }

    pub(crate) fn new_game(&mut self) -> SaveResult<&Record> {
        let record = Record::default();
        self.store.save(&record)?;
        self.file_existed = true;
        info!("new_game_record_written");
        self.install(record)
    }

    pub(crate) fn save(&self) -> SaveResult<()> {
        let record = self.record().ok_or(SaveError::NotLoaded)?;
        self.store.save(record)?;
        info!(path = %self.store.path().display(), "save_written");
        Ok(())
    }

    /// Keeps the in-memory record.
    pub(crate) fn delete_save_file(&mut self) -> SaveResult<()> {
        self.store.delete()?;
        self.file_existed = false;
        info!(path = %self.store.path().display(), "save_deleted");
        Ok(())
    }

    fn install(&mut self, record: Record) -> SaveResult<&Record> {
        self.state = Lifecycle::Ready(record);
        self.record().ok_or(SaveError::NotLoaded)
    }
}

/// Holds at most one [`SaveManager`]; the first install wins.
#[derive(Debug, Default)]
pub(crate) struct SaveService {
    manager: Option<SaveManager>,
}

impl SaveService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Installs and starts `manager`. Returns `Ok(false)` and drops it
    /// untouched when a manager is already installed.
    #[must_use = "`false` means the manager was dropped"]
    pub(crate) fn install(&mut self, manager: SaveManager) -> SaveResult<bool> {
        if self.manager.is_some() {
            return Ok(false);
        }
        let manager = self.manager.insert(manager);
        manager.start()?;
        info!(
            ready = manager.is_ready(),
            found_existing_save = manager.found_on_activation(),
            "save_service_installed"
        );
        Ok(true)
    }

    pub(crate) fn manager(&self) -> Option<&SaveManager> {
        self.manager.as_ref()
    }

    pub(crate) fn require_mut(&mut self) -> SaveResult<&mut SaveManager> {
        self.manager.as_mut().ok_or(SaveError::NotInstalled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn activated_manager(temp: &TempDir) -> SaveManager {
        let mut manager = SaveManager::in_dir(temp.path());
        manager.activate();
        manager
    }

    fn write_raw_save(temp: &TempDir, value: serde_json::Value) {
        fs::write(temp.path().join(SAVE_FILE_NAME), value.to_string()).expect("write save");
    }

    #[test]
    fn first_run_synthesizes_defaults_and_writes_file() {
        let temp = TempDir::new().expect("temp");
        let mut manager = activated_manager(&temp);
        assert!(!manager.file_existed);

        let record = manager.load().expect("load").clone();
        assert_eq!(record.note_pad_data, vec!["", "", ""]);
        assert_eq!(record.mouse_sensitivity, 0.1);
        assert_eq!(record.current_resolution_index, 4);
        assert!(record.is_full_screen);
        assert_eq!(record.death_counter, 0);
        assert!(manager.file_exists());
    }

    #[test]
    fn existing_file_loads_without_merging_defaults() {
        let temp = TempDir::new().expect("temp");
        write_raw_save(
            &temp,
            serde_json::json!({
                "notePadData": ["a", "b"],
                "mouseSensitivity": 0.5,
                "currentResolutionIndex": 1,
                "isFullScreen": false,
                "deathCounter": 7
            }),
        );
        let mut manager = activated_manager(&temp);
        let record = manager.load().expect("load");
        assert_eq!(record.note_pad_data, vec!["a", "b"]);
        assert_eq!(record.death_counter, 7);
        assert!(!record.is_full_screen);
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().expect("temp");
        let mut manager = activated_manager(&temp);
        manager.load().expect("load");
        {
            let record = manager.record_mut().expect("record");
            record.note_pad_data[1] = "the key is under the bed".to_string();
            record.death_counter = 3;
            record.mouse_sensitivity = 0.35;
        }
        manager.save().expect("save");
        let saved = manager.record().cloned().expect("record");

        let mut reloaded = activated_manager(&temp);
        assert!(reloaded.file_existed);
        assert_eq!(reloaded.load().expect("reload"), &saved);
    }

    #[test]
    fn reset_keeps_settings_but_clears_progress() {
        let temp = TempDir::new().expect("temp");
        write_raw_save(
            &temp,
            serde_json::json!({
                "notePadData": ["x", "y", "z"],
                "mouseSensitivity": 0.7,
                "currentResolutionIndex": 2,
                "isFullScreen": false,
                "deathCounter": 5
            }),
        );
        let mut manager = activated_manager(&temp);
        manager.load().expect("load");

        let record = manager.reset_preserving_settings().expect("reset").clone();
        assert_eq!(record.mouse_sensitivity, 0.7);
        assert_eq!(record.current_resolution_index, 2);
        assert!(!record.is_full_screen);
        assert_eq!(record.note_pad_data, vec!["", "", ""]);
        assert_eq!(record.death_counter, 0);

        let on_disk = JsonFileStore::<Record>::in_dir(temp.path(), SAVE_FILE_NAME)
            .load()
            .expect("disk");
        assert_eq!(on_disk, record);
    }

    #[test]
    fn new_game_discards_settings() {
        let temp = TempDir::new().expect("temp");
        let mut manager = activated_manager(&temp);
        manager.load().expect("load");
        manager.record_mut().expect("record").mouse_sensitivity = 0.9;

        let record = manager.new_game().expect("new game");
        assert_eq!(record, &Record::default());
    }

    #[test]
    fn delete_removes_file_but_keeps_memory() {
        let temp = TempDir::new().expect("temp");
        let mut manager = activated_manager(&temp);
        manager.load().expect("load");
        manager.record_mut().expect("record").death_counter = 2;

        manager.delete_save_file().expect("delete");
        assert!(!manager.file_exists());
        assert!(!manager.file_existed);
        assert_eq!(manager.record().map(|r| r.death_counter), Some(2));
        manager.delete_save_file().expect("delete again");
    }

    #[test]
    fn load_after_delete_takes_defaulting_path_with_settings() {
        let temp = TempDir::new().expect("temp");
        let mut manager = activated_manager(&temp);
        manager.load().expect("load");
        manager.record_mut().expect("record").current_resolution_index = 1;
        manager.delete_save_file().expect("delete");

        let record = manager.load().expect("reload");
        assert_eq!(record.current_resolution_index, 1);
        assert!(manager.file_exists());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_reset() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join(SAVE_FILE_NAME), "{ not json").expect("write");
        let mut manager = activated_manager(&temp);
        let err = manager.load().expect_err("err");
        assert!(matches!(err, SaveError::Store(StoreError::Parse { .. })));
        assert!(!manager.is_ready());
    }

    #[test]
    fn missing_fields_take_record_defaults() {
        let temp = TempDir::new().expect("temp");
        write_raw_save(&temp, serde_json::json!({ "deathCounter": 4 }));
        let mut manager = activated_manager(&temp);
        let record = manager.load().expect("load");
        assert_eq!(record.death_counter, 4);
        assert_eq!(record.current_resolution_index, 4);
        assert_eq!(record.note_pad_data.len(), 3);
    }

    #[test]
    fn save_before_load_is_rejected() {
        let temp = TempDir::new().expect("temp");
        let manager = activated_manager(&temp);
        assert!(matches!(manager.save(), Err(SaveError::NotLoaded)));
    }

    #[test]
    fn service_keeps_first_installed_manager() {
        let first = TempDir::new().expect("first");
        let second = TempDir::new().expect("second");
        let mut service = SaveService::new();

        assert!(service.install(SaveManager::in_dir(first.path())).expect("first install"));
        assert!(!service
            .install(SaveManager::in_dir(second.path()))
            .expect("second install"));

        assert!(first.path().join(SAVE_FILE_NAME).exists());
        assert!(!second.path().join(SAVE_FILE_NAME).exists());
    }

    #[test]
    fn install_into_empty_dir_writes_defaults_and_is_ready() {
        let temp = TempDir::new().expect("temp");
        let mut service = SaveService::new();
        assert!(service.install(SaveManager::in_dir(temp.path())).expect("install"));

        let manager = service.manager().expect("manager");
        assert!(manager.is_ready());
        assert!(manager.file_exists());
        assert!(!manager.found_on_activation());
        assert_eq!(manager.record(), Some(&Record::default()));

        let on_disk = JsonFileStore::<Record>::in_dir(temp.path(), SAVE_FILE_NAME)
            .load()
            .expect("disk");
        assert_eq!(on_disk, Record::default());
    }

    #[test]
    fn install_over_existing_save_loads_it() {
        let temp = TempDir::new().expect("temp");
        write_raw_save(&temp, serde_json::json!({ "deathCounter": 9 }));
        let mut service = SaveService::new();
        assert!(service.install(SaveManager::in_dir(temp.path())).expect("install"));

        let manager = service.manager().expect("manager");
        assert!(manager.found_on_activation());
        assert_eq!(manager.record().map(|r| r.death_counter), Some(9));
    }

    #[test]
    fn install_surfaces_corrupt_save() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join(SAVE_FILE_NAME), "[1, 2").expect("write");
        let mut service = SaveService::new();
        let err = service
            .install(SaveManager::in_dir(temp.path()))
            .expect_err("err");
        assert!(matches!(err, SaveError::Store(StoreError::Parse { .. })));
        assert!(service.manager().is_some_and(|m| !m.is_ready()));
    }

    #[test]
    fn record_serializes_with_camel_case_field_names() {
        let value = serde_json::to_value(Record::default()).expect("encode");
        assert_eq!(
            value,
            serde_json::json!({
                "notePadData": ["", "", ""],
                "mouseSensitivity": 0.1f32,
                "currentResolutionIndex": 4,
                "isFullScreen": true,
                "deathCounter": 0
            })
        );
    }
}
