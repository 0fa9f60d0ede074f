//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{MarginaliaCommand, TestNote};
use marginalia::domain::Note;
use marginalia::infra::PersistenceAdapter;
use marginalia::library::Library;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// The data directory lives in `data/`; a config path inside the temp
/// directory keeps the user's real config out of the picture.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        Self { temp_dir, data_dir }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the notes document.
    pub fn notes_path(&self) -> PathBuf {
        self.data_dir.join("notes.json")
    }

    /// Returns the path of the categories document.
    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join("categories.json")
    }

    /// Returns the config path handed to the binary (absent unless written).
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Writes a config file for the binary to pick up.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Appends test notes to the notes document.
    pub fn add_notes(&self, notes: &[TestNote]) {
        let mut all = self.read_notes();
        all.extend(notes.iter().map(TestNote::to_note));
        let raw = serde_json::to_string(&all).expect("Failed to serialize notes");
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.notes_path(), raw).expect("Failed to write notes");
    }

    /// Adds a single test note.
    pub fn add_note(&self, note: &TestNote) {
        self.add_notes(std::slice::from_ref(note));
    }

    /// Reads the persisted notes document (empty if absent).
    pub fn read_notes(&self) -> Vec<Note> {
        match std::fs::read_to_string(self.notes_path()) {
            Ok(raw) => serde_json::from_str(&raw).expect("Notes document should parse"),
            Err(_) => Vec::new(),
        }
    }

    /// Reads the persisted categories document (empty if absent).
    pub fn read_categories(&self) -> Vec<String> {
        match std::fs::read_to_string(self.categories_path()) {
            Ok(raw) => serde_json::from_str(&raw).expect("Categories document should parse"),
            Err(_) => Vec::new(),
        }
    }

    /// Opens the library the binary would see.
    pub fn open_library(&self) -> Library {
        Library::open(PersistenceAdapter::file(&self.data_dir))
    }

    /// Creates a MarginaliaCommand configured for this test environment.
    pub fn cmd(&self) -> MarginaliaCommand {
        MarginaliaCommand::new()
            .config(&self.config_path())
            .dir(&self.data_dir)
    }

    /// Writes a file next to the data directory and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Returns a path next to the data directory without creating it.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_and_read_notes() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("First"));
        env.add_note(&TestNote::new("Second"));

        let notes = env.read_notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].title(), "Second");
    }

    #[test]
    fn test_env_library_sees_seeded_notes() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("Seeded").category("Poetry"));
        let library = env.open_library();
        assert_eq!(library.notes().len(), 1);
    }
}
