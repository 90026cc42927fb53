//! Session storage persisted as a JSON object in one file.
//!
//! Every write replaces the file through a staged sibling and a rename, so a
//! crash mid-write leaves the previous state intact. A missing file reads as
//! empty storage.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{SessionStorage, SessionStorageError};

type Entries = BTreeMap<String, String>;

/// File-backed session storage.
#[derive(Debug)]
pub struct FileSessionStorage {
    dir: Dir,
    file_name: String,
    path: Utf8PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Open storage at `path`, creating the parent directory if needed.
    ///
    /// The file itself is created on the first write.
    ///
    /// # Errors
    /// Returns [`SessionStorageError::Read`] when the path has no file name or
    /// the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SessionStorageError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| SessionStorageError::read(format!("{path} has no file name")))?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| SessionStorageError::read(format!("{parent}: {err}")))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| SessionStorageError::read(format!("{parent}: {err}")))?;
        Ok(Self {
            dir,
            file_name,
            path: path.to_owned(),
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, SessionStorageError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(SessionStorageError::read(format!("{}: {err}", self.path))),
        };
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&contents)
            .map_err(|err| SessionStorageError::read(format!("{}: {err}", self.path)))
    }

    fn store(&self, entries: &Entries) -> Result<(), SessionStorageError> {
        let body = serde_json::to_vec_pretty(entries)
            .map_err(|err| SessionStorageError::write(err.to_string()))?;
        let staged = format!(".{}.tmp", self.file_name);
        self.dir
            .write(&staged, body)
            .and_then(|()| self.dir.rename(&staged, &self.dir, &self.file_name))
            .map_err(|err| SessionStorageError::write(format!("{}: {err}", self.path)))?;
        debug!(path = %self.path, keys = entries.len(), "session file written");
        Ok(())
    }

    fn modify(&self, change: impl FnOnce(&mut Entries)) -> Result<(), SessionStorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        change(&mut entries);
        self.store(&entries)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
