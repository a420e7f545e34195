//! File-backed database snapshot with file locking.
//!
//! The database lives in one JSON file. Writers hold an exclusive lock on a
//! sidecar `.lock` file for the whole load-modify-save cycle, and the
//! snapshot itself is replaced by renaming a synced temp file over it.

use crate::catalog::get_default_catalog;
use crate::{Config, Database, Error, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> Result<&Path> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
        Some(_) => Ok(Path::new(".")),
        None => Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "snapshot path missing parent",
        ))),
    }
}

impl Database {
    /// Load a snapshot with shared locking
    ///
    /// Returns `None` if the file doesn't exist. A corrupted file is an
    /// error: silently reseeding would throw away workout history.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No database found at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        let db: Database = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded database from {:?} ({} sessions)",
            path,
            db.sessions.len()
        );
        Ok(Some(db))
    }

    /// Load a snapshot, or seed a fresh database from the default catalog
    pub fn load_or_seed(path: &Path, config: &Config) -> Result<Self> {
        match Self::load(path)? {
            Some(db) => Ok(db),
            None => {
                tracing::info!("Seeding new database for {:?}", path);
                Ok(Self::seeded(
                    get_default_catalog(),
                    config.workout.rest_timer_seconds,
                ))
            }
        }
    }

    /// Save the snapshot atomically
    ///
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = parent_dir(path)?;
        std::fs::create_dir_all(dir)?;

        let temp = NamedTempFile::new_in(dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved database to {:?}", path);
        Ok(())
    }

    /// Load (or seed), modify and save back under an exclusive lock
    ///
    /// If `f` fails nothing is written, so a multi-step operation either
    /// lands completely or not at all.
    pub fn update<T, F>(path: &Path, config: &Config, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        std::fs::create_dir_all(parent_dir(path)?)?;
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(lock_path(path))?;
        lock.lock_exclusive()?;

        let result = Self::load_or_seed(path, config).and_then(|mut db| {
            let value = f(&mut db)?;
            db.save(path)?;
            Ok(value)
        });

        lock.unlock()?;
        result
    }
}
