// ArcSign — cold-storage multi-chain HD wallet core
// SPDX-License-Identifier: GPL-3.0-or-later
//
// storage: the persistence seam between the repository and the filesystem
//
// Everything the repository does to disk goes through `Storage`, so tests
// can run against memory. `OsStorage` writes atomically: temp file in the
// same directory, fsync, rename.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

pub trait Storage: Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    /// Atomically replace the file at `path`. `private` requests mode 0600
    /// where the OS supports it.
    fn write_atomic(&self, path: &Path, bytes: &[u8], private: bool) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Names of the immediate subdirectories of `path`, sorted.
    fn list_subdirs(&self, path: &Path) -> Result<Vec<String>>;
    fn available_space(&self, path: &Path) -> Result<u64>;
}

/// The real filesystem.
pub struct OsStorage;

impl Storage for OsStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8], private: bool) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "blob".to_string());
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

        {
            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            if private {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }
            #[cfg(not(unix))]
            let _ = private;

            let mut file = options.open(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;

        // Make the rename durable on platforms where directories fsync.
        #[cfg(unix)]
        if let Some(parent) = path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(path)?)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        Ok(fs::remove_dir_all(path)?)
    }

    fn list_subdirs(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !path.exists() {
            return Ok(names);
        }
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn available_space(&self, path: &Path) -> Result<u64> {
        Ok(fs2::available_space(path)?)
    }
}

/// In-memory storage for unit tests: a flat map of paths to bytes, with a
/// configurable free-space answer.
#[cfg(test)]
pub mod mem {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;
    use std::sync::Mutex;

    pub struct MemStorage {
        files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
        pub free_space: Mutex<u64>,
    }

    impl MemStorage {
        pub fn new() -> Self {
            Self {
                files: Mutex::new(BTreeMap::new()),
                dirs: Mutex::new(BTreeSet::new()),
                free_space: Mutex::new(u64::MAX),
            }
        }
    }

    impl Storage for MemStorage {
        fn read(&self, path: &Path) -> Result<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into()
                })
        }

        fn write_atomic(&self, path: &Path, bytes: &[u8], _private: bool) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
                || self.dirs.lock().unwrap().contains(path)
        }

        fn create_dir_all(&self, path: &Path) -> Result<()> {
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> Result<()> {
            self.dirs.lock().unwrap().remove(path);
            self.files
                .lock()
                .unwrap()
                .retain(|p, _| !p.starts_with(path));
            Ok(())
        }

        fn list_subdirs(&self, path: &Path) -> Result<Vec<String>> {
            let mut names: Vec<String> = self
                .dirs
                .lock()
                .unwrap()
                .iter()
                .filter_map(|d| {
                    d.strip_prefix(path)
                        .ok()
                        .and_then(|rest| rest.iter().next())
                        .map(|n| n.to_string_lossy().to_string())
                })
                .collect();
            names.sort();
            names.dedup();
            Ok(names)
        }

        fn available_space(&self, _path: &Path) -> Result<u64> {
            Ok(*self.free_space.lock().unwrap())
        }
    }
}
