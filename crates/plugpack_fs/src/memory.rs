use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

#[derive(Debug)]
struct MemoryFile {
  contents: Vec<u8>,
  mtime: SystemTime,
}

/// In-memory `FileSystem` for tests. Writes stamp strictly increasing
/// mtimes so incremental checks behave deterministically; `set_mtime`
/// lets a test rearrange file ages explicitly.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
  files: RwLock<HashMap<PathBuf, MemoryFile>>,
  dirs: RwLock<HashSet<PathBuf>>,
  clock: RwLock<u64>,
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_files<P: Into<PathBuf>, C: Into<Vec<u8>>>(
    entries: impl IntoIterator<Item = (P, C)>,
  ) -> Self {
    let fs = Self::new();
    for (path, contents) in entries {
      fs.write_file(path.into(), contents.into());
    }
    fs
  }

  pub fn write_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
    let mtime = self.tick();
    self
      .files
      .write()
      .insert(path.into(), MemoryFile { contents: contents.into(), mtime });
  }

  pub fn set_mtime(&self, path: impl AsRef<Path>, mtime: SystemTime) {
    if let Some(file) = self.files.write().get_mut(path.as_ref()) {
      file.mtime = mtime;
    }
  }

  /// Re-stamp `path` with a fresh (newest) mtime, as a rewrite would.
  pub fn touch(&self, path: impl AsRef<Path>) {
    let mtime = self.tick();
    if let Some(file) = self.files.write().get_mut(path.as_ref()) {
      file.mtime = mtime;
    }
  }

  fn tick(&self) -> SystemTime {
    let mut clock = self.clock.write();
    *clock += 1;
    UNIX_EPOCH + Duration::from_secs(*clock)
  }

  fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display()))
  }
}

impl super::FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self
      .files
      .read()
      .get(path)
      .map(|file| file.contents.clone())
      .ok_or_else(|| Self::not_found(path))
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let bytes = self.read(path)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    self.write_file(path, contents);
    Ok(())
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    let mut dirs = self.dirs.write();
    for ancestor in path.ancestors() {
      dirs.insert(ancestor.to_path_buf());
    }
    Ok(())
  }

  fn mtime(&self, path: &Path) -> io::Result<SystemTime> {
    self
      .files
      .read()
      .get(path)
      .map(|file| file.mtime)
      .ok_or_else(|| Self::not_found(path))
  }

  fn exists(&self, path: &Path) -> bool {
    self.files.read().contains_key(path) || self.dirs.read().contains(path)
  }
}
