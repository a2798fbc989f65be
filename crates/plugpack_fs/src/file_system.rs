use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// The engine's only window onto disk. Everything the pipeline reads or
/// stats goes through an injected implementation, so tests run against
/// [`crate::MemoryFileSystem`] and production against [`crate::OsFileSystem`].
pub trait FileSystem: std::fmt::Debug {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  /// Last modification time. `ErrorKind::NotFound` is load-bearing for the
  /// callers deciding incremental reuse.
  fn mtime(&self, path: &Path) -> io::Result<SystemTime>;

  fn exists(&self, path: &Path) -> bool;
}
