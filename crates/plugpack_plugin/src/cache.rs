use std::io;
use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use plugpack_common::StrOrBytes;
use plugpack_error::{BuildResult, BundleError};
use plugpack_utils::hash::sha256_hex;

use crate::Context;

/// Content-addressed transform cache. Keys are scoped by the chunk's entry
/// input so the same file compiled under different entries never collides:
/// `cache_dir/<sha256(bundle_entry)>/<sha256(resolved input)>`.
///
/// Only the in-memory memo is ever written here; flushing it to disk is the
/// caller's business.
impl Context {
  pub fn cache_file_path(&self, bundle_entry: &str, input: &str) -> PathBuf {
    let resolved = self.options.import_map.resolve(input);
    self
      .options
      .cache_dir
      .join(sha256_hex(bundle_entry.as_bytes()))
      .join(sha256_hex(resolved.as_bytes()))
  }

  /// Whether a transform for `(bundle_entry, input)` can be reused: the
  /// memo has it, or the on-disk cache file is newer than the source.
  pub fn has_cache(&self, bundle_entry: &str, input: &str) -> BuildResult<bool> {
    let key = self.cache_file_path(bundle_entry, input);
    if self.cache.contains_key(&key) {
      return Ok(true);
    }

    let Some(cache_mtime) = self.mtime_or_none(&key)? else {
      return Ok(false);
    };
    let resolved = self.options.import_map.resolve(input).to_string();
    let Some(source_mtime) = self.mtime_or_none(Path::new(&resolved))? else {
      return Ok(false);
    };

    Ok(cache_mtime > source_mtime)
  }

  pub fn set_cache(&mut self, bundle_entry: &str, input: &str, source: StrOrBytes) {
    let key = self.cache_file_path(bundle_entry, input);
    self.cache.insert(key, source);
  }

  /// The memoized entry if present, otherwise a disk read at the cache
  /// path. A `set_cache` earlier in the run always wins without touching
  /// disk.
  pub fn get_cache(&mut self, bundle_entry: &str, input: &str) -> BuildResult<StrOrBytes> {
    let key = self.cache_file_path(bundle_entry, input);
    if let Some(cached) = self.cache.get(&key) {
      return Ok(cached.clone());
    }

    let key_id = ArcStr::from(key.to_string_lossy().into_owned());
    let content = self
      .fs
      .read_to_string(&key)
      .map_err(|error| BundleError::from_read(&key_id, error))?;
    let source = StrOrBytes::Str(content);
    self.cache.insert(key, source.clone());
    Ok(source)
  }

  fn mtime_or_none(&self, path: &Path) -> BuildResult<Option<std::time::SystemTime>> {
    match self.fs.mtime(path) {
      Ok(mtime) => Ok(Some(mtime)),
      Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(error) => Err(BundleError::Stat { path: path.to_path_buf(), source: error }),
    }
  }
}
