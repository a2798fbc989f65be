use std::path::PathBuf;

use arcstr::ArcStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
  /// No plugin passed its `test` predicate and produced a value for a
  /// required hook.
  #[error("no plugin handled `{hook}` for {input}")]
  NoPlugin { hook: &'static str, input: ArcStr },

  #[error("file not found: {0}")]
  FileNotFound(ArcStr),

  #[error("circular dependency: {}", chain.iter().map(ArcStr::as_str).collect::<Vec<_>>().join(" -> "))]
  CircularDependency { chain: Vec<ArcStr> },

  #[error("failed to stat {}", path.display())]
  Stat {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Plugin(#[from] anyhow::Error),
}

impl BundleError {
  /// Wrap a filesystem error raised while materializing `input`. `NotFound`
  /// becomes the domain `FileNotFound`; everything else stays a plugin error.
  pub fn from_read(input: &ArcStr, error: std::io::Error) -> Self {
    if error.kind() == std::io::ErrorKind::NotFound {
      Self::FileNotFound(input.clone())
    } else {
      Self::Plugin(error.into())
    }
  }

  pub fn is_not_found(&self) -> bool {
    match self {
      Self::FileNotFound(_) => true,
      Self::Plugin(error) => matches!(
        error.downcast_ref::<std::io::Error>(),
        Some(io) if io.kind() == std::io::ErrorKind::NotFound
      ),
      _ => false,
    }
  }
}

pub type BuildResult<T> = Result<T, BundleError>;
