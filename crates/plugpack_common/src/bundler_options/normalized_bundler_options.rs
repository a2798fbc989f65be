use std::path::PathBuf;

use crate::{ImportMap, OutputMap, ReloadPolicy};

#[derive(Debug, Default)]
pub struct NormalizedBundlerOptions {
  // --- Output
  pub out_dir: PathBuf,
  pub deps_dir: PathBuf,
  pub cache_dir: PathBuf,

  // --- Resolve
  pub import_map: ImportMap,
  pub output_map: OutputMap,

  // --- Enhance
  pub reload: ReloadPolicy,
  pub optimize: bool,
  pub quiet: bool,
}
