pub mod import_map;
pub mod normalized_bundler_options;
pub mod reload_policy;

use crate::{ImportMap, OutputMap, ReloadPolicy};

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Output
  pub out_dir: Option<String>,
  pub deps_dir: Option<String>,
  pub cache_dir: Option<String>,

  // --- Resolve
  pub import_map: Option<ImportMap>,
  pub output_map: Option<OutputMap>,

  // --- Enhance
  pub reload: Option<ReloadPolicy>,
  pub optimize: Option<bool>,
  pub quiet: Option<bool>,
}
