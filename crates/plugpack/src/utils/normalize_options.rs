use std::path::PathBuf;

use plugpack_common::{BundlerOptions, NormalizedBundlerOptions};

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let out_dir = PathBuf::from(raw_options.out_dir.unwrap_or_else(|| "dist".to_string()));
  let deps_dir =
    raw_options.deps_dir.map_or_else(|| out_dir.join("deps"), PathBuf::from);
  let cache_dir =
    raw_options.cache_dir.map_or_else(|| out_dir.join(".cache"), PathBuf::from);

  NormalizedBundlerOptions {
    // --- Output
    out_dir,
    deps_dir,
    cache_dir,
    // --- Resolve
    import_map: raw_options.import_map.unwrap_or_default(),
    output_map: raw_options.output_map.unwrap_or_default(),
    // --- Enhance
    reload: raw_options.reload.unwrap_or_default(),
    optimize: raw_options.optimize.unwrap_or_default(),
    quiet: raw_options.quiet.unwrap_or_default(),
  }
}
