mod bundler_options;
mod types;

pub use bundler_options::{
  import_map::ImportMap, normalized_bundler_options::NormalizedBundlerOptions,
  reload_policy::ReloadPolicy, BundlerOptions,
};

// We don't want internal position adjustment of files to affect users, so all
// items are exported in the root.
pub use crate::types::{
  asset::{Asset, DependencyMap, DependencyMeta},
  bundle_output::BundleOutput,
  chunk::Chunk,
  dependency_kind::DependencyKind,
  format::Format,
  graph::Graph,
  item::Item,
  str_or_bytes::StrOrBytes,
  Bundles, CacheMemo, OutputMap, SharedOptions, SourceMemo,
};
