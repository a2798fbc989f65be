use std::sync::{Arc, Weak};

use plugpack_common::{
  BundleOutput, Bundles, CacheMemo, Chunk, Graph, SharedOptions, SourceMemo,
};
use plugpack_fs::FileSystemRef;

use crate::PluginDriver;

/// Per-run shared state: configuration, memo tables, and the evolving
/// graph/chunks/bundles. Owned by exactly one pipeline run; plugins mutate
/// it freely through the hooks but must not retain pieces across runs.
pub struct Context {
  pub options: SharedOptions,
  pub fs: FileSystemRef,

  /// Memo `input -> materialized source`, consulted before `read_source`
  /// hooks fire.
  pub sources: SourceMemo,
  /// Memo `cache file path -> cached transform output`.
  pub cache: CacheMemo,

  /// The graph of the previous run, if any. Drives the mtime
  /// short-circuit; never written during this run.
  pub previous_graph: Graph,

  pub graph: Graph,
  pub chunks: Vec<Chunk>,
  pub bundles: Bundles,

  driver: Weak<PluginDriver>,
}

impl Context {
  pub fn new(options: SharedOptions, fs: FileSystemRef, driver: &Arc<PluginDriver>) -> Self {
    Self {
      options,
      fs,
      sources: SourceMemo::default(),
      cache: CacheMemo::default(),
      previous_graph: Graph::default(),
      graph: Graph::default(),
      chunks: Vec::new(),
      bundles: Bundles::default(),
      driver: Arc::downgrade(driver),
    }
  }

  /// Back-reference letting plugins reenter the dispatcher. The driver is
  /// owned by the `Bundler` for at least the duration of the run.
  pub fn driver(&self) -> Arc<PluginDriver> {
    self.driver.upgrade().expect("plugin driver dropped while a run was in progress")
  }

  pub fn into_output(self) -> BundleOutput {
    BundleOutput { graph: self.graph, chunks: self.chunks, bundles: self.bundles, cache: self.cache }
  }
}
