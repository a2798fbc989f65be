use std::sync::Arc;

use arcstr::ArcStr;
use plugpack_common::{BundleOutput, BundlerOptions, SharedOptions};
use plugpack_error::BuildResult;
use plugpack_fs::{FileSystemRef, OsFileSystem};
use plugpack_plugin::{Context, Plugin, PluginDriver};

use crate::stages::{ChunkStage, GenerateStage, GraphStage};
use crate::utils::normalize_options::normalize_options;

/// The engine. Owns the ordered plugin list (via the driver) and the
/// injected filesystem; each `bundle` call runs the three stages over a
/// fresh [`Context`].
pub struct Bundler {
  fs: FileSystemRef,
  options: SharedOptions,
  driver: Arc<PluginDriver>,
}

impl Bundler {
  pub fn new(options: BundlerOptions, plugins: Vec<Box<dyn Plugin>>) -> Self {
    Self::with_fs(options, plugins, Arc::new(OsFileSystem))
  }

  pub fn with_fs(
    options: BundlerOptions,
    plugins: Vec<Box<dyn Plugin>>,
    fs: FileSystemRef,
  ) -> Self {
    let options: SharedOptions = Arc::new(normalize_options(options));
    Self { fs, options, driver: PluginDriver::new(plugins) }
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  /// A fresh per-run context. Callers doing incremental builds seed
  /// `previous_graph`, `sources`, or `cache` on it before the first stage.
  pub fn context(&self) -> Context {
    Context::new(self.options.clone(), self.fs.clone(), &self.driver)
  }

  /// Run all three stages: graph, chunks, bundles.
  pub async fn bundle(&self, inputs: &[ArcStr]) -> BuildResult<BundleOutput> {
    let mut ctx = self.context();
    self.create_graph(inputs, &mut ctx).await?;
    self.create_chunks(inputs, &mut ctx).await?;
    self.create_bundles(&mut ctx).await?;
    Ok(ctx.into_output())
  }

  /// Expand `inputs` into `ctx.graph`, reusing prior assets where mtimes
  /// allow.
  pub async fn create_graph(&self, inputs: &[ArcStr], ctx: &mut Context) -> BuildResult<()> {
    GraphStage::new(self.driver.clone()).build(inputs, ctx).await
  }

  /// Partition the graph into `ctx.chunks`, one pass over a live-append
  /// chunk list.
  pub async fn create_chunks(&self, inputs: &[ArcStr], ctx: &mut Context) -> BuildResult<()> {
    ChunkStage::new(self.driver.clone()).build(inputs, ctx).await
  }

  /// Emit payloads for `ctx.chunks` into `ctx.bundles`, chaining optimizers
  /// when the run asks for it. Persistence stays with the caller.
  pub async fn create_bundles(&self, ctx: &mut Context) -> BuildResult<()> {
    GenerateStage::new(self.driver.clone()).build(ctx).await
  }
}
