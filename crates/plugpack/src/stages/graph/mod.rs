use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::Arc;

use arcstr::ArcStr;
use plugpack_common::{DependencyMeta, Item};
use plugpack_error::{BuildResult, BundleError};
use plugpack_plugin::{Context, PluginDriver};
use tracing::{debug, error, info};

/// Breadth-first expansion of the entry inputs into `ctx.graph`. The
/// worklist is strictly FIFO: entries in caller order first, then
/// dependencies in the order their producing plugin reported them.
pub struct GraphStage {
  driver: Arc<PluginDriver>,
}

impl GraphStage {
  pub fn new(driver: Arc<PluginDriver>) -> Self {
    Self { driver }
  }

  pub async fn build(&self, inputs: &[ArcStr], ctx: &mut Context) -> BuildResult<()> {
    let mut worklist: VecDeque<Item> =
      inputs.iter().map(|input| Item::entry(input.clone())).collect();

    while let Some(item) = worklist.pop_front() {
      let input = item.input().clone();
      if ctx.graph.contains(&input, item.kind) {
        continue;
      }

      let asset = if self.needs_update(&item, ctx)? {
        if !ctx.options.quiet {
          info!("create asset {input}");
        }
        self.driver.create_asset(&item, ctx).await?
      } else {
        debug!("reuse asset {input}");
        ctx
          .previous_graph
          .get(&input, item.kind)
          .expect("needs_update verified the prior asset exists")
          .clone()
      };

      let dependencies: Vec<(ArcStr, DependencyMeta)> =
        asset.dependencies_flat().map(|(dep, meta)| (dep.clone(), *meta)).collect();
      ctx.graph.insert(asset);

      for (dependency, meta) in dependencies {
        if dependency == input {
          continue;
        }
        // An input reappearing in its own import chain is a hard error;
        // report the loop from its first occurrence back to itself.
        if let Some(index) = item.history.iter().position(|entry| *entry == dependency) {
          let mut chain: Vec<ArcStr> = item.history[..=index].iter().rev().cloned().collect();
          chain.push(dependency);
          error!("circular dependency while expanding {input}");
          return Err(BundleError::CircularDependency { chain });
        }
        worklist.push_back(item.follow(dependency, meta.kind, meta.format));
      }
    }

    Ok(())
  }

  /// An asset is rebuilt when the reload policy says so, when no prior
  /// asset exists, or when the source is newer than its output. A missing
  /// source or output file also rebuilds; any other stat failure is fatal.
  fn needs_update(&self, item: &Item, ctx: &Context) -> BuildResult<bool> {
    let input = item.input();
    if ctx.options.reload.forces(input) {
      return Ok(true);
    }
    let Some(asset) = ctx.previous_graph.get(input, item.kind) else {
      return Ok(true);
    };
    let Some(source_mtime) = mtime_or_none(ctx, &asset.file_path)? else {
      return Ok(true);
    };
    let Some(output_mtime) = mtime_or_none(ctx, Path::new(asset.output.as_str()))? else {
      return Ok(true);
    };
    Ok(source_mtime > output_mtime)
  }
}

fn mtime_or_none(ctx: &Context, path: &Path) -> BuildResult<Option<std::time::SystemTime>> {
  match ctx.fs.mtime(path) {
    Ok(mtime) => Ok(Some(mtime)),
    Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(error) => Err(BundleError::Stat { path: path.to_path_buf(), source: error }),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use plugpack_common::{BundlerOptions, DependencyKind, ReloadPolicy};
  use plugpack_error::BundleError;
  use plugpack_fs::MemoryFileSystem;
  use pretty_assertions::assert_eq;

  use crate::stages::testing::FixturePlugin;
  use crate::Bundler;

  use DependencyKind::{DynamicImport, Import};

  fn bundler(plugin: FixturePlugin) -> Bundler {
    Bundler::with_fs(
      BundlerOptions::default(),
      vec![Box::new(plugin)],
      Arc::new(MemoryFileSystem::new()),
    )
  }

  #[tokio::test]
  async fn expands_breadth_first_in_reported_order() {
    let plugin = FixturePlugin::with_edges([
      ("src/a.ts", vec![("src/b.ts", Import), ("src/c.ts", Import)]),
      ("src/b.ts", vec![("src/d.ts", DynamicImport)]),
    ]);
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();

    let inputs: Vec<&str> = ctx.graph.inputs().map(|input| input.as_str()).collect();
    assert_eq!(inputs, vec!["src/a.ts", "src/b.ts", "src/c.ts", "src/d.ts"]);
    assert!(ctx.graph.contains("src/d.ts", DynamicImport));
    assert!(!ctx.graph.contains("src/d.ts", Import));
  }

  #[tokio::test]
  async fn shared_dependency_is_created_once() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let plugin = FixturePlugin {
      asset_calls: calls.clone(),
      ..FixturePlugin::with_edges([
        ("src/a.ts", vec![("src/shared.ts", Import)]),
        ("src/b.ts", vec![("src/shared.ts", Import)]),
      ])
    };
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    bundler.create_graph(&["src/a.ts".into(), "src/b.ts".into()], &mut ctx).await.unwrap();

    let created = calls.lock().unwrap().clone();
    assert_eq!(created, vec!["src/a.ts", "src/b.ts", "src/shared.ts"]);
  }

  #[tokio::test]
  async fn self_import_does_not_recurse() {
    let plugin = FixturePlugin::with_edges([("src/a.ts", vec![("src/a.ts", Import)])]);
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(ctx.graph.len(), 1);
  }

  #[tokio::test]
  async fn cycle_reports_the_full_chain() {
    let plugin = FixturePlugin::with_edges([
      ("src/a.ts", vec![("src/b.ts", Import)]),
      ("src/b.ts", vec![("src/a.ts", Import)]),
    ]);
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    let err = bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap_err();
    match err {
      BundleError::CircularDependency { chain } => {
        let chain: Vec<&str> = chain.iter().map(|input| input.as_str()).collect();
        assert_eq!(chain, vec!["src/a.ts", "src/b.ts", "src/a.ts"]);
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn empty_inputs_build_an_empty_graph() {
    let bundler = bundler(FixturePlugin::default());
    let mut ctx = bundler.context();
    bundler.create_graph(&[], &mut ctx).await.unwrap();
    assert!(ctx.graph.is_empty());
  }

  #[tokio::test]
  async fn fresh_outputs_reuse_prior_assets() {
    let fs = Arc::new(MemoryFileSystem::new());
    // Sources first, outputs afterwards: outputs end up newer.
    fs.write_file("src/a.ts", "a");
    fs.write_file("src/b.ts", "b");
    fs.write_file("dist/src/a.ts", "out a");
    fs.write_file("dist/src/b.ts", "out b");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let edges = [("src/a.ts", vec![("src/b.ts", Import)])];

    // First run builds the graph from scratch.
    let plugin =
      FixturePlugin { asset_calls: calls.clone(), ..FixturePlugin::with_edges(edges.clone()) };
    let bundler =
      Bundler::with_fs(BundlerOptions::default(), vec![Box::new(plugin)], fs.clone());
    let mut ctx = bundler.context();
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(calls.lock().unwrap().len(), 2);
    let first_graph = ctx.graph.clone();

    // Second run, prior graph seeded and outputs still fresh: nothing is
    // re-created, the graph comes back whole.
    calls.lock().unwrap().clear();
    let mut ctx = bundler.context();
    ctx.previous_graph = first_graph.clone();
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(calls.lock().unwrap().len(), 0);
    assert_eq!(ctx.graph.len(), 2);

    // Touching one source invalidates just that node.
    fs.touch("src/b.ts");
    calls.lock().unwrap().clear();
    let mut ctx = bundler.context();
    ctx.previous_graph = first_graph;
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(calls.lock().unwrap().clone(), vec!["src/b.ts"]);
  }

  #[tokio::test]
  async fn missing_output_forces_a_rebuild() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write_file("src/a.ts", "a");
    // No dist/src/a.ts on disk.

    let calls = Arc::new(Mutex::new(Vec::new()));
    let plugin = FixturePlugin { asset_calls: calls.clone(), ..Default::default() };
    let bundler =
      Bundler::with_fs(BundlerOptions::default(), vec![Box::new(plugin)], fs.clone());

    let mut ctx = bundler.context();
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    let first_graph = ctx.graph.clone();

    calls.lock().unwrap().clear();
    let mut ctx = bundler.context();
    ctx.previous_graph = first_graph;
    bundler.create_graph(&["src/a.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(calls.lock().unwrap().clone(), vec!["src/a.ts"]);
  }

  #[tokio::test]
  async fn selective_reload_overrides_fresh_mtimes() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write_file("src/a.ts", "a");
    fs.write_file("src/b.ts", "b");
    fs.write_file("dist/src/a.ts", "out a");
    fs.write_file("dist/src/b.ts", "out b");

    let calls = Arc::new(Mutex::new(Vec::new()));
    let plugin = FixturePlugin { asset_calls: calls.clone(), ..Default::default() };
    let options = BundlerOptions {
      reload: Some(ReloadPolicy::only(["src/b.ts".into()])),
      ..Default::default()
    };
    let bundler = Bundler::with_fs(options, vec![Box::new(plugin)], fs.clone());

    // Seed a prior graph equivalent to a completed run.
    let seed = Bundler::with_fs(
      BundlerOptions::default(),
      vec![Box::new(FixturePlugin::default())],
      fs.clone(),
    );
    let mut seed_ctx = seed.context();
    seed
      .create_graph(&["src/a.ts".into(), "src/b.ts".into()], &mut seed_ctx)
      .await
      .unwrap();

    let mut ctx = bundler.context();
    ctx.previous_graph = seed_ctx.graph;
    bundler.create_graph(&["src/a.ts".into(), "src/b.ts".into()], &mut ctx).await.unwrap();
    assert_eq!(calls.lock().unwrap().clone(), vec!["src/b.ts"]);
  }
}
