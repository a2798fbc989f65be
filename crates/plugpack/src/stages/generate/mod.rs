use std::sync::Arc;

use plugpack_error::BuildResult;
use plugpack_plugin::{Context, PluginDriver};
use tracing::info;

/// Emit one payload per chunk, in chunk order. The destination comes from
/// the graph asset of the chunk's entry; writing the payloads anywhere is
/// the caller's concern.
pub struct GenerateStage {
  driver: Arc<PluginDriver>,
}

impl GenerateStage {
  pub fn new(driver: Arc<PluginDriver>) -> Self {
    Self { driver }
  }

  pub async fn build(&self, ctx: &mut Context) -> BuildResult<()> {
    for index in 0..ctx.chunks.len() {
      let chunk = ctx.chunks[index].clone();
      let input = chunk.item.input().clone();

      let output = ctx
        .graph
        .get(&input, chunk.item.kind)
        .ok_or_else(|| anyhow::anyhow!("chunk entry {input} has no asset in the graph"))?
        .output
        .clone();

      let Some(bundle) = self.driver.create_bundle(&chunk, ctx).await? else {
        // The claiming plugin found the output fresh on disk.
        if !ctx.options.quiet {
          info!("{output} is up to date");
        }
        continue;
      };
      ctx.bundles.insert(output.clone(), bundle);

      if ctx.options.optimize {
        let optimized = self.driver.optimize_bundle(&chunk.item, &output, ctx).await?;
        ctx.bundles.insert(output, optimized);
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use plugpack_common::{BundlerOptions, StrOrBytes};
  use plugpack_fs::MemoryFileSystem;
  use pretty_assertions::assert_eq;

  use crate::stages::testing::FixturePlugin;
  use crate::Bundler;

  fn bundler(plugin: FixturePlugin, optimize: bool) -> Bundler {
    Bundler::with_fs(
      BundlerOptions { optimize: Some(optimize), ..Default::default() },
      vec![Box::new(plugin)],
      Arc::new(MemoryFileSystem::new()),
    )
  }

  async fn graph_and_chunks(bundler: &Bundler, inputs: &[arcstr::ArcStr]) -> plugpack_plugin::Context {
    let mut ctx = bundler.context();
    bundler.create_graph(inputs, &mut ctx).await.unwrap();
    bundler.create_chunks(inputs, &mut ctx).await.unwrap();
    ctx
  }

  #[tokio::test]
  async fn bundles_keyed_by_asset_output_in_chunk_order() {
    let bundler = bundler(FixturePlugin::default(), false);
    let inputs = ["src/a.ts".into(), "src/b.ts".into()];
    let mut ctx = graph_and_chunks(&bundler, &inputs).await;

    bundler.create_bundles(&mut ctx).await.unwrap();

    let keys: Vec<&str> = ctx.bundles.keys().map(|output| output.as_str()).collect();
    assert_eq!(keys, vec!["dist/src/a.ts", "dist/src/b.ts"]);
    assert_eq!(
      ctx.bundles.get("dist/src/a.ts"),
      Some(&StrOrBytes::Str("bundle:src/a.ts".into()))
    );
  }

  #[tokio::test]
  async fn up_to_date_chunks_emit_nothing() {
    let plugin = FixturePlugin {
      fresh: ["src/a.ts"].into_iter().collect(),
      ..Default::default()
    };
    let bundler = bundler(plugin, false);
    let inputs = ["src/a.ts".into(), "src/b.ts".into()];
    let mut ctx = graph_and_chunks(&bundler, &inputs).await;

    bundler.create_bundles(&mut ctx).await.unwrap();

    let keys: Vec<&str> = ctx.bundles.keys().map(|output| output.as_str()).collect();
    assert_eq!(keys, vec!["dist/src/b.ts"]);
  }

  #[tokio::test]
  async fn optimizers_replace_the_stored_payload_in_place() {
    let plugin = FixturePlugin { optimizes: true, ..Default::default() };
    let bundler = bundler(plugin, true);
    let inputs = ["src/a.ts".into()];
    let mut ctx = graph_and_chunks(&bundler, &inputs).await;

    bundler.create_bundles(&mut ctx).await.unwrap();

    // Same key, optimized payload.
    let keys: Vec<&str> = ctx.bundles.keys().map(|output| output.as_str()).collect();
    assert_eq!(keys, vec!["dist/src/a.ts"]);
    assert_eq!(
      ctx.bundles.get("dist/src/a.ts"),
      Some(&StrOrBytes::Str("bundle:src/a.ts+opt".into()))
    );
  }

  #[tokio::test]
  async fn optimize_flag_off_leaves_payloads_alone() {
    let plugin = FixturePlugin { optimizes: true, ..Default::default() };
    let bundler = bundler(plugin, false);
    let inputs = ["src/a.ts".into()];
    let mut ctx = graph_and_chunks(&bundler, &inputs).await;

    bundler.create_bundles(&mut ctx).await.unwrap();
    assert_eq!(
      ctx.bundles.get("dist/src/a.ts"),
      Some(&StrOrBytes::Str("bundle:src/a.ts".into()))
    );
  }
}
