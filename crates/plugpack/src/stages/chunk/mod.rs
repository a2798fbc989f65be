use std::sync::Arc;

use arcstr::ArcStr;
use plugpack_common::{DependencyKind, Item};
use plugpack_error::BuildResult;
use plugpack_plugin::{Context, PluginDriver};
use rustc_hash::FxHashSet;
use tracing::debug;

/// One `create_chunk` per `(kind, input)` pair, over a chunk list that
/// plugins extend while it is being walked. The loop is index-driven on
/// purpose: a snapshot iterator would miss the sub-entries pushed during
/// dispatch.
pub struct ChunkStage {
  driver: Arc<PluginDriver>,
}

impl ChunkStage {
  pub fn new(driver: Arc<PluginDriver>) -> Self {
    Self { driver }
  }

  pub async fn build(&self, inputs: &[ArcStr], ctx: &mut Context) -> BuildResult<()> {
    let mut chunk_list: Vec<Item> =
      inputs.iter().map(|input| Item::entry(input.clone())).collect();
    let mut produced: FxHashSet<(DependencyKind, ArcStr)> = FxHashSet::default();

    let mut index = 0;
    while index < chunk_list.len() {
      let item = chunk_list[index].clone();
      index += 1;

      if !produced.insert((item.kind, item.input().clone())) {
        continue;
      }
      debug!("create chunk {}", item.input());
      let chunk = self.driver.create_chunk(&item, ctx, &mut chunk_list).await?;
      ctx.chunks.push(chunk);
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use plugpack_common::{BundlerOptions, DependencyKind};
  use plugpack_fs::MemoryFileSystem;
  use pretty_assertions::assert_eq;

  use crate::stages::testing::FixturePlugin;
  use crate::Bundler;

  fn bundler(plugin: FixturePlugin) -> Bundler {
    Bundler::with_fs(
      BundlerOptions::default(),
      vec![Box::new(plugin)],
      Arc::new(MemoryFileSystem::new()),
    )
  }

  #[tokio::test]
  async fn one_chunk_per_entry_in_order() {
    let bundler = bundler(FixturePlugin::default());
    let mut ctx = bundler.context();
    bundler
      .create_chunks(&["src/a.ts".into(), "src/b.ts".into(), "src/a.ts".into()], &mut ctx)
      .await
      .unwrap();

    let keys: Vec<&str> = ctx.chunks.iter().map(|chunk| chunk.item.input().as_str()).collect();
    assert_eq!(keys, vec!["src/a.ts", "src/b.ts"]);
  }

  #[tokio::test]
  async fn sub_entries_appended_during_the_walk_get_chunks() {
    let plugin = FixturePlugin {
      spawns: [(
        "src/index.html",
        vec![
          ("src/index.tsx", DependencyKind::Import),
          ("src/site.css", DependencyKind::Import),
        ],
      )]
      .into_iter()
      .collect(),
      ..Default::default()
    };
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    bundler.create_chunks(&["src/index.html".into()], &mut ctx).await.unwrap();

    let keys: Vec<&str> = ctx.chunks.iter().map(|chunk| chunk.item.input().as_str()).collect();
    assert_eq!(keys, vec!["src/index.html", "src/index.tsx", "src/site.css"]);
  }

  #[tokio::test]
  async fn same_input_under_two_kinds_chunks_twice() {
    let plugin = FixturePlugin {
      spawns: [("src/index.html", vec![("src/shared.ts", DependencyKind::WebWorker)])]
        .into_iter()
        .collect(),
      ..Default::default()
    };
    let bundler = bundler(plugin);

    let mut ctx = bundler.context();
    bundler
      .create_chunks(&["src/index.html".into(), "src/shared.ts".into()], &mut ctx)
      .await
      .unwrap();

    // Import + WebWorker entries for src/shared.ts are distinct chunks.
    assert_eq!(ctx.chunks.len(), 3);
  }

  #[tokio::test]
  async fn empty_inputs_make_no_chunks() {
    let bundler = bundler(FixturePlugin::default());
    let mut ctx = bundler.context();
    bundler.create_chunks(&[], &mut ctx).await.unwrap();
    assert!(ctx.chunks.is_empty());
  }
}
