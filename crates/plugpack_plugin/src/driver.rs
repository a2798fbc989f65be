use std::sync::Arc;

use arcstr::ArcStr;
use plugpack_common::{Asset, Chunk, Item, StrOrBytes};
use plugpack_error::{BuildResult, BundleError};
use tracing::trace;

use crate::{Context, HookUsage, Plugin};

/// Picks which plugin handles an operation for a given item. Plugins are
/// scanned in registration order; `test` gates every dispatch, and the
/// declared `HookUsage` decides whether a hook exists at all.
pub struct PluginDriver {
  plugins: Vec<Box<dyn Plugin>>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<Box<dyn Plugin>>) -> Arc<Self> {
    Arc::new(Self { plugins })
  }

  pub fn plugins(&self) -> &[Box<dyn Plugin>] {
    &self.plugins
  }

  /// Materialize the item's source, consulting `ctx.sources` first and
  /// writing the winning plugin's result back into it. A not-found failure
  /// from the claiming plugin surfaces as the domain `FileNotFound`.
  pub async fn read_source(&self, item: &Item, ctx: &mut Context) -> BuildResult<StrOrBytes> {
    let input = item.input().clone();
    if let Some(source) = ctx.sources.get(&input) {
      return Ok(source.clone());
    }

    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::READ_SOURCE) || !plugin.test(item, ctx).await {
        continue;
      }
      match plugin.read_source(&input, ctx).await {
        Ok(Some(source)) => {
          trace!(plugin = %plugin.name(), input = %input, "read_source");
          ctx.sources.insert(input.clone(), source.clone());
          return Ok(source);
        }
        Ok(None) => {}
        Err(error) if error.is_not_found() => return Err(BundleError::FileNotFound(input)),
        Err(error) => return Err(error),
      }
    }

    Err(BundleError::NoPlugin { hook: "read_source", input })
  }

  /// Chain every matching transformer over the item's source, in plugin
  /// order. Not memoized; each request recomputes. The engine never calls
  /// this itself; it exists for plugin-to-plugin composition.
  pub async fn transform_source(
    &self,
    bundle_entry: &ArcStr,
    item: &Item,
    ctx: &mut Context,
  ) -> BuildResult<StrOrBytes> {
    let mut source = self.read_source(item, ctx).await?;

    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::TRANSFORM_SOURCE) || !plugin.test(item, ctx).await
      {
        continue;
      }
      if let Some(next) = plugin.transform_source(bundle_entry, item, source.clone(), ctx).await? {
        trace!(plugin = %plugin.name(), input = %item.input(), "transform_source");
        source = next;
      }
    }

    Ok(source)
  }

  pub async fn create_asset(&self, item: &Item, ctx: &mut Context) -> BuildResult<Asset> {
    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::CREATE_ASSET) || !plugin.test(item, ctx).await {
        continue;
      }
      if let Some(asset) = plugin.create_asset(item, ctx).await? {
        trace!(plugin = %plugin.name(), input = %item.input(), "create_asset");
        return Ok(asset);
      }
    }

    Err(BundleError::NoPlugin { hook: "create_asset", input: item.input().clone() })
  }

  pub async fn create_chunk(
    &self,
    item: &Item,
    ctx: &mut Context,
    chunk_list: &mut Vec<Item>,
  ) -> BuildResult<Chunk> {
    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::CREATE_CHUNK) || !plugin.test(item, ctx).await {
        continue;
      }
      if let Some(chunk) = plugin.create_chunk(item, ctx, chunk_list).await? {
        trace!(plugin = %plugin.name(), input = %item.input(), "create_chunk");
        return Ok(chunk);
      }
    }

    Err(BundleError::NoPlugin { hook: "create_chunk", input: item.input().clone() })
  }

  /// Unlike the other single-producer hooks, the first claiming plugin's
  /// answer is final even when it is `None`, which is its way of saying the
  /// output on disk is already fresh.
  pub async fn create_bundle(
    &self,
    chunk: &Chunk,
    ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::CREATE_BUNDLE)
        || !plugin.test(&chunk.item, ctx).await
      {
        continue;
      }
      trace!(plugin = %plugin.name(), input = %chunk.item.input(), "create_bundle");
      return plugin.create_bundle(chunk, ctx).await;
    }

    Err(BundleError::NoPlugin { hook: "create_bundle", input: chunk.item.input().clone() })
  }

  /// Chain every matching optimizer over the stored payload for `output`.
  pub async fn optimize_bundle(
    &self,
    item: &Item,
    output: &ArcStr,
    ctx: &mut Context,
  ) -> BuildResult<StrOrBytes> {
    let mut bundle = ctx
      .bundles
      .get(output)
      .cloned()
      .ok_or_else(|| anyhow::anyhow!("no bundle recorded for output {output}"))?;

    for plugin in &self.plugins {
      if !plugin.hook_usage().contains(HookUsage::OPTIMIZE_BUNDLE) || !plugin.test(item, ctx).await
      {
        continue;
      }
      if let Some(next) = plugin.optimize_bundle(output, bundle.clone(), ctx).await? {
        trace!(plugin = %plugin.name(), output = %output, "optimize_bundle");
        bundle = next;
      }
    }

    Ok(bundle)
  }
}
