use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use arcstr::ArcStr;
use async_trait::async_trait;
use plugpack_common::{Asset, Chunk, DependencyKind, Format, Item, StrOrBytes};
use plugpack_error::BuildResult;
use plugpack_plugin::{Context, HookUsage, Plugin};
use rustc_hash::{FxHashMap, FxHashSet};

/// Declarative plugin for stage tests: dependency edges, chunk sub-entries,
/// and freshness are all configured up front, and `create_asset` calls are
/// recorded for the incremental assertions.
#[derive(Debug, Default)]
pub(crate) struct FixturePlugin {
  /// `input -> [(dependency, kind)]` reported by `create_asset`.
  pub edges: FxHashMap<&'static str, Vec<(&'static str, DependencyKind)>>,
  /// `input -> [(sub entry, kind)]` appended to the chunk list by
  /// `create_chunk`.
  pub spawns: FxHashMap<&'static str, Vec<(&'static str, DependencyKind)>>,
  /// Inputs whose `create_bundle` reports "up to date".
  pub fresh: FxHashSet<&'static str>,
  pub optimizes: bool,
  pub asset_calls: Arc<Mutex<Vec<String>>>,
}

impl FixturePlugin {
  pub fn with_edges(
    edges: impl IntoIterator<Item = (&'static str, Vec<(&'static str, DependencyKind)>)>,
  ) -> Self {
    Self { edges: edges.into_iter().collect(), ..Default::default() }
  }
}

#[async_trait]
impl Plugin for FixturePlugin {
  fn name(&self) -> Cow<'static, str> {
    "fixture".into()
  }

  fn hook_usage(&self) -> HookUsage {
    let mut usage = HookUsage::READ_SOURCE
      | HookUsage::CREATE_ASSET
      | HookUsage::CREATE_CHUNK
      | HookUsage::CREATE_BUNDLE;
    if self.optimizes {
      usage |= HookUsage::OPTIMIZE_BUNDLE;
    }
    usage
  }

  async fn test(&self, _item: &Item, _ctx: &Context) -> bool {
    true
  }

  async fn read_source(
    &self,
    input: &ArcStr,
    _ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    Ok(Some(format!("source of {input}").into()))
  }

  async fn create_asset(&self, item: &Item, _ctx: &mut Context) -> BuildResult<Option<Asset>> {
    let input = item.input();
    self.asset_calls.lock().unwrap().push(input.to_string());

    let mut asset =
      Asset::new(item, PathBuf::from(input.as_str()), format!("dist/{input}").into());
    if let Some(edges) = self.edges.get(input.as_str()) {
      for &(dependency, kind) in edges {
        asset.add_dependency(dependency.into(), kind, Format::from_input(dependency));
      }
    }
    Ok(Some(asset))
  }

  async fn create_chunk(
    &self,
    item: &Item,
    _ctx: &mut Context,
    chunk_list: &mut Vec<Item>,
  ) -> BuildResult<Option<Chunk>> {
    if let Some(spawns) = self.spawns.get(item.input().as_str()) {
      for &(sub_entry, kind) in spawns {
        chunk_list.push(Item {
          history: vec![sub_entry.into()],
          kind,
          format: Format::from_input(sub_entry),
        });
      }
    }
    Ok(Some(Chunk::new(item.clone())))
  }

  async fn create_bundle(
    &self,
    chunk: &Chunk,
    _ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    let input = chunk.item.input();
    if self.fresh.contains(input.as_str()) {
      return Ok(None);
    }
    Ok(Some(format!("bundle:{input}").into()))
  }

  async fn optimize_bundle(
    &self,
    _output: &ArcStr,
    bundle: StrOrBytes,
    _ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    let mut content = bundle.try_into_string().map_err(anyhow::Error::from)?;
    content.push_str("+opt");
    Ok(Some(content.into()))
  }
}
