use std::borrow::Cow;
use std::fmt::Debug;

use arcstr::ArcStr;
use async_trait::async_trait;
use plugpack_common::{Asset, Chunk, Item, StrOrBytes};
use plugpack_error::BuildResult;

use crate::Context;

bitflags::bitflags! {
  /// Capability set a plugin declares up front. The dispatcher consults it
  /// instead of probing hook implementations, so a plugin that leaves a
  /// flag unset is never asked for that hook.
  #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
  pub struct HookUsage: u8 {
    const READ_SOURCE = 1;
    const TRANSFORM_SOURCE = 1 << 1;
    const CREATE_ASSET = 1 << 2;
    const CREATE_CHUNK = 1 << 3;
    const CREATE_BUNDLE = 1 << 4;
    const OPTIMIZE_BUNDLE = 1 << 5;
  }
}

/// An external collaborator implementing any subset of the six pipeline
/// hooks plus the mandatory `test` gate. Plugins are scanned in
/// registration order; earlier plugins win.
///
/// Chained hooks (`transform_source`, `optimize_bundle`) receive the
/// running value explicitly and return `Some` to replace it; `None` keeps
/// the previous value.
#[async_trait]
pub trait Plugin: Debug + Send + Sync {
  fn name(&self) -> Cow<'static, str>;

  fn hook_usage(&self) -> HookUsage;

  /// Gate on format/kind. Awaited before every hook dispatch.
  async fn test(&self, item: &Item, ctx: &Context) -> bool;

  async fn read_source(&self, _input: &ArcStr, _ctx: &mut Context) -> BuildResult<Option<StrOrBytes>> {
    Ok(None)
  }

  async fn transform_source(
    &self,
    _bundle_entry: &ArcStr,
    _item: &Item,
    _source: StrOrBytes,
    _ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    Ok(None)
  }

  async fn create_asset(&self, _item: &Item, _ctx: &mut Context) -> BuildResult<Option<Asset>> {
    Ok(None)
  }

  async fn create_chunk(
    &self,
    _item: &Item,
    _ctx: &mut Context,
    _chunk_list: &mut Vec<Item>,
  ) -> BuildResult<Option<Chunk>> {
    Ok(None)
  }

  /// `Ok(None)` from the claiming plugin means the output is already up to
  /// date; the emitter skips it without consulting later plugins.
  async fn create_bundle(&self, _chunk: &Chunk, _ctx: &mut Context) -> BuildResult<Option<StrOrBytes>> {
    Ok(None)
  }

  async fn optimize_bundle(
    &self,
    _output: &ArcStr,
    _bundle: StrOrBytes,
    _ctx: &mut Context,
  ) -> BuildResult<Option<StrOrBytes>> {
    Ok(None)
  }
}
