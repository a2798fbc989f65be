use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use async_trait::async_trait;
use plugpack_common::{Asset, Chunk, Item, StrOrBytes};
use plugpack_error::{BuildResult, BundleError};
use plugpack_plugin::{Context, HookUsage, Plugin};
use plugpack_utils::hash::sha256_hex;

/// Passthrough fallback: claims any item, copies its bytes verbatim to a
/// content-addressed name under the deps dir. No parsing, no dependencies.
/// Register it last so format-aware plugins win first.
#[derive(Debug, Default)]
pub struct RawPlugin;

impl RawPlugin {
  fn output_for(&self, input: &ArcStr, resolved: &str, ctx: &Context) -> ArcStr {
    if let Some(output) = ctx.options.output_map.get(input) {
      return output.clone();
    }
    let extension = Path::new(resolved)
      .extension()
      .map(|ext| format!(".{}", ext.to_string_lossy()))
      .unwrap_or_default();
    let file_name = format!("{}{extension}", sha256_hex(resolved.as_bytes()));
    ArcStr::from(ctx.options.deps_dir.join(file_name).to_string_lossy().into_owned())
  }
}

#[async_trait]
impl Plugin for RawPlugin {
  fn name(&self) -> Cow<'static, str> {
    "plugpack:raw".into()
  }

  fn hook_usage(&self) -> HookUsage {
    HookUsage::READ_SOURCE | HookUsage::CREATE_ASSET | HookUsage::CREATE_CHUNK | HookUsage::CREATE_BUNDLE
  }

  async fn test(&self, _item: &Item, _ctx: &Context) -> bool {
    true
  }

  async fn read_source(&self, input: &ArcStr, ctx: &mut Context) -> BuildResult<Option<StrOrBytes>> {
    let resolved = ctx.options.import_map.resolve(input).to_string();
    let bytes = ctx
      .fs
      .read(Path::new(&resolved))
      .map_err(|error| BundleError::from_read(input, error))?;
    Ok(Some(StrOrBytes::Bytes(bytes)))
  }

  async fn create_asset(&self, item: &Item, ctx: &mut Context) -> BuildResult<Option<Asset>> {
    let input = item.input();
    let resolved = ctx.options.import_map.resolve(input).to_string();
    let output = self.output_for(input, &resolved, ctx);
    Ok(Some(Asset::new(item, PathBuf::from(resolved), output)))
  }

  async fn create_chunk(
    &self,
    item: &Item,
    _ctx: &mut Context,
    _chunk_list: &mut Vec<Item>,
  ) -> BuildResult<Option<Chunk>> {
    Ok(Some(Chunk::new(item.clone())))
  }

  async fn create_bundle(&self, chunk: &Chunk, ctx: &mut Context) -> BuildResult<Option<StrOrBytes>> {
    let item = &chunk.item;
    let input = item.input().clone();
    let asset = ctx
      .graph
      .get(&input, item.kind)
      .ok_or_else(|| anyhow::anyhow!("no asset recorded for {input}"))?;
    let file_path = asset.file_path.clone();
    let output = PathBuf::from(asset.output.as_str());

    // An output at least as new as its source needs no rewrite.
    if let (Some(source_mtime), Some(output_mtime)) =
      (mtime_or_none(ctx, &file_path)?, mtime_or_none(ctx, &output)?)
    {
      if output_mtime >= source_mtime {
        return Ok(None);
      }
    }

    let driver = ctx.driver();
    let source = driver.read_source(item, ctx).await?;
    Ok(Some(source))
  }
}

fn mtime_or_none(ctx: &Context, path: &Path) -> BuildResult<Option<std::time::SystemTime>> {
  match ctx.fs.mtime(path) {
    Ok(mtime) => Ok(Some(mtime)),
    Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
    Err(error) => Err(BundleError::Stat { path: path.to_path_buf(), source: error }),
  }
}
