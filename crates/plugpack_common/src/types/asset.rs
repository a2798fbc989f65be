use std::path::PathBuf;

use arcstr::ArcStr;
use plugpack_utils::indexmap::FxIndexMap;

use crate::{DependencyKind, Format, Item};

/// `kind -> (dependency input -> meta)`, both levels in the insertion order
/// the producing plugin reported. The chunker relies on that order staying
/// put.
pub type DependencyMap = FxIndexMap<DependencyKind, FxIndexMap<ArcStr, DependencyMeta>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyMeta {
  pub kind: DependencyKind,
  pub format: Format,
}

/// One graph node: where to read it from, where to write it to, and which
/// outbound edges it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
  /// Source identifier, path or URL.
  pub input: ArcStr,
  /// Resolved local path after alias/cache resolution.
  pub file_path: PathBuf,
  /// Destination the bundler will write to. Opaque to the engine.
  pub output: ArcStr,
  pub kind: DependencyKind,
  pub format: Format,
  pub dependencies: DependencyMap,
}

impl Asset {
  /// An asset with no outbound edges, mirroring the producing item.
  pub fn new(item: &Item, file_path: PathBuf, output: ArcStr) -> Self {
    Self {
      input: item.input().clone(),
      file_path,
      output,
      kind: item.kind,
      format: item.format,
      dependencies: DependencyMap::default(),
    }
  }

  pub fn add_dependency(&mut self, input: ArcStr, kind: DependencyKind, format: Format) {
    self
      .dependencies
      .entry(kind)
      .or_default()
      .insert(input, DependencyMeta { kind, format });
  }

  /// Flatten the two-level map in bucket order, then per-bucket insertion
  /// order.
  pub fn dependencies_flat(&self) -> impl Iterator<Item = (&ArcStr, &DependencyMeta)> {
    self.dependencies.values().flat_map(|bucket| bucket.iter())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn flattening_preserves_reported_order() {
    let item = Item::entry("src/index.html");
    let mut asset = Asset::new(&item, "src/index.html".into(), "dist/index.html".into());
    asset.add_dependency("src/b.ts".into(), DependencyKind::Import, Format::Script);
    asset.add_dependency("src/w.ts".into(), DependencyKind::WebWorker, Format::Script);
    asset.add_dependency("src/a.ts".into(), DependencyKind::Import, Format::Script);

    let flat: Vec<&str> = asset.dependencies_flat().map(|(input, _)| input.as_str()).collect();
    assert_eq!(flat, vec!["src/b.ts", "src/a.ts", "src/w.ts"]);
  }
}
