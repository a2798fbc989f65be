use arcstr::ArcStr;
use plugpack_utils::indexmap::FxIndexMap;

use crate::{Asset, DependencyKind};

/// `input -> (kind -> Asset)`. One input can carry several assets when it is
/// reached through different dependency kinds (a file imported both
/// statically and dynamically, say).
#[derive(Debug, Clone, Default)]
pub struct Graph(FxIndexMap<ArcStr, FxIndexMap<DependencyKind, Asset>>);

impl Graph {
  pub fn get(&self, input: &str, kind: DependencyKind) -> Option<&Asset> {
    self.0.get(input).and_then(|assets| assets.get(&kind))
  }

  pub fn contains(&self, input: &str, kind: DependencyKind) -> bool {
    self.get(input, kind).is_some()
  }

  pub fn insert(&mut self, asset: Asset) {
    self.0.entry(asset.input.clone()).or_default().insert(asset.kind, asset);
  }

  pub fn inputs(&self) -> impl Iterator<Item = &ArcStr> {
    self.0.keys()
  }

  pub fn assets(&self) -> impl Iterator<Item = &Asset> {
    self.0.values().flat_map(|assets| assets.values())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
