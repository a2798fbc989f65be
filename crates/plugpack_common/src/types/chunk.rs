use arcstr::ArcStr;

use crate::{DependencyKind, Item};

/// A grouping decision: one output artifact rooted at `item`, fed by the
/// content of `dependency_items` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
  pub item: Item,
  pub dependency_items: Vec<Item>,
}

impl Chunk {
  pub fn new(item: Item) -> Self {
    Self { item, dependency_items: Vec::new() }
  }

  /// Chunks are identified by the pair `(active input, kind)`.
  pub fn key(&self) -> (DependencyKind, &ArcStr) {
    (self.item.kind, self.item.input())
  }
}
