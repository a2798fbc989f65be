use arcstr::ArcStr;

use crate::{DependencyKind, Format};

/// A unit of work flowing through the pipeline. `history` is the chain of
/// inputs that led here, newest first: `history[0]` is the active input and
/// the remainder is the import chain, which cycle detection and cache
/// scoping both read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  pub history: Vec<ArcStr>,
  pub kind: DependencyKind,
  pub format: Format,
}

impl Item {
  /// Seed item for a caller-supplied entry input.
  pub fn entry(input: impl Into<ArcStr>) -> Self {
    let input = input.into();
    let format = Format::from_input(&input);
    Self { history: vec![input], kind: DependencyKind::Import, format }
  }

  /// The item produced by following a dependency edge away from `self`.
  pub fn follow(&self, dependency: ArcStr, kind: DependencyKind, format: Format) -> Self {
    let mut history = Vec::with_capacity(self.history.len() + 1);
    history.push(dependency);
    history.extend(self.history.iter().cloned());
    Self { history, kind, format }
  }

  #[inline]
  pub fn input(&self) -> &ArcStr {
    &self.history[0]
  }

  /// The entry input this item ultimately descends from.
  #[inline]
  pub fn bundle_entry(&self) -> &ArcStr {
    &self.history[self.history.len() - 1]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entry_seeds_import_with_derived_format() {
    let item = Item::entry("src/index.html");
    assert_eq!(item.input().as_str(), "src/index.html");
    assert_eq!(item.kind, DependencyKind::Import);
    assert_eq!(item.format, Format::Html);
    assert_eq!(item.history.len(), 1);
  }

  #[test]
  fn follow_prepends_to_history() {
    let entry = Item::entry("src/index.html");
    let dep = entry.follow("src/index.tsx".into(), DependencyKind::Import, Format::Script);
    assert_eq!(dep.input().as_str(), "src/index.tsx");
    assert_eq!(dep.history[1].as_str(), "src/index.html");
    assert_eq!(dep.bundle_entry().as_str(), "src/index.html");
  }
}
