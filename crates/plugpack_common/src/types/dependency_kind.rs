/// How an item is pulled into the graph. Two items with the same input but
/// different kinds are distinct graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
  Import,
  Export,
  Fetch,
  DynamicImport,
  ServiceWorker,
  WebWorker,
}

impl DependencyKind {
  #[inline]
  pub fn is_static(&self) -> bool {
    matches!(self, Self::Import | Self::Export)
  }

  #[inline]
  pub fn is_dynamic(&self) -> bool {
    matches!(self, Self::DynamicImport)
  }
}
