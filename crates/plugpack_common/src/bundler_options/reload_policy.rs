use arcstr::ArcStr;
use rustc_hash::FxHashSet;

/// Force-rebuild policy: everything, nothing, or a named set of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
  Always,
  #[default]
  Never,
  Only(FxHashSet<ArcStr>),
}

impl ReloadPolicy {
  pub fn forces(&self, input: &str) -> bool {
    match self {
      Self::Always => true,
      Self::Never => false,
      Self::Only(inputs) => inputs.contains(input),
    }
  }

  pub fn only(inputs: impl IntoIterator<Item = ArcStr>) -> Self {
    Self::Only(inputs.into_iter().collect())
  }
}
