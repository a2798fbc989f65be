use plugpack_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

/// Caller-supplied module alias map, in the shape browsers accept. The
/// engine only carries it; interpreting `scopes` and prefix matching is a
/// plugin concern.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMap {
  #[serde(default)]
  pub imports: FxIndexMap<String, String>,
  #[serde(default)]
  pub scopes: FxIndexMap<String, FxIndexMap<String, String>>,
}

impl ImportMap {
  /// Exact-alias lookup; unmapped specifiers come back unchanged.
  pub fn resolve<'a>(&'a self, specifier: &'a str) -> &'a str {
    self.imports.get(specifier).map(String::as_str).unwrap_or(specifier)
  }
}
