use crate::{Bundles, CacheMemo, Chunk, Graph};

/// Everything a finished `bundle` call hands back: the expanded graph, the
/// chunking decisions, the emitted payloads, and the transform cache for the
/// caller to persist or feed into the next run.
#[derive(Debug, Default)]
pub struct BundleOutput {
  pub graph: Graph,
  pub chunks: Vec<Chunk>,
  pub bundles: Bundles,
  pub cache: CacheMemo,
}
