pub mod asset;
pub mod bundle_output;
pub mod chunk;
pub mod dependency_kind;
pub mod format;
pub mod graph;
pub mod item;
pub mod str_or_bytes;

use std::path::PathBuf;
use std::sync::Arc;

use arcstr::ArcStr;
use plugpack_utils::indexmap::FxIndexMap;
use rustc_hash::FxHashMap;

use crate::{NormalizedBundlerOptions, StrOrBytes};

/// Final payloads keyed by destination output path, in emission order.
pub type Bundles = FxIndexMap<ArcStr, StrOrBytes>;
/// Per-run memo of materialized sources, keyed by input.
pub type SourceMemo = FxHashMap<ArcStr, StrOrBytes>;
/// Per-run memo of cached transform outputs, keyed by cache file path.
pub type CacheMemo = FxHashMap<PathBuf, StrOrBytes>;
/// Caller-supplied input -> output overrides.
pub type OutputMap = FxIndexMap<ArcStr, ArcStr>;

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
