mod bundler;
mod stages;
mod utils;

pub use crate::bundler::Bundler;
pub use plugpack_common::*;
pub use plugpack_error::{BuildResult, BundleError};
pub use plugpack_plugin::{Context, HookUsage, Plugin, PluginDriver};
