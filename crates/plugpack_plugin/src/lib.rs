mod cache;
mod context;
mod driver;
mod plugin;

pub use crate::context::Context;
pub use crate::driver::PluginDriver;
pub use crate::plugin::{HookUsage, Plugin};
