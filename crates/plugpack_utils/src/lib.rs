pub mod hash;
pub mod indexmap;

pub use rustc_hash;
