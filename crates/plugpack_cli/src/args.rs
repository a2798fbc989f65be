use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct InputArgs {
  /// Entry inputs, in bundle order.
  #[clap(required = true)]
  pub inputs: Vec<String>,

  /// JSON import map with module aliases.
  #[clap(long)]
  pub import_map: Option<PathBuf>,

  /// JSON object mapping inputs to fixed output paths.
  #[clap(long)]
  pub output_map: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub out_dir: Option<String>,

  #[clap(long)]
  pub deps_dir: Option<String>,

  #[clap(long)]
  pub cache_dir: Option<String>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  /// Run optimizer hooks over every emitted bundle.
  #[clap(long, short = 'o')]
  pub optimize: bool,

  #[clap(long, short = 'q')]
  pub quiet: bool,

  /// Force a rebuild; pass a comma-separated list to rebuild only those
  /// inputs.
  #[clap(long, num_args = 0..=1, value_delimiter = ',')]
  pub reload: Option<Vec<String>>,
}
