use std::path::PathBuf;

use plugpack::{Bundler, BundlerOptions, Plugin};
use plugpack_plugin_raw::RawPlugin;

#[tokio::main]
async fn main() {
  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/basic");

  let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(RawPlugin)];
  let bundler = Bundler::new(
    BundlerOptions {
      out_dir: Some(root.join("dist").to_string_lossy().into_owned()),
      ..Default::default()
    },
    plugins,
  );

  let entry = root.join("entry.txt").to_string_lossy().into_owned();
  match bundler.bundle(&[entry.into()]).await {
    Ok(output) => {
      for (destination, bundle) in &output.bundles {
        println!("{destination}: {} bytes", bundle.len());
      }
    }
    Err(error) => eprintln!("{error}"),
  }
}
