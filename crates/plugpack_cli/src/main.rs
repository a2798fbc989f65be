mod args;

use std::path::Path;
use std::time::Instant;

use ansi_term::Colour;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use arcstr::ArcStr;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plugpack::{
  BundleOutput, Bundler, BundlerOptions, ImportMap, OutputMap, Plugin, ReloadPolicy,
};
use plugpack_plugin_raw::RawPlugin;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn load_import_map(path: &Path) -> anyhow::Result<ImportMap> {
  let content = std::fs::read_to_string(path)?;
  Ok(serde_json::from_str(&content)?)
}

fn load_output_map(path: &Path) -> anyhow::Result<OutputMap> {
  let content = std::fs::read_to_string(path)?;
  let entries: Vec<(String, String)> =
    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&content)?
      .into_iter()
      .map(|(input, output)| {
        let output = output
          .as_str()
          .ok_or_else(|| anyhow::anyhow!("output for {input} must be a string"))?
          .to_string();
        Ok((input, output))
      })
      .collect::<anyhow::Result<_>>()?;
  Ok(entries.into_iter().map(|(input, output)| (input.into(), output.into())).collect())
}

/// The engine hands payloads back; putting them on disk is our job.
fn persist(output: &BundleOutput) -> anyhow::Result<()> {
  for (destination, bundle) in &output.bundles {
    let path = Path::new(destination.as_str());
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bundle.as_bytes())?;
  }
  for (path, source) in &output.cache {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, source.as_bytes())?;
  }
  Ok(())
}

fn print_bundles(output: &BundleOutput) {
  let mut left = 0;
  let mut right = 0;

  let mut rows = Vec::with_capacity(output.bundles.len());
  for (destination, bundle) in &output.bundles {
    let size = format!("{:.2}", bundle.len() as f64 / 1024.0);
    left = left.max(destination.len());
    right = right.max(size.len());
    rows.push((destination.to_string(), size));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (destination, size) in rows {
    let destination_len = destination.len();
    println!(
      "{}{:left$} {}{:right$}{} kB",
      color.paint(destination),
      "",
      dim.paint("size: "),
      "",
      size,
      left = left - destination_len,
      right = right - size.len()
    );
  }
}

#[tokio::main]
async fn main() {
  let args = Commands::parse();

  let filter = if args.enhance.quiet {
    EnvFilter::new("error")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };
  tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

  let import_map = match args.input.import_map.as_deref().map(load_import_map).transpose() {
    Ok(map) => map,
    Err(error) => {
      eprintln!("{} {error}", Colour::Red.paint("Error:"));
      std::process::exit(1);
    }
  };
  let output_map = match args.input.output_map.as_deref().map(load_output_map).transpose() {
    Ok(map) => map,
    Err(error) => {
      eprintln!("{} {error}", Colour::Red.paint("Error:"));
      std::process::exit(1);
    }
  };

  let reload = args.enhance.reload.map(|inputs| {
    if inputs.is_empty() {
      ReloadPolicy::Always
    } else {
      ReloadPolicy::only(inputs.into_iter().map(ArcStr::from))
    }
  });

  let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(RawPlugin)];
  let bundler = Bundler::new(
    BundlerOptions {
      out_dir: args.output.out_dir,
      deps_dir: args.output.deps_dir,
      cache_dir: args.output.cache_dir,
      import_map,
      output_map,
      reload,
      optimize: Some(args.enhance.optimize),
      quiet: Some(args.enhance.quiet),
    },
    plugins,
  );

  let inputs: Vec<ArcStr> = args.input.inputs.iter().map(|input| input.as_str().into()).collect();

  let start = Instant::now();
  match bundler.bundle(&inputs).await {
    Ok(output) => {
      if let Err(error) = persist(&output) {
        eprintln!("{} {error}", Colour::Red.paint("Error:"));
        std::process::exit(1);
      }

      if !args.enhance.quiet && !output.bundles.is_empty() {
        print_bundles(&output);
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      if !args.enhance.quiet {
        println!(
          "\n{} Bundled {} inputs in {}",
          Colour::Green.paint("✔"),
          inputs.len(),
          Colour::White.bold().paint(elapsed)
        );
      }
    }
    Err(error) => {
      eprintln!("{} {error}", Colour::Red.paint("Error:"));
      std::process::exit(1);
    }
  }
}
