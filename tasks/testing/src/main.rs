use std::{
  fs::File,
  io::Write,
  path::PathBuf,
  process::{Command, Stdio},
  time::{Duration, Instant},
};

#[derive(Debug)]
struct BenchmarkResult {
  name: String,
  average_time: Duration,
  peak_memory_kb: u64,
}

/// Populate a throwaway tree of inputs for the CLI to chew through.
fn write_fixtures(root: &PathBuf, count: usize) -> Vec<String> {
  std::fs::create_dir_all(root.join("assets")).expect("failed to create fixture dir");

  let mut inputs = Vec::with_capacity(count);
  for index in 0..count {
    let path = root.join("assets").join(format!("asset_{index}.txt"));
    std::fs::write(&path, format!("fixture payload {index}\n").repeat(64))
      .expect("failed to write fixture");
    inputs.push(path.to_string_lossy().into_owned());
  }
  inputs
}

fn run_tool(name: &str, cmd: &str, args: &[String], runs: usize) -> BenchmarkResult {
  let mut total_time = Duration::ZERO;
  let mut peak_memory = 0;

  for _ in 0..runs {
    let time_start = Instant::now();

    let child = Command::new("/usr/bin/time")
      .arg("-v")
      .arg(cmd)
      .args(args)
      .stderr(Stdio::piped())
      .stdout(Stdio::null())
      .spawn()
      .expect("failed to spawn process");

    let output = child.wait_with_output().expect("failed to wait on child");
    let elapsed = time_start.elapsed();
    total_time += elapsed;

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines() {
      if line.contains("Maximum resident set size") {
        if let Some(kb_str) = line.split(':').nth(1) {
          let kb: u64 = kb_str.trim().parse().unwrap_or(0);
          peak_memory = peak_memory.max(kb);
        }
      }
    }
  }

  BenchmarkResult {
    name: name.to_string(),
    average_time: total_time / (runs as u32),
    peak_memory_kb: peak_memory,
  }
}

fn main() {
  let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .parent()
    .and_then(|tasks| tasks.parent())
    .expect("workspace root")
    .to_path_buf();
  let bench_root = workspace_root.join("tmp/bench");
  let cli = workspace_root.join("target/release/plugpack_cli");

  let inputs = write_fixtures(&bench_root, 256);
  let out_dir = bench_root.join("dist").to_string_lossy().into_owned();

  let mut args = vec!["--quiet".to_string(), "--out-dir".to_string(), out_dir];
  args.extend(inputs);

  let runs = 5;
  println!("Benchmarking plugpack ({} runs)...", runs);
  let result = run_tool("plugpack", &cli.to_string_lossy(), &args, runs);

  let mut file = File::create("benchmark_results.csv").unwrap();
  writeln!(file, "Tool,Average Time (ms),Peak Memory (KB)").unwrap();
  writeln!(
    file,
    "{},{:.2},{:.0}",
    result.name,
    result.average_time.as_secs_f64() * 1000.0,
    result.peak_memory_kb
  )
  .unwrap();

  println!("Benchmark finished, results saved to benchmark_results.csv");
}
