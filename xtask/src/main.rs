use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

const BENCH: &str = "dispatch_benchmark";
const CRITERION_DIR: &str = "target/criterion";
const REPORT_PATH: &str = "benchmark_results/report.md";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Variant workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dispatch benchmarks and summarize them
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Also run with the `tracing` feature enabled, saved as its own baseline
        #[arg(long, default_value_t = false)]
        with_tracing: bool,
    },
}

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkInfo {
    throughput: Option<ThroughputInfo>,
}

#[derive(Deserialize)]
enum ThroughputInfo {
    Elements(f64),
    Bytes(f64),
}

/// group -> function -> baseline -> ops/s
type Results = BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            with_tracing,
        } => {
            if !report_only {
                run_benchmarks(quick, None, "plain")?;
                if with_tracing {
                    run_benchmarks(quick, Some("tracing"), "tracing")?;
                }
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, feature: Option<&str>, baseline: &str) -> Result<()> {
    println!("\n>>> Benchmarking baseline: {baseline}");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", BENCH]);
    if let Some(feature) = feature {
        cmd.args(["--features", feature]);
    }

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    cmd.arg("--save-baseline").arg(baseline);

    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd.status().with_context(|| format!("failed to run {BENCH}"))?;
    if !status.success() {
        anyhow::bail!("benchmark run for baseline {baseline} failed");
    }
    println!("Finished {baseline} in {:.2?}", start.elapsed());
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new(CRITERION_DIR);
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    for estimates in find_estimates(criterion_dir)? {
        if let Some((group, function, baseline, ops)) = read_sample(criterion_dir, &estimates)? {
            results
                .entry(group)
                .or_default()
                .entry(function)
                .or_default()
                .insert(baseline, ops);
        }
    }

    let report_path = Path::new(REPORT_PATH);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path).with_context(|| format!("creating {}", report_path.display()))?;
    write_report(&mut file, &results)?;

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn write_report(out: &mut impl Write, results: &Results) -> Result<()> {
    writeln!(out, "# Dispatch Benchmark Report")?;

    for (group, functions) in results {
        writeln!(out, "\n## {group}\n")?;
        writeln!(out, "| Function | Baseline | Ops/s | vs fastest |")?;
        writeln!(out, "|---|---|---|---|")?;

        let fastest = functions
            .values()
            .flat_map(BTreeMap::values)
            .copied()
            .fold(0.0_f64, f64::max);

        for (function, baselines) in functions {
            for (baseline, ops) in baselines {
                let rel = if fastest > 0.0 { ops / fastest } else { 0.0 };
                writeln!(out, "| {function} | {baseline} | {} | **{rel:.2}x** |", format_ops(*ops))?;
            }
        }
    }
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

fn find_estimates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            found.extend(find_estimates(&path)?);
        } else if path.file_name().and_then(|s| s.to_str()) == Some("estimates.json") {
            found.push(path);
        }
    }
    Ok(found)
}

/// Parses `<group>/<function>/<baseline>/estimates.json` into ops/s.
fn read_sample(root: &Path, estimates: &Path) -> Result<Option<(String, String, String, f64)>> {
    let relative = estimates.strip_prefix(root)?;
    let parts: Vec<&str> = relative.iter().filter_map(|p| p.to_str()).collect();
    let [group, function, baseline, _] = parts.as_slice() else {
        return Ok(None);
    };
    if [*group, *function, *baseline].contains(&"report") || *baseline == "new" || *baseline == "base" || *baseline == "change" {
        return Ok(None);
    }

    let content = fs::read_to_string(estimates).with_context(|| format!("reading {}", estimates.display()))?;
    let time_ns = serde_json::from_str::<Estimates>(&content)?.mean.point_estimate;
    if time_ns <= 0.0 {
        return Ok(None);
    }

    let mut elements = 1.0;
    let info_path = estimates.with_file_name("benchmark.json");
    if let Ok(content) = fs::read_to_string(&info_path) {
        if let Ok(BenchmarkInfo {
            throughput: Some(ThroughputInfo::Elements(n) | ThroughputInfo::Bytes(n)),
        }) = serde_json::from_str(&content)
        {
            elements = n;
        }
    }

    Ok(Some((
        (*group).to_string(),
        (*function).to_string(),
        (*baseline).to_string(),
        elements * 1e9 / time_ns,
    )))
}
