use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "jgralab workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every crate benchmark and write a report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Only run benches whose name contains this string
        #[arg(long)]
        filter: Option<String>,
    },
}

const BENCHES: &[&str] = &[
    "markers_benchmark",
    "traversal_benchmark",
    "shortest_paths_benchmark",
];

const BASELINE: &str = "current";

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
    group_id: String,
    #[serde(default)]
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(u64),
    Bytes(u64),
}

struct Measurement {
    mean_ns: f64,
    elements: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            filter,
        } => {
            if !report_only {
                run_benchmarks(quick, filter.as_deref())?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, filter: Option<&str>) -> Result<()> {
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--benches", "--release", "-p", "jgralab"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    for bench in BENCHES.iter().filter(|b| filter.map_or(true, |f| b.contains(f))) {
        println!("\n>>> Running {}", bench);
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0");
        cmd.args(["bench", "-p", "jgralab", "--bench", bench]);

        // Args for the test runner (Criterion) go after --
        cmd.arg("--");
        cmd.arg("--save-baseline").arg(BASELINE);

        if quick {
            cmd.arg("--measurement-time").arg("0.1");
            cmd.arg("--noplot");
            cmd.arg("--sample-size").arg("10");
        }

        let status = cmd.status().with_context(|| format!("Failed to run {}", bench))?;

        if !status.success() {
            eprintln!("Warning: {} failed", bench);
        } else {
            println!("Finished {} in {:.2?}", bench, start.elapsed());
        }
    }

    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    // group -> benchmark -> measurement
    let mut results: BTreeMap<String, BTreeMap<String, Measurement>> = BTreeMap::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Benchmark Report")?;
    for (group, benches) in &results {
        writeln!(file, "\n## {}\n", group)?;
        writeln!(file, "| Benchmark | Mean | Throughput |")?;
        writeln!(file, "|---|---|---|")?;
        for (name, measurement) in benches {
            let throughput = match measurement.elements {
                Some(elements) => format_rate(elements as f64 * 1e9 / measurement.mean_ns),
                None => "-".to_string(),
            };
            writeln!(
                file,
                "| {} | {} | {} |",
                name,
                format_time(measurement.mean_ns),
                throughput
            )?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_time(ns: f64) -> String {
    if ns > 1e9 {
        format!("{:.2} s", ns / 1e9)
    } else if ns > 1e6 {
        format!("{:.2} ms", ns / 1e6)
    } else if ns > 1e3 {
        format!("{:.2} µs", ns / 1e3)
    } else {
        format!("{:.0} ns", ns)
    }
}

fn format_rate(per_second: f64) -> String {
    if per_second > 1_000_000.0 {
        format!("{:.2}M elem/s", per_second / 1_000_000.0)
    } else if per_second > 1_000.0 {
        format!("{:.2}K elem/s", per_second / 1_000.0)
    } else {
        format!("{:.0} elem/s", per_second)
    }
}

fn collect_results(dir: &Path, results: &mut BTreeMap<String, BTreeMap<String, Measurement>>) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Ok(()),
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // Structure: .../<benchmark>/current/{estimates,benchmark}.json
        let baseline = path.join(BASELINE);
        let estimates_path = baseline.join("estimates.json");
        if estimates_path.is_file() {
            let estimates: Estimates = serde_json::from_str(&fs::read_to_string(&estimates_path)?)
                .with_context(|| format!("Malformed {}", estimates_path.display()))?;
            let info_path = baseline.join("benchmark.json");
            let info: Option<BenchmarkInfo> = fs::read_to_string(&info_path)
                .ok()
                .and_then(|content| serde_json::from_str(&content).ok());

            let name = path
                .strip_prefix("target/criterion")
                .unwrap_or(&path)
                .display()
                .to_string();
            let (group, elements) = match info {
                Some(info) => {
                    let elements = match info.throughput {
                        Some(Throughput::Elements(n)) => Some(n),
                        Some(Throughput::Bytes(_)) | None => None,
                    };
                    (info.group_id, elements)
                }
                None => ("ungrouped".to_string(), None),
            };
            results.entry(group).or_default().insert(
                name,
                Measurement {
                    mean_ns: estimates.mean.point_estimate,
                    elements,
                },
            );
        }
        collect_results(&path, results)?;
    }
    Ok(())
}
