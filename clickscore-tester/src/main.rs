mod logic;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{SeedResult, SimulationConfig, run_seed};
use util::{resolve_seeds, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Machine-readable JSON array, one entry per seed
    Json,
    /// Markdown table for pasting into issues
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "clickscore-tester", version = "0.1.0")]
#[command(about = "Headless QA runner for Rate My Clicks click sessions")]
struct Args {
    /// Seeds to run (comma-separated; decimal or 0x-prefixed hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Sessions to run per seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output (per-session lines and records)
    #[arg(short, long)]
    verbose: bool,

    /// Simulated milliseconds between animation frames
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Run every session against storage that rejects reads and writes
    #[arg(long)]
    fail_storage: bool,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        if !(self.frame_ms.is_finite() && self.frame_ms > 0.0) {
            bail!("--frame-ms must be a positive number, got {}", self.frame_ms);
        }
        Ok(SimulationConfig {
            iterations: self.iterations,
            frame_ms: self.frame_ms,
            fail_storage: self.fail_storage,
            verbose: self.verbose,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let config = args.simulation_config()?;
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    let results = run_seeds(&seeds, &config);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "🖱️  Rate My Clicks Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn run_seeds(seeds: &[u64], config: &SimulationConfig) -> Vec<SeedResult> {
    seeds
        .iter()
        .map(|&seed| {
            log::debug!("running {} sessions for seed {seed}", config.iterations);
            let result = run_seed(seed, config);
            if !result.passed {
                log::warn!(
                    "seed {seed} failed with {} problem(s)",
                    result.failures.len()
                );
            }
            result
        })
        .collect()
}

fn write_reports(args: &Args, results: &[SeedResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(&mut output_target, results)?;
        }
        ReportFormat::Console => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No seeds executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
        }
    }

    output_target
        .flush_inner()
        .context("failed to flush report output")?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            seeds: "1337".to_string(),
            iterations: 3,
            report: ReportFormat::Console,
            output: None,
            verbose: false,
            frame_ms: 16.0,
            fail_storage: false,
        }
    }

    #[test]
    fn cli_defaults_match_documented_values() {
        let args = Args::try_parse_from(["clickscore-tester"]).unwrap();
        assert_eq!(args.seeds, "1337");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.report, ReportFormat::Console);
        assert!((args.frame_ms - 16.0).abs() < f64::EPSILON);
        assert!(!args.fail_storage);
    }

    #[test]
    fn cli_parses_report_and_flags() {
        let args = Args::try_parse_from([
            "clickscore-tester",
            "--seeds",
            "1,0x2",
            "--report",
            "markdown",
            "--fail-storage",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.report, ReportFormat::Markdown);
        assert!(args.fail_storage);
        assert!(args.verbose);
        assert!(Args::try_parse_from(["clickscore-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn non_positive_frame_interval_is_rejected() {
        let args = Args {
            frame_ms: 0.0,
            ..base_args()
        };
        assert!(args.simulation_config().is_err());
    }

    #[test]
    fn run_seeds_covers_each_seed() {
        let config = base_args().simulation_config().unwrap();
        let results = run_seeds(&[1, 2, 3], &config);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(results[1].seed, 2);
    }

    #[test]
    fn write_reports_emits_json_to_file() {
        let temp = std::env::temp_dir().join("clickscore-report.json");
        let args = Args {
            report: ReportFormat::Json,
            output: Some(temp.clone()),
            ..base_args()
        };
        let config = args.simulation_config().unwrap();
        let results = run_seeds(&[1337], &config);
        write_reports(&args, &results, Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("\"seed\": 1337"));
        assert!(content.contains("mean_score"));
    }

    #[test]
    fn write_reports_console_without_seeds() {
        let temp = std::env::temp_dir().join("clickscore-report.txt");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No seeds executed"));
    }

    #[test]
    fn write_reports_emits_markdown_to_file() {
        let temp = std::env::temp_dir().join("clickscore-report.md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(temp.clone()),
            ..base_args()
        };
        let config = args.simulation_config().unwrap();
        write_reports(&args, &run_seeds(&[9], &config), Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("# Rate My Clicks Session Results"));
        assert!(content.contains("| 9 | 3 |"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
