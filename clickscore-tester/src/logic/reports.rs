use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::SeedResult;

fn verdict_line(result: &SeedResult) -> String {
    result
        .verdicts
        .iter()
        .map(|(label, count)| format!("{label} {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn score_or_dash(score: Option<u8>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

/// Print a colored summary of every seed.
///
/// # Errors
/// Returns an error if writing to `writer` fails.
pub fn generate_console_report(
    writer: &mut dyn Write,
    results: &[SeedResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Click Session Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "========================".cyan())?;

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    let sessions: usize = results.iter().map(|r| r.sessions).sum();
    writeln!(writer, "Seeds: {}", results.len())?;
    writeln!(writer, "Sessions: {sessions}")?;
    writeln!(writer, "Passed: {}", passed.to_string().green())?;
    writeln!(writer, "Failed: {}", failed.to_string().red())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(writer, "{} seed {}", status, result.seed.to_string().bold())?;
        writeln!(
            writer,
            "   Scores: min {} / max {} / mean {:.1}",
            score_or_dash(result.min_score),
            score_or_dash(result.max_score),
            result.mean_score
        )?;
        writeln!(writer, "   Best: {}", score_or_dash(result.best))?;
        writeln!(writer, "   Verdicts: {}", verdict_line(result))?;
        for record in &result.records {
            writeln!(
                writer,
                "   #{:<3} {:>3}/100  {}",
                record.index, record.score, record.headline
            )?;
        }
        if !result.failures.is_empty() {
            writeln!(writer, "   Failures:")?;
            for failure in &result.failures {
                writeln!(writer, "     • {}", failure.red())?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Serialize the results as pretty JSON.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn generate_json_report(writer: &mut dyn Write, results: &[SeedResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

/// Render the results as a Markdown document.
///
/// # Errors
/// Returns an error if writing to `writer` fails.
pub fn generate_markdown_report(writer: &mut dyn Write, results: &[SeedResult]) -> Result<()> {
    writeln!(writer, "# Rate My Clicks Session Results\n")?;

    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Seeds**: {}", results.len())?;
    writeln!(writer, "- **Passed**: {passed}")?;
    writeln!(writer, "- **Failed**: {}\n", results.len() - passed)?;

    writeln!(writer, "| Seed | Sessions | Min | Max | Mean | Best | Verdicts |")?;
    writeln!(writer, "|------|----------|-----|-----|------|------|----------|")?;
    for result in results {
        writeln!(
            writer,
            "| {} | {} | {} | {} | {:.1} | {} | {} |",
            result.seed,
            result.sessions,
            score_or_dash(result.min_score),
            score_or_dash(result.max_score),
            result.mean_score,
            score_or_dash(result.best),
            verdict_line(result)
        )?;
    }

    let failing: Vec<&SeedResult> = results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(writer, "\n## Failures\n")?;
        for result in failing {
            writeln!(writer, "### Seed {}\n", result.seed)?;
            for failure in &result.failures {
                writeln!(writer, "- {failure}")?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}
