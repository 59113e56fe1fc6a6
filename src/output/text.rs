//! Human-readable text output

use crate::collector::PrimeReport;
use crate::util::time::{format_duration, format_rate};
use std::io::{self, Write};

/// Print the result line to stdout
///
/// This is the only thing the tool writes to stdout.
pub fn print_result(report: &PrimeReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", report.line())?;
    out.flush()
}

/// Render the per-worker summary table
pub fn worker_summary(report: &PrimeReport) -> String {
    let mut lines = Vec::with_capacity(report.workers.len() + 4);
    lines.push(format!(
        "Workers: {}  Primes: {}  Elapsed: {}",
        report.workers.len(),
        report.primes.len(),
        format_duration(report.elapsed)
    ));
    lines.push(format!(
        "{:>6} {:>12} {:>10} {:>7} {:>10} {:>10} {:>10}",
        "rank", "candidates", "primes", "rounds", "received", "test", "rate/s"
    ));

    for stats in &report.workers {
        lines.push(format!(
            "{:>6} {:>12} {:>10} {:>7} {:>10} {:>10} {:>10}",
            stats.rank,
            stats.candidates,
            stats.local_count,
            stats.rounds,
            stats.received,
            format_duration(stats.test_elapsed),
            format_rate(stats.candidates, stats.test_elapsed)
        ));
    }

    lines.join("\n")
}

/// Print the per-worker summary to stderr
pub fn print_worker_summary(report: &PrimeReport) {
    eprintln!("{}", worker_summary(report));
}
