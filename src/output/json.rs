//! JSON output formatting
//!
//! The report carries the bound, the primes, and per-worker detail so a run
//! can be checked without re-parsing the text line.

use crate::collector::PrimeReport;
use crate::util::time::format_duration;
use crate::worker::WorkerStats;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

/// One worker's statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWorkerStats {
    pub rank: usize,
    pub candidates: usize,
    pub local_count: usize,
    pub rounds: u32,
    pub received: usize,
    pub test_time: JsonDuration,
    pub reduce_time: JsonDuration,
}

impl From<&WorkerStats> for JsonWorkerStats {
    fn from(stats: &WorkerStats) -> Self {
        Self {
            rank: stats.rank,
            candidates: stats.candidates,
            local_count: stats.local_count,
            rounds: stats.rounds,
            received: stats.received,
            test_time: JsonDuration::from_duration(stats.test_elapsed),
            reduce_time: JsonDuration::from_duration(stats.reduce_elapsed),
        }
    }
}

/// Complete JSON report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub timestamp: String,
    pub bound: u64,
    pub workers: usize,
    pub prime_count: usize,
    pub primes: Vec<u64>,
    pub elapsed: JsonDuration,
    pub per_worker: Vec<JsonWorkerStats>,
}

impl JsonReport {
    /// Build a report stamped with the current time
    pub fn from_report(report: &PrimeReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            bound: report.bound,
            workers: report.workers.len(),
            prime_count: report.primes.len(),
            primes: report.primes.clone(),
            elapsed: JsonDuration::from_duration(report.elapsed),
            per_worker: report.workers.iter().map(JsonWorkerStats::from).collect(),
        }
    }
}

/// Write JSON report to file
pub fn write_json_output(output_path: &Path, report: &PrimeReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    let json = JsonReport::from_report(report);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &json)?;
    } else {
        serde_json::to_writer(&mut writer, &json)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> PrimeReport {
        let workers = vec![
            WorkerStats {
                rank: 0,
                candidates: 3,
                local_count: 2,
                rounds: 1,
                received: 1,
                ..Default::default()
            },
            WorkerStats {
                rank: 1,
                candidates: 2,
                local_count: 1,
                rounds: 1,
                ..Default::default()
            },
        ];
        PrimeReport::collect(10, vec![3, 5, 7], workers, Duration::from_micros(250)).unwrap()
    }

    #[test]
    fn test_report_fields() {
        let json = JsonReport::from_report(&sample_report());
        assert_eq!(json.bound, 10);
        assert_eq!(json.workers, 2);
        assert_eq!(json.prime_count, 4);
        assert_eq!(json.primes, vec![2, 3, 5, 7]);
        assert_eq!(json.elapsed.micros, 250);
        assert_eq!(json.per_worker[0].received, 1);
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_output(&path, &sample_report(), true).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: JsonReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.primes, vec![2, 3, 5, 7]);
        assert_eq!(parsed.per_worker.len(), 2);
        assert!(chrono::DateTime::parse_from_rfc3339(&parsed.timestamp).is_ok());
    }

    #[test]
    fn test_unwritable_path() {
        let path = Path::new("/nonexistent-dir/report.json");
        assert!(write_json_output(path, &sample_report(), false).is_err());
    }
}
