//! Sweep driver: simulate every parameter combination and stream rows to disk.
//!
//! Rows are produced in chunks. Within a chunk combinations are simulated
//! independently (in parallel with the `parallel` feature) and then written
//! in sweep order, and the file is flushed after every chunk. An interrupted
//! run therefore leaves a valid prefix that `resume` can continue from.
//!
//! With a seed, combination `k` samples from `seed + 7919·k`, so the output
//! does not depend on the number of threads or on chunking.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::{Result, WalkError};
use crate::params::{ParameterSpace, WalkParams};
use crate::record::{column_width, HistogramRow};
use crate::search::{QuantumWalkSearch, SearchConfig};

/// Problems beyond this many are counted but not described.
const MAX_REPORTED_PROBLEMS: usize = 20;

/// Configuration for a full (or partial) sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Output file, truncated unless `resume` is set.
    pub output: PathBuf,
    pub search: SearchConfig,
    /// Base seed; `None` draws fresh entropy per combination.
    pub seed: Option<u64>,
    /// Continue after the valid rows already in `output`.
    pub resume: bool,
    pub space: ParameterSpace,
    /// Combinations simulated between flushes.
    pub chunk_size: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("data.out"),
            search: SearchConfig::default(),
            seed: None,
            resume: false,
            space: ParameterSpace::full(),
            chunk_size: 256,
        }
    }
}

/// Outcome of [`run_sweep`].
#[derive(Debug, Clone)]
pub struct SweepSummary {
    /// Rows simulated and written by this run.
    pub rows_written: usize,
    /// Valid rows found in the file and kept when resuming.
    pub rows_resumed: usize,
    pub elapsed: Duration,
}

/// RNG for combination `index`.
pub fn combination_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add((index as u64).wrapping_mul(7919))),
        None => StdRng::from_entropy(),
    }
}

/// Simulate one combination into an output row.
pub fn simulate_row(search: &QuantumWalkSearch, seed: Option<u64>, index: usize) -> Result<HistogramRow> {
    let params = WalkParams::from_index(index)?;
    let mut rng = combination_rng(seed, index);
    let counts = search.run(&params, &mut rng)?;
    Ok(HistogramRow::from_counts(params, &counts, search.config().shots))
}

#[cfg(feature = "parallel")]
fn simulate_chunk(search: &QuantumWalkSearch, seed: Option<u64>, range: Range<usize>) -> Result<Vec<HistogramRow>> {
    use rayon::prelude::*;

    range
        .into_par_iter()
        .map(|k| simulate_row(search, seed, k))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn simulate_chunk(search: &QuantumWalkSearch, seed: Option<u64>, range: Range<usize>) -> Result<Vec<HistogramRow>> {
    range.map(|k| simulate_row(search, seed, k)).collect()
}

/// Length in bytes of the leading run of complete, in-order rows, and how many there are.
fn valid_prefix(path: &Path, space: &ParameterSpace, shots: usize) -> Result<(u64, usize)> {
    let file = File::open(path).map_err(WalkError::io(path))?;
    let file_len = file.metadata().map_err(WalkError::io(path))?.len();
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut bytes = 0u64;
    let mut rows = 0usize;
    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line).map_err(WalkError::io(path))?;
        let Some(body) = line.strip_suffix(b"\n") else {
            break;
        };
        let Ok(body) = std::str::from_utf8(body) else {
            break;
        };
        let expected = space.start() + rows;
        match HistogramRow::parse(body, rows + 1) {
            Ok(row)
                if rows < space.len()
                    && row.params.index() == expected
                    && row.total() == shots
                    && row.width == column_width(shots) => {}
            _ => break,
        }
        bytes += read as u64;
        rows += 1;
    }
    if bytes < file_len {
        warn!(
            "{}: discarding {} bytes after the first {} valid rows",
            path.display(),
            file_len - bytes,
            rows
        );
    }
    Ok((bytes, rows))
}

/// Open the output file, returning it positioned for appending and the number of rows kept.
fn open_output(config: &SweepConfig) -> Result<(File, usize)> {
    let path = &config.output;
    if config.resume && path.exists() {
        let (bytes, rows) = valid_prefix(path, &config.space, config.search.shots)?;
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(WalkError::io(path))?;
        file.set_len(bytes).map_err(WalkError::io(path))?;
        file.seek(SeekFrom::End(0)).map_err(WalkError::io(path))?;
        return Ok((file, rows));
    }
    let file = File::create(path).map_err(WalkError::io(path))?;
    Ok((file, 0))
}

/// Run the sweep described by `config`.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepSummary> {
    let started = Instant::now();
    let search = QuantumWalkSearch::new(config.search.clone())?;
    let (file, resumed) = open_output(config)?;
    let remaining = config.space.skip(resumed);
    let total = config.space.len();

    info!(
        "sweeping combinations {}..{} into {} ({} already present, {} shots each)",
        config.space.start(),
        config.space.end(),
        config.output.display(),
        resumed,
        config.search.shots
    );

    let mut out = BufWriter::new(file);
    let chunk_size = config.chunk_size.max(1);
    let mut written = 0usize;
    let end = remaining.end();

    for chunk_start in remaining.indices().step_by(chunk_size) {
        let chunk_end = (chunk_start + chunk_size).min(end);
        let rows = simulate_chunk(&search, config.seed, chunk_start..chunk_end)?;
        for row in &rows {
            writeln!(out, "{}", row).map_err(WalkError::io(&config.output))?;
        }
        out.flush().map_err(WalkError::io(&config.output))?;
        written += rows.len();

        let done = resumed + written;
        info!(
            "{}/{} combinations ({:.1}%), {:.1?} elapsed",
            done,
            total,
            100.0 * done as f64 / total.max(1) as f64,
            started.elapsed()
        );
    }

    let summary = SweepSummary {
        rows_written: written,
        rows_resumed: resumed,
        elapsed: started.elapsed(),
    };
    debug!("{:?}", summary);
    Ok(summary)
}

/// Result of checking an output file against the sweep it should hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub rows: usize,
    pub expected_rows: usize,
    pub problem_count: usize,
    /// The first few problems, one line each.
    pub problems: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problem_count == 0
    }

    fn problem(&mut self, description: String) {
        self.problem_count += 1;
        if self.problems.len() < MAX_REPORTED_PROBLEMS {
            self.problems.push(description);
        }
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {} (expected {})", self.rows, self.expected_rows)?;
        if self.is_ok() {
            return write!(f, "OK");
        }
        writeln!(f, "problems: {}", self.problem_count)?;
        for p in &self.problems {
            writeln!(f, "  {}", p)?;
        }
        if self.problem_count > self.problems.len() {
            write!(f, "  ... and {} more", self.problem_count - self.problems.len())?;
        }
        Ok(())
    }
}

/// Check that `path` holds exactly one well-formed row per combination of
/// `space`, in sweep order, each with 16 counts summing to `shots`.
pub fn verify_file(path: &Path, shots: usize, space: &ParameterSpace) -> Result<VerifyReport> {
    let file = File::open(path).map_err(WalkError::io(path))?;
    let mut report = VerifyReport {
        expected_rows: space.len(),
        ..VerifyReport::default()
    };

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(WalkError::io(path))?;
        let line_no = i + 1;
        report.rows += 1;

        let row = match HistogramRow::parse(&line, line_no) {
            Ok(row) => row,
            Err(e) => {
                report.problem(e.to_string());
                continue;
            }
        };
        let expected = space.start() + i;
        if row.params.index() != expected {
            let wanted = WalkParams::from_index(expected)
                .map(|p| p.to_string())
                .unwrap_or_else(|_| "no row".to_string());
            report.problem(format!("line {}: found {}, expected {}", line_no, row.params, wanted));
        }
        if row.total() != shots {
            report.problem(format!("line {}: counts sum to {}, expected {}", line_no, row.total(), shots));
        }
        if row.width != column_width(shots) {
            report.problem(format!(
                "line {}: count columns are {} wide, expected {}",
                line_no,
                row.width,
                column_width(shots)
            ));
        }
    }

    if report.rows != report.expected_rows {
        report.problem(format!(
            "file has {} rows, expected {}",
            report.rows, report.expected_rows
        ));
    }
    Ok(report)
}
