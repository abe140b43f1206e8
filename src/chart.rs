//! Partitions chart: maps free space to utilization bars and hands them to
//! the external `draw_stack_bars` style tool.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::{ChartPoint, PartitionRecord};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart tool failed to spawn: {0}")]
    SpawnFailed(String),

    #[error("chart tool timed out after {0:?}")]
    Timeout(Duration),

    #[error("chart tool exited with non-zero status: {code}")]
    NonZeroExit { code: i32 },

    #[error("chart tool killed by signal")]
    Killed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host capability that draws the chart image.
///
/// Returns the tool's exit status; `Err` is reserved for failures to run it
/// at all (spawn errors, timeouts).
pub trait ChartTool {
    fn draw(&self, width: u32, output_path: &Path, series: &[ChartPoint]) -> Result<i32, ChartError>;
}

/// Sorts the most-full partition first and converts free space to utilization.
pub fn chart_series(partitions: &[PartitionRecord]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&PartitionRecord> = partitions.iter().collect();
    // stable: ties keep input order
    sorted.sort_by_key(|p| p.free_percent);
    sorted
        .into_iter()
        .map(|p| ChartPoint {
            name: p.partition.clone(),
            utilization: 100u8.saturating_sub(p.free_percent),
        })
        .collect()
}

/// Draws the stacked bars for `partitions` into `output_path`.
pub fn build_chart<T: ChartTool + ?Sized>(
    partitions: &[PartitionRecord],
    tool: &T,
    width: u32,
    output_path: &Path,
) -> Result<PathBuf, ChartError> {
    let series = chart_series(partitions);
    debug!(points = series.len(), output = %output_path.display(), "drawing partitions chart");

    match tool.draw(width, output_path, &series)? {
        0 => Ok(output_path.to_path_buf()),
        code => Err(ChartError::NonZeroExit { code }),
    }
}

/// Runs the chart tool as a child process with a bounded wait.
#[derive(Debug, Clone)]
pub struct ProcessChartTool {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessChartTool {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `--width=500 --output=/tmp/x.png /=82 /data=74`
    pub fn arguments(width: u32, output_path: &Path, series: &[ChartPoint]) -> Vec<String> {
        let mut args = Vec::with_capacity(series.len() + 2);
        args.push(format!("--width={}", width));
        args.push(format!("--output={}", output_path.display()));
        args.extend(series.iter().map(ChartPoint::to_string));
        args
    }

    fn wait_with_timeout(&self, child: &mut Child) -> Result<i32, ChartError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return status.code().ok_or(ChartError::Killed);
            }
            if Instant::now() >= deadline {
                warn!(timeout = ?self.timeout, "chart tool timed out, killing it");
                if let Err(e) = child.kill() {
                    debug!(error = %e, "failed to kill chart tool");
                }
                if let Err(e) = child.wait() {
                    debug!(error = %e, "failed to reap chart tool");
                }
                return Err(ChartError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ChartTool for ProcessChartTool {
    fn draw(&self, width: u32, output_path: &Path, series: &[ChartPoint]) -> Result<i32, ChartError> {
        let args = Self::arguments(width, output_path, series);
        debug!(program = %self.program.display(), args = ?args, "running chart tool");

        let start = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ChartError::SpawnFailed(format!("{}: {}", self.program.display(), e)))?;

        let result = self.wait_with_timeout(&mut child);
        info!(
            program = %self.program.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            success = matches!(result, Ok(0)),
            "chart tool finished"
        );
        result
    }
}
