//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::utils::log_file_path;

/// Outcome of a recorded step, shown in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step ran and succeeded.
    Ok,
    /// The step had nothing to do.
    Skipped,
    /// The step only reported what it would have done.
    DryRun,
    /// The step failed.
    Failed,
}

/// A recorded step result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Outcome of the step.
    pub status: StepStatus,
    /// Optional detail shown next to the name in the summary.
    pub message: Option<String>,
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are always written to a persistent log file at
/// `$XDG_CACHE_HOME/dotdeploy/<command>.log` (default
/// `~/.cache/dotdeploy/<command>.log`) with timestamps and ANSI codes
/// stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary. The log file
    /// itself is created and initialised by
    /// [`init_subscriber`](super::subscriber::init_subscriber) via
    /// [`FileLayer`](super::subscriber::FileLayer); this constructor does not
    /// write to the file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded step entries (test-only).
    #[cfg(test)]
    pub(crate) fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "dotdeploy::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file via the
    /// [`FileLayer`](super::subscriber::FileLayer)).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotdeploy::dry_run", "{msg}");
    }

    /// Log a success message (green on console, `[ok]` in the log file).
    pub fn success(&self, msg: &str) {
        tracing::info!(target: "dotdeploy::success", "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = match self.steps.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if steps.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                StepStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                StepStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        println!();
        let total = ok + skipped + dry_run + failed;
        self.info(&format!(
            "{total} steps: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}
