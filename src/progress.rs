//! Conversion progress reporting.
//!
//! The converter emits [`ProgressEvent`]s; the binary decides whether they
//! are shown on stderr or discarded.
//!
//! # Example
//!
//! ```ignore
//! use svg2clip::progress::{ConsoleProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::new();
//! reporter.report(ProgressEvent::ConversionStarted { total_files: 6562 });
//! reporter.report(ProgressEvent::FileCompleted {
//!     path: "svgs/0001.svg".to_string(),
//!     accepted: 812,
//!     duration_ms: 3,
//! });
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Events that can be reported during a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Conversion started
    ConversionStarted {
        /// Number of input files to sample
        total_files: usize,
    },
    /// A file was sampled
    FileCompleted {
        /// Input file
        path: String,
        /// Keyframes accepted from this file
        accepted: usize,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// Conversion finished and the output was written
    ConversionCompleted {
        /// Output file
        output: String,
        /// Keyframes written
        keyframes: usize,
        /// Curve breaks written
        breaks: usize,
        /// Total duration in milliseconds
        duration_ms: u64,
    },
    /// A warning was generated
    Warning {
        /// File that generated the warning (if applicable)
        path: Option<String>,
        /// Warning message
        message: String,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    verbose: bool,
    current: AtomicUsize,
    total: AtomicUsize,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a console progress reporter writing to stderr.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(Box::new(output)),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Print a line per sampled file.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.color(text, "\x1b[33m")
    }

    fn cyan(&self, text: &str) -> String {
        self.color(text, "\x1b[36m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::ConversionStarted { total_files } => {
                self.total.store(total_files, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Sampling {} file{}...",
                    self.cyan("[convert]"),
                    total_files,
                    if total_files == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::FileCompleted { path, accepted, duration_ms } => {
                let current = self.current.fetch_add(1, Ordering::SeqCst) + 1;
                if self.verbose {
                    let total = self.total.load(Ordering::SeqCst);
                    self.writeln(&format!(
                        "{} [{}/{}] {} ({} keyframes, {})",
                        self.cyan("[convert]"),
                        current,
                        total,
                        path,
                        accepted,
                        format_duration(duration_ms)
                    ));
                }
            }
            ProgressEvent::ConversionCompleted { output, keyframes, breaks, duration_ms } => {
                self.writeln(&format!(
                    "{} {} keyframes, {} break{} -> {} in {}",
                    self.green("[done]"),
                    keyframes,
                    breaks,
                    if breaks == 1 { "" } else { "s" },
                    output,
                    format_duration(duration_ms)
                ));
            }
            ProgressEvent::Warning { path, message } => {
                let prefix = match path {
                    Some(p) => format!("{}: ", p),
                    None => String::new(),
                };
                self.writeln(&format!("{} {}{}", self.yellow("[warn]"), prefix, message));
            }
        }
    }
}

/// Format a duration in milliseconds to a human-readable string.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        format!("{}m {}s", minutes, seconds)
    }
}
