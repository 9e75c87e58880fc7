//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: one indicatif bar over concepts (cleared on completion).
//! Non-TTY mode: no bar. Per-concept report lines go to stdout in both.

use std::fmt::Display;
use std::io::{IsTerminal, Write};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn concept_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:<10.cyan.bold} {bar:30.green/dim} {pos:>4}/{len:4} {wide_msg:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("--")
}

/// Central progress context owning the `MultiProgress`.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self::with_tty(std::io::stderr().is_terminal())
    }

    /// Create a context with bars forced on or off.
    pub fn with_tty(is_tty: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Bar counting processed concepts. Hidden off a TTY.
    ///
    /// Update the message with the concept being processed; call
    /// `finish_and_clear` when done.
    pub fn concept_bar(&self, total: usize) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(concept_style());
        pb.set_prefix("concepts");
        pb
    }

    /// Print a progress line to stdout, above the bar on a TTY.
    pub fn report(&self, msg: impl Display) {
        let stdout = std::io::stdout();
        self.report_to(&mut stdout.lock(), msg);
    }

    fn report_to(&self, out: &mut impl Write, msg: impl Display) {
        // Write errors on stdout are ignored
        if self.is_tty {
            self.multi.suspend(|| {
                let _ = writeln!(out, "{msg}");
            });
        } else {
            let _ = writeln!(out, "{msg}");
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
