//! Download progress line.
//!
//! [`render_progress`] is pure: the same inputs always produce the same line.
//! [`TerminalProgress`] redraws that line on stderr for every received chunk.

use std::io::{self, Write};

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;

/// Width of the `transferred/total` column
const BYTES_COLUMN: usize = 15;

/// Width of the right-aligned percentage
const PERCENT_COLUMN: usize = 4;

/// Used when the terminal size cannot be queried
const DEFAULT_WIDTH: usize = 80;

/// Human readable size with binary units: `512B`, `1.5K`, `20.0M`, `1.2G`
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{}B", bytes)
    } else if bytes < MIB {
        format!("{:.1}K", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.1}M", bytes as f64 / MIB as f64)
    } else {
        format!("{:.1}G", bytes as f64 / GIB as f64)
    }
}

/// Render `12.0M/40.0M     [=====     ]  30% ` for a terminal `width` columns wide.
///
/// A `total` of 0 is treated as 1. Until the real length is known the
/// percentage can exceed 100; the bar itself never overflows its column.
pub fn render_progress(transferred: u64, total: u64, width: usize) -> String {
    let total = total.max(1);

    let bytes = format!("{}/{}", format_bytes(transferred), format_bytes(total));
    let percent = (transferred as u128 * 100 / total as u128).min(u64::MAX as u128);
    let percent = format!("{}%", percent);

    let left = format!("{:<w$} [", bytes, w = BYTES_COLUMN);
    let right = format!("] {:>w$} ", percent, w = PERCENT_COLUMN);

    let bar_width = width.saturating_sub(left.len() + right.len());
    let filled = (bar_width as u128 * transferred as u128 / total as u128).min(bar_width as u128)
        as usize;

    let mut line = String::with_capacity(left.len() + bar_width + right.len());
    line.push_str(&left);
    line.extend(std::iter::repeat_n('=', filled));
    line.extend(std::iter::repeat_n(' ', bar_width - filled));
    line.push_str(&right);
    line
}

/// Receiver of download progress, called once per received chunk
pub trait ProgressSink {
    fn update(&mut self, transferred: u64, total: u64);

    /// Called once after the body has been fully written
    fn finish(&mut self, transferred: u64, total: u64) {
        self.update(transferred, total);
    }
}

/// Ignores all progress
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _transferred: u64, _total: u64) {}
}

/// Redraws the progress line in place on stderr
pub struct TerminalProgress {
    width: usize,
}

impl TerminalProgress {
    pub fn new() -> Self {
        let width = crossterm::terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(DEFAULT_WIDTH);
        Self { width }
    }

    fn draw(&self, transferred: u64, total: u64) {
        let line = render_progress(transferred, total, self.width);
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{}", line);
        let _ = stderr.flush();
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&mut self, transferred: u64, total: u64) {
        self.draw(transferred, total);
    }

    fn finish(&mut self, transferred: u64, total: u64) {
        self.draw(transferred, total);
        let _ = writeln!(io::stderr());
    }
}
