//! Console and file reporting for scan results

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{JTokError, Result};
use crate::scan::ScanEvent;
use crate::types::ScanSummary;

const RULE_WIDE: usize = 70;
const RULE_FILE: usize = 50;

/// Live progress display shared by all workers
pub struct Reporter {
    bar: ProgressBar,
}

impl Reporter {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("Progress: {bar:45.green} {percent}% | Checked: {pos}/{len} | Time: {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█░"),
        );
        bar.set_message(format_time(0));
        Self { bar }
    }

    /// Handle one probe result
    pub fn on_event(&self, event: &ScanEvent<'_>) {
        if event.available {
            self.bar.println(format!(
                "\n✓ FOUND! [{}] @{} is available! 🎉\n",
                event.found, event.username
            ));
        }
        self.bar.set_position(event.checked);
        self.bar.set_message(format_time(self.bar.elapsed().as_secs()));
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

/// Format seconds as `Xm Ys`
pub fn format_time(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Format a count with thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Banner subtitle for a length range
pub fn header_subtitle(min_length: usize, max_length: usize) -> String {
    if min_length == max_length {
        format!("Discover Available Usernames ({} Characters Only)", min_length)
    } else {
        format!("Discover Available Usernames ({}-{} Characters Only)", min_length, max_length)
    }
}

/// Print the tool banner
pub fn print_header(min_length: usize, max_length: usize) {
    println!("\n{}", "=".repeat(RULE_WIDE));
    println!("{:^width$}", "🎵  J TOK - TikTok Username Finder  🎵", width = RULE_WIDE);
    println!("{}", "=".repeat(RULE_WIDE));
    println!("{:^width$}", header_subtitle(min_length, max_length), width = RULE_WIDE);
    println!("{}\n", "=".repeat(RULE_WIDE));
}

/// Print the final results block
pub fn print_results(summary: &ScanSummary) {
    println!("\n\n{}", "=".repeat(RULE_WIDE));
    println!("{:^width$}", "📊 FINAL RESULTS", width = RULE_WIDE);
    println!("{}", "=".repeat(RULE_WIDE));

    println!("Total Usernames Checked: {}", format_count(summary.checked));
    println!("Available Usernames Found: {}", summary.found_count());
    println!("Total Time Elapsed: {}", format_time(summary.elapsed.as_secs()));

    if summary.found.is_empty() {
        println!("\n⚠️  No available usernames found in this session");
    } else {
        println!("\n✓ AVAILABLE USERNAMES:\n");
        for line in enumerate_hits(&summary.found) {
            println!("  {}", line);
        }
    }
}

/// `1. @name` lines, 1-indexed, in the given order
pub fn enumerate_hits(found: &[String]) -> Vec<String> {
    found
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. @{}", i + 1, name))
        .collect()
}

/// Results file name for a given moment
pub fn results_file_name(at: &DateTime<Local>) -> String {
    format!("J_TOK_usernames_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Full text of the results file
pub fn render_results(found: &[String], at: &DateTime<Local>) -> String {
    let rule = "=".repeat(RULE_FILE);
    let mut out = String::new();
    out.push_str("AVAILABLE TikTok USERNAMES FROM J TOK\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Search Date: {}\n", at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&rule);
    out.push_str("\n\n");
    for line in enumerate_hits(found) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write hits to a timestamped file in `dir`.
///
/// Returns `None` without touching the filesystem when there is nothing to save.
pub fn save_results(dir: &Path, found: &[String]) -> Result<Option<PathBuf>> {
    save_results_at(dir, found, &Local::now())
}

pub fn save_results_at(dir: &Path, found: &[String], at: &DateTime<Local>) -> Result<Option<PathBuf>> {
    if found.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(dir).map_err(|e| {
        JTokError::io(e.to_string(), Some(dir.to_string_lossy().to_string()))
    })?;

    let path = dir.join(results_file_name(at));
    std::fs::write(&path, render_results(found, at)).map_err(|e| {
        JTokError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
    })?;

    tracing::info!(path = %path.display(), hits = found.len(), "Results saved");
    Ok(Some(path))
}
