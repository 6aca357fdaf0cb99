//! Human and machine renderings of a hunt
//!
//! Final results go to stdout; progress lines go to stderr so JSON output
//! stays parseable.

use crate::hunt::{BisectStep, CommitResult, HuntObserver, HuntResult};
use clap::ValueEnum;
use std::io::Write;

/// Output format for the final result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Render the final result as text
pub fn to_report_string(result: &HuntResult) -> String {
    let mut report = String::new();

    match result {
        HuntResult::NotFound { .. } => {
            report.push_str("✅ No statistically significant regression detected.\n");
        }
        HuntResult::Found {
            baseline,
            culprit,
            p_value,
            slowdown_percent,
        } => {
            report.push_str("🔴 Performance regression found!\n");
            report.push_str(&format!("   Commit:   {}\n", culprit.revision().id));
            report.push_str(&format!(
                "   Baseline: {:.4}s → Regressed: {:.4}s\n",
                baseline.mean(),
                culprit.mean()
            ));
            report.push_str(&format!("   Slowdown: +{:.1}%\n", slowdown_percent));
            report.push_str(&format!(
                "   P-value:  {:.6} (statistically significant)\n",
                p_value
            ));
        }
    }

    report
}

/// Render the final result as pretty JSON
pub fn to_json_string(result: &HuntResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn render(result: &HuntResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(to_report_string(result)),
        OutputFormat::Json => to_json_string(result),
    }
}

/// Prints one line per benchmarked revision as the hunt advances
pub struct ProgressPrinter<W: Write> {
    out: W,
}

impl ProgressPrinter<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HuntObserver for ProgressPrinter<W> {
    fn on_baseline(&mut self, baseline: &CommitResult) {
        let _ = writeln!(
            self.out,
            "📊 Baseline {}: {:.4}s",
            baseline.revision().short_id(),
            baseline.mean()
        );
    }

    fn on_step(&mut self, step: &BisectStep<'_>) {
        let icon = if step.regressed { "⚠️" } else { "✅" };
        let _ = writeln!(
            self.out,
            "  {} {}: {:.4}s (p={:.4})",
            icon,
            step.result.revision().short_id(),
            step.result.mean(),
            step.test.p_value
        );
    }
}
