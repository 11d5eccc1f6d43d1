//! Terminal output for the savesync CLI
//!
//! Commands print through an [`OutputFormatter`] picked once from the
//! `--json` flag. Besides plain status lines, the formatter renders the two
//! structured results of a sync: the dry-run plan and the run report.

use anyhow::{Context, Result};
use savesync_core::domain::{SyncOutcome, SyncReport};
use savesync_core::usecases::SyncPlan;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    /// One line per entry as it is being synchronized
    fn progress(&self, label: &str);
    fn print_json(&self, value: &serde_json::Value);
    /// Entries a dry run would replace
    fn plan(&self, plan: &SyncPlan) -> Result<()>;
    /// Completion report of a run
    fn report(&self, report: &SyncReport) -> Result<()>;
}

/// Human-readable output with status glyphs and indented details
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn progress(&self, label: &str) {
        println!("\u{2193} {}", label);
    }
    fn print_json(&self, _value: &serde_json::Value) {}

    fn plan(&self, plan: &SyncPlan) -> Result<()> {
        if plan.root.is_none() {
            self.success("Dry run: remote root folder not found, nothing to do");
            return Ok(());
        }

        let count = plan.matches.len();
        self.success(&format!(
            "Dry run: {} entr{} would be replaced, {} skipped",
            count,
            if count == 1 { "y" } else { "ies" },
            plan.skipped
        ));
        for planned in &plan.matches {
            self.info(&format!(
                "{}  ({} of {})",
                planned.entry.name, planned.rule, planned.target
            ));
        }
        Ok(())
    }

    fn report(&self, report: &SyncReport) -> Result<()> {
        let count = report.processed.len();
        let duration = format_duration(report.duration_ms());

        match &report.outcome {
            SyncOutcome::Completed if count == 0 => {
                self.success("No remote entries matched, local data unchanged")
            }
            SyncOutcome::Completed => self.success(&format!(
                "Synchronized {} item{} in {}",
                count,
                plural(count),
                duration
            )),
            SyncOutcome::Cancelled => self.warn(&format!(
                "Sync cancelled after {} item{}",
                count,
                plural(count)
            )),
            SyncOutcome::NoOp(reason) => self.success(&format!("Nothing to do: {}", reason)),
            SyncOutcome::Failed(reason) => self.error(&format!(
                "Sync aborted after {} item{}: {}",
                count,
                plural(count),
                reason
            )),
        }

        for name in &report.processed {
            self.info(&format!("Replaced: {}", name));
        }
        if report.skipped > 0 {
            self.info(&format!("Skipped:  {} unmatched", report.skipped));
        }
        self.info(&format!(
            "Started:  {}",
            report
                .started_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
        ));
        Ok(())
    }
}

/// One JSON document per result; status lines become small objects
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!("{}", serde_json::json!({"success": true, "message": message}));
    }
    fn error(&self, message: &str) {
        eprintln!("{}", serde_json::json!({"success": false, "error": message}));
    }
    fn warn(&self, message: &str) {
        eprintln!("{}", serde_json::json!({"level": "warning", "message": message}));
    }
    fn info(&self, _message: &str) {}
    fn progress(&self, label: &str) {
        println!("{}", serde_json::json!({"progress": label}));
    }
    fn print_json(&self, value: &serde_json::Value) {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    }

    fn plan(&self, plan: &SyncPlan) -> Result<()> {
        let json = serde_json::to_value(plan).context("Failed to serialize plan")?;
        self.print_json(&json);
        Ok(())
    }

    fn report(&self, report: &SyncReport) -> Result<()> {
        self.print_json(&report_json(report)?);
        Ok(())
    }
}

/// Report as JSON with the run duration added
fn report_json(report: &SyncReport) -> Result<serde_json::Value> {
    let mut json = serde_json::to_value(report).context("Failed to serialize report")?;
    json["duration_ms"] = serde_json::json!(report.duration_ms());
    Ok(json)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn format_duration(ms: u64) -> String {
    if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{}ms", ms)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}
