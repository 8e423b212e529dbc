//! Per-row outcomes of a CSV batch command.

use std::fmt;

use colored::Colorize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Updated(String),
    Created(String),
    Skipped(String),
    DryRun(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// 1-based line in the input file
    pub line: usize,
    pub label: String,
    pub status: RowStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub rows: Vec<RowOutcome>,
}

impl BatchReport {
    pub fn record(&mut self, line: usize, label: impl Into<String>, status: RowStatus) {
        let outcome = RowOutcome {
            line,
            label: label.into(),
            status,
        };
        outcome.print();
        self.rows.push(outcome);
    }

    pub fn count(&self, pred: impl Fn(&RowStatus) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.status)).count()
    }

    pub fn failures(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}

impl RowOutcome {
    fn print(&self) {
        match &self.status {
            RowStatus::Updated(detail) => println!(
                "{} Row {}: {} updated ({})",
                "✓".green(),
                self.line,
                self.label,
                detail
            ),
            RowStatus::Created(detail) => println!(
                "{} Row {}: {} created ({})",
                "✓".green(),
                self.line,
                self.label,
                detail
            ),
            RowStatus::DryRun(detail) => println!(
                "{} Row {}: {} would be changed ({}), dry run",
                "ℹ".blue(),
                self.line,
                self.label,
                detail
            ),
            RowStatus::Skipped(reason) => println!(
                "{} Row {}: {}. Skipping",
                "⚠".yellow(),
                self.line,
                reason
            ),
            RowStatus::Failed(reason) => eprintln!(
                "{} Row {}: {} failed: {}",
                "✗".red(),
                self.line,
                self.label,
                reason
            ),
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let changed = self.count(|s| matches!(s, RowStatus::Updated(_) | RowStatus::Created(_)));
        let dry_run = self.count(|s| matches!(s, RowStatus::DryRun(_)));
        let skipped = self.count(|s| matches!(s, RowStatus::Skipped(_)));
        write!(
            f,
            "{} row(s): {} changed, {} skipped, {} failed",
            self.rows.len(),
            changed,
            skipped,
            self.failures()
        )?;
        if dry_run > 0 {
            write!(f, ", {} dry run", dry_run)?;
        }
        Ok(())
    }
}
