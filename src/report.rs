use std::fmt::{Display, Formatter};

use crate::error::Error;
use crate::model::CheckReport;

const RULE_WIDTH: usize = 30;

impl CheckReport {
    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable view of the report.
    pub fn text(&self) -> TextReport<'_> {
        TextReport { report: self }
    }
}

/// Console rendering of a [`CheckReport`].
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    report: &'a CheckReport,
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let report = self.report;
        writeln!(f, ".env validation report")?;
        writeln!(f, "{}", "━".repeat(RULE_WIDTH))?;

        if let Some(error) = &report.error {
            return write!(f, "❌ {error}");
        }

        for key in &report.present {
            writeln!(f, "✅ {key}")?;
        }
        for key in &report.empty {
            writeln!(f, "⚠️  {key}: empty value")?;
        }
        for key in &report.missing {
            writeln!(f, "❌ {key}: missing")?;
        }

        if !report.extra.is_empty() {
            writeln!(f)?;
            writeln!(f, "Extra variables:")?;
            for key in &report.extra {
                writeln!(f, "ℹ️  {key}")?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "Result: {} missing, {} empty | {}/{} valid",
            report.missing.len(),
            report.empty.len(),
            report.present.len(),
            report.total
        )
    }
}
