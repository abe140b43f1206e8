use serde::Serialize;

use crate::html::{bold, fmt_percent, font, html_escape};
use crate::parsing::{first_percent, is_threshold_line, unescape_text, LITERAL_NEWLINE};
use crate::types::{ReportLine, Severity, ThresholdPair};

pub const DETAILS_HEADING: &str = "Additional Details";

const CRITICAL_COLOR: &str = "red";
const WARNING_COLOR: &str = "orange";

/// The details section in both of its output formats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    pub text: String,
    pub html: String,
    /// Per-line classification; empty when no thresholds were declared.
    pub lines: Vec<ReportLine>,
}

impl RenderedReport {
    pub fn thresholded(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Get a summary of the number of flagged lines
    pub fn summary(&self) -> RenderSummary {
        let count = |severity: Severity| self.lines.iter().filter(|l| l.severity == severity).count();
        RenderSummary {
            critical_count: count(Severity::Critical),
            warning_count: count(Severity::Warning),
            normal_count: count(Severity::Normal),
            passthrough_count: count(Severity::Passthrough),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    pub critical_count: usize,
    pub warning_count: usize,
    pub normal_count: usize,
    pub passthrough_count: usize,
}

impl RenderSummary {
    pub fn total_flagged(&self) -> usize {
        self.critical_count + self.warning_count
    }

    pub fn has_issues(&self) -> bool {
        self.total_flagged() > 0
    }
}

/// Renders the check's long output, coloring lines whose free space falls at
/// or below the declared thresholds.
///
/// `detail` uses the literal two-character `\n` token as its line separator.
/// Without thresholds the text is emitted as-is inside a `<pre>` block.
pub fn render_details(detail: &str, thresholds: Option<&ThresholdPair>) -> RenderedReport {
    let unescaped = unescape_text(detail);
    let text = format!("{}:\n{}\n", DETAILS_HEADING, unescaped);

    let Some(thresholds) = thresholds else {
        return RenderedReport {
            text,
            html: format!(
                "{}:<br><pre>{}</pre><br><br>",
                bold(DETAILS_HEADING),
                html_escape(&unescaped)
            ),
            lines: Vec::new(),
        };
    };

    let lines: Vec<ReportLine> = detail
        .split(LITERAL_NEWLINE)
        .map(|line| classify_line(line, thresholds))
        .collect();
    let body = lines
        .iter()
        .map(|line| line_html(line, thresholds))
        .collect::<Vec<_>>()
        .join("<br>");

    RenderedReport {
        text,
        html: format!("{}:<pre>{}</pre>", bold(DETAILS_HEADING), body),
        lines,
    }
}

/// Tags a single line. Each call parses the line from scratch.
pub fn classify_line(line: &str, thresholds: &ThresholdPair) -> ReportLine {
    if is_threshold_line(line) {
        return ReportLine {
            text: line.to_string(),
            severity: Severity::Passthrough,
            free_percent: None,
        };
    }

    let Some(used) = first_percent(line) else {
        return ReportLine {
            text: line.to_string(),
            severity: Severity::Passthrough,
            free_percent: None,
        };
    };

    let free = 100.0 - used;
    let severity = if free <= f64::from(thresholds.critical_percent) {
        Severity::Critical
    } else if free <= f64::from(thresholds.warning_percent) {
        Severity::Warning
    } else {
        Severity::Normal
    };

    ReportLine {
        text: line.to_string(),
        severity,
        free_percent: Some(free),
    }
}

fn line_html(line: &ReportLine, thresholds: &ThresholdPair) -> String {
    let escaped = html_escape(&line.text);
    let (color, label, limit) = match line.severity {
        Severity::Critical => (CRITICAL_COLOR, "CRITICAL", thresholds.critical_percent),
        Severity::Warning => (WARNING_COLOR, "WARNING", thresholds.warning_percent),
        Severity::Normal | Severity::Passthrough => return escaped,
    };
    let free = fmt_percent(line.free_percent.unwrap_or_default());
    bold(&format!(
        "{}  Free disk space {} is &lt;= {} threshold ({}%).",
        font(color, &escaped),
        font(color, &format!("({}%)", free)),
        label,
        limit
    ))
}
