//! The two `check_disk` notification sections.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::chart::{build_chart, ChartTool};
use crate::config::{nagios_var, EnvironmentProvider};
use crate::content::ContentSink;
use crate::html::{bold, font, html_escape};
use crate::parsing::{extract_partitions, parse_thresholds, unescape_text};
use crate::report::{render_details, RenderSummary};
use crate::types::{ChartSettings, Config, SectionId};

const RECOVERY_MARKER: &str = "DISK OK";
const CHART_ALT: &str = "partitions_remaining_space";

/// What was produced for one notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatSummary {
    pub chart: Option<PathBuf>,
    pub details: Option<RenderSummary>,
}

/// Reads the check output for the configured state type and writes both
/// sections into `sink`.
pub fn format_check_disk<E, T, S>(env: &E, config: &Config, tool: &T, sink: &mut S) -> FormatSummary
where
    E: EnvironmentProvider + ?Sized,
    T: ChartTool + ?Sized,
    S: ContentSink + ?Sized,
{
    let output = nagios_var(env, &config.state_type.output_var());
    let long_output = nagios_var(env, &config.state_type.long_output_var());
    debug!(
        state_type = config.state_type.as_str(),
        has_output = output.is_some(),
        has_long_output = long_output.is_some(),
        "formatting check_disk notification"
    );

    FormatSummary {
        chart: additional_info(output.as_deref(), &config.chart, tool, sink),
        details: additional_details(long_output.as_deref(), sink),
    }
}

/// Summary section: the short check output plus, unless the check has
/// recovered, a chart of partition utilization.
///
/// Returns the chart path when one was attached.
pub fn additional_info<T, S>(output: Option<&str>, chart: &ChartSettings, tool: &T, sink: &mut S) -> Option<PathBuf>
where
    T: ChartTool + ?Sized,
    S: ContentSink + ?Sized,
{
    let section = SectionId::AdditionalInfo;
    let output = output.filter(|o| !o.is_empty())?;
    sink.add_text(section, &format!("Additional Info:\n {}\n\n", unescape_text(output)));

    let escaped = html_escape(output);
    // A recovered check no longer lists partitions.
    if output.contains(RECOVERY_MARKER) {
        sink.add_html(
            section,
            &format!("Additional Info:<br>{}<br><br>", bold(&font("green", &format!(" {}", escaped)))),
        );
        return None;
    }

    let summary_html = format!("{}:<br> {}<br><br>", bold("Additional Info"), escaped);
    let partitions = extract_partitions(output);
    if partitions.is_empty() {
        debug!("no partitions found in check output, skipping chart");
        sink.add_html(section, &summary_html);
        return None;
    }

    match build_chart(&partitions, tool, chart.width, &chart.output_path) {
        Ok(path) => {
            info!(partitions = partitions.len(), chart = %path.display(), "partitions chart generated");
            sink.add_html(section, &summary_html);
            sink.add_attachment(&path);
            sink.add_html(
                section,
                &format!(
                    r#"<img src="{}" width="{}" alt="{}" /><br><br>"#,
                    html_escape(&path.display().to_string()),
                    chart.width,
                    CHART_ALT
                ),
            );
            Some(path)
        }
        Err(e) => {
            warn!(error = %e, "partitions chart unavailable, sending text only");
            sink.add_html(section, &summary_html);
            None
        }
    }
}

/// Details section: the long check output, colorized when it declares
/// thresholds.
pub fn additional_details<S>(long_output: Option<&str>, sink: &mut S) -> Option<RenderSummary>
where
    S: ContentSink + ?Sized,
{
    let section = SectionId::AdditionalDetails;
    let long_output = long_output.filter(|o| !o.is_empty())?;

    let thresholds = parse_thresholds(long_output);
    if thresholds.is_none() {
        debug!("no usable thresholds in long output, rendering as-is");
    }
    let report = render_details(long_output, thresholds.as_ref());
    sink.add_text(section, &report.text);
    sink.add_html(section, &report.html);
    line_break(section, sink);

    Some(report.summary())
}

fn line_break<S: ContentSink + ?Sized>(section: SectionId, sink: &mut S) {
    sink.add_text(section, "\n");
    sink.add_html(section, "<br>");
}
