// Public modules
pub mod types;
pub mod config;
pub mod parsing;
pub mod html;
pub mod chart;
pub mod report;
pub mod content;
pub mod formatter;

// Re-export commonly used items
pub use types::*;
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use parsing::{extract_partitions, parse_thresholds, unescape_text};
pub use chart::{build_chart, chart_series, ChartError, ChartTool, ProcessChartTool};
pub use report::{render_details, RenderedReport, RenderSummary};
pub use content::{ContentSink, NotificationContent};
pub use formatter::{additional_details, additional_info, format_check_disk, FormatSummary};
