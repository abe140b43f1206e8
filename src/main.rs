use anyhow::{Context, Result};
use tracing::info;

use check_disk_formatter::{
    format_check_disk, load_config, NotificationContent, ProcessChartTool, SystemEnvironment,
};

fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!(
        state_type = cfg.state_type.as_str(),
        sandbox = %cfg.sandbox_dir.display(),
        "formatting check_disk notification"
    );

    std::fs::create_dir_all(&cfg.sandbox_dir)
        .with_context(|| format!("Failed to create sandbox {}", cfg.sandbox_dir.display()))?;

    let tool = ProcessChartTool::new(cfg.chart.tool.clone(), cfg.chart.timeout);
    let mut content = NotificationContent::new();
    let summary = format_check_disk(&SystemEnvironment, &cfg, &tool, &mut content);

    match summary.details {
        Some(details) if details.has_issues() => info!(
            critical = details.critical_count,
            warning = details.warning_count,
            "partitions at or below thresholds"
        ),
        Some(_) => info!("no partitions at or below thresholds"),
        None => info!("no long output to render"),
    }
    if let Some(chart) = &summary.chart {
        info!(chart = %chart.display(), "chart attached");
    }

    let json = serde_json::to_string_pretty(&content).context("Failed to serialize notification content")?;
    println!("{}", json);

    Ok(())
}

fn init_tracing() {
    // stdout carries the content
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
