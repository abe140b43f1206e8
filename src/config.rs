use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{ChartSettings, Config, StateType};

pub const DEFAULT_CHART_TOOL: &str = "draw_stack_bars";
pub const DEFAULT_CHART_WIDTH: u32 = 500;
pub const DEFAULT_CHART_TIMEOUT_SECS: u64 = 10;
pub const CHART_FILE_NAME: &str = "host_status.png";

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Looks up a Nagios macro, treating an empty value as unset.
pub fn nagios_var<E: EnvironmentProvider + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get_var(key).filter(|v| !v.is_empty())
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    // Service notifications always carry a description; host ones never do.
    let state_type = if nagios_var(env, "NAGIOS_SERVICEDESC").is_some() {
        StateType::Service
    } else {
        StateType::Host
    };

    let tool = env
        .get_var("CHECK_DISK_CHART_TOOL")
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_TOOL));

    let width: u32 = env
        .get_var("CHECK_DISK_CHART_WIDTH")
        .unwrap_or_else(|| DEFAULT_CHART_WIDTH.to_string())
        .trim()
        .parse()
        .context("Invalid CHECK_DISK_CHART_WIDTH")?;
    if width == 0 {
        return Err(anyhow!("CHECK_DISK_CHART_WIDTH must be greater than zero"));
    }

    let timeout_secs: u64 = env
        .get_var("CHECK_DISK_CHART_TIMEOUT_SECS")
        .unwrap_or_else(|| DEFAULT_CHART_TIMEOUT_SECS.to_string())
        .trim()
        .parse()
        .unwrap_or(DEFAULT_CHART_TIMEOUT_SECS);

    let sandbox_dir = env
        .get_var("CHECK_DISK_SANDBOX_DIR")
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_sandbox_dir);

    Ok(Config {
        state_type,
        chart: ChartSettings {
            tool,
            width,
            timeout: Duration::from_secs(timeout_secs),
            output_path: sandbox_dir.join(CHART_FILE_NAME),
        },
        sandbox_dir,
    })
}

/// Per-run directory so concurrent notifications never share a chart file.
fn default_sandbox_dir() -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
    std::env::temp_dir().join(format!("check-disk-{}-{}", stamp, std::process::id()))
}
