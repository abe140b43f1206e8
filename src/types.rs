use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Which family of Nagios macros carries the check output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateType {
    Service,
    Host,
}

impl StateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateType::Service => "SERVICE",
            StateType::Host => "HOST",
        }
    }

    /// `NAGIOS_SERVICEOUTPUT` / `NAGIOS_HOSTOUTPUT`
    pub fn output_var(&self) -> String {
        format!("NAGIOS_{}OUTPUT", self.as_str())
    }

    /// `NAGIOS_LONGSERVICEOUTPUT` / `NAGIOS_LONGHOSTOUTPUT`
    pub fn long_output_var(&self) -> String {
        format!("NAGIOS_LONG{}OUTPUT", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub state_type: StateType,
    pub chart: ChartSettings,
    pub sandbox_dir: PathBuf,
}

/// Everything the summary section needs to draw the partitions chart.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub tool: PathBuf,
    pub width: u32,
    pub timeout: Duration,
    pub output_path: PathBuf,
}

/// Free space of one partition as reported in the check summary line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionRecord {
    pub partition: String,
    /// Raw size token, unit included (`"7002 MB"`).
    pub free_amount: String,
    pub free_percent: u8,
}

/// Free-space percentages at or below which a line is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdPair {
    pub warning_percent: u8,
    pub critical_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub text: String,
    pub severity: Severity,
    pub free_percent: Option<f64>,
}

/// One `name=value` argument for the chart tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    /// Used space, `100 - free_percent`.
    pub utilization: u8,
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.utilization)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    AdditionalInfo,
    AdditionalDetails,
}
