// file: src/utils/telemetry.rs
// description: readiness report for the advisor and timing of its long-running stages
// reference: surfaced by `check` and GET /health

use crate::error::{AdvisorError, Result};
use crate::index::IndexStats;
use chrono::{DateTime, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Ordered by severity, so the worst check decides the overall status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn marker(self) -> ColoredString {
        match self {
            HealthStatus::Healthy => "✓".green().bold(),
            HealthStatus::Degraded => "⚠".yellow().bold(),
            HealthStatus::Unhealthy => "✗".red().bold(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Credential,
    Corpus,
    Index,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Credential => "credential",
            Component::Corpus => "corpus",
            Component::Index => "index",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub component: Component,
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthCheck {
    /// Without a key neither embedding nor querying can run.
    pub fn credential(present: bool) -> Self {
        if present {
            Self::new(Component::Credential, HealthStatus::Healthy, None)
        } else {
            Self::new(
                Component::Credential,
                HealthStatus::Unhealthy,
                Some(AdvisorError::MissingCredential.to_string()),
            )
        }
    }

    /// `scan` is the number of loadable files found in `data_dir`.
    pub fn corpus(data_dir: &Path, scan: Result<usize>) -> Self {
        match scan {
            Ok(0) => Self::new(
                Component::Corpus,
                HealthStatus::Degraded,
                Some(format!("No documents found in {}", data_dir.display())),
            ),
            Ok(files) => Self::new(
                Component::Corpus,
                HealthStatus::Healthy,
                Some(format!("{} document files in {}", files, data_dir.display())),
            ),
            Err(e) => Self::new(Component::Corpus, HealthStatus::Unhealthy, Some(e.to_string())),
        }
    }

    pub fn index(stats: Option<&IndexStats>) -> Self {
        match stats {
            Some(stats) => Self::new(
                Component::Index,
                HealthStatus::Healthy,
                Some(format!(
                    "{} chunks from {} documents (dimension {})",
                    stats.chunks, stats.documents, stats.dimension
                )),
            ),
            None => Self::new(
                Component::Index,
                HealthStatus::Degraded,
                Some("Not built yet; run document embedding".to_string()),
            ),
        }
    }

    fn new(component: Component, status: HealthStatus, detail: Option<String>) -> Self {
        Self {
            component,
            status,
            detail,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub checked_at: DateTime<Utc>,
    pub version: String,
}

impl HealthReport {
    pub fn new(checks: Vec<HealthCheck>) -> Self {
        let status = checks
            .iter()
            .map(|check| check.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            checks,
            checked_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn is_unhealthy(&self) -> bool {
        self.status == HealthStatus::Unhealthy
    }

    pub fn check(&self, component: Component) -> Option<&HealthCheck> {
        self.checks.iter().find(|check| check.component == component)
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} symptom_advisor {} is {:?} ({})",
            self.status.marker(),
            self.version,
            self.status,
            self.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        for check in &self.checks {
            write!(f, "  {} {:<10}", check.status.marker(), check.component)?;
            if let Some(detail) = &check.detail {
                write!(f, " {}", detail)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Logs the duration of a named stage when it completes.
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: &'static str) -> Self {
        debug!(stage, "stage started");
        Self {
            stage,
            started: Instant::now(),
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn finish(self) -> f64 {
        let secs = self.elapsed_secs();
        info!(stage = self.stage, "finished in {:.2}s", secs);
        secs
    }

    /// Also logs throughput in `unit` per second.
    pub fn finish_with_count(self, count: usize, unit: &str) -> f64 {
        let secs = self.elapsed_secs();
        let rate = if secs > 0.0 { count as f64 / secs } else { 0.0 };
        info!(
            stage = self.stage,
            "{} {} in {:.2}s ({:.1} {}/sec)",
            count,
            unit,
            secs,
            rate,
            unit
        );
        secs
    }
}
