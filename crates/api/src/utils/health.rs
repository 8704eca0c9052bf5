//! Health status types reported by `GET /health`

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Share of healthy components at or above which the service is healthy
const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health status of the service
///
/// # Example
/// ```
/// use daybrief_lib::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("oauth_client", "client id missing"));
/// status.calculate_score();
///
/// assert!((status.score - 0.5).abs() < f64::EPSILON);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// From 0.0 (nothing healthy) to 1.0, as healthy / total components
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) of the check
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy, score 1.0, no components
    pub fn new() -> Self {
        Self { is_healthy: true, score: 1.0, components: Vec::new(), timestamp: Utc::now().timestamp() }
    }

    #[must_use]
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components added so far.
    #[allow(clippy::cast_precision_loss)]
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        self.score = healthy as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g. "database")
    pub name: String,
    pub is_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
