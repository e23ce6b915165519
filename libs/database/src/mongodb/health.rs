use mongodb::Client;
use std::time::Instant;
use tracing::debug;

use super::connector::ping;

/// Result of a timed MongoDB ping
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error when unhealthy
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    /// `Err` carries the driver message, for readiness aggregation
    pub fn into_result(self) -> Result<(), String> {
        if self.healthy {
            Ok(())
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "MongoDB ping failed".to_string()))
        }
    }
}

/// Ping the server, logging the round trip
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> =
///     vec![("mongodb", Box::pin(database::mongodb::check_health(&client)))];
/// ```
pub async fn check_health(client: &Client) -> Result<(), String> {
    let status = check_health_detailed(client).await;
    debug!(
        healthy = status.healthy,
        response_time_ms = status.response_time_ms,
        "MongoDB health check"
    );
    status.into_result()
}

/// Ping with timing and the error message, if any
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = ping(client).await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms,
    }
}
