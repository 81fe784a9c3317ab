use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::health::{HealthCheckable, HealthStatus};

struct FetchFailure {
    at: DateTime<Utc>,
    message: String,
}

/// Tracks whether the last upstream fetch worked.
pub struct ServeHealth {
    last_fetch_failure: RwLock<Option<FetchFailure>>,
    last_fetch_success: RwLock<Option<DateTime<Utc>>>,
}

impl ServeHealth {
    pub fn new() -> Self {
        Self {
            last_fetch_failure: RwLock::new(None),
            last_fetch_success: RwLock::new(None),
        }
    }

    pub fn set_fetch_succeeded(&self) {
        *self.last_fetch_success.write().unwrap() = Some(Utc::now());
        *self.last_fetch_failure.write().unwrap() = None;
    }

    pub fn set_fetch_failed(&self, message: String) {
        *self.last_fetch_failure.write().unwrap() = Some(FetchFailure {
            at: Utc::now(),
            message,
        });
    }
}

impl Default for ServeHealth {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthCheckable for ServeHealth {
    // Healthy until a fetch fails, healthy again once one succeeds.
    fn health_status(&self) -> HealthStatus {
        match &*self.last_fetch_failure.read().unwrap() {
            None => HealthStatus::Healthy,
            Some(failure) => {
                let last_success = self
                    .last_fetch_success
                    .read()
                    .unwrap()
                    .map_or("never".to_string(), |at| at.to_rfc3339());
                HealthStatus::Unhealthy(Some(format!(
                    "last fetch failed at {}: {}, last success: {}",
                    failure.at.to_rfc3339(),
                    failure.message,
                    last_success
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_on_start() {
        assert_eq!(ServeHealth::new().health_status(), HealthStatus::Healthy);
    }

    #[test]
    fn unhealthy_after_failure_until_success() {
        let health = ServeHealth::new();

        health.set_fetch_failed("request to flipside failed".to_string());
        match health.health_status() {
            HealthStatus::Unhealthy(Some(message)) => {
                assert!(message.contains("request to flipside failed"));
                assert!(message.ends_with("last success: never"));
            }
            status => panic!("expected unhealthy, got {status:?}"),
        }

        health.set_fetch_succeeded();
        assert_eq!(health.health_status(), HealthStatus::Healthy);
    }
}
