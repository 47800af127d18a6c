//! Process-wide logging and metrics for zone editor hosts.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;
use zone_config::{HandleTuning, ServiceConfig};

/// Counters emitted by the editor, with their descriptions.
pub const COUNTERS: [(&str, &str); 5] = [
    ("zone_registered_total", "Zones added to a map session"),
    ("zone_unregistered_total", "Zones removed from a map session"),
    ("zone_selected_total", "Selection sweeps performed"),
    (
        "zone_events_dropped_total",
        "Map events that matched no zone or drag state",
    ),
    (
        "zone_overlap_corrections_total",
        "Resize handles snapped away from the close handle",
    ),
];

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub metrics_addr: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_service(config: &ServiceConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            environment: config.environment.to_string(),
            log_level: config.log_level.clone(),
            metrics_addr: config.metrics_addr.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObservabilityHandle {
    pub service_name: String,
    pub environment: String,
    pub metrics_enabled: bool,
}

pub fn init(config: &ObservabilityConfig) -> ObservabilityHandle {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);

    let metrics_enabled = init_metrics(config);
    if metrics_enabled {
        for (name, description) in COUNTERS {
            metrics::describe_counter!(name, description);
        }
    }

    ObservabilityHandle {
        service_name: config.service_name.clone(),
        environment: config.environment.clone(),
        metrics_enabled,
    }
}

/// Logs the service identity together with the handle geometry in effect.
pub fn log_startup(handle: &ObservabilityHandle, tuning: &HandleTuning) {
    tracing::info!(
        service = %handle.service_name,
        environment = %handle.environment,
        metrics_enabled = handle.metrics_enabled,
        min_radius_m = tuning.min_radius_m,
        overlap_band_deg = tuning.overlap_band_deg,
        resize_heading_deg = tuning.resize_heading_deg,
        close_heading_deg = tuning.close_heading_deg,
        "zone editor starting"
    );
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_metrics(config: &ObservabilityConfig) -> bool {
    let Some(addr) = config.metrics_addr.as_ref() else {
        return false;
    };
    let addr: SocketAddr = match addr.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Invalid ZONE_METRICS_ADDR value"
            );
            return false;
        }
    };

    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", config.service_name.clone())
        .add_global_label("environment", config.environment.clone());

    match builder.install() {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                service = %config.service_name,
                error = %err,
                "Failed to initialize Prometheus exporter"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zone_config::Environment;

    #[test]
    fn config_follows_service_settings() {
        let service = ServiceConfig {
            service_name: "zone-replay".to_string(),
            environment: Environment::Test,
            metrics_addr: None,
            log_level: "debug".to_string(),
        };
        let config = ObservabilityConfig::from_service(&service);
        assert_eq!(config.service_name, "zone-replay");
        assert_eq!(config.environment, Environment::Test.to_string());
        assert_eq!(config.log_level, "debug");
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn bad_metrics_address_disables_exporter() {
        let config = ObservabilityConfig {
            service_name: "zone-replay".to_string(),
            environment: "test".to_string(),
            log_level: "info".to_string(),
            metrics_addr: Some("not an address".to_string()),
        };
        assert!(!init_metrics(&config));
    }

    #[test]
    fn counter_names_are_unique() {
        let mut names: Vec<_> = COUNTERS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COUNTERS.len());
    }
}
