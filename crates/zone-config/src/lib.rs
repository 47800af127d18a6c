use serde::{Deserialize, Serialize};
use std::{env, fmt};

/// Smallest radius a zone may ever take, in meters.
pub const MIN_RADIUS_M: f64 = 5.0;
/// Heading of a freshly drawn resize handle.
pub const DEFAULT_RESIZE_HEADING_DEG: f64 = 135.0;
/// Fixed heading of the close handle relative to the camera.
pub const CLOSE_HEADING_DEG: f64 = 45.0;
/// Angular band around the close handle that the resize handle may not settle in.
pub const OVERLAP_BAND_DEG: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_env(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        };
        write!(f, "{}", value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub metrics_addr: Option<String>,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name = env_var("ZONE_SERVICE_NAME", default_service_name.to_string());
        let environment = Environment::from_env(&env_var("ZONE_ENV", "local".to_string()));
        let metrics_addr = env::var("ZONE_METRICS_ADDR").ok();
        let log_level = env_var("ZONE_LOG_LEVEL", "info".to_string());

        Self {
            service_name,
            environment,
            metrics_addr,
            log_level,
        }
    }
}

/// Geometry knobs for zone handles. Headings are degrees clockwise from
/// north, relative to the camera bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleTuning {
    pub min_radius_m: f64,
    pub overlap_band_deg: f64,
    pub resize_heading_deg: f64,
    pub close_heading_deg: f64,
}

impl Default for HandleTuning {
    fn default() -> Self {
        Self {
            min_radius_m: MIN_RADIUS_M,
            overlap_band_deg: OVERLAP_BAND_DEG,
            resize_heading_deg: DEFAULT_RESIZE_HEADING_DEG,
            close_heading_deg: CLOSE_HEADING_DEG,
        }
    }
}

impl HandleTuning {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_radius_m: env_var_f64("ZONE_MIN_RADIUS_M")
                .filter(|value| *value >= MIN_RADIUS_M)
                .unwrap_or(defaults.min_radius_m),
            overlap_band_deg: env_var_f64("ZONE_OVERLAP_BAND_DEG")
                .filter(|value| *value > 0.0 && *value < 180.0)
                .unwrap_or(defaults.overlap_band_deg),
            ..defaults
        }
    }

    /// Offset from the close heading that an overlapping resize handle snaps to.
    pub fn snap_offset_deg(&self) -> f64 {
        self.overlap_band_deg / 2.0
    }
}

fn env_var(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn env_var_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
