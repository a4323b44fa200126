use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sync: SyncConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub period_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub vehicle_classes: Vec<VehicleClassConfig>,
    pub traffic_lights: TrafficLightConfig,
}

/// One position-synchronized entity class. The remote server also serves
/// `moto` and `bus` feeds; enabling them is a matter of adding a class here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleClassConfig {
    pub name: String,
    pub id_prefix: String,
    pub first_index: u32,
    pub last_index: u32,
    pub endpoint: String,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficLightConfig {
    pub id_prefix: String,
    pub first_index: u32,
    pub last_index: u32,
    pub positions_endpoint: String,
    pub states_endpoint: String,
    pub height: f64,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(self.sync.period_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                request_timeout_ms: 800,
            },
            sync: SyncConfig { period_ms: 1000 },
            scene: SceneConfig {
                vehicle_classes: vec![
                    VehicleClassConfig {
                        name: "car".to_string(),
                        id_prefix: "car_".to_string(),
                        first_index: 233,
                        last_index: 242,
                        endpoint: "/get_car_positions".to_string(),
                        height: 0.0,
                    },
                    VehicleClassConfig {
                        name: "ev".to_string(),
                        id_prefix: "ev_".to_string(),
                        first_index: 242,
                        last_index: 244,
                        endpoint: "/get_ev_positions".to_string(),
                        height: 0.0,
                    },
                ],
                traffic_lights: TrafficLightConfig {
                    id_prefix: "traffic_light_".to_string(),
                    first_index: 7,
                    last_index: 25,
                    positions_endpoint: "/get_traffic_light_positions".to_string(),
                    states_endpoint: "/get_traffic_light_states".to_string(),
                    height: 2.0,
                },
            },
        }
    }
}
