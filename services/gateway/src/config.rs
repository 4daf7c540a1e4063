use risk_engine::engine::RiskEngineConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Classifier artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "cardio_rf_model.json";

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub engine: RiskEngineConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            engine: RiskEngineConfig::default(),
        }
    }
}
