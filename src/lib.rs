//! HealthGo desktop simulator core library
//!
//! Replays recorded patient vital signs to the monitoring backend, one
//! WebSocket connection per patient.

pub mod core;
pub mod error;
pub mod models;
pub mod simulator;
pub mod websocket;

/// Application configuration
pub mod config {
    use serde::Deserialize;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    pub const DEFAULT_BACKEND_URL: &str = "http://backend:8080";
    pub const DEFAULT_WEBSOCKET_URL: &str = "ws://backend:8080/ws";
    pub const DEFAULT_SEND_INTERVAL_MS: u64 = 200;
    pub const DEFAULT_CLIENT_ID: &str = "HealthGo-Desktop-Simulator";
    pub const DEFAULT_PATIENT_FILES: [&str; 3] = [
        "dados/dados_pac001.csv",
        "dados/dados_pac002.csv",
        "dados/dados_pac003.csv",
    ];

    /// Token the backend looks for in `User-Agent` to tell simulators apart
    /// from dashboard viewers.
    const SIMULATOR_MARKER: &str = "Desktop";

    #[derive(Debug, Clone, Deserialize)]
    pub struct Settings {
        pub backend_url: String,
        pub websocket_url: String,
        pub send_interval_ms: u64,
        pub client_id: String,
        pub patient_files: Vec<PathBuf>,
    }

    /// What a single replay task needs to know. Shared by value across tasks.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ReplayConfig {
        pub endpoint: String,
        pub client_id: String,
        pub send_interval: Duration,
    }

    impl Settings {
        pub fn send_interval(&self) -> Duration {
            Duration::from_millis(self.send_interval_ms)
        }

        pub fn replay_config(&self) -> ReplayConfig {
            ReplayConfig {
                endpoint: self.websocket_url.clone(),
                client_id: self.client_id.clone(),
                send_interval: self.send_interval(),
            }
        }

        /// Non-fatal problems worth surfacing at startup.
        pub fn warnings(&self) -> Vec<String> {
            let mut warnings = Vec::new();
            if !self.client_id.contains(SIMULATOR_MARKER) {
                warnings.push(format!(
                    "client id {:?} does not contain {:?}; the backend will treat these connections as viewers",
                    self.client_id, SIMULATOR_MARKER
                ));
            }
            if self.patient_files.is_empty() {
                warnings.push("no patient sources configured".to_string());
            }
            warnings
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                backend_url: DEFAULT_BACKEND_URL.to_string(),
                websocket_url: DEFAULT_WEBSOCKET_URL.to_string(),
                send_interval_ms: DEFAULT_SEND_INTERVAL_MS,
                client_id: DEFAULT_CLIENT_ID.to_string(),
                patient_files: DEFAULT_PATIENT_FILES.iter().map(|p| PathBuf::from(*p)).collect(),
            }
        }
    }

    /// Load configuration from defaults, files and the environment
    pub fn load_config(explicit: Option<&Path>) -> Result<Settings, config::ConfigError> {
        build_config(explicit, environment())
    }

    /// `HEALTHGO_*` variables; `HEALTHGO_PATIENT_FILES` is a comma-separated list.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("HEALTHGO")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("patient_files")
    }

    fn build_config(explicit: Option<&Path>, environment: config::Environment) -> Result<Settings, config::ConfigError> {
        let env = std::env::var("HEALTHGO_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default settings
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("websocket_url", DEFAULT_WEBSOCKET_URL)?
            .set_default("send_interval_ms", DEFAULT_SEND_INTERVAL_MS as i64)?
            .set_default("client_id", DEFAULT_CLIENT_ID)?
            .set_default("patient_files", DEFAULT_PATIENT_FILES.to_vec())?
            .add_source(config::File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path));
        }

        // Override with environment variables
        builder
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

}
