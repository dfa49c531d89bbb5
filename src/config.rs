use serde::{Deserialize, Serialize};
use std::env;

use crate::panel::ClearTrigger;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub panel: PanelConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub max_json_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    pub clear_button: bool,
    pub clear_button_id: String,
    /// Capacity of the live update channel per subscriber.
    pub stream_buffer: usize,
}

impl PanelConfig {
    pub fn clear_trigger(&self) -> Option<ClearTrigger> {
        self.clear_button
            .then(|| ClearTrigger::new(self.clear_button_id.clone()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: num_cpus::get(),
                max_json_payload_size: 1_000_000, // 1MB
            },
            panel: PanelConfig {
                clear_button: true,
                clear_button_id: "clear-results".to_string(),
                stream_buffer: 16,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Config::default();

        // Server configuration
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = port.parse()?;
        }
        if let Some(workers) = lookup("WORKERS") {
            config.server.workers = workers.parse()?;
        }
        if let Some(max_json_payload_size) = lookup("MAX_JSON_PAYLOAD_SIZE") {
            config.server.max_json_payload_size = max_json_payload_size.parse()?;
        }

        // Panel configuration
        if let Some(clear_button) = lookup("CLEAR_BUTTON") {
            config.panel.clear_button = clear_button.parse()?;
        }
        if let Some(clear_button_id) = lookup("CLEAR_BUTTON_ID") {
            config.panel.clear_button_id = clear_button_id;
        }
        if let Some(stream_buffer) = lookup("PANEL_STREAM_BUFFER") {
            config.panel.stream_buffer = stream_buffer.parse()?;
        }

        // Security configuration
        if let Some(allowed_origins) = lookup("ALLOWED_ORIGINS") {
            config.security.allowed_origins = allowed_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .collect();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_bind_clear_control() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(
            config.panel.clear_trigger(),
            Some(ClearTrigger::new("clear-results"))
        );
        assert_eq!(config.security.allowed_origins, vec!["*"]);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("PORT", "9001"),
            ("CLEAR_BUTTON", "false"),
            ("PANEL_STREAM_BUFFER", "4"),
            ("ALLOWED_ORIGINS", "http://a.example, http://b.example"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.panel.clear_trigger(), None);
        assert_eq!(config.panel.stream_buffer, 4);
        assert_eq!(
            config.security.allowed_origins,
            vec!["http://a.example", "http://b.example"]
        );
    }

    #[test]
    fn unparsable_values_are_errors() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("CLEAR_BUTTON", "maybe")]).is_err());
    }
}
