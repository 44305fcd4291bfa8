use serde::{Deserialize, Serialize};

/// Model id templated into the generateContent URL when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Proxy service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listen host
    pub host: String,

    /// Listen port (0 lets the OS pick one)
    pub port: u16,

    /// Gemini model id
    pub model: String,

    /// Upstream API credential. `None` is tolerated at startup; requests
    /// fail with a 500 until the key is provided.
    pub api_key: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8788,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl ProxyConfig {
    /// Load config: an optional JSON file named by `CARINFO_CONFIG`, with
    /// environment variables applied on top.
    pub fn load() -> Result<Self, String> {
        let base = match std::env::var("CARINFO_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("CARINFO_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("CARINFO_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.model = model;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        self
    }

    /// Actual listen address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
