use serde::Deserialize;
use std::path::Path;

/// Top-level configuration parsed from TOML.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server-level configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Load config from an optional TOML file, applying environment variable overrides.
///
/// Without a file every setting takes its default.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                format!("Failed to read config file '{}': {}", path.display(), e)
            })?;
            parse_config(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse TOML config: {e}"))
}

/// Apply environment variable overrides.
fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("PCC_MOCK_HOST") {
        config.server.host = val;
    }

    if let Some(val) = lookup("PCC_MOCK_PORT") {
        config.server.port = val
            .parse()
            .map_err(|e| format!("PCC_MOCK_PORT '{val}' is not a valid port: {e}"))?;
    }

    Ok(())
}

fn validate(config: &Config) -> Result<(), String> {
    if config.server.host.trim().is_empty() {
        return Err("server.host must not be empty".to_string());
    }
    Ok(())
}
