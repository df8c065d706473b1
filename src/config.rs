use serde::{Deserialize, Serialize};

use crate::experiments::ExperimentConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub experiments: Vec<ExperimentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
            },
            experiments: Vec::new(),
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_the_shipped_layout() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 8080
logging:
  level: debug
output:
  directory: exports
  pretty_json: false
experiments:
  - key: roi_headline
    variants:
      - name: control
        weight: 50
      - name: savings_first
        weight: 50
  - key: retired_banner
    enabled: false
    variants:
      - name: control
        weight: 100
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.directory, "exports");
        assert!(!config.output.pretty_json);
        assert_eq!(config.experiments.len(), 2);
        // enabled defaults to true when omitted
        assert!(config.experiments[0].enabled);
        assert!(!config.experiments[1].enabled);
    }

    #[test]
    fn experiments_section_is_optional() {
        let yaml = r#"
server:
  host: 127.0.0.1
  port: 8000
logging:
  level: info
output:
  directory: out
  pretty_json: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.experiments.is_empty());
    }

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.directory, "out");
    }
}
