use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub jwt_secret: String,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("failed to parse {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{path}', 'config.yaml', 'config.example.yaml', and environment variables. \
         Error: {source}"
    )]
    NotFound {
        path: String,
        source: Box<ConfigError>,
    },
}

fn read_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn load_from_env() -> Result<Config, ConfigError> {
    let port = match env::var("PORT") {
        Ok(port) => port.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
            name: "PORT",
            reason: e.to_string(),
        })?,
        Err(_) => DEFAULT_PORT,
    };

    Ok(Config {
        database_dsn: required_var("PG_DSN")?,
        port,
        jwt_secret: required_var("JWT_SECRET")?,
    })
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return read_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return read_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return read_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(ConfigError::NotFound {
            path: config_path,
            source: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_omitted() {
        let config: Config =
            serde_yaml::from_str("database_dsn: postgres://localhost/notes\njwt_secret: s3cret\n")
                .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.jwt_secret, "s3cret");
    }

    #[test]
    fn explicit_port_is_kept() {
        let config: Config = serde_yaml::from_str(
            "database_dsn: postgres://localhost/notes\nport: 9100\njwt_secret: s3cret\n",
        )
        .unwrap();

        assert_eq!(config.port, 9100);
    }

    #[test]
    fn missing_secret_is_a_parse_error() {
        let result = serde_yaml::from_str::<Config>("database_dsn: postgres://localhost/notes\n");

        assert!(result.is_err());
    }
}
