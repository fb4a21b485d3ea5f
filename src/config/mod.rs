// config/mod.rs
use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub port: u16,
}

impl Settings {
    /// Defaults, then `config/config.{toml,yaml,json}` if present, then `APP_*`
    /// environment variables (`APP_SERVER__ADDRESS=127.0.0.1:8080`).
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("config/config").required(false))
                .add_source(
                    Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0:5000")?
            .set_default("server.max_connections", 256)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.port", 9000)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        if settings.server.max_connections == 0 {
            return Err(ConfigError::Message(
                "server.max_connections must be greater than zero".into(),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_are_complete() {
        let settings = Settings::from_builder(Settings::defaults().unwrap()).unwrap();
        assert_eq!(settings.server.address, "0.0.0.0:5000");
        assert_eq!(settings.server.max_connections, 256);
        assert!(!settings.metrics.enabled);
        assert_eq!(settings.metrics.port, 9000);
    }

    #[test]
    fn file_overrides_defaults() {
        let builder = Settings::defaults().unwrap().add_source(File::from_str(
            "[server]\naddress = \"127.0.0.1:8080\"\n[metrics]\nenabled = true\n",
            FileFormat::Toml,
        ));
        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.server.address, "127.0.0.1:8080");
        assert_eq!(settings.server.max_connections, 256);
        assert!(settings.metrics.enabled);
    }

    #[test]
    fn rejects_zero_connection_limit() {
        let builder = Settings::defaults().unwrap().add_source(File::from_str(
            "[server]\nmax_connections = 0\n",
            FileFormat::Toml,
        ));
        assert!(Settings::from_builder(builder).is_err());
    }
}
