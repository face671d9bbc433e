use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Config, Journal};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it. A missing file is not an error; every section
/// falls back to its defaults so the CLI works out of the box.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_apply_without_a_file() {
        let config: Config = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.journal.file, "journal.csv");
        assert_eq!(config.analytics.risk_free_rate, dec!(0.02));
    }

    #[test]
    fn file_values_override_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[analytics]\nrisk_free_rate = 0.05\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.analytics.risk_free_rate, dec!(0.05));
        assert_eq!(config.journal.file, "journal.csv");
    }
}
