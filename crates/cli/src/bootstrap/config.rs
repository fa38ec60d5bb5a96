use copper_dns_domain::{CliOverrides, Config};

/// Loads and validates the configuration before logging is up, so the
/// log level itself can come from the file.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
