use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{anyhow, Result};
use tracing::info;

pub struct Config {
    pub port: u16,
    /// `None` runs the service on the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub metrics_timeout: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("PORT", "8083")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "10")?,
            metrics_timeout: Duration::from_secs(try_load("METRICS_TIMEOUT_SECS", "10")?),
            seed_demo_data: try_load("SEED_DEMO_DATA", "true")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_default_and_override() {
        assert_eq!(try_load::<u16>("STOREFRONT_TEST_UNSET_PORT", "8083").unwrap(), 8083);

        env::set_var("STOREFRONT_TEST_TIMEOUT", "3");
        assert_eq!(try_load::<u64>("STOREFRONT_TEST_TIMEOUT", "10").unwrap(), 3);

        env::set_var("STOREFRONT_TEST_SEED", "maybe");
        assert!(try_load::<bool>("STOREFRONT_TEST_SEED", "true").is_err());
    }
}
