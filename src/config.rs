use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    3000
}

fn default_preview_rows() -> usize {
    10
}

fn default_max_cached_datasets() -> u64 {
    64
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
    pub preview_rows: usize,
    pub max_cached_datasets: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            max_file_size: default_max_file_size(),
            preview_rows: default_preview_rows(),
            max_cached_datasets: default_max_cached_datasets(),
        }
    }
}

impl Config {
    /// Reads the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            host: parse_var(&lookup, "SHEET_STATS_HOST")?.unwrap_or(defaults.host),
            port: parse_var(&lookup, "SHEET_STATS_PORT")?.unwrap_or(defaults.port),
            max_file_size: parse_var(&lookup, "SHEET_STATS_MAX_FILE_SIZE")?
                .unwrap_or(defaults.max_file_size),
            preview_rows: parse_var(&lookup, "SHEET_STATS_PREVIEW_ROWS")?
                .unwrap_or(defaults.preview_rows),
            max_cached_datasets: parse_var(&lookup, "SHEET_STATS_MAX_DATASETS")?
                .unwrap_or(defaults.max_cached_datasets),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Failed to parse {}={:?}", key, raw)),
        _ => Ok(None),
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::from_env()?;
    tracing::info!(
        "Loaded configuration: addr={}, max_file_size={}B, preview_rows={}, max_cached_datasets={}",
        config.socket_addr(),
        config.max_file_size,
        config.preview_rows,
        config.max_cached_datasets
    );
    Ok(config)
}
