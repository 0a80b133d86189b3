//! Server configuration: defaults overridden by environment variables.

use hrp_model::TrainingConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HRP_HOST";
pub const ENV_MODEL_DIR: &str = "HRP_MODEL_DIR";
pub const ENV_DATA_DIR: &str = "HRP_DATA_DIR";
pub const ENV_SYNTHETIC_FALLBACK: &str = "HRP_SYNTHETIC_FALLBACK";
pub const ENV_TRAIN_SEED: &str = "HRP_TRAIN_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub model_dir: PathBuf,
    pub data_dir: PathBuf,
    pub synthetic_fallback: bool,
    pub training: TrainingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            model_dir: PathBuf::from("models"),
            data_dir: PathBuf::from("data"),
            synthetic_fallback: true,
            training: TrainingConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| non_empty(lookup(name));
        let mut cfg = Self::default();

        if let Some(port) = var(ENV_PORT).and_then(|v| parse_or_warn::<u16>(ENV_PORT, &v)) {
            cfg.port = port;
        }
        if let Some(host) = var(ENV_HOST).and_then(|v| parse_or_warn::<IpAddr>(ENV_HOST, &v)) {
            cfg.host = host;
        }
        if let Some(dir) = var(ENV_MODEL_DIR) {
            cfg.model_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var(ENV_DATA_DIR) {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = var(ENV_SYNTHETIC_FALLBACK) {
            match parse_bool(&raw) {
                Some(b) => cfg.synthetic_fallback = b,
                None => log::warn!("ignoring {ENV_SYNTHETIC_FALLBACK}={raw:?}: not a boolean"),
            }
        }
        if let Some(seed) =
            var(ENV_TRAIN_SEED).and_then(|v| parse_or_warn::<u64>(ENV_TRAIN_SEED, &v))
        {
            cfg.training.seed = seed;
        }
        cfg
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn parse_or_warn<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        log::warn!("ignoring {name}={raw:?}: not a valid value");
    }
    parsed
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
