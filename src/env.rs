//! Fns to read variables from the environment more conveniently and the config the binaries
//! share.

use std::env;

use lazy_static::lazy_static;
use tracing::debug;

lazy_static! {
    pub static ref ENV_CONFIG: EnvConfig = get_env_config();
}

/// Get an environment variable, encoding found or missing as Option, and panic otherwise.
pub fn get_env_var(key: &str) -> Option<String> {
    let var = match env::var(key) {
        Err(env::VarError::NotPresent) => None,
        Err(e) => panic!("{e}"),
        Ok(var) => Some(var),
    };

    if let Some(ref existing_var) = var {
        debug!("env var {key}: {existing_var}");
    } else {
        debug!("env var {key} requested but not found")
    };

    var
}

pub fn get_env_bool(key: &str) -> Option<bool> {
    get_env_var(key).map(|var| match var.to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        "t" => true,
        "f" => false,
        "1" => true,
        "0" => false,
        str => panic!("invalid bool value {str} for {key}"),
    })
}

pub fn get_env_u64(key: &str) -> Option<u64> {
    get_env_var(key).map(|var| {
        var.parse::<u64>()
            .unwrap_or_else(|_| panic!("invalid unsigned integer {var} for {key}"))
    })
}

pub struct EnvConfig {
    pub bind_public_interface: bool,
    pub cache_size: usize,
    pub cache_ttl_seconds: u64,
    /// Path to the JSON file mapping sources and datasets to API URLs.
    pub config_path: String,
    pub log_json: bool,
    pub log_perf: bool,
    pub port: u16,
}

const DEFAULT_CACHE_SIZE: usize = 16;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
const DEFAULT_PORT: u16 = 3002;

fn parse_cache_size(size: u64) -> usize {
    if size == 0 {
        panic!("invalid CACHE_SIZE 0, the frame cache needs room for at least one entry");
    }
    size as usize
}

pub fn get_env_config() -> EnvConfig {
    EnvConfig {
        bind_public_interface: get_env_bool("BIND_PUBLIC_INTERFACE").unwrap_or(true),
        cache_size: get_env_u64("CACHE_SIZE")
            .map(parse_cache_size)
            .unwrap_or(DEFAULT_CACHE_SIZE),
        cache_ttl_seconds: get_env_u64("CACHE_TTL_SECONDS").unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
        config_path: get_env_var("CONFIG_PATH").unwrap_or_else(|| "config.json".to_string()),
        log_json: get_env_bool("LOG_JSON").unwrap_or(false),
        log_perf: get_env_bool("LOG_PERF").unwrap_or(false),
        port: get_env_var("PORT")
            .map(|port| {
                port.parse::<u16>()
                    .unwrap_or_else(|_| panic!("invalid PORT {port}"))
            })
            .unwrap_or(DEFAULT_PORT),
    }
}
