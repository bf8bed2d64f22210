// src/configs/initializer.rs
use env_logger::Env;
use log::{debug, info, warn};
use std::env;

use crate::error::RiwayatError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RiwayatConfig {
    pub environment: String,
    pub log_level: String,
    pub page_size: u32,
    pub max_visible_pages: u32,
}

impl Default for RiwayatConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }
}

impl RiwayatConfig {
    pub fn from_env() -> Result<Self, RiwayatError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RiwayatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            page_size: positive(&lookup, "RIWAYAT_PAGE_SIZE", defaults.page_size)?,
            max_visible_pages: positive(&lookup, "RIWAYAT_MAX_VISIBLE_PAGES", defaults.max_visible_pages)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

// Unparseable values fall back to the default; zero is a configuration error.
fn positive<F>(lookup: &F, key: &str, default: u32) -> Result<u32, RiwayatError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(0) => Err(RiwayatError::Config(format!("{} must be at least 1", key))),
            Ok(value) => Ok(value),
            Err(_) => {
                warn!("⚠️  {}={} is not a number, using {}", key, raw, default);
                Ok(default)
            }
        },
    }
}

pub fn get_riwayat_config() -> RiwayatConfig {
    RiwayatConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ Riwayat configuration error: {}", e);
        std::process::exit(1);
    })
}

pub fn setup_riwayat_logging(config: &RiwayatConfig) {
    let initialized = env_logger::Builder::from_env(Env::default().default_filter_or(&config.log_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if initialized {
        info!("✅ Riwayat logging initialized");
        info!("🔧 Riwayat environment: {}", config.environment);
        debug!("🔍 Page size {}, {} visible pages", config.page_size, config.max_visible_pages);
    }
}
