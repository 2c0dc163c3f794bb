use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::storage::Persistence;

/// Fallback when `DASHBOARD_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://api.example.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api_url: String,
    pub config_dir: PathBuf,
    pub application_storage: Persistence,
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DASHBOARD_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_url = v.trim().to_string();
        }

        self.config_dir = match lookup("DASHBOARD_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => lookup("HOME")
                .map(|home| PathBuf::from(home).join(".config").join("dashboard-shell"))
                .unwrap_or_else(|| PathBuf::from(".dashboard-shell")),
        };

        if let Some(v) = lookup("DASHBOARD_APPLICATION_STORAGE") {
            self.application_storage = v.parse().unwrap_or(self.application_storage);
        }

        if let Some(v) = lookup("RUST_LOG") {
            self.log_filter = v;
        }

        self
    }

    fn base(environment: Environment, log_filter: &str) -> Self {
        Self {
            environment,
            api_url: DEFAULT_API_URL.to_string(),
            config_dir: PathBuf::from(".dashboard-shell"),
            application_storage: Persistence::Durable,
            log_filter: log_filter.to_string(),
        }
    }

    fn development() -> Self {
        Self::base(Environment::Development, "debug")
    }

    fn staging() -> Self {
        Self::base(Environment::Staging, "info")
    }

    fn production() -> Self {
        Self::base(Environment::Production, "info")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}
