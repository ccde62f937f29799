use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::access::AccessConfig;
use super::logging::LoggingConfig;
use crate::models::Smoker;

const ENV_PREFIX: &str = "QUITSMOKE_";
const CONFIG_PATH_VAR: &str = "QUITSMOKE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JWTConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory served under `access.static_prefix`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Records loaded into the store at startup.
    #[serde(default)]
    pub smokers: Vec<Smoker>,
}

/// Signing and session settings for the bearer tokens.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct JWTConfig {
    /// Shared HMAC secret. Tokens signed with any other secret are rejected.
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "default_exp")]
    pub exp: i64,
    /// Tokens with less than this many seconds left are reissued.
    #[serde(default = "default_refresh_window")]
    pub refresh_window: i64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

/// HTTP server limits.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ServerConfig {
    /// Upper bound on the whole request lifecycle (read + handle + write).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> String {
    "./static".to_string()
}

fn default_exp() -> i64 {
    300
}

fn default_refresh_window() -> i64 {
    30
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Parse a config document from a YAML string, with no environment overrides.
pub fn from_yaml_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

/// Load config from the YAML file (`QUITSMOKE_CONFIG`, else "./config.yaml"),
/// then apply `QUITSMOKE_*` environment overrides, e.g. `QUITSMOKE_JWT__SECRET`.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let figment = Figment::new()
        .merge(Yaml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"));

    match extract(figment) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration from '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
