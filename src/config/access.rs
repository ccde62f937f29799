use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The static access tables. Read-only once the server has started.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AccessConfig {
    /// Exact paths reachable without a token.
    #[serde(default = "default_allowed_paths")]
    pub allowed_paths: Vec<String>,
    /// Any path starting with this prefix is reachable without a token.
    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,
    /// role -> permissions granted by the role
    #[serde(default)]
    pub role_permissions: HashMap<String, Vec<String>>,
    /// username -> roles held by the user
    #[serde(default)]
    pub user_roles: HashMap<String, Vec<String>>,
    /// path -> permissions required to access it
    #[serde(default)]
    pub path_permissions: HashMap<String, Vec<String>>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            allowed_paths: default_allowed_paths(),
            static_prefix: default_static_prefix(),
            role_permissions: HashMap::new(),
            user_roles: HashMap::new(),
            path_permissions: HashMap::new(),
        }
    }
}

fn default_allowed_paths() -> Vec<String> {
    ["/", "/signin", "/logout", "/health"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_static_prefix() -> String {
    "/static/".to_string()
}
