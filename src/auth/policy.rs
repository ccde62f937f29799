use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::config::AccessConfig;

/// Path allowlist and role-based permission tables.
///
/// Built once at startup and only read afterwards, so it can be shared by any
/// number of concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    allowed_paths: HashSet<String>,
    static_prefix: String,
    role_permissions: HashMap<String, HashSet<String>>,
    user_roles: HashMap<String, Vec<String>>,
    path_permissions: HashMap<String, HashSet<String>>,
}

fn to_sets(table: &HashMap<String, Vec<String>>) -> HashMap<String, HashSet<String>> {
    table
        .iter()
        .map(|(key, values)| (key.clone(), values.iter().cloned().collect()))
        .collect()
}

impl AccessPolicy {
    pub fn new(config: &AccessConfig) -> Self {
        info!(
            event_name = "auth.policy.created",
            event_domain = "auth",
            allowed_paths = config.allowed_paths.len(),
            roles = config.role_permissions.len(),
            users = config.user_roles.len(),
            guarded_paths = config.path_permissions.len(),
            "access policy loaded"
        );
        Self {
            allowed_paths: config.allowed_paths.iter().cloned().collect(),
            static_prefix: config.static_prefix.clone(),
            role_permissions: to_sets(&config.role_permissions),
            user_roles: config.user_roles.clone(),
            path_permissions: to_sets(&config.path_permissions),
        }
    }

    /// True for the exact allowed paths and anything under the static prefix.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.allowed_paths.contains(path)
            || (!self.static_prefix.is_empty() && path.starts_with(&self.static_prefix))
    }

    /// Paths without required permissions are open to every caller. Otherwise
    /// the caller needs at least one role granting at least one of them.
    pub fn is_authorized(&self, username: &str, path: &str) -> bool {
        let required = match self.path_permissions.get(path) {
            Some(required) if !required.is_empty() => required,
            _ => return true,
        };

        let Some(roles) = self.user_roles.get(username) else {
            debug!(
                event_name = "auth.policy.no_roles",
                event_domain = "auth",
                username,
                path,
                "user has no roles on record for a guarded path"
            );
            return false;
        };

        roles
            .iter()
            .filter_map(|role| self.role_permissions.get(role))
            .any(|granted| !granted.is_disjoint(required))
    }
}
