use tracing::info;

use super::policy::AccessPolicy;
use super::token::{Claims, TokenError, TokenService};
use crate::config::{AccessConfig, JWTConfig};

/// Everything the auth middleware needs to gate a request.
///
/// The middleware only talks to this trait, so tests can substitute a double
/// for the real signer and policy.
pub trait Tokener: Send + Sync {
    fn issue(&self, username: &str) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
    fn is_exempt(&self, path: &str) -> bool;
    fn is_authorized(&self, username: &str, path: &str) -> bool;
}

/// Production `Tokener`: the shared-secret token service plus the static access policy.
pub struct Auth {
    tokens: TokenService,
    policy: AccessPolicy,
}

impl Auth {
    pub fn new(jwt: &JWTConfig, access: &AccessConfig) -> Self {
        info!(
            event_name = "auth.created",
            event_domain = "auth",
            token_ttl_secs = jwt.exp,
            "creating token service and access policy"
        );
        Self {
            tokens: TokenService::new(jwt),
            policy: AccessPolicy::new(access),
        }
    }
}

impl Tokener for Auth {
    fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.tokens.issue(username)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.tokens.verify(token)
    }

    fn is_exempt(&self, path: &str) -> bool {
        self.policy.is_exempt(path)
    }

    fn is_authorized(&self, username: &str, path: &str) -> bool {
        self.policy.is_authorized(username, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_auth_delegates_to_token_service_and_policy() {
        let jwt = JWTConfig {
            secret: "secret".to_string(),
            exp: 300,
            refresh_window: 30,
            cookie_name: "token".to_string(),
        };
        let access = AccessConfig {
            role_permissions: HashMap::from([("admin".to_string(), vec!["admin".to_string()])]),
            user_roles: HashMap::from([("arthur".to_string(), vec!["admin".to_string()])]),
            path_permissions: HashMap::from([("/smokers".to_string(), vec!["admin".to_string()])]),
            ..AccessConfig::default()
        };
        let auth: Box<dyn Tokener> = Box::new(Auth::new(&jwt, &access));

        let token = auth.issue("arthur").unwrap();
        assert_eq!(auth.verify(&token).unwrap().username, "arthur");
        assert!(auth.is_exempt("/signin"));
        assert!(!auth.is_exempt("/smokers"));
        assert!(auth.is_authorized("arthur", "/smokers"));
        assert!(!auth.is_authorized("victor", "/smokers"));
    }
}
