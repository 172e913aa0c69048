//! Server configuration
//!
//! Everything is sourced from environment variables (a `.env` file is loaded
//! in `main`). The security section mirrors the admin console's externally
//! supplied options: toggle flags, URL patterns, and remember-me settings.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT lifetime in minutes
    pub jwt_expiration_minutes: i64,
    /// Security pipeline options
    pub security: SecurityConfig,
}

/// Security pipeline options
///
/// Named toggles and URL patterns the ordered middleware pipeline is built
/// from. Defaults match the admin console's shipped configuration.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Master switch: when false the whole admin auth pipeline is skipped
    pub admin_enabled: bool,
    /// Double-submit CSRF protection
    pub csrf_enabled: bool,
    /// Permissive CORS layer
    pub cors_enabled: bool,
    /// Accept JWT bearer tokens in addition to sessions
    pub jwt_enabled: bool,
    /// Login page url (unauthenticated html clients are redirected here)
    pub login_page: String,
    /// Url the login handler is mounted on
    pub login_processing_url: String,
    /// Url the logout handler is mounted on
    pub logout_url: String,
    /// Page for access-denied html clients
    pub access_denied_url: String,
    /// Name of the login-body parameter requesting a remember-me grant
    pub remember_me_param: String,
    /// Remember-me token validity in seconds
    pub remember_me_validity_secs: i64,
    /// Ant-style patterns that require authentication
    pub authenticated_urls: Vec<String>,
    /// Ant-style patterns exempted from authentication
    pub unauthenticated_urls: Vec<String>,
    /// Concurrent sessions allowed per user
    pub max_sessions: usize,
    /// When the limit is reached: reject the new login (true) or expire the
    /// oldest session (false)
    pub max_sessions_prevents_login: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let login_page = "/admin/login.html".to_string();
        let login_processing_url = "/admin/api/login".to_string();
        Self {
            admin_enabled: true,
            csrf_enabled: false,
            cors_enabled: true,
            jwt_enabled: true,
            unauthenticated_urls: vec![login_page.clone(), login_processing_url.clone()],
            login_page,
            login_processing_url,
            logout_url: "/admin/api/logout".to_string(),
            access_denied_url: "/admin/error/403.html".to_string(),
            remember_me_param: "remember-me".to_string(),
            // Spring's persistent-token default: two weeks
            remember_me_validity_secs: 14 * 24 * 60 * 60,
            authenticated_urls: vec!["/admin/api/**".to_string(), "/system/api/**".to_string()],
            max_sessions: 1,
            max_sessions_prevents_login: false,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development
    /// environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let defaults = SecurityConfig::default();
        let login_page = env_string("LOGIN_PAGE", &defaults.login_page);
        let login_processing_url =
            env_string("LOGIN_PROCESSING_URL", &defaults.login_processing_url);

        let security = SecurityConfig {
            admin_enabled: env_bool("ADMIN_AUTH_ENABLED", defaults.admin_enabled),
            csrf_enabled: env_bool("CSRF_ENABLED", defaults.csrf_enabled),
            cors_enabled: env_bool("CORS_ENABLED", defaults.cors_enabled),
            jwt_enabled: env_bool("JWT_ENABLED", defaults.jwt_enabled),
            logout_url: env_string("LOGOUT_URL", &defaults.logout_url),
            access_denied_url: env_string("ACCESS_DENIED_URL", &defaults.access_denied_url),
            remember_me_param: env_string("REMEMBER_ME_PARAM", &defaults.remember_me_param),
            remember_me_validity_secs: std::env::var("REMEMBER_ME_VALIDITY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.remember_me_validity_secs),
            authenticated_urls: env_list("AUTHENTICATED_URLS", &defaults.authenticated_urls),
            unauthenticated_urls: env_list(
                "UNAUTHENTICATED_URLS",
                &[login_page.clone(), login_processing_url.clone()],
            ),
            max_sessions: std::env::var("MAX_SESSIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_sessions),
            max_sessions_prevents_login: env_bool(
                "MAX_SESSIONS_PREVENTS_LOGIN",
                defaults.max_sessions_prevents_login,
            ),
            login_page,
            login_processing_url,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 60),
            environment,
            security,
        })
    }
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => parse_bool(&v, default),
        Err(_) => default,
    }
}

fn env_list(name: &str, default: &[String]) -> Vec<String> {
    match std::env::var(name) {
        Ok(v) => parse_list(&v),
        Err(_) => default.to_vec(),
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true", false));
        assert!(parse_bool("1", false));
        assert!(parse_bool("ON", false));
        assert!(!parse_bool("false", true));
        assert!(!parse_bool("0", true));
        assert!(parse_bool("garbage", true));
        assert!(!parse_bool("garbage", false));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("/admin/api/**, /system/api/**,"),
            vec!["/admin/api/**".to_string(), "/system/api/**".to_string()]
        );
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn test_security_defaults() {
        let sec = SecurityConfig::default();
        assert!(sec.admin_enabled);
        assert!(!sec.csrf_enabled);
        assert_eq!(sec.max_sessions, 1);
        assert!(!sec.max_sessions_prevents_login);
        assert!(sec.unauthenticated_urls.contains(&sec.login_page));
        assert!(
            sec.unauthenticated_urls
                .contains(&sec.login_processing_url)
        );
        assert_eq!(sec.remember_me_validity_secs, 1_209_600);
    }
}
