pub const BACKEND_URL_ENV: &str = "DASHBOARD_BACKEND_URL";
pub const ENABLE_NOTIFICATION_ENV: &str = "DASHBOARD_ENABLE_NOTIFICATION";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Deployment settings shared by the browser and terminal clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    backend_url: String,
    notifications_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL, false)
    }
}

impl DashboardConfig {
    pub fn new(backend_url: impl Into<String>, notifications_enabled: bool) -> Self {
        let backend_url = backend_url.into();
        let backend_url = if backend_url.trim().is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            backend_url.trim().to_string()
        };

        Self {
            backend_url,
            notifications_enabled,
        }
    }

    /// Build from any key/value source (process env, compile-time env, tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL_ENV).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let notifications_enabled = lookup(ENABLE_NOTIFICATION_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Self::new(backend_url, notifications_enabled)
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// GraphQL endpoint, `query` resolved relative to the backend URL.
    pub fn query_url(&self) -> String {
        let (origin, path) = split_origin(&self.backend_url);
        let directory = match path.rfind('/') {
            Some(idx) => &path[..=idx],
            None => "/",
        };
        format!("{origin}{directory}query")
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", split_origin(&self.backend_url).0)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/logout", split_origin(&self.backend_url).0)
    }
}

/// `true`, `1`, `yes` and `on` (any case) enable a flag; everything else disables it.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_origin(url: &str) -> (&str, &str) {
    let authority_start = url.find("://").map(|idx| idx + 3).unwrap_or(0);
    match url[authority_start..].find('/') {
        Some(idx) => url.split_at(authority_start + idx),
        None => (url, ""),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn endpoints_resolve_against_backend_url() {
        let config = DashboardConfig::new("http://localhost:8080", true);
        assert_eq!(config.query_url(), "http://localhost:8080/query");
        assert_eq!(config.login_url(), "http://localhost:8080/login");
        assert_eq!(config.logout_url(), "http://localhost:8080/logout");

        let nested = DashboardConfig::new("https://stocks.example.com/api/", false);
        assert_eq!(nested.query_url(), "https://stocks.example.com/api/query");
        assert_eq!(nested.login_url(), "https://stocks.example.com/login");

        let sibling = DashboardConfig::new("https://stocks.example.com/api", false);
        assert_eq!(sibling.query_url(), "https://stocks.example.com/query");
    }

    #[test]
    fn lookup_reads_both_settings() {
        let env: HashMap<&str, &str> = HashMap::from([
            (BACKEND_URL_ENV, "https://api.example.com/"),
            (ENABLE_NOTIFICATION_ENV, "TRUE"),
        ]);
        let config = DashboardConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend_url(), "https://api.example.com/");
        assert!(config.notifications_enabled());
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config, DashboardConfig::default());
        assert!(!config.notifications_enabled());

        assert_eq!(DashboardConfig::new("  ", false).backend_url(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn flags_accept_common_spellings() {
        for value in ["1", "true", "Yes", " on "] {
            assert!(parse_flag(value), "{value:?}");
        }
        for value in ["0", "false", "", "enabled"] {
            assert!(!parse_flag(value), "{value:?}");
        }
    }
}
