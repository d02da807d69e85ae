use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Identifies one space/environment of the content delivery API and the
/// token used to read it.
#[derive(Clone, PartialEq, Eq)]
pub struct CmsCredentials {
    pub space_id: String,
    /// Environment identifier; `"master"` unless configured otherwise.
    pub environment: String,
    pub access_token: String,
}

impl std::fmt::Debug for CmsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsCredentials")
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cms: CmsCredentials,
    pub cms_base_url: String,
    pub content_type: String,
    /// `None` leaves backend requests without a client-side timeout.
    pub cms_request_timeout_secs: Option<u64>,
    pub cms_user_agent: String,
    pub detail_revalidate_secs: u64,
    /// Upper bound on concurrently held browsing sessions.
    pub max_sessions: usize,
    /// Sessions unused for this long are dropped.
    pub session_idle_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cms", &self.cms)
            .field("cms_base_url", &self.cms_base_url)
            .field("content_type", &self.content_type)
            .field("cms_request_timeout_secs", &self.cms_request_timeout_secs)
            .field("cms_user_agent", &self.cms_user_agent)
            .field("detail_revalidate_secs", &self.detail_revalidate_secs)
            .field("max_sessions", &self.max_sessions)
            .field("session_idle_secs", &self.session_idle_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_access_token() {
        let creds = CmsCredentials {
            space_id: "space1".to_owned(),
            environment: "master".to_owned(),
            access_token: "super-secret".to_owned(),
        };
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("space1"));
        assert!(!rendered.contains("super-secret"));
    }
}
