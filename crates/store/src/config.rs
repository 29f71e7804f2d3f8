/// Default HTTP request timeout in seconds.
///
/// The backend never signals a timeout itself; an unresolving call would
/// otherwise leave the panel pending forever.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one Supabase project.
///
/// Absence of a usable config (missing URL or key) is modeled as the
/// absence of the whole value -- see [`StoreConfig::from_parts`] -- so
/// "not configured" never reaches the HTTP layer as empty strings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co` (no trailing slash).
    pub url: String,
    /// The project's anon API key.
    pub anon_key: String,
    /// Per-request timeout in seconds (default: [`DEFAULT_REQUEST_TIMEOUT_SECS`]).
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    /// Create a config from a project URL and anon key.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Build a config from optionally-present credentials.
    ///
    /// Returns `None` when either part is missing or blank; callers treat
    /// that as the "not configured" state and never construct a client.
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|s| !s.is_empty())?;
        let anon_key = anon_key.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self::new(url, anon_key))
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_requires_both_credentials() {
        assert!(StoreConfig::from_parts(None, None).is_none());
        assert!(StoreConfig::from_parts(Some("https://x.supabase.co"), None).is_none());
        assert!(StoreConfig::from_parts(None, Some("anon")).is_none());
        assert!(StoreConfig::from_parts(Some("  "), Some("anon")).is_none());
        assert!(StoreConfig::from_parts(Some("https://x.supabase.co"), Some("anon")).is_some());
    }

    #[test]
    fn trailing_slash_is_stripped_from_url() {
        let config = StoreConfig::new("https://x.supabase.co/", "anon");
        assert_eq!(config.url, "https://x.supabase.co");
    }

    #[test]
    fn default_timeout_applies() {
        let config = StoreConfig::new("https://x.supabase.co", "anon");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.with_timeout_secs(5).request_timeout_secs, 5);
    }
}
