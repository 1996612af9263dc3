//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client runs with zero configuration.

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum messages a conversation view retains from each snapshot
    /// (every change re-delivers the whole list, so this bounds re-render
    /// cost). `0` means unlimited.
    /// Env: `CONFAB_SNAPSHOT_LIMIT`
    /// Default: `500`
    pub snapshot_limit: usize,

    /// Maximum users returned by a directory listing. `0` means unlimited.
    /// Env: `CONFAB_DIRECTORY_PAGE_SIZE`
    /// Default: `0`
    pub directory_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            snapshot_limit: 500,
            directory_page_size: 0,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CONFAB_SNAPSHOT_LIMIT") {
            match val.parse::<usize>() {
                Ok(n) => config.snapshot_limit = n,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid CONFAB_SNAPSHOT_LIMIT, using default");
                }
            }
        }

        if let Ok(val) = std::env::var("CONFAB_DIRECTORY_PAGE_SIZE") {
            match val.parse::<usize>() {
                Ok(n) => config.directory_page_size = n,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid CONFAB_DIRECTORY_PAGE_SIZE, using default");
                }
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.snapshot_limit, 500);
        assert_eq!(config.directory_page_size, 0);
    }
}
