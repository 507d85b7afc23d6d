//! Storage connection configuration
//!
//! Connection settings are passed in explicitly from the command line rather
//! than read from ambient process state. Credential resolution itself (shared
//! credentials file, environment, instance metadata) stays with the SDK.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Read timeout applied to storage requests, in seconds
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Connection settings for an S3-compatible endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Custom endpoint URL (None for the SDK default)
    pub endpoint: Option<String>,

    /// Region name (None for the SDK default chain)
    pub region: Option<String>,

    /// Named credentials profile (None for the default chain)
    pub profile: Option<String>,
}

impl StorageConfig {
    /// Create a configuration from optional CLI values
    pub fn new(
        endpoint: Option<String>,
        region: Option<String>,
        profile: Option<String>,
    ) -> Self {
        Self {
            endpoint,
            region,
            profile,
        }
    }

    /// Validate the configuration before a client is constructed
    ///
    /// A malformed endpoint URL is a usage error and must abort the whole
    /// invocation before any item-level work begins.
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            Url::parse(endpoint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_endpoint() {
        let config = StorageConfig::new(Some("https://s3.amazonaws.com".into()), None, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = StorageConfig::new(Some("not a url".into()), None, None);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_region_and_profile_passthrough() {
        let config = StorageConfig::new(None, Some("us-east-1".into()), Some("dev".into()));
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.profile.as_deref(), Some("dev"));
    }
}
