//! # Provisioning Configuration
//!
//! Test-only behaviour is configuration, not conditional compilation:
//! production and test builds run the same code with different values.
//!
//! ## Security Requirements
//!
//! - `enable_test_key` MUST be `false` in a release build
//! - `require_authenticity` MUST be `true` in a release build
//!
//! Both are enforced by [`ProvisioningConfig::validate`], which every
//! verifier and service constructor calls. A registry that trusts the test
//! key is only accepted together with `enable_test_key`, so the release rule
//! covers hand-built registries too.
//!
//! # Example
//!
//! ```ignore
//! use nft_provisioning::ProvisioningConfigBuilder;
//!
//! let config = ProvisioningConfigBuilder::new()
//!     .enable_test_key(true)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Test key requested in a release build.
    #[error("SECURITY VIOLATION: the test key cannot be enabled in a release build")]
    TestKeyInRelease,

    /// Signature bypass requested in a release build.
    #[error("SECURITY VIOLATION: signature enforcement cannot be disabled in a release build")]
    BypassInRelease,

    /// Registry trusts the test key while `enable_test_key` is off.
    #[error("SECURITY VIOLATION: registry trusts the test key but enable_test_key is not set")]
    TestKeyNotEnabled,
}

/// Build profile the configuration is validated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildProfile {
    /// Debug assertions enabled (tests, development)
    Debug,
    /// Optimised release build
    Release,
}

impl BuildProfile {
    /// Profile of the running binary.
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildProfile::Debug
        } else {
            BuildProfile::Release
        }
    }
}

/// Provisioning configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// Trust the test key (id 0) in addition to the production key
    pub enable_test_key: bool,
    /// Reject records whose signature does not verify
    pub require_authenticity: bool,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            enable_test_key: false,
            require_authenticity: true,
        }
    }
}

impl ProvisioningConfig {
    /// Validate against the profile of the running binary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_for(BuildProfile::current())
    }

    /// Validate against an explicit build profile.
    pub fn validate_for(&self, profile: BuildProfile) -> Result<(), ConfigError> {
        if profile == BuildProfile::Release {
            if self.enable_test_key {
                return Err(ConfigError::TestKeyInRelease);
            }
            if !self.require_authenticity {
                return Err(ConfigError::BypassInRelease);
            }
        }
        Ok(())
    }

    /// Builder-style method to enable the test key
    pub fn with_test_key(mut self, enabled: bool) -> Self {
        self.enable_test_key = enabled;
        self
    }

    /// Builder-style method to set signature enforcement
    pub fn with_require_authenticity(mut self, required: bool) -> Self {
        self.require_authenticity = required;
        self
    }
}

/// Builder for [`ProvisioningConfig`] with validation.
#[derive(Default)]
pub struct ProvisioningConfigBuilder {
    enable_test_key: Option<bool>,
    require_authenticity: Option<bool>,
}

impl ProvisioningConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust the test key
    pub fn enable_test_key(mut self, enabled: bool) -> Self {
        self.enable_test_key = Some(enabled);
        self
    }

    /// Enforce signature verification
    pub fn require_authenticity(mut self, required: bool) -> Self {
        self.require_authenticity = Some(required);
        self
    }

    /// Build the configuration, validating it for the current build profile
    pub fn build(self) -> Result<ProvisioningConfig, ConfigError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> ProvisioningConfig {
        let defaults = ProvisioningConfig::default();

        ProvisioningConfig {
            enable_test_key: self.enable_test_key.unwrap_or(defaults.enable_test_key),
            require_authenticity: self
                .require_authenticity
                .unwrap_or(defaults.require_authenticity),
        }
    }
}
