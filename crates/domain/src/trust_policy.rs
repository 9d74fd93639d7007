//! Upstream certificate trust policy.
//!
//! Built once from `[tls]` configuration and shared read-only by the TLS
//! layer. Issuer pinning compares common names by substring containment in
//! either direction, so an allowed entry of `"CA"` accepts any issuer whose
//! name contains `"CA"`.

use crate::config::{ConfigError, TlsConfig};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustPolicy {
    /// Advanced checks switch; when false every other flag is ignored
    pub enabled: bool,
    pub insecure_skip_verify: bool,
    pub pin_issuer: bool,
    pub allowed_issuers: Vec<String>,
    pub print_cert_info: bool,
}

impl TrustPolicy {
    pub fn from_config(config: &TlsConfig) -> Self {
        Self {
            enabled: config.enabled,
            insecure_skip_verify: config.insecure_skip_verify,
            pin_issuer: config.pin_cert_issuer,
            allowed_issuers: config.allowed_issuers.clone(),
            print_cert_info: config.print_cert_info,
        }
    }

    /// Peer verification is disabled entirely.
    pub fn skips_verification(&self) -> bool {
        self.enabled && self.insecure_skip_verify
    }

    /// A custom hook must inspect each handshake's chain.
    pub fn inspects_chain(&self) -> bool {
        self.enabled && !self.insecure_skip_verify && (self.pin_issuer || self.print_cert_info)
    }

    pub fn pins_issuer(&self) -> bool {
        self.enabled && self.pin_issuer
    }

    pub fn prints_cert_info(&self) -> bool {
        self.enabled && self.print_cert_info
    }

    /// Returns the allow-list entry matching `issuer`, if any.
    ///
    /// Blank names never match on either side.
    pub fn matching_issuer(&self, issuer: &str) -> Option<&str> {
        if issuer.is_empty() {
            return None;
        }
        self.allowed_issuers
            .iter()
            .filter(|allowed| !allowed.is_empty())
            .find(|allowed| issuer.contains(allowed.as_str()) || allowed.contains(issuer))
            .map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.insecure_skip_verify {
            warn!("TLS certificate verification is disabled");
        }

        if self.pin_issuer {
            if self.allowed_issuers.iter().all(|i| i.trim().is_empty()) {
                return Err(ConfigError::TrustPolicy(
                    "certificate issuer pinning is enabled but no allowed issuers specified"
                        .to_string(),
                ));
            }
            info!(
                allowed_issuers = self.allowed_issuers.len(),
                "Certificate issuer pinning enabled"
            );
        }

        if self.print_cert_info {
            info!("Certificate information printing enabled");
        }

        Ok(())
    }
}
