use serde::{Deserialize, Serialize};

/// Advanced upstream TLS checks. Everything is off unless `enabled` is set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub print_cert_info: bool,

    #[serde(default)]
    pub pin_cert_issuer: bool,

    #[serde(default)]
    pub allowed_issuers: Vec<String>,

    #[serde(default)]
    pub insecure_skip_verify: bool,
}
