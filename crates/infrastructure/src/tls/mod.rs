//! TLS client policy for upstream DoH connections

mod cert_info;
mod client_config;
mod verifier;

pub use cert_info::{issuer_common_name, CertificateSummary};
pub use client_config::{build_client_config, mozilla_roots};
pub use verifier::{NoVerifier, TrustVerifier};
