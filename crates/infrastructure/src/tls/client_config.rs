use super::verifier::{NoVerifier, TrustVerifier};
use doh_relay_domain::{DomainError, TrustPolicy};
use rustls::crypto::{aws_lc_rs, CryptoProvider};
use rustls::{ClientConfig, RootCertStore};
use std::sync::Arc;
use tracing::{debug, warn};

pub fn mozilla_roots() -> RootCertStore {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    root_store
}

pub(super) fn crypto_provider() -> Arc<CryptoProvider> {
    Arc::new(aws_lc_rs::default_provider())
}

/// TLS 1.2/1.3 client configuration for DoH upstreams.
///
/// Verification follows the policy: plain WebPKI when advanced checks are
/// off, accept-all when `insecure_skip_verify`, or WebPKI followed by chain
/// inspection when pinning or certificate printing is requested.
pub fn build_client_config(
    policy: &TrustPolicy,
    use_http2: bool,
) -> Result<ClientConfig, DomainError> {
    let provider = crypto_provider();
    let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .map_err(|e| DomainError::TlsConfig(e.to_string()))?;

    let mut config = if policy.skips_verification() {
        warn!("TLS certificate verification disabled, upstream identities are not checked");
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier::new(provider)))
            .with_no_client_auth()
    } else if policy.inspects_chain() {
        debug!(
            pin_issuer = policy.pins_issuer(),
            print_cert_info = policy.prints_cert_info(),
            "Installing certificate chain inspection"
        );
        let verifier = TrustVerifier::with_roots(policy.clone(), mozilla_roots(), provider)?;
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
            .with_no_client_auth()
    } else {
        builder
            .with_root_certificates(mozilla_roots())
            .with_no_client_auth()
    };

    config.alpn_protocols = if use_http2 {
        vec![b"h2".to_vec(), b"http/1.1".to_vec()]
    } else {
        vec![b"http/1.1".to_vec()]
    };

    Ok(config)
}
