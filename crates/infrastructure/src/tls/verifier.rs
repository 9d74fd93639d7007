use super::cert_info::{issuer_common_name, log_chain};
use super::client_config::crypto_provider;
use doh_relay_domain::{DomainError, TrustPolicy};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, RootCertStore, SignatureScheme};
use std::sync::Arc;
use tracing::{debug, warn};

/// Standard WebPKI verification followed by issuer pinning and optional
/// certificate logging. Runs once per new TLS handshake.
///
/// Pinning inspects the path WebPKI built to a trusted root, never extra
/// certificates the server sent alongside it.
#[derive(Debug)]
pub struct TrustVerifier {
    inner: Arc<WebPkiServerVerifier>,
    roots: Arc<RootCertStore>,
    provider: Arc<CryptoProvider>,
    policy: TrustPolicy,
}

impl TrustVerifier {
    pub fn new(policy: TrustPolicy) -> Result<Self, DomainError> {
        Self::with_roots(policy, super::mozilla_roots(), crypto_provider())
    }

    pub fn with_roots(
        policy: TrustPolicy,
        roots: RootCertStore,
        provider: Arc<CryptoProvider>,
    ) -> Result<Self, DomainError> {
        let roots = Arc::new(roots);
        let inner =
            WebPkiServerVerifier::builder_with_provider(Arc::clone(&roots), Arc::clone(&provider))
                .build()
                .map_err(|e| DomainError::TlsConfig(format!("Failed to build verifier: {}", e)))?;
        Ok(Self {
            inner,
            roots,
            provider,
            policy,
        })
    }

    /// The chain WebPKI validated, leaf first, trust anchor excluded.
    fn verified_path(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        now: UnixTime,
    ) -> Result<Vec<CertificateDer<'static>>, rustls::Error> {
        let path_error =
            |e: webpki::Error| rustls::Error::General(format!("certificate path: {:?}", e));

        let leaf = webpki::EndEntityCert::try_from(end_entity).map_err(path_error)?;
        let path = leaf
            .verify_for_usage(
                self.provider.signature_verification_algorithms.all,
                &self.roots.roots,
                intermediates,
                now,
                webpki::KeyUsage::server_auth(),
                None,
                None,
            )
            .map_err(path_error)?;

        let mut chain = vec![end_entity.clone().into_owned()];
        chain.extend(
            path.intermediate_certificates()
                .map(|cert| cert.der().into_owned()),
        );
        Ok(chain)
    }

    /// Inspects an already verified chain, leaf first.
    pub fn verify_chain(&self, chain: &[CertificateDer<'_>]) -> Result<(), DomainError> {
        if chain.is_empty() {
            return Err(DomainError::Trust(
                "no verified certificate chains".to_string(),
            ));
        }

        if self.policy.prints_cert_info() {
            log_chain(chain);
        }

        if self.policy.pins_issuer() {
            self.verify_issuer(chain)?;
        }

        Ok(())
    }

    fn verify_issuer(&self, chain: &[CertificateDer<'_>]) -> Result<(), DomainError> {
        let mut seen = Vec::with_capacity(chain.len());

        for issuer in chain.iter().filter_map(issuer_common_name) {
            if let Some(allowed) = self.policy.matching_issuer(&issuer) {
                debug!(issuer = %issuer, allowed = %allowed, "Certificate issuer verified");
                return Ok(());
            }
            seen.push(issuer);
        }

        warn!(issuers = ?seen, "Certificate issuer not in allowed list");
        Err(DomainError::Trust(format!(
            "certificate issuer not in allowed list (chain issuers: {})",
            seen.join(", ")
        )))
    }
}

impl ServerCertVerifier for TrustVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let verified = self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        )?;

        if !self.policy.pins_issuer() && !self.policy.prints_cert_info() {
            return Ok(verified);
        }

        let chain = self.verified_path(end_entity, intermediates, now)?;
        self.verify_chain(&chain)
            .map_err(|e| rustls::Error::General(e.to_string()))?;

        Ok(verified)
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

/// Certificate verifier that accepts any certificate (for insecure_skip_verify mode).
///
/// Handshake signatures are still checked so the session keys belong to
/// whoever presented the certificate.
#[derive(Debug)]
pub struct NoVerifier {
    provider: Arc<CryptoProvider>,
}

impl NoVerifier {
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
