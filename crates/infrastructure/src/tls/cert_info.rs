use rustls::pki_types::CertificateDer;
use tracing::info;
use x509_parser::prelude::*;

/// Fields of one certificate that are worth logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    pub not_before: String,
    pub not_after: String,
    pub dns_names: Vec<String>,
}

fn common_name(name: &X509Name<'_>) -> String {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string()
}

impl CertificateSummary {
    pub fn parse(der: &CertificateDer<'_>) -> Option<Self> {
        let (_, cert) = X509Certificate::from_der(der.as_ref()).ok()?;

        let dns_names = match cert.subject_alternative_name() {
            Ok(Some(san)) => san
                .value
                .general_names
                .iter()
                .filter_map(|name| match name {
                    GeneralName::DNSName(dns) => Some(dns.to_string()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        let validity = cert.validity();
        Some(Self {
            subject: common_name(cert.subject()),
            issuer: common_name(cert.issuer()),
            serial: cert.raw_serial_as_string(),
            not_before: validity.not_before.to_string(),
            not_after: validity.not_after.to_string(),
            dns_names,
        })
    }
}

/// Issuer common name of a DER certificate, `None` if absent or unparsable.
pub fn issuer_common_name(der: &CertificateDer<'_>) -> Option<String> {
    let (_, cert) = X509Certificate::from_der(der.as_ref()).ok()?;
    let issuer = common_name(cert.issuer());
    (!issuer.is_empty()).then_some(issuer)
}

/// Logs the leaf's details and, for longer chains, each member's subject and issuer.
pub(super) fn log_chain(chain: &[CertificateDer<'_>]) {
    let Some(leaf) = chain.first().and_then(CertificateSummary::parse) else {
        return;
    };

    info!(
        subject = %leaf.subject,
        issuer = %leaf.issuer,
        serial = %leaf.serial,
        valid_from = %leaf.not_before,
        valid_until = %leaf.not_after,
        "TLS certificate information"
    );
    if !leaf.dns_names.is_empty() {
        info!(dns_names = %leaf.dns_names.join(", "), "TLS certificate DNS names");
    }

    if chain.len() > 1 {
        info!(certificates = chain.len(), "TLS certificate chain");
        for (position, der) in chain.iter().enumerate() {
            if let Some(cert) = CertificateSummary::parse(der) {
                info!(position, subject = %cert.subject, issuer = %cert.issuer, "Chain certificate");
            }
        }
    }
}
