#![allow(dead_code)]

use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyPair, KeyUsagePurpose,
};
use rustls::pki_types::CertificateDer;
use rustls::RootCertStore;

/// Leaf certificate for `dns.example` issued by a CA with the given common name.
/// Returns the chain leaf first.
pub fn chain_issued_by(issuer_cn: &str) -> Vec<CertificateDer<'static>> {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params
        .distinguished_name
        .push(DnType::CommonName, issuer_cn);
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca_cert = ca_params.self_signed(&ca_key).unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::new(vec!["dns.example".to_string()]).unwrap();
    leaf_params
        .distinguished_name
        .push(DnType::CommonName, "dns.example");
    let leaf_cert = leaf_params
        .signed_by(&leaf_key, &ca_cert, &ca_key)
        .unwrap();

    vec![leaf_cert.der().clone(), ca_cert.der().clone()]
}

/// Certificate authority for end-to-end verifier tests.
pub struct TestCa {
    cert: Certificate,
    key: KeyPair,
}

impl TestCa {
    pub fn root(common_name: &str) -> Self {
        let key = KeyPair::generate().unwrap();
        let cert = ca_params(common_name).self_signed(&key).unwrap();
        Self { cert, key }
    }

    /// Intermediate CA signed by this one.
    pub fn intermediate(&self, common_name: &str) -> Self {
        let key = KeyPair::generate().unwrap();
        let cert = ca_params(common_name)
            .signed_by(&key, &self.cert, &self.key)
            .unwrap();
        Self { cert, key }
    }

    /// Server certificate for `dns_name` signed by this CA.
    pub fn issue_leaf(&self, dns_name: &str) -> CertificateDer<'static> {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(vec![dns_name.to_string()]).unwrap();
        params.distinguished_name.push(DnType::CommonName, dns_name);
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
        params
            .signed_by(&key, &self.cert, &self.key)
            .unwrap()
            .der()
            .clone()
    }

    pub fn der(&self) -> CertificateDer<'static> {
        self.cert.der().clone()
    }

    /// Store trusting only this CA.
    pub fn trust_store(&self) -> RootCertStore {
        let mut store = RootCertStore::empty();
        store.add(self.der()).unwrap();
        store
    }
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    params
}
