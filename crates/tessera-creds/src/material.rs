//! Credential material loading and PEM decoding.
//!
//! Built-in credential types read key and certificate material from fixed
//! files; custom acceptor material comes from configured paths. Reads are
//! small, blocking, and happen at setup time; there is no retry logic.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use rustls::RootCertStore;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

use crate::error::{CredsError, Result};

/// Read the entire contents of a credential file.
///
/// The path must be nonempty; callers working from optional configuration
/// check presence first. A failed read is a [`CredsError::Material`].
pub fn read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| CredsError::Material {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode every certificate in a PEM bundle.
pub fn certs_from_pem(pem: &[u8]) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = Cursor::new(pem);
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CredsError::InvalidPem(format!("certificate decode: {e}")))?;
    if certs.is_empty() {
        return Err(CredsError::InvalidPem("no certificates found".into()));
    }
    Ok(certs)
}

/// Decode the first private key in a PEM document (PKCS#8, PKCS#1, or SEC1).
pub fn private_key_from_pem(pem: &[u8]) -> Result<PrivateKeyDer<'static>> {
    let mut reader = Cursor::new(pem);
    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| CredsError::InvalidPem(format!("private key decode: {e}")))?
        .ok_or_else(|| CredsError::InvalidPem("no private key found".into()))
}

/// Build a rustls root store from a PEM certificate bundle.
pub fn root_store_from_pem(pem: &[u8]) -> Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    for cert in certs_from_pem(pem)? {
        roots
            .add(cert)
            .map_err(|e| CredsError::InvalidPem(format!("rejected root certificate: {e}")))?;
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA_CERT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/ca.pem");
    const SERVER_KEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/server1.key");

    #[test]
    fn read_returns_file_contents() {
        let bytes = read(CA_CERT).expect("test CA should be readable");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn read_missing_file_is_material_error() {
        let err = read("/nonexistent/credential.pem").unwrap_err();
        assert!(matches!(err, CredsError::Material { .. }));
    }

    #[test]
    fn certs_from_pem_decodes_test_ca() {
        let pem = read(CA_CERT).expect("test CA should be readable");
        let certs = certs_from_pem(&pem).expect("test CA should decode");
        assert_eq!(certs.len(), 1);
    }

    #[test]
    fn certs_from_pem_rejects_garbage() {
        assert!(certs_from_pem(b"not pem at all").is_err());
    }

    #[test]
    fn private_key_from_pem_decodes_test_key() {
        let pem = read(SERVER_KEY).expect("test key should be readable");
        assert!(private_key_from_pem(&pem).is_ok());
    }

    #[test]
    fn private_key_from_pem_rejects_cert_only_input() {
        let pem = read(CA_CERT).expect("test CA should be readable");
        assert!(private_key_from_pem(&pem).is_err());
    }

    #[test]
    fn root_store_from_pem_holds_test_ca() {
        let pem = read(CA_CERT).expect("test CA should be readable");
        let roots = root_store_from_pem(&pem).expect("root store should build");
        assert_eq!(roots.len(), 1);
    }
}
