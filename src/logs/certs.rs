//! Certificate path validation failures.
//!
//! TLS errors caused by an untrusted or broken certificate chain are the
//! hardest diagnostics to reproduce after the fact, so when one shows up
//! anywhere in an error's source chain the published report includes the
//! full offending chain.

use std::error::Error;
use std::fmt::Write;
use thiserror::Error;

/// Identifying fields of one certificate in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
}

/// A TLS handshake failure caused by certificate path validation.
///
/// Carries the certificate chain the server presented, leaf first.
#[derive(Error, Debug)]
#[error("certificate path validation failed: {reason}")]
pub struct CertPathValidationError {
    pub reason: String,
    pub chain: Vec<CertificateInfo>,
}

impl CertPathValidationError {
    pub fn new(reason: impl Into<String>, chain: Vec<CertificateInfo>) -> Self {
        Self {
            reason: reason.into(),
            chain,
        }
    }
}

/// Render the certificate chain carried by an error, if any.
///
/// Walks the error's source chain looking for a [`CertPathValidationError`]
/// and formats its certificates, one line per certificate, leaf first.
/// Returns an empty string when no such error is present.
pub fn certificate_chain_text(error: &(dyn Error + 'static)) -> String {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(cert_err) = err.downcast_ref::<CertPathValidationError>() {
            let mut out = String::from("Certificate chain:\n");
            for (i, cert) in cert_err.chain.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}: subject={} issuer={} serial={}",
                    i, cert.subject, cert.issuer, cert.serial
                );
            }
            return out;
        }
        current = err.source();
    }
    String::new()
}
