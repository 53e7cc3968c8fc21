//! A keypair bundled with the certificate that presents it.

use crate::certificate::Certificate;
use crate::error::Result;
use crate::keypair::Keypair;
use crate::peer_id::PeerId;

/// An in-memory transport identity: an Ed25519 keypair plus the self-signed
/// X.509 certificate presented during the handshake.
pub struct Identity {
    keypair: Keypair,
    certificate: Certificate,
}

impl Identity {
    /// Generate a fresh ephemeral identity whose certificate is valid from
    /// `now_epoch_secs`.
    pub fn generate(now_epoch_secs: i64) -> Result<Self> {
        let keypair = Keypair::generate();
        let certificate = Certificate::generate(&keypair, now_epoch_secs)?;
        Ok(Self {
            keypair,
            certificate,
        })
    }

    /// Rebuild an identity from a persisted 32-byte secret key, minting a
    /// fresh presentation certificate.
    pub fn from_secret_bytes(bytes: &[u8; 32], now_epoch_secs: i64) -> Result<Self> {
        let keypair = Keypair::from_secret_bytes(bytes);
        let certificate = Certificate::generate(&keypair, now_epoch_secs)?;
        Ok(Self {
            keypair,
            certificate,
        })
    }

    /// The identity keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// The presentation certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Fingerprint of this identity's public key.
    pub fn peer_id(&self) -> PeerId {
        PeerId::from_public_key(&self.keypair.public_key_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference epoch: 2025-01-01 00:00:00 UTC.
    const JAN_1_2025: i64 = 1735689600;

    #[test]
    fn generated_identity_is_self_consistent() {
        let identity = Identity::generate(JAN_1_2025).expect("identity generation should succeed");
        let from_cert =
            PeerId::from_certificate(identity.certificate().der()).expect("extraction");
        assert_eq!(identity.peer_id(), from_cert);
    }

    #[test]
    fn reloaded_identity_keeps_peer_id() {
        let original = Identity::generate(JAN_1_2025).expect("identity generation should succeed");
        let secret = original.keypair().secret_bytes();

        let restored = Identity::from_secret_bytes(&secret, JAN_1_2025 + 60)
            .expect("restore should succeed");
        assert_eq!(original.peer_id(), restored.peer_id());
    }
}
