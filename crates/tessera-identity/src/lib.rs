//! Identity-based mutual-authentication transport primitives.
//!
//! Implements the credential side of an authenticated transport that does
//! not rely on certificate-authority trust: each peer presents a
//! self-signed X.509 certificate wrapping an Ed25519 key, and peers are
//! authenticated by key fingerprint ([`PeerId`]) rather than by chain
//! validation.
//!
//! - Ed25519 keypairs and self-signed presentation certificates
//! - Peer fingerprints and authorization policies
//! - Custom rustls verifiers and TLS config builders (TLS 1.3, ring)

pub mod authorization;
pub mod certificate;
pub mod error;
pub mod identity;
pub mod keypair;
pub mod peer_id;
pub mod tls;
pub mod verifier;

pub use authorization::PeerAuthorization;
pub use certificate::Certificate;
pub use error::IdentityError;
pub use identity::Identity;
pub use keypair::Keypair;
pub use peer_id::PeerId;
