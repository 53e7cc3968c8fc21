//! Peer authorization policy for the identity-authenticated transport.
//!
//! The TLS verifiers in this crate authenticate *who* a peer is (their key
//! fingerprint); [`PeerAuthorization`] decides whether that peer may
//! complete the handshake at all.

use std::collections::HashSet;

use crate::peer_id::PeerId;

/// Which peer identities a verifier accepts.
///
/// `AnyIdentity` accepts every peer that presents a validly-signed identity
/// certificate; the authenticated [`PeerId`] is left for the application to
/// inspect after the handshake. `Allowed` additionally restricts the
/// handshake itself to an explicit set of fingerprints.
#[derive(Debug, Clone, Default)]
pub enum PeerAuthorization {
    /// Accept any authenticated identity.
    #[default]
    AnyIdentity,
    /// Accept only the listed identities.
    Allowed(HashSet<PeerId>),
}

impl PeerAuthorization {
    /// Build an allow-list policy from an iterator of peer fingerprints.
    pub fn allow<I>(peers: I) -> Self
    where
        I: IntoIterator<Item = PeerId>,
    {
        Self::Allowed(peers.into_iter().collect())
    }

    /// Returns true if `peer` may complete the handshake.
    pub fn permits(&self, peer: &PeerId) -> bool {
        match self {
            Self::AnyIdentity => true,
            Self::Allowed(set) => set.contains(peer),
        }
    }
}
