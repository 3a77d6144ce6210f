//! PKCE (RFC 7636) verifier and S256 challenge.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::digest;
use ring::rand::{SecureRandom, SystemRandom};

use crate::AuthError;

const VERIFIER_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl std::fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcePair")
            .field("verifier", &"***")
            .field("challenge", &self.challenge)
            .finish()
    }
}

impl PkcePair {
    /// Fresh 256-bit verifier and its challenge.
    pub fn generate() -> Result<Self, AuthError> {
        let mut bytes = [0u8; VERIFIER_BYTES];
        SystemRandom::new().fill(&mut bytes).map_err(|_| AuthError::Random)?;
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = challenge_for(&verifier);
        Ok(Self { verifier, challenge })
    }
}

/// `BASE64URL(SHA256(verifier))`, unpadded.
#[must_use]
pub fn challenge_for(verifier: &str) -> String {
    let hash = digest::digest(&digest::SHA256, verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash.as_ref())
}
