use sha2::Digest;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Password digest implementation.
///
/// Produces a deterministic SHA-256 digest rendered as lowercase hex, so the
/// same secret always maps to the same stored value and a credential lookup
/// can match on the digest directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Length of a hex-encoded digest.
    pub const DIGEST_LENGTH: usize = 64;

    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// 64 character lowercase hex digest
    pub fn hash(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The comparison runs in constant time with respect to the candidate.
    /// A stored digest of unexpected length never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `digest` - Stored hex digest
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        if digest.len() != Self::DIGEST_LENGTH {
            return false;
        }

        let candidate = self.hash(password);
        candidate.as_bytes().ct_eq(digest.as_bytes()).into()
    }
}
