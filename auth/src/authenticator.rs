use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::identity::IdentityGenerator;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::VerifiedToken;
use crate::password::PasswordHasher;

/// Authentication coordinator combining credential digests, identity
/// issuance and bearer tokens.
///
/// Built once at startup from configuration and shared read-only between
/// requests; it holds no mutable state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    identity_generator: IdentityGenerator,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            identity_generator: IdentityGenerator::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Digest a password for storage or lookup.
    pub fn hash_password(&self, password: &str) -> String {
        self.password_hasher.hash(password)
    }

    /// Constant-time comparison of a password against a stored digest.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        self.password_hasher.verify(password, digest)
    }

    /// Generate a fresh opaque account identity.
    pub fn new_identity(&self) -> String {
        self.identity_generator.new_identity()
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored digest
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        identity: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(password, stored_digest) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.generate_token(identity)?)
    }

    /// Issue a token without password verification.
    pub fn generate_token(&self, identity: &str) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(identity, self.token_ttl)
    }

    /// Validate a token against the current instant.
    pub fn validate_token(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Validate a token as if the current instant were `now`.
    pub fn validate_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedToken, JwtError> {
        self.jwt_handler.verify_at(token, now)
    }
}
