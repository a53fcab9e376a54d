use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::IssuedToken;
use super::claims::VerifiedToken;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). Tokens are self-certifying: verification
/// re-derives validity from the signature and the embedded expiry and never
/// consults external state, so there is no server-side revocation.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `identity` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range or signing failed
    pub fn issue(&self, identity: &str, ttl: Duration) -> Result<IssuedToken, JwtError> {
        self.issue_at(identity, ttl, Utc::now())
    }

    /// Issue a token as if the current instant were `now`.
    pub fn issue_at(
        &self,
        identity: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = now
            .checked_add_signed(ttl)
            .map(|expires_at| Claims::new(identity, expires_at))
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiration out of range".to_string()))?;

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token against the current instant.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed into the expected shape
    /// * `InvalidSignature` - Signature does not match the signed segments
    /// * `Expired` - Current instant is at or after the expiry
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current instant were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, JwtError> {
        let (message, signature) = token
            .rsplit_once('.')
            .filter(|(message, _)| message.split('.').count() == 2)
            .ok_or_else(|| JwtError::Malformed("expected three segments".to_string()))?;

        // Signature first: any altered byte of header or payload must surface
        // as a signature mismatch, not as a decoding failure.
        let signature_matches =
            crypto::verify(signature, message.as_bytes(), &self.decoding_key, self.algorithm)
                .unwrap_or(false);
        if !signature_matches {
            return Err(JwtError::InvalidSignature);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Malformed(e.to_string()))?
            .claims;

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::Malformed("expiration out of range".to_string()))?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(VerifiedToken {
            identity: claims.id,
            expires_at,
        })
    }
}
