//! Authentication utilities library
//!
//! Provides the credential lifecycle used by the library service:
//! - Password digests (SHA-256, constant-time comparison)
//! - Opaque account identities (OS CSPRNG, hex)
//! - JWT bearer token issuance and verification (HS256)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Digests
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password");
//! assert!(hasher.verify("my_password", &digest));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let issued = handler.issue("user123", Duration::minutes(30)).unwrap();
//! let verified = handler.verify(&issued.token).unwrap();
//! assert_eq!(verified.identity, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! // Register: digest password, mint identity
//! let digest = auth.hash_password("password123");
//! let identity = auth.new_identity();
//!
//! // Login: verify and generate token
//! let issued = auth.authenticate("password123", &digest, &identity).unwrap();
//!
//! // Validate token
//! let verified = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(verified.identity, identity);
//! ```

pub mod authenticator;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use identity::IdentityGenerator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::VerifiedToken;
pub use password::PasswordHasher;
