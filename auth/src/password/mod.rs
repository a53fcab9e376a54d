pub mod sha256;

pub use sha256::PasswordHasher;
