use rand::rngs::OsRng;
use rand::RngCore;

/// Opaque account identifier source.
///
/// Draws bytes from the operating system CSPRNG and renders them as lowercase hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGenerator;

impl IdentityGenerator {
    /// Number of random bytes per identity.
    pub const BYTES: usize = 16;

    pub fn new() -> Self {
        Self
    }

    /// Generate a new identity.
    ///
    /// # Returns
    /// 32 character lowercase hex string
    ///
    /// # Panics
    /// If the operating system entropy source is unavailable. Issuing a
    /// predictable identifier is never an acceptable fallback.
    pub fn new_identity(&self) -> String {
        let mut bytes = [0u8; Self::BYTES];
        if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
            panic!("operating system entropy source unavailable: {e}");
        }
        hex::encode(bytes)
    }
}
