//! HMAC signature generation and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs webhook payloads with a destination's secret.
///
/// The signature is an HMAC-SHA256 over exactly the bytes transmitted in the
/// request body, hex-encoded lowercase. Destinations recompute it from the
/// body they received and compare against the `X-Signature` header.
pub struct WebhookSigner {
    secret: String,
}

impl WebhookSigner {
    /// Creates a new signer with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Generates the hex signature for the given payload bytes.
    ///
    /// Deterministic: the same payload and secret always produce the same
    /// signature.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a signature against the payload.
    pub fn verify(&self, signature: &str, payload: &[u8]) -> bool {
        constant_time_compare(&self.sign(payload), signature)
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
