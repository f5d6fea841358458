//! `X-Signature-256` verification.
//!
//! Callers sign the exact request body with HMAC-SHA256 and send
//! `X-Signature-256: sha256=<hex digest>`, the same scheme GitHub uses for
//! webhook deliveries.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::warn;

use crate::config::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// Name of the request header carrying the signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Length of a hex-encoded SHA-256 digest.
const HEX_DIGEST_LEN: usize = 64;

/// Why a request failed authentication.
///
/// All variants map to the same 401 response; the distinction only shows up
/// in logs through [`AuthFailure::reason`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("missing or malformed X-Signature-256 header")]
    MissingOrMalformedHeader,

    #[error("X-Signature-256 is not a 64 character hex digest")]
    InvalidHexDigest,

    #[error("signature digest mismatch")]
    DigestMismatch,
}

impl AuthFailure {
    /// Stable reason code for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingOrMalformedHeader => "missing_or_malformed_header",
            Self::InvalidHexDigest => "invalid_hex_digest",
            Self::DigestMismatch => "digest_mismatch",
        }
    }
}

/// Verifies request bodies against a fixed signing secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: SigningSecret,
}

impl SignatureVerifier {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Check `header` against `HMAC-SHA256(secret, body)`.
    ///
    /// `body` must be the bytes exactly as received on the wire.
    pub fn verify(&self, body: &[u8], header: Option<&str>) -> Result<(), AuthFailure> {
        let hex_digest = header
            .and_then(|h| h.strip_prefix(SIGNATURE_PREFIX))
            .ok_or(AuthFailure::MissingOrMalformedHeader)?
            .trim()
            .to_ascii_lowercase();

        let expected = decode_digest(&hex_digest)?;

        // verify_slice compares in constant time
        self.mac_for(body)
            .verify_slice(&expected)
            .map_err(|_| AuthFailure::DigestMismatch)
    }

    /// Produce the header value a caller would send for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let digest = self.mac_for(body).finalize().into_bytes();
        format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
    }

    fn mac_for(&self, body: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any length"));
        mac.update(body);
        mac
    }
}

/// Decode a lower-case hex digest into the 32 raw digest bytes.
fn decode_digest(hex_digest: &str) -> Result<[u8; 32], AuthFailure> {
    let well_formed = hex_digest.len() == HEX_DIGEST_LEN
        && hex_digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        warn!(digest_length = hex_digest.len(), "signature_invalid_hex");
        return Err(AuthFailure::InvalidHexDigest);
    }

    let mut digest = [0u8; 32];
    hex::decode_to_slice(hex_digest, &mut digest).map_err(|_| AuthFailure::InvalidHexDigest)?;
    Ok(digest)
}
