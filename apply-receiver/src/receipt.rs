//! Opaque receipts handed back for accepted submissions.

use std::fmt;

use serde::Serialize;

const RECEIPT_PREFIX: &str = "sub_";

/// `sub_` followed by 128 random bits, hex-encoded.
///
/// Receipts are not stored anywhere; they only let the caller confirm the
/// submission was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    pub fn generate() -> Self {
        let bits: [u8; 16] = rand::random();
        Receipt(format!("{}{}", RECEIPT_PREFIX, hex::encode(bits)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
