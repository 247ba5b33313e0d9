//! Webhook signature verification.
//!
//! The payment provider signs every webhook delivery with a timestamped
//! HMAC scheme: the header carries a timestamp `t` and one or more `v1`
//! hex digests (more than one while a signing secret rotation is in
//! flight). The signed message is the literal byte string
//! `"{t}.{body}"`, so the raw timestamp text and the raw body bytes
//! must both reach this module unmodified.
//!
//! Verification is a boolean question and never fails the caller: any
//! malformed header, absent component, or non-matching digest is simply
//! `false`.
//!
//! No timestamp freshness window is enforced here. Replay of a captured
//! delivery within HTTPS therefore verifies; see `DESIGN.md` for the
//! recorded trade-off.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Parsed signature header components.
///
/// The header format is comma-separated `key=value` pairs:
///
/// ```text
/// t=<timestamp>,v1=<hex digest>[,v1=<hex digest>...]
/// ```
///
/// Unknown keys are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Timestamp exactly as it appeared in the header. Kept as text
    /// because the signed payload interpolates these bytes verbatim;
    /// reformatting (e.g. dropping a leading zero) would change the
    /// message being authenticated.
    pub timestamp: String,

    /// Every `v1` digest candidate, hex text as received.
    pub candidates: Vec<String>,
}

impl SignatureHeader {
    /// Parse a signature header.
    ///
    /// Returns `None` when the timestamp is missing or non-decimal, or
    /// when no `v1` candidate is present. Parts without a `=` and keys
    /// other than `t`/`v1` are skipped.
    pub fn parse(header: &str) -> Option<Self> {
        let mut timestamp: Option<String> = None;
        let mut candidates: Vec<String> = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "t" => {
                    let value = value.trim();
                    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
                        return None;
                    }
                    timestamp = Some(value.to_string());
                }
                "v1" => candidates.push(value.trim().to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp?;
        if candidates.is_empty() {
            return None;
        }
        Some(Self {
            timestamp,
            candidates,
        })
    }
}

/// Verifies webhook deliveries against the signing secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl WebhookVerifier {
    /// Create a verifier for the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a raw webhook body against its signature header.
    ///
    /// Computes HMAC-SHA256 over `"{t}.{body}"`, hex-encodes it, and
    /// compares against **every** `v1` candidate in constant time,
    /// accumulating matches without short-circuiting. Returns `true` if
    /// any candidate matches; `false` for a missing or malformed header,
    /// no candidates, or no match. Never panics.
    pub fn verify(&self, payload: &[u8], header: Option<&str>) -> bool {
        let Some(header) = header else {
            return false;
        };
        let Some(parsed) = SignatureHeader::parse(header) else {
            return false;
        };

        let expected = self.compute_signature(&parsed.timestamp, payload);

        let mut matched = false;
        for candidate in &parsed.candidates {
            matched |= constant_time_compare(expected.as_bytes(), candidate.as_bytes());
        }
        matched
    }

    /// HMAC-SHA256 over `"{timestamp}.{payload}"`, hex-encoded.
    fn compute_signature(&self, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Compute a valid signature for test payloads.
    #[cfg(test)]
    pub fn compute_test_signature(secret: &str, timestamp: &str, payload: &[u8]) -> String {
        WebhookVerifier::new(secret).compute_signature(timestamp, payload)
    }
}

/// Constant-time byte comparison.
///
/// Length check first, then a full-width comparison that inspects every
/// byte regardless of where the first mismatch sits.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
