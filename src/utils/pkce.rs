//! Random OAuth `state` values and PKCE (RFC 7636) verifier/challenge pairs.

use crate::error::AppError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Random bytes behind a `state` value (22 characters once encoded).
const STATE_LENGTH_BYTES: usize = 16;

/// Random bytes behind a code verifier (43 characters once encoded, the
/// minimum length RFC 7636 allows).
const VERIFIER_LENGTH_BYTES: usize = 32;

/// PKCE secret and the challenge derived from it.
#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

/// Generates an opaque, URL-safe `state` value for a login attempt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_state() -> Result<String, AppError> {
    random_token::<STATE_LENGTH_BYTES>()
}

/// Generates a fresh PKCE verifier with its S256 challenge.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_pkce() -> Result<PkcePair, AppError> {
    let verifier = random_token::<VERIFIER_LENGTH_BYTES>()?;
    let challenge = challenge_for(&verifier);

    Ok(PkcePair {
        verifier,
        challenge,
    })
}

/// S256 challenge: base64url (no padding) of the verifier's SHA-256 digest.
pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

fn random_token<const N: usize>() -> Result<String, AppError> {
    let mut buffer = [0u8; N];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(URL_SAFE_NO_PAD.encode(buffer))
}
