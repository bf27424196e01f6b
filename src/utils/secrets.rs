//! Masking of secrets for log output.

/// Number of leading characters left visible by [`mask_secret`].
const VISIBLE_PREFIX: usize = 4;

/// Masks a secret for logging, keeping only a short prefix.
///
/// - `GOCSPX-abcdef` → `GOCS***`
/// - `abc` → `***`
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= VISIBLE_PREFIX * 2 {
        return "***".to_string();
    }

    let prefix: String = secret.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}***")
}
