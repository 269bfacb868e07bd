//! Reusable input validators for request payloads.

use crate::error::{CommonError, CommonResult};

/// Length of a tenant (store) identifier.
pub const STORE_ID_LEN: usize = 6;

/// Validate a store identifier: exactly six lowercase alphanumeric chars.
pub fn validate_store_id(id: &str) -> CommonResult<()> {
    if id.len() != STORE_ID_LEN {
        return Err(CommonError::InvalidInput(format!(
            "store id must be {STORE_ID_LEN} characters"
        )));
    }
    if !id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        return Err(CommonError::InvalidInput(
            "store id must be lowercase alphanumeric".to_string(),
        ));
    }
    Ok(())
}

/// Validate an email address.
///
/// Intentionally loose: a non-empty local part and domain around a single
/// `@`. Provider-side data remains canonical.
pub fn validate_email(email: &str) -> CommonResult<()> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(CommonError::InvalidInput(format!("invalid email address: {trimmed}"))),
    }
}

/// Return the trimmed value if non-empty, `None` otherwise.
///
/// Credential resolution treats whitespace-only settings as "not
/// configured", so every secret read goes through this helper.
pub fn non_empty_trimmed(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
