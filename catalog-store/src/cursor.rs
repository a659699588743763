//! Pagination cursor codec.
//!
//! A cursor is the id of the last product on the previous page, written as
//! 8 little-endian bytes and then standard (padded) base64. The empty string
//! means "no cursor" and is never decoded.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::StoreError;

/// Width of the decoded cursor payload.
const CURSOR_LEN: usize = 8;

/// Encode a product id into an opaque cursor token.
pub fn encode_cursor(id: i64) -> String {
    STANDARD.encode(id.to_le_bytes())
}

/// Decode a cursor token.
///
/// Returns `Ok(None)` for the empty token (start of the collection).
///
/// # Errors
/// `StoreError::InvalidCursor` when the token is not base64 or does not
/// decode to exactly eight bytes.
pub fn decode_cursor(token: &str) -> Result<Option<i64>, StoreError> {
    if token.is_empty() {
        return Ok(None);
    }

    let bytes = STANDARD
        .decode(token)
        .map_err(|e| StoreError::InvalidCursor(format!("not base64: {}", e)))?;

    let raw: [u8; CURSOR_LEN] = bytes.as_slice().try_into().map_err(|_| {
        StoreError::InvalidCursor(format!(
            "expected {} bytes, got {}",
            CURSOR_LEN,
            bytes.len()
        ))
    })?;

    Ok(Some(i64::from_le_bytes(raw)))
}

// =============================================================================
// Tests
// =============================================================================
