//! Value Objects for the Catalog Domain
//!
//! Validated inputs. Invariants are enforced at construction time.

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Title must contain at least one non-whitespace character
    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    /// Content must contain at least one non-whitespace character
    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

// =============================================================================
// ProductDraft
// =============================================================================

/// Caller-supplied fields for creating or updating a product.
///
/// # Invariants
/// - `title` is not empty or whitespace-only
/// - `content` is not empty or whitespace-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    title: String,
    content: String,
}

impl ProductDraft {
    /// Create a new draft with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTitle` or `DomainError::InvalidContent`
    /// if either field is blank.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(DomainError::InvalidTitle("title is required".to_string()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::InvalidContent("content is required".to_string()));
        }

        Ok(Self { title, content })
    }

    /// Product title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Product content
    pub fn content(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_valid() {
        let draft = ProductDraft::new("Keyboard", "Mechanical, 87 keys").unwrap();
        assert_eq!(draft.title(), "Keyboard");
        assert_eq!(draft.content(), "Mechanical, 87 keys");
    }

    #[test]
    fn test_draft_rejects_empty_title() {
        let err = ProductDraft::new("", "content").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTitle(_)));
    }

    #[test]
    fn test_draft_rejects_blank_content() {
        let err = ProductDraft::new("title", "   ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidContent(_)));
    }

    #[test]
    fn test_draft_title_checked_first() {
        let err = ProductDraft::new(" ", "").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTitle(_)));
    }
}
