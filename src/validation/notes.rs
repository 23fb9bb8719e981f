use crate::error::{AppError, Result};

/// The maximum accepted title length, in characters.
const MAX_TITLE_CHARS: usize = 200;
/// The maximum accepted Markdown source length, in bytes.
const MAX_CONTENT_BYTES: usize = 100_000;

/// Validates an admin-supplied note title.
///
/// # Arguments
///
/// * `title` - The title to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the title is valid.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }

    Ok(())
}

/// Validates admin-supplied Markdown content.
///
/// # Arguments
///
/// * `content` - The Markdown source to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the content is valid.
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("Content cannot be empty".to_string()));
    }

    if content.len() > MAX_CONTENT_BYTES {
        return Err(AppError::Validation(
            "Content is too large".to_string(),
        ));
    }

    Ok(())
}

/// Validates a note id as an opaque key.
///
/// Both legacy zero-padded numeric ids and current random alphanumeric ids
/// pass; the shape is never interpreted beyond character class and length.
///
/// # Arguments
///
/// * `id` - The note id to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the id is a well-formed key.
pub fn validate_note_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 32 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation("Invalid note id".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_title_and_content() {
        assert!(validate_title("  ").is_err());
        assert!(validate_content("\n").is_err());
        assert!(validate_title("Hello").is_ok());
        assert!(validate_content("# Hi").is_ok());
    }

    #[test]
    fn accepts_legacy_and_random_ids_alike() {
        assert!(validate_note_id("000042").is_ok());
        assert!(validate_note_id("a8Xk2mQ9").is_ok());
        assert!(validate_note_id("").is_err());
        assert!(validate_note_id("../etc/passwd").is_err());
        assert!(validate_note_id(&"x".repeat(33)).is_err());
    }
}
