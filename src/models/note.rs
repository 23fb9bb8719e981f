use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted Markdown note.
///
/// `content` is the authoritative representation; `rendered_body` is always
/// recomputed from it on every write and is safe to emit into a page
/// unescaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Opaque identifier, assigned at creation, immutable thereafter.
    pub id: String,
    /// Admin-supplied title.
    pub title: String,
    /// Raw Markdown source.
    pub content: String,
    /// Sanitized HTML derived from `content`.
    pub rendered_body: String,
    /// Set once at creation, never changed.
    pub created_at: DateTime<Utc>,
    /// Set on every write.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight projection of a [`Note`] used for listing and ordering
/// without fetching full bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteMeta {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Returns the metadata projection stored alongside the full record.
    pub fn meta(&self) -> NoteMeta {
        NoteMeta {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
