use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric, rngs::OsRng};

use crate::error::{AppError, Result};
use crate::models::note::{Note, NoteMeta};
use crate::render::render_markdown;
use crate::store::KeyValueStore;
use crate::validation::notes::{validate_content, validate_note_id, validate_title};

/// Key prefix for full note records.
const NOTE_PREFIX: &str = "note:";
/// Key prefix for the metadata projections used by listing and navigation.
const META_PREFIX: &str = "notemeta:";
/// Length of generated note ids.
const NOTE_ID_LEN: usize = 8;

fn note_key(id: &str) -> String {
    format!("{}{}", NOTE_PREFIX, id)
}

fn meta_key(id: &str) -> String {
    format!("{}{}", META_PREFIX, id)
}

/// Generates a new note id: random alphanumeric, independently drawn from a
/// CSPRNG. No shared counter, so concurrent creates cannot collide on the
/// id source.
fn generate_note_id() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(NOTE_ID_LEN)
        .map(char::from)
        .collect()
}

/// Persists a note and its metadata projection under their keys.
async fn persist(store: &dyn KeyValueStore, note: &Note) -> Result<()> {
    let note_bytes = sonic_rs::to_vec(note)
        .map_err(|e| AppError::Internal(format!("Note serialization failed: {}", e)))?;
    let meta_bytes = sonic_rs::to_vec(&note.meta())
        .map_err(|e| AppError::Internal(format!("Note metadata serialization failed: {}", e)))?;

    store.put(&note_key(&note.id), &note_bytes, None).await?;
    store.put(&meta_key(&note.id), &meta_bytes, None).await?;
    Ok(())
}

/// Creates a new note.
///
/// The Markdown source is rendered and sanitized before the write, and the
/// full record and its metadata projection are persisted together.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `title` - The note title.
/// * `content` - The raw Markdown source.
///
/// # Returns
///
/// A `Result` containing the stored `Note` including its rendered body.
pub async fn create(store: &dyn KeyValueStore, title: &str, content: &str) -> Result<Note> {
    validate_title(title)?;
    validate_content(content)?;

    let now = Utc::now();
    let note = Note {
        id: generate_note_id(),
        title: title.to_string(),
        content: content.to_string(),
        rendered_body: render_markdown(content),
        created_at: now,
        updated_at: now,
    };

    persist(store, &note).await?;
    Ok(note)
}

/// Fetches a note by id. `None` is the normal "not found" outcome, distinct
/// from store failures.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `id` - The note id.
///
/// # Returns
///
/// A `Result` containing an `Option<Note>`.
pub async fn get(store: &dyn KeyValueStore, id: &str) -> Result<Option<Note>> {
    validate_note_id(id)?;

    match store.get(&note_key(id)).await? {
        Some(bytes) => {
            let note = sonic_rs::from_slice(&bytes)
                .map_err(|e| AppError::Internal(format!("Corrupt note record: {}", e)))?;
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

/// Updates a note, recomputing the rendered body and `updated_at`.
///
/// `created_at` is preserved from the existing record. When no record exists
/// under `id` this behaves as a create with the supplied id (documented
/// upsert semantics), with `created_at` falling back to now.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `id` - The note id.
/// * `title` - The new title.
/// * `content` - The new Markdown source.
///
/// # Returns
///
/// A `Result` containing the stored `Note`.
pub async fn update(
    store: &dyn KeyValueStore,
    id: &str,
    title: &str,
    content: &str,
) -> Result<Note> {
    validate_note_id(id)?;
    validate_title(title)?;
    validate_content(content)?;

    let now = Utc::now();
    let created_at = match get(store, id).await? {
        Some(existing) => existing.created_at,
        None => now,
    };

    let note = Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        rendered_body: render_markdown(content),
        created_at,
        updated_at: now,
    };

    persist(store, &note).await?;
    Ok(note)
}

/// Deletes a note and its metadata projection.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `id` - The note id.
///
/// # Returns
///
/// A `Result` containing whether a record existed and was removed. Deleting
/// an absent id reports `false`, not a failure.
pub async fn delete(store: &dyn KeyValueStore, id: &str) -> Result<bool> {
    validate_note_id(id)?;

    let existed = store.delete(&note_key(id)).await?;
    store.delete(&meta_key(id)).await?;
    Ok(existed)
}

/// Lists all note metadata, newest first.
///
/// The order is recomputed from the full metadata set on every call:
/// `created_at` descending, ties broken by id ascending so the comparator is
/// deterministic across runs.
///
/// # Arguments
///
/// * `store` - The key-value store.
///
/// # Returns
///
/// A `Result` containing the ordered `Vec<NoteMeta>`.
pub async fn list_all(store: &dyn KeyValueStore) -> Result<Vec<NoteMeta>> {
    let mut metas = Vec::new();
    for bytes in store.list(META_PREFIX).await? {
        let meta: NoteMeta = sonic_rs::from_slice(&bytes)
            .map_err(|e| AppError::Internal(format!("Corrupt note metadata: {}", e)))?;
        metas.push(meta);
    }

    metas.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    // An at-least-once store listing can yield the same entry twice;
    // identical records sort adjacent, so one pass removes the repeats.
    metas.dedup_by(|a, b| a.id == b.id);

    Ok(metas)
}

/// Fetches the most recently created note, or `None` when no notes exist.
///
/// # Arguments
///
/// * `store` - The key-value store.
///
/// # Returns
///
/// A `Result` containing an `Option<Note>`.
pub async fn latest(store: &dyn KeyValueStore) -> Result<Option<Note>> {
    let metas = list_all(store).await?;
    match metas.first() {
        Some(meta) => get(store, &meta.id).await,
        None => Ok(None),
    }
}

/// Returns the id of the next-older note in the order, or `None` at the
/// boundary or when `id` itself is not present.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `id` - The reference note id.
///
/// # Returns
///
/// A `Result` containing an `Option<String>`.
pub async fn previous_of(store: &dyn KeyValueStore, id: &str) -> Result<Option<String>> {
    let metas = list_all(store).await?;
    let Some(pos) = metas.iter().position(|m| m.id == id) else {
        return Ok(None);
    };
    Ok(metas.get(pos + 1).map(|m| m.id.clone()))
}

/// Returns the id of the next-newer note in the order, or `None` at the
/// boundary or when `id` itself is not present.
///
/// # Arguments
///
/// * `store` - The key-value store.
/// * `id` - The reference note id.
///
/// # Returns
///
/// A `Result` containing an `Option<String>`.
pub async fn next_of(store: &dyn KeyValueStore, id: &str) -> Result<Option<String>> {
    let metas = list_all(store).await?;
    let Some(pos) = metas.iter().position(|m| m.id == id) else {
        return Ok(None);
    };
    match pos.checked_sub(1) {
        Some(newer) => Ok(metas.get(newer).map(|m| m.id.clone())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_fixed_length_alphanumeric() {
        for _ in 0..100 {
            let id = generate_note_id();
            assert_eq!(id.len(), NOTE_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(validate_note_id(&id).is_ok());
        }
    }
}
