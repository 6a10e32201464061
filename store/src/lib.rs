//! Persistence adapter for puzzles. The core stays free of storage types;
//! this crate maps [`PuzzleSnapshot`]s to opaque encoded blobs keyed by
//! puzzle id. The in-memory store is the reference backend; a host embeds
//! it behind whatever durable storage it has.

use std::collections::HashMap;

use rand::Rng;

use kakera_core::{decode, encode, CoreError, PuzzleSnapshot};

pub const PUZZLE_ID_LEN: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested puzzle id is not in the store. Callers redirect or
    /// reset; there is nothing to retry.
    #[error("puzzle {id} not found")]
    Miss { id: String },
    #[error("snapshot codec: {0}")]
    Codec(String),
}

fn codec_err(err: CoreError) -> StoreError {
    StoreError::Codec(err.to_string())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, snapshot: &PuzzleSnapshot) -> Result<(), StoreError> {
        let bytes = encode(snapshot).map_err(codec_err)?;
        self.entries.insert(snapshot.id.clone(), bytes);
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<PuzzleSnapshot, StoreError> {
        let bytes = self.entries.get(id).ok_or_else(|| StoreError::Miss {
            id: id.to_string(),
        })?;
        decode(bytes).map_err(codec_err)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::Miss {
                id: id.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Fresh lowercase-letter puzzle id, regenerated until it is unused.
    pub fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id: String = (0..PUZZLE_ID_LEN)
                .map(|_| (b'a' + rng.gen_range(0..26u8)) as char)
                .collect();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kakera_core::{best_grid, ImageRef, PuzzleSession};

    fn sample_snapshot(id: &str) -> PuzzleSnapshot {
        let spec = best_grid(300, 200).unwrap();
        let session = PuzzleSession::create(
            id,
            ImageRef::BuiltIn {
                slug: "meadow".into(),
            },
            300,
            200,
            spec,
            7,
        );
        session.snapshot()
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let snapshot = sample_snapshot("abcdefghij");
        store.save(&snapshot).unwrap();
        let loaded = store.load("abcdefghij").unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn missing_id_is_a_miss() {
        let store = MemoryStore::new();
        match store.load("nosuchpuzz") {
            Err(StoreError::Miss { id }) => assert_eq!(id, "nosuchpuzz"),
            other => panic!("expected miss, got {other:?}"),
        }
    }

    #[test]
    fn delete_removes_entry() {
        let mut store = MemoryStore::new();
        let snapshot = sample_snapshot("abcdefghij");
        store.save(&snapshot).unwrap();
        store.delete("abcdefghij").unwrap();
        assert!(!store.contains("abcdefghij"));
        assert!(matches!(
            store.delete("abcdefghij"),
            Err(StoreError::Miss { .. })
        ));
    }

    #[test]
    fn generated_ids_are_lowercase_letters() {
        let store = MemoryStore::new();
        let id = store.generate_id();
        assert_eq!(id.len(), PUZZLE_ID_LEN);
        assert!(id.bytes().all(|b| b.is_ascii_lowercase()));
    }
}
