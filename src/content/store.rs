//! Content Document Store
//! Mission: Generic per-collection CRUD over JSON documents in SQLite
//!
//! Route handlers only reach this store after the authorization gate has
//! passed (public reads excepted). Documents are stored as one JSON blob
//! per row; updates are shallow merges so only provided fields change.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use uuid::Uuid;

/// Collection names, one per entity type.
pub mod collections {
    pub const SKILLS: &str = "skills";
    pub const PROJECTS: &str = "projects";
    pub const EDUCATION: &str = "education";
    pub const EXPERIENCE: &str = "experience";
    pub const LEARNING_JOURNEY: &str = "learning_journey";
    pub const CONTACT_MESSAGES: &str = "contact_messages";
}

/// Singleton document names.
pub mod singletons {
    pub const PROFILE: &str = "profile";
    pub const CONTACT_SECTION: &str = "contact_section";
    pub const FOOTER: &str = "footer";
}

/// Document storage with SQLite backend.
pub struct ContentStore {
    db_path: String,
}

impl ContentStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS singletons (
                name TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Insert a new document with a generated id. The id and timestamps
    /// are injected into the stored JSON so reads are self-describing.
    pub fn insert(&self, collection: &str, mut doc: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(collection, &id, &mut doc)?;
        Ok(id)
    }

    /// Insert (or replace) a document under a caller-chosen id. Used for
    /// naturally-keyed collections like skills categories.
    pub fn upsert(&self, collection: &str, id: &str, mut doc: Value) -> Result<()> {
        self.insert_with_id(collection, id, &mut doc)
    }

    fn insert_with_id(&self, collection: &str, id: &str, doc: &mut Value) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        if let Some(map) = doc.as_object_mut() {
            map.insert("id".to_string(), Value::String(id.to_string()));
            map.entry("createdAt".to_string())
                .or_insert_with(|| Value::String(now.clone()));
            map.insert("updatedAt".to_string(), Value::String(now.clone()));
        }

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT OR REPLACE INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![collection, id, doc.to_string(), now, now],
        )
        .with_context(|| format!("Failed to insert document into {}", collection))?;

        Ok(())
    }

    /// All documents in a collection, oldest first.
    pub fn get_all(&self, collection: &str) -> Result<Vec<Value>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT data FROM documents WHERE collection = ?1 ORDER BY created_at",
        )?;

        let docs = stmt
            .query_map(params![collection], |row| {
                let data: String = row.get(0)?;
                Ok(data)
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|data| serde_json::from_str(&data).ok())
            .collect();

        Ok(docs)
    }

    /// One document by id.
    pub fn get_one(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let conn = Connection::open(&self.db_path)?;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.and_then(|d| serde_json::from_str(&d).ok()))
    }

    /// Shallow-merge `patch` into an existing document and bump its
    /// `updatedAt`. Returns false if the document does not exist.
    pub fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<bool> {
        let Some(mut doc) = self.get_one(collection, id)? else {
            return Ok(false);
        };

        let now = Utc::now().to_rfc3339();
        if let (Some(target), Some(fields)) = (doc.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
            // id is structural, never patchable
            target.insert("id".to_string(), Value::String(id.to_string()));
            target.insert("updatedAt".to_string(), Value::String(now.clone()));
        }

        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "UPDATE documents SET data = ?1, updated_at = ?2
             WHERE collection = ?3 AND id = ?4",
            params![doc.to_string(), now, collection, id],
        )?;

        Ok(rows > 0)
    }

    /// Delete one document. Returns false if nothing matched.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(rows > 0)
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Replace a singleton document wholesale.
    pub fn put_singleton(&self, name: &str, mut doc: Value) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        if let Some(map) = doc.as_object_mut() {
            map.insert("updatedAt".to_string(), Value::String(now.clone()));
        }

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT OR REPLACE INTO singletons (name, data, updated_at)
             VALUES (?1, ?2, ?3)",
            params![name, doc.to_string(), now],
        )
        .with_context(|| format!("Failed to write singleton {}", name))?;

        Ok(())
    }

    /// Fetch a singleton document, if it has ever been written.
    pub fn get_singleton(&self, name: &str) -> Result<Option<Value>> {
        let conn = Connection::open(&self.db_path)?;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM singletons WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.and_then(|d| serde_json::from_str(&d).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ContentStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ContentStore::new(temp_file.path().to_str().unwrap()).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_insert_assigns_id_and_timestamps() {
        let (store, _temp) = create_test_store();

        let id = store
            .insert(collections::PROJECTS, json!({"title": "Portfolio"}))
            .unwrap();

        let doc = store.get_one(collections::PROJECTS, &id).unwrap().unwrap();
        assert_eq!(doc["id"], id.as_str());
        assert_eq!(doc["title"], "Portfolio");
        assert!(doc.get("createdAt").is_some());
        assert!(doc.get("updatedAt").is_some());
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let (store, _temp) = create_test_store();

        let id = store
            .insert(
                collections::PROJECTS,
                json!({"title": "Old", "status": "completed", "year": 2024}),
            )
            .unwrap();

        let changed = store
            .update(collections::PROJECTS, &id, &json!({"title": "New"}))
            .unwrap();
        assert!(changed);

        let doc = store.get_one(collections::PROJECTS, &id).unwrap().unwrap();
        assert_eq!(doc["title"], "New");
        assert_eq!(doc["status"], "completed");
        assert_eq!(doc["year"], 2024);
    }

    #[test]
    fn test_update_missing_document_returns_false() {
        let (store, _temp) = create_test_store();
        let changed = store
            .update(collections::PROJECTS, "no-such-id", &json!({"title": "x"}))
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_delete_and_count() {
        let (store, _temp) = create_test_store();

        let id = store
            .insert(collections::EDUCATION, json!({"degree": "BSc"}))
            .unwrap();
        store
            .insert(collections::EDUCATION, json!({"degree": "MSc"}))
            .unwrap();

        assert_eq!(store.count(collections::EDUCATION).unwrap(), 2);
        assert!(store.delete(collections::EDUCATION, &id).unwrap());
        assert!(!store.delete(collections::EDUCATION, &id).unwrap());
        assert_eq!(store.count(collections::EDUCATION).unwrap(), 1);
    }

    #[test]
    fn test_collections_are_isolated() {
        let (store, _temp) = create_test_store();

        store
            .insert(collections::PROJECTS, json!({"title": "p"}))
            .unwrap();
        assert!(store.get_all(collections::EXPERIENCE).unwrap().is_empty());
    }

    #[test]
    fn test_singleton_replace() {
        let (store, _temp) = create_test_store();

        assert!(store.get_singleton(singletons::PROFILE).unwrap().is_none());

        store
            .put_singleton(singletons::PROFILE, json!({"name": "First"}))
            .unwrap();
        store
            .put_singleton(singletons::PROFILE, json!({"name": "Second"}))
            .unwrap();

        let doc = store.get_singleton(singletons::PROFILE).unwrap().unwrap();
        assert_eq!(doc["name"], "Second");
        assert!(doc.get("updatedAt").is_some());
    }

    #[test]
    fn test_upsert_with_natural_key() {
        let (store, _temp) = create_test_store();

        store
            .upsert(
                collections::SKILLS,
                "backend",
                json!({"category": "backend", "skills": [{"name": "Rust", "proficiency": 80}]}),
            )
            .unwrap();
        store
            .upsert(
                collections::SKILLS,
                "backend",
                json!({"category": "backend", "skills": []}),
            )
            .unwrap();

        let all = store.get_all(collections::SKILLS).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0]["skills"].as_array().unwrap().is_empty());
    }
}
