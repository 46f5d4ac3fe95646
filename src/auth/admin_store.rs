//! Credential Store
//! Mission: Persist admin identities with SQLite

use crate::auth::models::{AdminIdentity, AdminRole};
use crate::auth::password;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{info, warn};

/// Admin identity storage with SQLite backend.
pub struct AdminStore {
    db_path: String,
}

impl AdminStore {
    /// Create the store and initialize the schema.
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
            "CREATE TABLE IF NOT EXISTS admins (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                profile_image TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a default superadmin if no admin exists yet.
    ///
    /// Gives a fresh deployment a way in; every later account is created
    /// through the API by an authenticated admin.
    pub fn seed_default(&self, username: &str, plaintext_password: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
            .context("Failed to check for existing admins")?;

        if count == 0 {
            let password_hash = password::hash_password(plaintext_password)?;
            conn.execute(
                "INSERT INTO admins (username, password_hash, name, profile_image, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    username,
                    password_hash,
                    "Administrator",
                    "",
                    AdminRole::Superadmin.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("Failed to insert seed admin")?;

            info!("🔐 Default superadmin created (username: {})", username);
            warn!("⚠️  CHANGE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    fn row_to_identity(row: &Row<'_>) -> rusqlite::Result<AdminIdentity> {
        let role_str: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;
        Ok(AdminIdentity {
            username: row.get(0)?,
            password_hash: row.get(1)?,
            name: row.get(2)?,
            profile_image: row.get(3)?,
            role: AdminRole::from_str(&role_str).unwrap_or(AdminRole::Admin),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    /// Look up one admin by username.
    pub fn get(&self, username: &str) -> Result<Option<AdminIdentity>> {
        let conn = Connection::open(&self.db_path)?;

        let identity = conn
            .query_row(
                "SELECT username, password_hash, name, profile_image, role, created_at
                 FROM admins WHERE username = ?1",
                params![username],
                Self::row_to_identity,
            )
            .optional()?;

        Ok(identity)
    }

    /// Insert a new admin. Fails if the username is already taken;
    /// callers pre-check with [`AdminStore::get`] to report a clean 400.
    pub fn create(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
        profile_image: &str,
        role: AdminRole,
    ) -> Result<AdminIdentity> {
        let identity = AdminIdentity {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
            profile_image: profile_image.to_string(),
            role,
            created_at: Utc::now(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO admins (username, password_hash, name, profile_image, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                identity.username,
                identity.password_hash,
                identity.name,
                identity.profile_image,
                identity.role.as_str(),
                identity.created_at.to_rfc3339(),
            ],
        )
        .context("Failed to insert admin")?;

        info!("✅ Created admin: {} ({})", identity.username, role.as_str());

        Ok(identity)
    }

    /// List all admins.
    pub fn list(&self) -> Result<Vec<AdminIdentity>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT username, password_hash, name, profile_image, role, created_at
             FROM admins ORDER BY created_at",
        )?;

        let admins = stmt
            .query_map([], Self::row_to_identity)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(admins)
    }

    /// Delete an admin by username. Returns false if nothing matched.
    pub fn delete(&self, username: &str) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM admins WHERE username = ?1",
            params![username],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Deleted admin: {}", username);
        }

        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (AdminStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = AdminStore::new(db_path).unwrap();
        store.seed_default("admin", "admin123").unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_seed_creates_superadmin_once() {
        let (store, _temp) = create_test_store();

        let admin = store.get("admin").unwrap().unwrap();
        assert_eq!(admin.role, AdminRole::Superadmin);
        assert!(password::verify_password("admin123", &admin.password_hash));

        // A second seed run must not add another account.
        store.seed_default("other", "pw").unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(store.get("other").unwrap().is_none());
    }

    #[test]
    fn test_create_and_get() {
        let (store, _temp) = create_test_store();

        let hash = password::hash_password("pw").unwrap();
        store
            .create("editor", &hash, "Editor", "/static/e.png", AdminRole::Admin)
            .unwrap();

        let fetched = store.get("editor").unwrap().unwrap();
        assert_eq!(fetched.name, "Editor");
        assert_eq!(fetched.role, AdminRole::Admin);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (store, _temp) = create_test_store();

        let hash = password::hash_password("pw").unwrap();
        store
            .create("editor", &hash, "Editor", "", AdminRole::Admin)
            .unwrap();

        let duplicate = store.create("editor", &hash, "Other", "", AdminRole::Admin);
        assert!(duplicate.is_err());

        // Original record untouched.
        assert_eq!(store.get("editor").unwrap().unwrap().name, "Editor");
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_test_store();

        let hash = password::hash_password("pw").unwrap();
        store
            .create("temp", &hash, "Temp", "", AdminRole::Admin)
            .unwrap();

        assert!(store.delete("temp").unwrap());
        assert!(store.get("temp").unwrap().is_none());
        assert!(!store.delete("temp").unwrap());
    }
}
