//! Notification Storage
//! Mission: Append-only audit log of admin and security events

use crate::notifications::models::{Notification, NotificationType};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Notification log with SQLite backend. Process-wide, not tied to a
/// single admin.
pub struct NotificationStore {
    db_path: String,
}

impl NotificationStore {
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
            "CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                message TEXT NOT NULL,
                type TEXT NOT NULL,
                read INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_notifications_created_at
                ON notifications(created_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Append one event. Returns the new notification id.
    pub fn record(&self, message: &str, kind: NotificationType) -> Result<String> {
        self.record_with_read(message, kind, false)
    }

    /// Append one event with an explicit read flag. Used for events that
    /// would be pointless as unread, like "marked all as read".
    pub fn record_with_read(
        &self,
        message: &str,
        kind: NotificationType,
        read: bool,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO notifications (id, message, type, read, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                id,
                message,
                kind.as_str(),
                read as i64,
                Utc::now().to_rfc3339(),
            ],
        )
        .context("Failed to insert notification")?;

        Ok(id)
    }

    fn row_to_notification(row: &Row<'_>) -> rusqlite::Result<Notification> {
        let kind_str: String = row.get(2)?;
        let read: i64 = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        Ok(Notification {
            id: row.get(0)?,
            message: row.get(1)?,
            kind: NotificationType::from_str(&kind_str).unwrap_or(NotificationType::Info),
            read: read != 0,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    /// All notifications, newest first.
    pub fn list(&self) -> Result<Vec<Notification>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, message, type, read, created_at
             FROM notifications ORDER BY created_at DESC",
        )?;

        let notifications = stmt
            .query_map([], Self::row_to_notification)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notifications)
    }

    /// Flip one notification to read. Returns false if nothing matched.
    pub fn mark_read(&self, id: &str) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1",
            params![id],
        )?;
        Ok(rows > 0)
    }

    /// Flip everything to read. Returns how many rows changed.
    pub fn mark_all_read(&self) -> Result<usize> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute("UPDATE notifications SET read = 1 WHERE read = 0", [])?;
        Ok(rows)
    }

    /// Delete the entire feed. Returns how many rows were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute("DELETE FROM notifications", [])?;
        Ok(rows)
    }

    /// Delete one notification. Returns false if nothing matched.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute("DELETE FROM notifications WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    /// Count of unread notifications.
    pub fn count_unread(&self) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE read = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (NotificationStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = NotificationStore::new(temp_file.path().to_str().unwrap()).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_record_and_list_newest_first() {
        let (store, _temp) = create_test_store();

        store
            .record("first event", NotificationType::Info)
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .record("second event", NotificationType::Security)
            .unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "second event");
        assert_eq!(all[0].kind, NotificationType::Security);
        assert!(!all[0].read);
    }

    #[test]
    fn test_mark_one_read() {
        let (store, _temp) = create_test_store();

        let id = store.record("event", NotificationType::Update).unwrap();
        assert_eq!(store.count_unread().unwrap(), 1);

        assert!(store.mark_read(&id).unwrap());
        assert_eq!(store.count_unread().unwrap(), 0);

        assert!(!store.mark_read("no-such-id").unwrap());
    }

    #[test]
    fn test_mark_all_read_zeroes_unread_count() {
        let (store, _temp) = create_test_store();

        for i in 0..3 {
            store
                .record(&format!("event {}", i), NotificationType::Info)
                .unwrap();
        }
        assert_eq!(store.count_unread().unwrap(), 3);

        assert_eq!(store.mark_all_read().unwrap(), 3);
        assert_eq!(store.count_unread().unwrap(), 0);
    }

    #[test]
    fn test_clear_all_empties_feed() {
        let (store, _temp) = create_test_store();

        store.record("event", NotificationType::Error).unwrap();
        store.record("event", NotificationType::Delete).unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.count_unread().unwrap(), 0);
    }

    #[test]
    fn test_record_already_read() {
        let (store, _temp) = create_test_store();

        store
            .record_with_read("marked all as read", NotificationType::Info, true)
            .unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.count_unread().unwrap(), 0);
    }
}
