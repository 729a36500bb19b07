// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Access audit trail: append-only SQLite log of gate and policy events.
//
// Schema:
//   access_audit(
//     id        INTEGER PRIMARY KEY AUTOINCREMENT,
//     timestamp TEXT    NOT NULL,   -- RFC 3339
//     action    TEXT    NOT NULL,   -- "password", "redirect", "pending_user"
//     subject   TEXT    NOT NULL,   -- peer address, path or user email
//     success   INTEGER NOT NULL,   -- 0 = denied/failed, 1 = allowed
//     details   TEXT
//   )

use std::path::Path;

use chrono::Utc;
use ehrdash_core::error::{EhrDashError, Result};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS access_audit (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT    NOT NULL,
    action    TEXT    NOT NULL,
    subject   TEXT    NOT NULL,
    success   INTEGER NOT NULL,
    details   TEXT
);";

const SELECT_COLUMNS: &str = "SELECT id, timestamp, action, subject, success, details FROM access_audit";

fn db_err(e: rusqlite::Error) -> EhrDashError {
    EhrDashError::Database(e.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub action: String,
    pub subject: String,
    pub success: bool,
    pub details: Option<String>,
}

impl AuditEntry {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            action: row.get(2)?,
            subject: row.get(3)?,
            success: row.get::<_, i32>(4)? != 0,
            details: row.get(5)?,
        })
    }
}

pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `path`, in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;").map_err(db_err)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().map_err(db_err)?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        debug!("access audit opened");
        Ok(Self { conn })
    }

    #[instrument(skip(self, details), fields(%action, %subject, success))]
    pub fn record(
        &self,
        action: &str,
        subject: &str,
        success: bool,
        details: Option<&str>,
    ) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO access_audit (timestamp, action, subject, success, details)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![Utc::now().to_rfc3339(), action, subject, i32::from(success), details],
            )
            .map_err(db_err)?;
        Ok(())
    }

    /// All entries for `subject`, oldest first.
    pub fn entries_for_subject(&self, subject: &str) -> Result<Vec<AuditEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE subject = ?1 ORDER BY id ASC"))
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![subject], AuditEntry::from_row)
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<AuditEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1"))
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![limit], AuditEntry::from_row)
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM access_audit", [], |row| row.get(0))
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_log() -> AuditLog {
        AuditLog::open_in_memory().expect("open in-memory audit log")
    }

    #[test]
    fn record_and_count() {
        let log = make_log();
        assert_eq!(log.count().unwrap(), 0);
        log.record("password", "127.0.0.1", true, None).unwrap();
        log.record("password", "127.0.0.1", false, Some("bad password")).unwrap();
        assert_eq!(log.count().unwrap(), 2);
    }

    #[test]
    fn entries_for_subject_in_order() {
        let log = make_log();
        log.record("redirect", "/team", false, Some("/password")).unwrap();
        log.record("password", "10.0.0.2", true, None).unwrap();
        log.record("redirect", "/team", false, Some("/auth/pending")).unwrap();

        let entries = log.entries_for_subject("/team").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].details.as_deref(), Some("/password"));
        assert_eq!(entries[1].details.as_deref(), Some("/auth/pending"));
        assert!(!entries[0].success);
    }

    #[test]
    fn recent_entries_newest_first() {
        let log = make_log();
        for i in 0..5 {
            log.record("password", &format!("peer_{i}"), true, None).unwrap();
        }
        let recent = log.recent_entries(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].subject, "peer_4");
        assert!(recent[1].id > recent[2].id);
    }

    #[test]
    fn file_backed_log_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.db");
        {
            let log = AuditLog::open(&path).unwrap();
            log.record("pending_user", "new@example.com", true, None).unwrap();
        }
        let log = AuditLog::open(&path).unwrap();
        assert_eq!(log.count().unwrap(), 1);
        assert_eq!(
            log.entries_for_subject("new@example.com").unwrap()[0].action,
            "pending_user"
        );
    }
}
