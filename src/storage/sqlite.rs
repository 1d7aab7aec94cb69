//! SQLite storage backend

use super::traits::{RegistryStore, StorageError, StorageResult, StoreOp};
use crate::catalog::{describe, RecordKind};
use crate::record::{FieldValue, Record, RecordId};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed registry store
///
/// One table keyed by identifier; the field map is stored as a JSON
/// column. Thread-safe via an internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                identifier TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                name TEXT,
                fields_json TEXT NOT NULL,
                populated INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX IF NOT EXISTS idx_records_kind ON records(kind);
            "#,
        )?;
        Ok(())
    }

    fn upsert_in(conn: &Connection, record: &Record) -> StorageResult<()> {
        let fields_json = serde_json::to_string(&record.fields)?;
        conn.execute(
            r#"
            INSERT INTO records (identifier, kind, name, fields_json, populated)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(identifier) DO UPDATE SET
                kind = excluded.kind,
                name = excluded.name,
                fields_json = excluded.fields_json,
                populated = excluded.populated
            "#,
            params![
                record.id.as_str(),
                record.kind.as_str(),
                record.name,
                fields_json,
                record.populated,
            ],
        )?;
        Ok(())
    }

    fn row_to_record(
        identifier: String,
        kind: String,
        name: Option<String>,
        fields_json: String,
        populated: bool,
    ) -> StorageResult<Record> {
        let kind: RecordKind = describe(&kind)
            .map(|d| d.kind)
            .ok_or(StorageError::UnknownKind(kind))?;
        let fields: BTreeMap<String, FieldValue> = serde_json::from_str(&fields_json)?;
        Ok(Record {
            id: RecordId::from(identifier),
            kind,
            name,
            fields,
            populated,
        })
    }
}

impl RegistryStore for SqliteStore {
    fn get(&self, id: &RecordId) -> StorageResult<Option<Record>> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, String, Option<String>, String, bool)> = conn
            .query_row(
                "SELECT identifier, kind, name, fields_json, populated
                 FROM records WHERE identifier = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((identifier, kind, name, fields_json, populated)) => Ok(Some(
                Self::row_to_record(identifier, kind, name, fields_json, populated)?,
            )),
            None => Ok(None),
        }
    }

    fn upsert(&self, record: &Record) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        Self::upsert_in(&conn, record)
    }

    fn delete(&self, id: &RecordId) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute(
            "DELETE FROM records WHERE identifier = ?1",
            params![id.as_str()],
        )?;
        Ok(affected > 0)
    }

    fn all(&self) -> StorageResult<Vec<Record>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT identifier, kind, name, fields_json, populated
             FROM records ORDER BY identifier",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, bool>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (identifier, kind, name, fields_json, populated) = row?;
            records.push(Self::row_to_record(
                identifier,
                kind,
                name,
                fields_json,
                populated,
            )?);
        }
        Ok(records)
    }

    fn len(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn apply(&self, batch: &[StoreOp]) -> StorageResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        for op in batch {
            match op {
                StoreOp::Upsert(record) => Self::upsert_in(&tx, record)?,
                StoreOp::Delete(id) => {
                    tx.execute(
                        "DELETE FROM records WHERE identifier = ?1",
                        params![id.as_str()],
                    )?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordKind;

    fn ellipsoid() -> Record {
        let mut record = Record::placeholder(
            RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"),
            RecordKind::Ellipsoid,
        );
        record.name = Some("WGS 84".to_string());
        record
            .fields
            .insert("semiMajorAxis".to_string(), FieldValue::Number(6378137.0));
        record.populated = true;
        record
    }

    #[test]
    fn upsert_and_get_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let record = ellipsoid();

        store.upsert(&record).unwrap();
        let loaded = store.get(&record.id).unwrap().unwrap();
        assert_eq!(loaded, record);

        assert!(store
            .get(&RecordId::from("urn:ogc:def:crs:EPSG::4326"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn upsert_overwrites_existing_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut record = ellipsoid();
        store.upsert(&record).unwrap();

        record.name = Some("World Geodetic System 1984".to_string());
        store.upsert(&record).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        let loaded = store.get(&record.id).unwrap().unwrap();
        assert_eq!(
            loaded.name.as_deref(),
            Some("World Geodetic System 1984")
        );
    }

    #[test]
    fn delete_reports_existence() {
        let store = SqliteStore::open_in_memory().unwrap();
        let record = ellipsoid();
        store.upsert(&record).unwrap();

        assert!(store.delete(&record.id).unwrap());
        assert!(!store.delete(&record.id).unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn all_orders_by_identifier() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut b = ellipsoid();
        b.id = RecordId::from("urn:ogc:def:ellipsoid:EPSG::7002");
        store.upsert(&ellipsoid()).unwrap();
        store.upsert(&b).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[test]
    fn apply_executes_the_whole_batch() {
        let store = SqliteStore::open_in_memory().unwrap();
        let record = ellipsoid();
        let mut other = ellipsoid();
        other.id = RecordId::from("urn:ogc:def:ellipsoid:EPSG::7001");

        store
            .apply(&[
                StoreOp::Upsert(record.clone()),
                StoreOp::Upsert(other.clone()),
                StoreOp::Delete(record.id.clone()),
            ])
            .unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert!(store.get(&other.id).unwrap().is_some());
        assert!(store.get(&record.id).unwrap().is_none());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.sqlite");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.upsert(&ellipsoid()).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let loaded = store.get(&ellipsoid().id).unwrap().unwrap();
        assert_eq!(loaded.number("semiMajorAxis"), Some(6378137.0));
    }
}
