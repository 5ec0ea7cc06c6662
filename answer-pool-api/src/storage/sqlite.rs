use super::{RowKey, SheetRow, SheetStore, StoreError};
use crate::DbConnection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;

pub struct SqliteSheetStore {
    connection: DbConnection,
}

impl SqliteSheetStore {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|e| StoreError::operation_failed(format!("Lock error: {}", e)))
    }
}

fn require_sheet(conn: &Connection, sheet: &str) -> Result<(), StoreError> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sheets WHERE name = ?1",
            params![sheet],
            |_| Ok(()),
        )
        .optional()
        .map_err(|e| StoreError::operation_failed(e.to_string()))?;

    match exists {
        Some(()) => Ok(()),
        None => Err(StoreError::SheetNotFound(sheet.to_string())),
    }
}

fn insert_row(conn: &Connection, sheet: &str, cells: &[String]) -> Result<(), StoreError> {
    let cells_json = serde_json::to_string(cells)?;

    conn.execute(
        "INSERT INTO sheet_rows (sheet, cells) VALUES (?1, ?2)",
        params![sheet, cells_json],
    )
    .map_err(|e| StoreError::operation_failed(e.to_string()))?;

    Ok(())
}

fn header_cells(header: &[&str]) -> Vec<String> {
    header.iter().map(|cell| cell.to_string()).collect()
}

#[async_trait]
impl SheetStore for SqliteSheetStore {
    async fn read_keyed_rows(&self, sheet: &str) -> Result<Vec<SheetRow>, StoreError> {
        let conn = self.lock()?;
        require_sheet(&conn, sheet)?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT id, cells
                FROM sheet_rows
                WHERE sheet = ?1
                ORDER BY id ASC
                "#,
            )
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        let raw_rows = stmt
            .query_map(params![sheet], |row| {
                Ok((row.get::<_, RowKey>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| StoreError::operation_failed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        raw_rows
            .into_iter()
            .map(|(key, cells)| -> Result<SheetRow, StoreError> {
                Ok(SheetRow {
                    key,
                    cells: serde_json::from_str(&cells)?,
                })
            })
            .collect()
    }

    async fn append_row(&self, sheet: &str, cells: Vec<String>) -> Result<(), StoreError> {
        let conn = self.lock()?;
        require_sheet(&conn, sheet)?;
        insert_row(&conn, sheet, &cells)
    }

    async fn delete_row(&self, sheet: &str, key: RowKey) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        require_sheet(&conn, sheet)?;

        let deleted = conn
            .execute(
                "DELETE FROM sheet_rows WHERE sheet = ?1 AND id = ?2",
                params![sheet, key],
            )
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn ensure_sheet(&self, sheet: &str, header: &[&str]) -> Result<bool, StoreError> {
        let conn = self.lock()?;

        let created = conn
            .execute(
                "INSERT OR IGNORE INTO sheets (name, created_at) VALUES (?1, ?2)",
                params![sheet, chrono::Utc::now().timestamp()],
            )
            .map_err(|e| StoreError::operation_failed(e.to_string()))?
            > 0;

        if created {
            insert_row(&conn, sheet, &header_cells(header))?;
        }

        Ok(created)
    }

    async fn clear_sheet(&self, sheet: &str, header: &[&str]) -> Result<(), StoreError> {
        let conn = self.lock()?;
        require_sheet(&conn, sheet)?;

        conn.execute("DELETE FROM sheet_rows WHERE sheet = ?1", params![sheet])
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        insert_row(&conn, sheet, &header_cells(header))
    }

    async fn sheet_names(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT name FROM sheets ORDER BY created_at ASC, name ASC")
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::operation_failed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::operation_failed(e.to_string()))?;

        Ok(names)
    }
}
